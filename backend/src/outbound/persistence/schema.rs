//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts. `email` is the session identity.
    users (id) {
        id -> Int4,
        username -> Varchar,
        slug -> Varchar,
        email -> Varchar,
        name -> Nullable<Varchar>,
    }
}

diesel::table! {
    projects (id) {
        id -> Int4,
        name -> Varchar,
        slug -> Varchar,
        /// Source repository root used for `pull NNN` links.
        repo_url -> Nullable<Varchar>,
    }
}

diesel::table! {
    teams (id) {
        id -> Int4,
        name -> Varchar,
        slug -> Varchar,
    }
}

diesel::table! {
    /// Team membership join table.
    team_users (team_id, user_id) {
        team_id -> Int4,
        user_id -> Int4,
    }
}

diesel::table! {
    /// Status updates. Rows with `reply_to_id` set are replies.
    statuses (id) {
        id -> Int4,
        user_id -> Int4,
        project_id -> Nullable<Int4>,
        content -> Text,
        content_html -> Text,
        created -> Timestamptz,
        reply_to_id -> Nullable<Int4>,
    }
}

diesel::joinable!(statuses -> users (user_id));
diesel::joinable!(statuses -> projects (project_id));
diesel::joinable!(team_users -> teams (team_id));
diesel::joinable!(team_users -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, projects, teams, team_users, statuses);
