//! Timeline use-cases: one operation per page or feed.
//!
//! The service resolves slugs and ids through the repository ports, applies
//! date filters and pagination, and hands plain page models back to the
//! inbound adapter. Unknown slugs and ids surface as
//! [`ErrorCode::NotFound`](crate::domain::ErrorCode::NotFound); a slug that
//! is not URL-safe is treated the same way without touching the store.

use std::sync::Arc;

use mockable::Clock;
use pagination::{Page, PageRequest};
use tracing::{info, warn};

use crate::domain::date_range::DateRange;
use crate::domain::listing::paginate;
use crate::domain::ports::{
    ProjectRepository, StatusFilter, StatusRepository, StatusScope, TeamRepository,
    UserRepository,
};
use crate::domain::{
    Error, NewStatus, Project, ProjectId, Slug, Status, StatusId, Team, User,
};

const USER_NOT_FOUND: &str = "User not found.";
const PROJECT_NOT_FOUND: &str = "Project not found.";
const TEAM_NOT_FOUND: &str = "Team not found.";
const STATUS_NOT_FOUND: &str = "Status not found.";

/// Page and date bounds requested for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listing {
    pub page: PageRequest,
    pub range: DateRange,
}

impl Listing {
    pub const fn new(page: PageRequest, range: DateRange) -> Self {
        Self { page, range }
    }
}

#[derive(Debug, Clone)]
pub struct UserTimeline {
    pub user: User,
    pub statuses: Page<Status>,
}

#[derive(Debug, Clone)]
pub struct ProjectTimeline {
    pub project: Project,
    /// Projects with at least one status, by name.
    pub projects: Vec<Project>,
    pub statuses: Page<Status>,
}

#[derive(Debug, Clone)]
pub struct TeamTimeline {
    pub team: Team,
    pub members: Vec<User>,
    /// Every team, by name.
    pub teams: Vec<Team>,
    pub statuses: Page<Status>,
}

/// A single status shown as a one-item page, followed by its replies.
#[derive(Debug, Clone)]
pub struct StatusThread {
    pub statuses: Page<Status>,
    pub replies: Page<Status>,
}

impl StatusThread {
    pub fn status(&self) -> Option<&Status> {
        self.statuses.items().first()
    }
}

#[derive(Debug, Clone)]
pub struct Profile {
    pub user: User,
    /// Choices for the post form.
    pub projects: Vec<Project>,
    pub statuses: Page<Status>,
}

/// Title and entries of a feed, newest first.
#[derive(Debug, Clone)]
pub struct FeedSource {
    pub title: String,
    pub statuses: Vec<Status>,
}

/// A post submitted from the web form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSubmission {
    /// Email address held by the session, if any.
    pub email: Option<String>,
    pub message: String,
    /// Raw project id from the form.
    pub project: Option<String>,
    /// Raw id of the status being replied to.
    pub reply_to: Option<String>,
}

/// Repositories and clock backing the timelines.
#[derive(Clone)]
pub struct TimelineService {
    users: Arc<dyn UserRepository>,
    projects: Arc<dyn ProjectRepository>,
    teams: Arc<dyn TeamRepository>,
    statuses: Arc<dyn StatusRepository>,
    clock: Arc<dyn Clock>,
}

fn parse_slug(raw: &str, missing: &'static str) -> Result<Slug, Error> {
    Slug::parse(raw).map_err(|_| Error::not_found(missing))
}

fn parse_optional_id<T: std::str::FromStr>(raw: Option<&str>) -> Option<T> {
    raw.map(str::trim)
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| raw.parse().ok())
}

impl TimelineService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        projects: Arc<dyn ProjectRepository>,
        teams: Arc<dyn TeamRepository>,
        statuses: Arc<dyn StatusRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            projects,
            teams,
            statuses,
            clock,
        }
    }

    /// Clock used for "today" and for stamping new statuses.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    async fn listing(&self, scope: StatusScope, listing: Listing) -> Result<Page<Status>, Error> {
        Ok(paginate(
            self.statuses.as_ref(),
            StatusFilter::top_level(scope),
            listing.page,
            listing.range,
        )
        .await?)
    }

    async fn feed(&self, title: String, scope: StatusScope) -> Result<FeedSource, Error> {
        let statuses = self.statuses.list(&StatusFilter::top_level(scope)).await?;
        Ok(FeedSource { title, statuses })
    }

    async fn user(&self, slug: &str) -> Result<User, Error> {
        let slug = parse_slug(slug, USER_NOT_FOUND)?;
        self.users
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }

    async fn project(&self, slug: &str) -> Result<Project, Error> {
        let slug = parse_slug(slug, PROJECT_NOT_FOUND)?;
        self.projects
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| Error::not_found(PROJECT_NOT_FOUND))
    }

    async fn team(&self, slug: &str) -> Result<Team, Error> {
        let slug = parse_slug(slug, TEAM_NOT_FOUND)?;
        self.teams
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| Error::not_found(TEAM_NOT_FOUND))
    }

    /// Resolve the session email to an account, rejecting with the
    /// given messages when either is missing.
    async fn session_user(
        &self,
        email: Option<&str>,
        not_logged_in: &'static str,
        no_account: &'static str,
    ) -> Result<User, Error> {
        let Some(email) = email.map(str::trim).filter(|email| !email.is_empty()) else {
            return Err(Error::forbidden(not_logged_in));
        };
        match self.users.find_by_email(email).await? {
            Some(user) => Ok(user),
            None => {
                warn!(%email, "session email has no account");
                Err(Error::forbidden(no_account))
            }
        }
    }

    /// Top-level statuses from everyone.
    pub async fn home(&self, listing: Listing) -> Result<Page<Status>, Error> {
        self.listing(StatusScope::Everyone, listing).await
    }

    pub async fn home_feed(&self) -> Result<FeedSource, Error> {
        self.feed("All status updates".to_owned(), StatusScope::Everyone)
            .await
    }

    pub async fn user_timeline(&self, slug: &str, listing: Listing) -> Result<UserTimeline, Error> {
        let user = self.user(slug).await?;
        let statuses = self.listing(StatusScope::User(user.id()), listing).await?;
        Ok(UserTimeline { user, statuses })
    }

    pub async fn user_feed(&self, slug: &str) -> Result<FeedSource, Error> {
        let user = self.user(slug).await?;
        self.feed(
            format!("Updates by {}", user.username()),
            StatusScope::User(user.id()),
        )
        .await
    }

    pub async fn project_timeline(
        &self,
        slug: &str,
        listing: Listing,
    ) -> Result<ProjectTimeline, Error> {
        let project = self.project(slug).await?;
        let projects = self.projects.list_active().await?;
        let statuses = self
            .listing(StatusScope::Project(project.id()), listing)
            .await?;
        Ok(ProjectTimeline {
            project,
            projects,
            statuses,
        })
    }

    pub async fn project_feed(&self, slug: &str) -> Result<FeedSource, Error> {
        let project = self.project(slug).await?;
        self.feed(
            format!("Updates for {}", project.name()),
            StatusScope::Project(project.id()),
        )
        .await
    }

    pub async fn team_timeline(&self, slug: &str, listing: Listing) -> Result<TeamTimeline, Error> {
        let team = self.team(slug).await?;
        let members = self.teams.members(team.id()).await?;
        let teams = self.teams.list_all().await?;
        let statuses = self.listing(StatusScope::Team(team.id()), listing).await?;
        Ok(TeamTimeline {
            team,
            members,
            teams,
            statuses,
        })
    }

    pub async fn team_feed(&self, slug: &str) -> Result<FeedSource, Error> {
        let team = self.team(slug).await?;
        self.feed(
            format!("Updates from {}", team.name()),
            StatusScope::Team(team.id()),
        )
        .await
    }

    /// A status and one page of its replies. Replies are listed newest
    /// first and are not date-filtered.
    pub async fn status_thread(&self, id: &str, page: PageRequest) -> Result<StatusThread, Error> {
        let id: StatusId = id
            .parse()
            .map_err(|_| Error::not_found(STATUS_NOT_FOUND))?;
        let statuses = self
            .statuses
            .page(
                &StatusFilter::including_replies(StatusScope::Single(id)),
                PageRequest::first(page.per_page()),
            )
            .await?;
        if statuses.is_empty() {
            return Err(Error::not_found(STATUS_NOT_FOUND));
        }
        let replies = self
            .statuses
            .page(
                &StatusFilter::including_replies(StatusScope::RepliesTo(id)),
                page,
            )
            .await?;
        Ok(StatusThread { statuses, replies })
    }

    /// The signed-in user's recent statuses and the post form choices.
    pub async fn profile(&self, email: Option<&str>, page: PageRequest) -> Result<Profile, Error> {
        let user = self
            .session_user(
                email,
                "You must be logged in to see a profile!",
                "You must have a user account to see your profile!",
            )
            .await?;
        let statuses = self
            .listing(
                StatusScope::User(user.id()),
                Listing::new(page, DateRange::unbounded()),
            )
            .await?;
        let projects = self.projects.list_all().await?;
        Ok(Profile {
            user,
            projects,
            statuses,
        })
    }

    /// Create a status for the signed-in user.
    ///
    /// An unknown or malformed project or reply target is ignored rather
    /// than rejected.
    pub async fn post_status(&self, submission: StatusSubmission) -> Result<StatusId, Error> {
        let user = self
            .session_user(
                submission.email.as_deref(),
                "You must be logged in to statusize!",
                "You must have a user account to statusize!",
            )
            .await?;

        if submission.message.trim().is_empty() {
            warn!(user = %user.username(), "rejected empty status");
            return Err(Error::not_found("You cannot statusize nothing!"));
        }

        let project_id = match parse_optional_id::<ProjectId>(submission.project.as_deref()) {
            Some(id) => self.projects.find_by_id(id).await?.map(|project| project.id()),
            None => None,
        };
        let reply_to = match parse_optional_id::<StatusId>(submission.reply_to.as_deref()) {
            Some(id) => self.statuses.find_by_id(id).await?.map(|status| status.id()),
            None => None,
        };

        let new_status = NewStatus {
            user_id: user.id(),
            project_id,
            content_html: submission.message.clone(),
            content: submission.message,
            reply_to,
            created: self.clock.utc(),
        };
        let id = self.statuses.insert(new_status).await?;
        info!(
            status_id = %id,
            user = %user.username(),
            project_id = ?project_id.map(ProjectId::get),
            reply_to = ?reply_to.map(StatusId::get),
            "status posted"
        );
        Ok(id)
    }
}
