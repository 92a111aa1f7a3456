//! Behavioural coverage for the in-memory repositories.

use rstest::{fixture, rstest};

use super::*;
use crate::domain::date_range::DateRange;
use crate::test_support::{project, team, user, utc};

fn post(
    store: &InMemoryStore,
    author: i32,
    project_id: Option<i32>,
    hour: u32,
    reply_to: Option<StatusId>,
) -> StatusId {
    store
        .add_status(NewStatus {
            user_id: UserId::new(author),
            project_id: project_id.map(ProjectId::new),
            content: format!("update at {hour}"),
            content_html: format!("update at {hour}"),
            reply_to,
            created: utc(2024, 1, 5, hour, 0),
        })
        .expect("seed status")
}

#[fixture]
fn store() -> InMemoryStore {
    let store = InMemoryStore::new();
    store.add_user(user(1, "ada")).expect("seed");
    store.add_user(user(2, "grace")).expect("seed");
    store.add_user(user(3, "linus")).expect("seed");
    store.add_project(project(1, "Zamboni", "zamboni")).expect("seed");
    store.add_project(project(2, "Kitsune", "kitsune")).expect("seed");
    store.add_project(project(3, "Idle", "idle")).expect("seed");
    store.add_team(team(1, "Web", "web")).expect("seed");
    store.add_team(team(2, "Apps", "apps")).expect("seed");
    store.add_member(TeamId::new(1), UserId::new(1)).expect("seed");
    store.add_member(TeamId::new(1), UserId::new(2)).expect("seed");
    store
}

fn ids(statuses: &[Status]) -> Vec<i32> {
    statuses.iter().map(|status| status.id().get()).collect()
}

#[rstest]
#[tokio::test]
async fn listings_are_newest_first_and_skip_replies(store: InMemoryStore) {
    let first = post(&store, 1, None, 8, None);
    let second = post(&store, 2, Some(1), 9, None);
    post(&store, 3, None, 10, Some(first));

    let listed = store
        .list(&StatusFilter::top_level(StatusScope::Everyone))
        .await
        .expect("list");
    assert_eq!(ids(&listed), vec![second.get(), first.get()]);
    assert_eq!(listed[0].project().map(Project::name), Some("Zamboni"));
}

#[rstest]
#[tokio::test]
async fn team_scope_unions_member_statuses(store: InMemoryStore) {
    let ada = post(&store, 1, None, 8, None);
    let grace = post(&store, 2, None, 9, None);
    post(&store, 3, None, 10, None);

    let listed = store
        .list(&StatusFilter::top_level(StatusScope::Team(TeamId::new(1))))
        .await
        .expect("list");
    assert_eq!(ids(&listed), vec![grace.get(), ada.get()]);
}

#[rstest]
#[tokio::test]
async fn replies_scope_lists_only_replies(store: InMemoryStore) {
    let parent = post(&store, 1, None, 8, None);
    let reply = post(&store, 2, None, 9, Some(parent));

    let page = store
        .page(
            &StatusFilter::including_replies(StatusScope::RepliesTo(parent)),
            PageRequest::first(20),
        )
        .await
        .expect("page");
    assert_eq!(ids(page.items()), vec![reply.get()]);
}

#[rstest]
#[tokio::test]
async fn date_bounds_are_inclusive(store: InMemoryStore) {
    post(&store, 1, None, 8, None);
    let nine = post(&store, 1, None, 9, None);
    let ten = post(&store, 1, None, 10, None);
    post(&store, 1, None, 11, None);

    let range = DateRange {
        start: Some(utc(2024, 1, 5, 9, 0)),
        end: Some(utc(2024, 1, 5, 10, 0)),
    };
    let listed = store
        .list(&StatusFilter::top_level(StatusScope::Everyone).within(range))
        .await
        .expect("list");
    assert_eq!(ids(&listed), vec![ten.get(), nine.get()]);
}

#[rstest]
#[tokio::test]
async fn pages_past_the_end_are_empty(store: InMemoryStore) {
    for hour in 0..3 {
        post(&store, 1, None, hour, None);
    }

    let page = store
        .page(
            &StatusFilter::top_level(StatusScope::Everyone),
            PageRequest::new(3, 2),
        )
        .await
        .expect("page");
    assert!(page.is_empty());
    assert_eq!(page.total(), 3);
    assert_eq!(page.total_pages(), 2);
}

#[rstest]
#[tokio::test]
async fn active_projects_are_sorted_by_name(store: InMemoryStore) {
    post(&store, 1, Some(1), 8, None);
    post(&store, 1, Some(2), 9, None);

    let names: Vec<_> = store
        .list_active()
        .await
        .expect("projects")
        .iter()
        .map(|project| project.name().to_owned())
        .collect();
    assert_eq!(names, vec!["Kitsune", "Zamboni"]);
    assert_eq!(ProjectRepository::list_all(&store).await.expect("all").len(), 3);
}

#[rstest]
#[tokio::test]
async fn members_are_sorted_by_username(store: InMemoryStore) {
    store.add_member(TeamId::new(1), UserId::new(1)).expect("idempotent");
    let members = store.members(TeamId::new(1)).await.expect("members");
    let names: Vec<_> = members.iter().map(User::username).collect();
    assert_eq!(names, vec!["ada", "grace"]);
}

#[rstest]
#[tokio::test]
async fn users_resolve_by_email_and_slug(store: InMemoryStore) {
    let by_email = store
        .find_by_email("grace@example.com")
        .await
        .expect("lookup");
    assert_eq!(by_email.map(|user| user.id()), Some(UserId::new(2)));

    let slug = Slug::parse("nobody").expect("slug");
    assert!(UserRepository::find_by_slug(&store, &slug).await.expect("lookup").is_none());
}

#[rstest]
fn statuses_need_a_known_author(store: InMemoryStore) {
    let result = store.add_status(NewStatus {
        user_id: UserId::new(99),
        project_id: None,
        content: "ghost".to_owned(),
        content_html: "ghost".to_owned(),
        reply_to: None,
        created: utc(2024, 1, 5, 8, 0),
    });
    assert!(result.is_err());
    assert_eq!(store.status_count().expect("count"), 0);
}
