//! End-to-end tests for the Atom feeds.

mod support;

use actix_web::http::{StatusCode, header};
use actix_web::test;
use atom_syndication::Feed;
use rstest::rstest;
use standup::domain::feed::ATOM_CONTENT_TYPE;

use support::{SITE_URL, app, body_text, seeded_store, state};

async fn fetch(path: &str) -> (StatusCode, Option<String>, String) {
    let service = test::init_service(app(state(seeded_store(), 20))).await;
    let res = test::call_service(&service, test::TestRequest::get().uri(path).to_request()).await;
    let status = res.status();
    let content_type = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    (status, content_type, body_text(res).await)
}

async fn feed(path: &str) -> Feed {
    let (status, content_type, body) = fetch(path).await;
    assert_eq!(status, StatusCode::OK, "{path}: {body}");
    assert_eq!(content_type.as_deref(), Some(ATOM_CONTENT_TYPE));
    body.parse::<Feed>().expect("valid atom")
}

fn entry_ids(feed: &Feed) -> Vec<String> {
    feed.entries().iter().map(|entry| entry.id().to_owned()).collect()
}

#[rstest]
#[case("/statuses.xml", "All status updates", &[1, 2, 4])]
#[case("/user/bob.xml", "Updates by bob", &[2])]
#[case("/project/webdev.xml", "Updates for Web Dev", &[1])]
#[case("/team/platform.xml", "Updates from Platform", &[1, 2])]
#[case("/team/web.xml", "Updates from Web", &[4])]
#[actix_web::test]
async fn feeds_list_top_level_statuses(
    #[case] path: &str,
    #[case] title: &str,
    #[case] ids: &[i32],
) {
    let feed = feed(path).await;
    assert_eq!(feed.title().value.as_str(), title);
    let expected: Vec<String> = ids.iter().map(|id| format!("{SITE_URL}status/{id}")).collect();
    assert_eq!(entry_ids(&feed), expected);
}

#[actix_web::test]
async fn feed_links_point_at_the_site() {
    let feed = feed("/user/ada.xml").await;
    assert_eq!(feed.id(), format!("{SITE_URL}user/ada.xml"));
    let rels: Vec<(&str, &str)> = feed
        .links()
        .iter()
        .map(|link| (link.rel(), link.href()))
        .collect();
    assert!(rels.contains(&("self", "https://standup.example/user/ada.xml")));
    assert!(rels.contains(&("alternate", SITE_URL)));
}

#[actix_web::test]
async fn project_entries_are_headed_by_the_project() {
    let feed = feed("/statuses.xml").await;
    let content = |index: usize| {
        feed.entries()
            .get(index)
            .and_then(|entry| entry.content())
            .and_then(|content| content.value())
            .expect("entry content")
            .to_owned()
    };
    assert!(content(0).starts_with("<h3>Web Dev</h3>"));
    assert!(!content(1).contains("<h3>"));
}

#[actix_web::test]
async fn entries_credit_the_author() {
    let feed = feed("/user/ada.xml").await;
    let entry = feed.entries().first().expect("one entry");
    assert_eq!(entry.title().value.as_str(), "From ada at 09:00AM UTC");
    let authors: Vec<&str> = entry.authors().iter().map(|person| person.name()).collect();
    assert_eq!(authors, vec!["Ada Lovelace"]);
    assert_eq!(feed.updated().to_rfc3339(), "2024-01-10T09:00:00+00:00");
}

#[rstest]
#[case("/user/nobody.xml")]
#[case("/project/nothing.xml")]
#[case("/team/nothing.xml")]
#[actix_web::test]
async fn unknown_feed_owners_are_not_found(#[case] path: &str) {
    let (status, _, _) = fetch(path).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
