//! Server-side HTML for the listing pages.
//!
//! Each function returns a complete document. Every piece of user-supplied
//! text goes through [`escape_html`]; status bodies are rendered by
//! [`status_body`], which demotes any HTML the author typed to text.

use actix_web::http::StatusCode;
use pagination::{Page, page_query};
use url::form_urlencoded;

use crate::domain::date_range::{DateQuery, LAST_SEVEN_DAYS, TODAY};
use crate::domain::formatting::{escape_html, status_body};
use crate::domain::{
    Profile, Project, ProjectTimeline, Status, StatusThread, Team, TeamTimeline, User,
    UserTimeline,
};

const SITE_NAME: &str = "Standup";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Wrap `body` in the site chrome.
fn document(title: &str, feed: Option<&str>, body: &str) -> String {
    let title = escape_html(title);
    let feed_link = feed
        .map(|href| {
            format!(
                r#"<link rel="alternate" type="application/atom+xml" title="{title}" href="{}">"#,
                escape_html(href)
            )
        })
        .unwrap_or_default();
    format!(
        concat!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n",
            "<meta charset=\"utf-8\">\n<title>{title} | {site}</title>\n{feed_link}\n",
            "</head>\n<body>\n",
            "<header><a href=\"/\">{site}</a> <a href=\"/profile/\">Profile</a></header>\n",
            "<main>\n<h1>{title}</h1>\n{body}</main>\n</body>\n</html>\n"
        ),
        title = title,
        site = SITE_NAME,
        feed_link = feed_link,
        body = body,
    )
}

/// Query string carrying only the active date filter.
fn filter_query(dates: &DateQuery) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in dates.pairs() {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

fn date_filters() -> String {
    format!(
        concat!(
            "<nav class=\"dates\">",
            "<a href=\"?\">All</a> ",
            "<a href=\"?dates={week}\">Last 7 days</a> ",
            "<a href=\"?dates={today}\">Today</a>",
            "</nav>\n"
        ),
        week = LAST_SEVEN_DAYS,
        today = TODAY,
    )
}

fn user_link(user: &User) -> String {
    format!(
        r#"<a class="user" href="/user/{}">{}</a>"#,
        user.slug(),
        escape_html(user.display_name())
    )
}

fn project_link(project: &Project) -> String {
    format!(
        r#"<a class="project" href="/project/{}">{}</a>"#,
        project.slug(),
        escape_html(project.name())
    )
}

fn team_link(team: &Team) -> String {
    format!(
        r#"<a class="team" href="/team/{}">{}</a>"#,
        team.slug(),
        escape_html(team.name())
    )
}

fn status_item(status: &Status) -> String {
    let project = status
        .project()
        .map(|project| format!(" {}", project_link(project)))
        .unwrap_or_default();
    format!(
        concat!(
            "<article class=\"status\" id=\"status-{id}\">\n",
            "<header>{author}{project} ",
            "<a href=\"/status/{id}\"><time datetime=\"{iso}\">{when}</time></a></header>\n",
            "<div class=\"content\">{body}</div>\n",
            "</article>\n"
        ),
        id = status.id(),
        author = user_link(status.author()),
        project = project,
        iso = status.created().to_rfc3339(),
        when = status.created().format(TIME_FORMAT),
        body = status_body(status),
    )
}

fn pager<T>(page: &Page<T>, query: &str) -> String {
    if page.total_pages() <= 1 {
        return String::new();
    }
    let mut nav = String::from("<nav class=\"pager\">");
    if let Some(prev) = page.prev_page() {
        nav.push_str(&format!(
            r#"<a rel="prev" href="?{}">Newer</a> "#,
            escape_html(&page_query(query, prev))
        ));
    }
    nav.push_str(&format!("Page {} of {}", page.page(), page.total_pages()));
    if let Some(next) = page.next_page() {
        nav.push_str(&format!(
            r#" <a rel="next" href="?{}">Older</a>"#,
            escape_html(&page_query(query, next))
        ));
    }
    nav.push_str("</nav>\n");
    nav
}

/// Statuses followed by pagination links that keep `dates` applied.
fn status_list(statuses: &Page<Status>, dates: &DateQuery) -> String {
    if statuses.is_empty() {
        return "<p class=\"empty\">No status updates.</p>\n".to_owned();
    }
    let mut html = String::from("<section class=\"statuses\">\n");
    for status in statuses.items() {
        html.push_str(&status_item(status));
    }
    html.push_str("</section>\n");
    html.push_str(&pager(statuses, &filter_query(dates)));
    html
}

fn sidebar<T>(heading: &str, items: &[T], link: impl Fn(&T) -> String) -> String {
    let mut html = format!("<aside>\n<h2>{heading}</h2>\n<ul>\n");
    for item in items {
        html.push_str(&format!("<li>{}</li>\n", link(item)));
    }
    html.push_str("</ul>\n</aside>\n");
    html
}

pub fn home(statuses: &Page<Status>, dates: &DateQuery) -> String {
    let body = format!("{}{}", date_filters(), status_list(statuses, dates));
    document("All status updates", Some("/statuses.xml"), &body)
}

pub fn user(timeline: &UserTimeline, dates: &DateQuery) -> String {
    let user = &timeline.user;
    let feed = format!("/user/{}.xml", user.slug());
    let body = format!("{}{}", date_filters(), status_list(&timeline.statuses, dates));
    document(user.display_name(), Some(&feed), &body)
}

pub fn project(timeline: &ProjectTimeline, dates: &DateQuery) -> String {
    let project = &timeline.project;
    let feed = format!("/project/{}.xml", project.slug());
    let repo = project
        .repo_url()
        .map(|url| {
            format!(
                "<p class=\"repo\"><a href=\"{0}\">{0}</a></p>\n",
                escape_html(url)
            )
        })
        .unwrap_or_default();
    let body = format!(
        "{repo}{}{}{}",
        date_filters(),
        status_list(&timeline.statuses, dates),
        sidebar("Projects", &timeline.projects, project_link),
    );
    document(project.name(), Some(&feed), &body)
}

pub fn team(timeline: &TeamTimeline, dates: &DateQuery) -> String {
    let team = &timeline.team;
    let feed = format!("/team/{}.xml", team.slug());
    let body = format!(
        "{}{}{}{}",
        date_filters(),
        status_list(&timeline.statuses, dates),
        sidebar("Members", &timeline.members, user_link),
        sidebar("Teams", &timeline.teams, team_link),
    );
    document(team.name(), Some(&feed), &body)
}

fn post_form(projects: &[Project], reply_to: Option<&Status>, redirect_to: &str) -> String {
    let mut form = String::from("<form class=\"statusize\" method=\"post\" action=\"/statusize/\">\n");
    form.push_str("<textarea name=\"message\" rows=\"3\" required></textarea>\n");
    if !projects.is_empty() {
        form.push_str("<select name=\"project\">\n<option value=\"\">No project</option>\n");
        for project in projects {
            form.push_str(&format!(
                "<option value=\"{}\">{}</option>\n",
                project.id(),
                escape_html(project.name())
            ));
        }
        form.push_str("</select>\n");
    }
    if let Some(status) = reply_to {
        form.push_str(&format!(
            "<input type=\"hidden\" name=\"reply_to\" value=\"{}\">\n",
            status.id()
        ));
    }
    form.push_str(&format!(
        "<input type=\"hidden\" name=\"redirect_to\" value=\"{}\">\n",
        escape_html(redirect_to)
    ));
    form.push_str("<button type=\"submit\">Statusize</button>\n</form>\n");
    form
}

pub fn status(thread: &StatusThread) -> String {
    let title = thread
        .status()
        .map(|status| format!("Status by {}", status.author().display_name()))
        .unwrap_or_else(|| "Status".to_owned());
    let mut body = status_list(&thread.statuses, &DateQuery::default());
    if let Some(status) = thread.status() {
        body.push_str("<h2>Replies</h2>\n");
        body.push_str(&status_list(&thread.replies, &DateQuery::default()));
        body.push_str(&post_form(
            &[],
            Some(status),
            &format!("/status/{}", status.id()),
        ));
    }
    document(&title, None, &body)
}

pub fn profile(profile: &Profile) -> String {
    let user = &profile.user;
    let body = format!(
        "<p>Signed in as {}</p>\n{}{}",
        user_link(user),
        post_form(&profile.projects, None, "/profile/"),
        status_list(&profile.statuses, &DateQuery::default()),
    );
    document(user.display_name(), None, &body)
}

/// Minimal page for an error status.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!("<p class=\"error\">{}</p>\n", escape_html(message));
    document(&format!("{} {title}", status.as_u16()), None, &body)
}
