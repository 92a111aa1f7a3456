//! Atom feed assembly.

use atom_syndication::{Content, Entry, Feed, Link, Person, Text};
use chrono::{DateTime, Utc};
use url::Url;

use crate::domain::formatting::format_status;
use crate::domain::{Error, Status, StatusId};

/// Media type feeds are served with.
pub const ATOM_CONTENT_TYPE: &str = "application/atom+xml; charset=utf-8";

/// Absolute URLs a feed refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedLinks {
    feed_url: Url,
    site_url: Url,
}

impl FeedLinks {
    /// `feed_url` is the feed's own address; `site_url` is the site root that
    /// status links are resolved against.
    pub fn new(feed_url: Url, site_url: Url) -> Result<Self, Error> {
        if site_url.cannot_be_a_base() {
            return Err(Error::internal(format!(
                "site url {site_url} cannot be used as a base"
            )));
        }
        Ok(Self { feed_url, site_url })
    }

    pub fn feed_url(&self) -> &Url {
        &self.feed_url
    }

    pub fn site_url(&self) -> &Url {
        &self.site_url
    }

    /// Absolute URL of a status page.
    pub fn status_url(&self, id: StatusId) -> Result<Url, Error> {
        self.site_url
            .join(&format!("status/{id}"))
            .map_err(|error| Error::internal(format!("status url for {id}: {error}")))
    }
}

fn link(href: &Url, rel: &str) -> Link {
    let mut link = Link::default();
    link.set_href(href.as_str());
    link.set_rel(rel);
    link
}

/// Title of a feed entry, e.g. `From ada at 09:05AM UTC`.
pub fn entry_title(status: &Status) -> String {
    format!(
        "From {} at {}",
        status.author().username(),
        status.created().format("%I:%M%p %Z")
    )
}

fn entry(status: &Status, links: &FeedLinks) -> Result<Entry, Error> {
    let url = links.status_url(status.id())?;
    let created = status.created().fixed_offset();

    let mut author = Person::default();
    author.set_name(status.author().display_name());

    let mut content = Content::default();
    content.set_value(format_status(status));
    content.set_content_type("html".to_owned());

    let mut entry = Entry::default();
    entry.set_title(Text::plain(entry_title(status)));
    entry.set_id(url.as_str());
    entry.set_links(vec![link(&url, "alternate")]);
    entry.set_authors(vec![author]);
    entry.set_updated(created);
    entry.set_published(created);
    entry.set_content(content);
    Ok(entry)
}

/// Build a feed with one entry per status, in the order given.
///
/// The feed's `updated` stamp is the newest status, or `generated_at` when
/// there are none.
pub fn build_feed(
    title: &str,
    statuses: &[Status],
    links: &FeedLinks,
    generated_at: DateTime<Utc>,
) -> Result<Feed, Error> {
    let entries = statuses
        .iter()
        .map(|status| entry(status, links))
        .collect::<Result<Vec<_>, _>>()?;
    let updated = statuses
        .iter()
        .map(Status::created)
        .max()
        .unwrap_or(generated_at);

    let mut feed = Feed::default();
    feed.set_title(Text::plain(title));
    feed.set_id(links.feed_url().as_str());
    feed.set_updated(updated.fixed_offset());
    feed.set_links(vec![
        link(links.feed_url(), "self"),
        link(links.site_url(), "alternate"),
    ]);
    feed.set_entries(entries);
    Ok(feed)
}
