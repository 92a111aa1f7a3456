//! Query-string parameters shared by the listing pages.

use mockable::Clock;
use pagination::PageRequest;
use serde::Deserialize;

use crate::domain::Listing;
use crate::domain::date_range::{DateQuery, DateRange};

/// `?page=&dates=&day=&week=` as sent by the browser. Every field is kept
/// as raw text; bad values fall back to defaults instead of failing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingQuery {
    pub page: Option<String>,
    pub dates: Option<String>,
    pub day: Option<String>,
    pub week: Option<String>,
}

impl ListingQuery {
    pub fn date_query(&self) -> DateQuery {
        DateQuery {
            dates: self.dates.clone(),
            day: self.day.clone(),
            week: self.week.clone(),
        }
    }

    pub fn page_request(&self, per_page: u32) -> PageRequest {
        PageRequest::from_query(self.page.as_deref(), per_page)
    }

    /// Page and date bounds relative to `clock`'s today.
    pub fn listing(&self, per_page: u32, clock: &dyn Clock) -> Listing {
        Listing::new(
            self.page_request(per_page),
            DateRange::from_query(&self.date_query(), clock),
        )
    }
}
