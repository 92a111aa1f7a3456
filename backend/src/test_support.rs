//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`). Only
//! compiled for tests or with the `test-support` feature.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{Project, ProjectId, Slug, Team, TeamId, User, UserId};

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Clock frozen at the given UTC wall time.
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        Self(utc(year, month, day, hour, minute))
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Build a UTC timestamp, panicking on impossible fixtures.
pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_else(|| panic!("invalid fixture time {year}-{month}-{day} {hour}:{minute}"))
}

fn slug(raw: &str) -> Slug {
    Slug::parse(raw).unwrap_or_else(|error| panic!("invalid fixture slug {raw:?}: {error}"))
}

/// A user whose slug and email derive from `username`.
pub fn user(id: i32, username: &str) -> User {
    User::new(
        UserId::new(id),
        username,
        slug(username),
        format!("{username}@example.com"),
        None,
    )
}

pub fn project(id: i32, name: &str, slug_raw: &str) -> Project {
    Project::new(ProjectId::new(id), name, slug(slug_raw), None)
}

pub fn team(id: i32, name: &str, slug_raw: &str) -> Team {
    Team::new(TeamId::new(id), name, slug(slug_raw))
}
