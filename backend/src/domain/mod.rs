//! Domain entities, formatting and the timeline use-cases.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failures.
//! - [`User`], [`Project`], [`Team`], [`Status`]: the read model.
//! - [`TimelineService`]: one operation per page or feed.
//! - [`ports`]: repository traits implemented by `outbound` adapters.

pub mod date_range;
pub mod error;
pub mod feed;
pub mod formatting;
pub mod ids;
pub mod listing;
pub mod ports;
pub mod project;
pub mod slug;
pub mod status;
pub mod team;
pub mod timeline;
pub mod user;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{ProjectId, StatusId, TeamId, UserId};
pub use self::project::Project;
pub use self::slug::{Slug, SlugValidationError};
pub use self::status::{NewStatus, Status};
pub use self::team::Team;
pub use self::timeline::{
    FeedSource, Listing, Profile, ProjectTimeline, StatusSubmission, StatusThread, TeamTimeline,
    TimelineService, UserTimeline,
};
pub use self::user::User;

/// Convenient result alias for handlers.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use standup::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
