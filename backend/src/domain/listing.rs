//! Date-bounded pagination over a status repository.

use pagination::{Page, PageRequest};

use crate::domain::Status;
use crate::domain::date_range::DateRange;
use crate::domain::ports::{PersistenceError, StatusFilter, StatusRepository};

/// Fetch one page of `filter`, narrowed to `range` when it carries bounds.
///
/// Page clamping belongs to [`PageRequest`]; a page past the end comes back
/// empty with the real totals.
pub async fn paginate(
    statuses: &dyn StatusRepository,
    filter: StatusFilter,
    request: PageRequest,
    range: DateRange,
) -> Result<Page<Status>, PersistenceError> {
    let filter = if range == DateRange::unbounded() {
        filter
    } else {
        filter.within(range)
    };
    statuses.page(&filter, request).await
}
