//! Global configuration for anno-sweep runtime behavior.
//!
//! Switches here are set once at startup and read during parsing, so
//! they cost a single atomic load per record.

use std::sync::atomic::{AtomicBool, Ordering};

/// Global flag controlling degenerate annotation intervals.
///
/// A record whose end field is not greater than its start field converts
/// to an inclusive interval with `end < start`. By default such a record
/// is rejected with [`RecordError::InvalidInterval`]. When this flag is
/// set, the record is loaded as-is: it can never contain a query position
/// and never raises the chromosome's maximum span.
///
/// [`RecordError::InvalidInterval`]: crate::records::RecordError::InvalidInterval
static ALLOW_DEGENERATE: AtomicBool = AtomicBool::new(false);

/// Accept degenerate intervals instead of failing the load.
///
/// # Example
///
/// ```
/// use anno_sweep::config;
///
/// // Enable at startup before any parsing
/// config::set_allow_degenerate(true);
///
/// // chr1  A  B  100  100  ->  loaded as [100, 99], never matches
/// # config::set_allow_degenerate(false);
/// ```
#[inline]
pub fn set_allow_degenerate(enabled: bool) {
    ALLOW_DEGENERATE.store(enabled, Ordering::Release);
}

/// Check whether degenerate intervals are accepted.
#[inline]
pub fn allow_degenerate() -> bool {
    ALLOW_DEGENERATE.load(Ordering::Acquire)
}

/// Returns true when an inclusive interval `[start, end]` should be
/// rejected under the current configuration.
#[inline]
pub fn rejects_interval(start: i64, end: i64) -> bool {
    end < start && !allow_degenerate()
}
