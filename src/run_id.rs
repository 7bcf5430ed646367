//! Process-level run ID for tracking ranking executions.
//!
//! Each process gets a unique ULID at startup. Every batch started within
//! the same process carries this ID, enabling:
//! - Traceability of which process produced each batch and record
//! - Separate batches for different runs (even on the same day)
//!
//! # Example
//! ```
//! use shortlist::run_id;
//!
//! // Get the process-level run ID (same value for entire process lifetime)
//! let id = run_id::get();
//! println!("Current run: {}", id);
//!
//! // Generate a fresh ULID for batches and match records
//! let batch_id = run_id::generate();
//! ```

use once_cell::sync::Lazy;
use ulid::Ulid;

/// Process-level run ID, generated once at first access.
static RUN_ID: Lazy<String> = Lazy::new(|| Ulid::new().to_string());

/// Returns the process-level run ID.
///
/// This ID is:
/// - Generated once per process (at first call)
/// - Time-ordered (ULIDs sort lexicographically by creation time)
/// - 26 characters, URL-safe
///
/// Use this for the `run_id` column on ranking batches.
#[inline]
pub fn get() -> &'static str {
    &RUN_ID
}

/// Generates a fresh ULID.
///
/// Use this for batch and match record IDs, where every row needs its own
/// unique, sortable identifier.
#[inline]
pub fn generate() -> String {
    Ulid::new().to_string()
}
