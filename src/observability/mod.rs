//! Observability for lessonguard
//!
//! - Structured logging (JSON lines on stderr)
//! - Begin/complete scopes with elapsed time
//!
//! Observability is read-only: nothing here influences validation results.
//!
//! ```ignore
//! use lessonguard::observability::{Logger, ObservationScope};
//!
//! Logger::info("COURSES_DISCOVERED", &[("count", "5")]);
//!
//! let scope = ObservationScope::new("VALIDATION_RUN");
//! // ... do work ...
//! scope.complete();
//! ```

mod logger;
mod scope;

pub use logger::{Logger, Severity};
pub use scope::{ObservationScope, Timer};
