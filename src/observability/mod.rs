//! Observability for cattery
//!
//! Structured JSON line logging. Logging never changes the outcome of the
//! operation being logged.
//!
//! ```ignore
//! use cattery::observability::Logger;
//!
//! Logger::info("CAT_CREATED", &[("id", "42")]);
//! ```

mod logger;

pub use logger::{Logger, Severity};
