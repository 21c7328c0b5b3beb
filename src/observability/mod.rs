//! Observability for the dump pipeline
//!
//! Structured JSON logging with typed events. Principles:
//!
//! 1. Observability is read-only: no side effects on execution
//! 2. No async or background threads
//! 3. Deterministic output (stable key ordering)
//! 4. Log lines go to stderr; stdout belongs to the dump output

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};
