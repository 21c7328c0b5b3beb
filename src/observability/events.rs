//! Observable events for the dump pipeline
//!
//! Events are explicit and typed; every log line names exactly one.

use std::fmt;

/// Observable events during a dump run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Dump run begins
    DumpStart,
    /// Dump run complete
    DumpComplete,
    /// Dump run aborted
    DumpFailed,

    /// Collection of one model's rows begins
    CollectModel,
    /// Transitive relation walk pulled referenced records
    RelationPull,

    /// Dependency sort begins
    SortStart,
    /// Dependency sort complete
    SortComplete,

    /// Output serialized
    SerializeComplete,
}

impl Event {
    /// Returns the event name used in log output
    pub fn name(&self) -> &'static str {
        match self {
            Event::DumpStart => "DUMP_START",
            Event::DumpComplete => "DUMP_COMPLETE",
            Event::DumpFailed => "DUMP_FAILED",
            Event::CollectModel => "COLLECT_MODEL",
            Event::RelationPull => "RELATION_PULL",
            Event::SortStart => "SORT_START",
            Event::SortComplete => "SORT_COMPLETE",
            Event::SerializeComplete => "SERIALIZE_COMPLETE",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
