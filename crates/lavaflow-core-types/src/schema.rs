//! Event names carried in the `event` field of structured log records

// Operation lifecycle
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Per-record diagnostic events
pub const EVENT_DROPPED: &str = "dropped";
pub const EVENT_SKIPPED: &str = "skipped";
pub const EVENT_SLIVERS_REMOVED: &str = "slivers_removed";
pub const EVENT_WRITE_FAILED: &str = "write_failed";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_distinct() {
        let names = [
            EVENT_START,
            EVENT_END,
            EVENT_END_ERROR,
            EVENT_DROPPED,
            EVENT_SKIPPED,
            EVENT_SLIVERS_REMOVED,
            EVENT_WRITE_FAILED,
        ];
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
