use crate::time::*;

/// Who did something and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub at: TimestampMs,
    pub by: Option<String>,
}

impl Activity {
    pub fn now(by: Option<String>) -> Self {
        Self {
            at: TimestampMs::now(),
            by,
        }
    }

    pub const fn at(at: TimestampMs) -> Self {
        Self { at, by: None }
    }
}
