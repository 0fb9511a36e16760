//! Types for verification flow results

/// Result of submitting a code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Backend accepted the code; the user was sent to the login screen
    Verified,
    /// Backend rejected the code; the message was shown to the user
    Rejected { message: String },
    /// The screen was closed while the call was outstanding; result ignored
    Discarded,
}

/// Result of requesting a new code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResendOutcome {
    /// Request sent and a new cooldown started
    Dispatched,
    /// Still cooling down; nothing happened
    NotReady { seconds_remaining: u32 },
    /// Backend refused or was unreachable; the cooldown still restarted
    Failed { message: String },
    /// The screen was closed while the call was outstanding; result ignored
    Discarded,
}
