//! Job lifecycle state machine.
//!
//! Status names are shared with the `driftnet-db` crate's `JobStatus` enum;
//! the machine is kept here as plain string constants because this crate
//! must have zero internal dependencies.
//!
//! This service only ever creates jobs in PENDING and refuses to re-dispatch
//! COMPLETED jobs; the remaining transitions are driven by the external
//! prediction pipeline.

/// Job has been created and is waiting for the prediction pipeline.
pub const STATUS_PENDING: &str = "PENDING";
/// The prediction pipeline has picked the job up.
pub const STATUS_IN_PROGRESS: &str = "IN_PROGRESS";
/// Terminal: imagery was acquired and inference results stored.
pub const STATUS_COMPLETED: &str = "COMPLETED";
/// Terminal: the pipeline gave up on the job.
pub const STATUS_FAILED: &str = "FAILED";

/// Valid target statuses reachable from `from`.
///
/// Terminal states return an empty slice.
pub fn valid_transitions(from: &str) -> &'static [&'static str] {
    match from {
        STATUS_PENDING => &[STATUS_IN_PROGRESS, STATUS_FAILED],
        STATUS_IN_PROGRESS => &[STATUS_COMPLETED, STATUS_FAILED],
        _ => &[],
    }
}

/// Check whether a transition from `from` to `to` is valid.
pub fn can_transition(from: &str, to: &str) -> bool {
    valid_transitions(from).contains(&to)
}

/// COMPLETED and FAILED accept no further transitions.
pub fn is_terminal(status: &str) -> bool {
    matches!(status, STATUS_COMPLETED | STATUS_FAILED)
}
