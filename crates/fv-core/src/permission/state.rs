//! Permission machine state vocabulary.

use serde::{Deserialize, Serialize};

/// State of the broad-storage-access grant flow.
///
/// Exactly one instance exists per machine; the machine lives as long as the
/// host component and only a fresh process start resets it to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionState {
    /// Grant status has not been probed, or the last consent flow ended
    /// without a grant; the next `ensure_access` re-probes.
    Unknown,
    /// The grant is held.
    Granted,
    /// The host reported an explicit denial. Part of the public vocabulary
    /// for hosts that surface denial as a distinct signal; the single-slot
    /// machine itself resolves a denied consent result to `Unknown` so a
    /// later call re-probes instead of trusting a stale denial.
    Denied,
    /// A consent flow has been launched and its result is outstanding.
    RequestInFlight,
    /// A consent flow was wanted but no foreground context was available;
    /// retried once when the host resumes.
    RequestDeferred,
}
