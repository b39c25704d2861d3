//! Reference world contract: what the runner needs beyond [`SearchWorld`].
//!
//! Worlds provide domain data only: a start state, the policy their
//! domain calls for, and a stable identifier. Searching, enumeration and
//! report hashing stay in the runner.

use waypoint_search::contract::SearchWorld;
use waypoint_search::policy::SearchPolicy;

/// A self-describing world the runner can execute without extra input.
pub trait ReferenceWorld: SearchWorld {
    /// Unique world identifier (e.g., `"reindeer_maze"`).
    fn world_id(&self) -> &str;

    /// The state search starts from.
    fn start(&self) -> Self::State;

    /// The policy this domain is meant to be searched with.
    fn policy(&self) -> SearchPolicy {
        SearchPolicy::default()
    }
}
