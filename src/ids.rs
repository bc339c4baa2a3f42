//! Stable identifiers for running instances and in-flight load requests.
//!
//! Both are backed by single-writer monotonic counters (see
//! [`crate::reconcile::Reconciler`] and [`crate::loader::LoadTracker`]):
//! once an id is handed out it is never reused within the process.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle for one running sound or oscillator instance, assigned by
/// the reconciler's `node_group_counter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeGroupId(pub u64);

impl fmt::Display for NodeGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Id for a pending `loadAudio` request, assigned by the load tracker's
/// `request_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
