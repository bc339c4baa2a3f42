//! Opaque time types. The reconciler never does wall-clock arithmetic;
//! these exist so a caller can't accidentally swap a timestamp for a
//! duration.

use serde::{Deserialize, Serialize};

/// Milliseconds since epoch, as handed to us by the host. Opaque: we only
/// ever compare two of these for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AudioTime(pub i64);

impl AudioTime {
    pub fn new(millis_since_epoch: i64) -> Self {
        Self(millis_since_epoch)
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }
}

/// A duration in milliseconds, floating-point (used for offsets within a
/// buffer, loop points, etc).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioDuration(pub f64);

impl AudioDuration {
    pub const ZERO: AudioDuration = AudioDuration(0.0);

    pub fn from_millis(millis: f64) -> Self {
        Self(millis)
    }

    pub fn from_secs(secs: f64) -> Self {
        Self(secs * 1000.0)
    }

    pub fn as_millis(self) -> f64 {
        self.0
    }
}

impl Eq for AudioDuration {}
