//! Configuration for a reconciler session. No file or environment I/O
//! happens here — this layer has no CLI/file/env surface; a host that
//! wants to persist settings does so on its own side and hands the
//! result to [`crate::harness::Harness::new`].

/// Tunables for one reconciler/load-tracker session.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcilerConfig {
    /// Optional hard cap on simultaneously pending `loadAudio` requests.
    /// `None` means unbounded.
    pub max_simultaneous_loads: Option<usize>,
}

impl ReconcilerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_simultaneous_loads(mut self, max: usize) -> Self {
        self.max_simultaneous_loads = Some(max);
        self
    }
}
