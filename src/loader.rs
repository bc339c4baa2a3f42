//! The load-request tracker (C5): assigns request ids, holds pending
//! callbacks, and routes engine completion/failure replies back to them.
//!
//! Each request carries its own one-shot completion, the same shape as a
//! reply channel but as an owned closure rather than a cross-thread
//! `mpsc::Sender`, since this core never hands work to a background thread.

use std::collections::HashMap;

use log::warn;

use crate::command::LoadRequestWire;
use crate::error::AudioError;
use crate::ids::RequestId;
use crate::tree::Source;

/// A callback invoked exactly once, with the outcome of one `loadAudio`
/// request. A plain owned closure rather than a cross-thread channel,
/// since nothing here ever runs off the calling thread.
pub type LoadCallback = Box<dyn FnOnce(Result<Source, AudioError>)>;

struct PendingLoad {
    callback: LoadCallback,
    #[allow(dead_code)] // kept for parity with the wire announcement / future diagnostics
    audio_url: String,
}

/// Owns the pending-request map and the request counter. One tracker per
/// reconciler session.
#[derive(Default)]
pub struct LoadTracker {
    pending: HashMap<RequestId, PendingLoad>,
    request_count: u64,
    max_simultaneous_loads: Option<usize>,
}

impl LoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of simultaneously pending loads. `None` (the
    /// default) means unbounded.
    pub fn with_max_simultaneous_loads(max: Option<usize>) -> Self {
        Self { max_simultaneous_loads: max, ..Self::default() }
    }

    /// Registers a new load request, returning the wire announcement to
    /// bundle into the next `OutgoingMessage` and the freshly-assigned id.
    pub fn load_audio(
        &mut self,
        audio_url: impl Into<String>,
        callback: LoadCallback,
    ) -> Result<LoadRequestWire, AudioError> {
        if let Some(cap) = self.max_simultaneous_loads {
            if self.pending.len() >= cap {
                return Err(AudioError::ExceededMaxSimultaneousLoads { cap });
            }
        }

        let audio_url = audio_url.into();
        let id = RequestId(self.request_count);
        self.request_count += 1;
        self.pending.insert(id, PendingLoad { callback, audio_url: audio_url.clone() });
        Ok(LoadRequestWire { audio_url, request_id: id })
    }

    /// Resolves a pending request with a decoded buffer. Unknown request
    /// ids are dropped silently, so a duplicate or late reply is safe to
    /// retry.
    pub fn resolve_success(&mut self, request_id: RequestId, source: Source) {
        if let Some(pending) = self.pending.remove(&request_id) {
            (pending.callback)(Ok(source));
        } else {
            warn!("load success for unknown request id {request_id}, dropping");
        }
    }

    /// Resolves a pending request with a load failure.
    pub fn resolve_failure(&mut self, request_id: RequestId, error: AudioError) {
        if let Some(pending) = self.pending.remove(&request_id) {
            (pending.callback)(Err(error));
        } else {
            warn!("load failure for unknown request id {request_id}, dropping");
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
