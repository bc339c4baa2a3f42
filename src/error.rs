//! The error taxonomy: a `thiserror`-derived sum type with one variant
//! per failure mode, since the failure modes here are few and exact
//! enough to name individually rather than collapse into a string.

use thiserror::Error;

/// Errors surfaced to a `loadAudio` callback, plus the one internal,
/// never-surfaced parse error.
#[derive(Debug, Error)]
pub enum AudioError {
    /// The engine could not fetch the requested URL.
    #[error("network error fetching audio")]
    NetworkError,

    /// The engine fetched bytes it could not decode as audio.
    #[error("engine could not decode audio data: unknown content type")]
    MediaDecodeAudioDataUnknownContentType,

    /// An implementation-defined cap on simultaneous pending loads was hit.
    #[error("exceeded maximum of {cap} simultaneous loads")]
    ExceededMaxSimultaneousLoads { cap: usize },

    /// An inbound engine message did not parse. Never surfaced to a host
    /// callback (there is no request id to correlate it to) — recorded
    /// and dropped at the decode site instead.
    #[error("failed to parse inbound engine message: {0}")]
    JsonParseError(#[from] serde_json::Error),
}
