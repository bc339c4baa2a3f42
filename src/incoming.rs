//! Ingress codec (C4): decodes engine-to-host messages tagged by
//! `"type"`.

use serde::Deserialize;

use crate::error::AudioError;
use crate::ids::RequestId;
use crate::tree::Source;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMessage {
    #[serde(rename = "type")]
    kind: u8,
    #[serde(default)]
    request_id: Option<RequestId>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    buffer_id: Option<i32>,
    #[serde(default)]
    duration_in_seconds: Option<f64>,
    #[serde(default)]
    samples_per_second: Option<u32>,
}

/// A decoded engine-to-host message.
#[derive(Debug, Clone, PartialEq)]
pub enum IncomingMessage {
    LoadFailed { request_id: RequestId, error: LoadError },
    LoadSuccess { request_id: RequestId, source: Source },
    ContextInitialized { samples_per_second: u32 },
    /// A `"type"` value we don't recognize. Non-fatal: recorded and
    /// ignored by the caller.
    Unknown { kind: u8 },
}

/// The two load-failure reasons the engine can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    NetworkError,
    MediaDecodeAudioDataUnknownContentType,
}

impl From<LoadError> for AudioError {
    fn from(e: LoadError) -> Self {
        match e {
            LoadError::NetworkError => AudioError::NetworkError,
            LoadError::MediaDecodeAudioDataUnknownContentType => {
                AudioError::MediaDecodeAudioDataUnknownContentType
            }
        }
    }
}

/// Decodes one inbound JSON message. A `serde_json` failure becomes
/// `AudioError::JsonParseError`, which the caller should log and drop
/// rather than surface to any host callback.
pub fn decode_incoming(json: &str) -> Result<IncomingMessage, AudioError> {
    let raw: RawMessage = serde_json::from_str(json)?;
    Ok(match raw.kind {
        0 => {
            let error = match raw.error.as_deref() {
                Some("NetworkError") => LoadError::NetworkError,
                _ => LoadError::MediaDecodeAudioDataUnknownContentType,
            };
            IncomingMessage::LoadFailed {
                request_id: raw.request_id.unwrap_or(RequestId(0)),
                error,
            }
        }
        1 => IncomingMessage::LoadSuccess {
            request_id: raw.request_id.unwrap_or(RequestId(0)),
            source: Source {
                buffer_id: raw.buffer_id.unwrap_or_default(),
                duration_in_seconds: raw.duration_in_seconds,
            },
        },
        2 => IncomingMessage::ContextInitialized {
            samples_per_second: raw.samples_per_second.unwrap_or_default(),
        },
        other => IncomingMessage::Unknown { kind: other },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_load_success() {
        let msg = decode_incoming(r#"{"type":1,"requestId":0,"bufferId":7,"durationInSeconds":123.0}"#).unwrap();
        match msg {
            IncomingMessage::LoadSuccess { request_id, source } => {
                assert_eq!(request_id, RequestId(0));
                assert_eq!(source.buffer_id, 7);
                assert_eq!(source.duration_in_seconds, Some(123.0));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn decodes_load_failure() {
        let msg = decode_incoming(r#"{"type":0,"requestId":2,"error":"NetworkError"}"#).unwrap();
        assert_eq!(msg, IncomingMessage::LoadFailed { request_id: RequestId(2), error: LoadError::NetworkError });
    }

    #[test]
    fn decodes_context_initialized() {
        let msg = decode_incoming(r#"{"type":2,"samplesPerSecond":44100}"#).unwrap();
        assert_eq!(msg, IncomingMessage::ContextInitialized { samples_per_second: 44100 });
    }

    #[test]
    fn unknown_type_is_non_fatal() {
        let msg = decode_incoming(r#"{"type":9}"#).unwrap();
        assert_eq!(msg, IncomingMessage::Unknown { kind: 9 });
    }

    #[test]
    fn malformed_json_is_a_json_parse_error() {
        let err = decode_incoming("not json").unwrap_err();
        assert!(matches!(err, AudioError::JsonParseError(_)));
    }
}
