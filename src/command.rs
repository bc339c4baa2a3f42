//! The command codec (C4): the wire protocol between the reconciler and
//! the engine. Every command is a tagged JSON object; the per-tick
//! message bundles the command batch together with any new load
//! requests.

use serde::Serialize;

use crate::ids::NodeGroupId;
use crate::time::AudioTime;
use crate::tree::LoopConfig;

/// A `(time, volume)` pair as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolumeAtPoint {
    pub time: AudioTime,
    pub volume: f64,
}

/// Wire encoding of an optional loop range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireLoop {
    pub loop_start: f64,
    pub loop_end: f64,
}

impl From<LoopConfig> for WireLoop {
    fn from(loop_config: LoopConfig) -> Self {
        Self {
            loop_start: loop_config.loop_start.as_millis(),
            loop_end: loop_config.loop_end.as_millis(),
        }
    }
}

/// An imperative command sent to the engine. `"action"` is the tag; every
/// variant carries `nodeGroupId`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action")]
#[serde(rename_all = "camelCase")]
pub enum Command {
    #[serde(rename_all = "camelCase")]
    StartSound {
        node_group_id: NodeGroupId,
        buffer_id: i32,
        start_time: AudioTime,
        start_at: f64,
        volume: f64,
        volume_timelines: Vec<Vec<VolumeAtPoint>>,
        #[serde(rename = "loop")]
        loop_config: Option<WireLoop>,
        playback_rate: f64,
    },
    #[serde(rename_all = "camelCase")]
    StartOscillator {
        node_group_id: NodeGroupId,
        oscillator_type: String,
        start_time: AudioTime,
        volume: f64,
        volume_timelines: Vec<Vec<VolumeAtPoint>>,
        frequency: f64,
    },
    #[serde(rename_all = "camelCase")]
    StopSound {
        node_group_id: NodeGroupId,
    },
    #[serde(rename_all = "camelCase")]
    SetVolume {
        node_group_id: NodeGroupId,
        volume: f64,
    },
    #[serde(rename_all = "camelCase")]
    SetVolumeAt {
        node_group_id: NodeGroupId,
        volume_at: Vec<Vec<VolumeAtPoint>>,
    },
    #[serde(rename_all = "camelCase")]
    SetLoopConfig {
        node_group_id: NodeGroupId,
        #[serde(rename = "loop")]
        loop_config: Option<WireLoop>,
    },
    #[serde(rename_all = "camelCase")]
    SetPlaybackRate {
        node_group_id: NodeGroupId,
        playback_rate: f64,
    },
}

impl Command {
    pub fn node_group_id(&self) -> NodeGroupId {
        match self {
            Command::StartSound { node_group_id, .. }
            | Command::StartOscillator { node_group_id, .. }
            | Command::StopSound { node_group_id }
            | Command::SetVolume { node_group_id, .. }
            | Command::SetVolumeAt { node_group_id, .. }
            | Command::SetLoopConfig { node_group_id, .. }
            | Command::SetPlaybackRate { node_group_id, .. } => *node_group_id,
        }
    }
}

/// A new-load announcement bundled into the per-tick message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadRequestWire {
    pub audio_url: String,
    pub request_id: crate::ids::RequestId,
}

/// The complete per-tick outbound message.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingMessage {
    pub audio: Vec<Command>,
    pub audio_cmds: Vec<LoadRequestWire>,
}

pub(crate) fn encode_volume_timelines(timelines: &[crate::tree::VolumeTimeline]) -> Vec<Vec<VolumeAtPoint>> {
    timelines
        .iter()
        .map(|timeline| {
            timeline
                .points()
                .iter()
                .map(|p| VolumeAtPoint { time: p.time, volume: p.volume })
                .collect()
        })
        .collect()
}
