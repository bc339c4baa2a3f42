//! Per-kind identity keys and mutation-command tables for the matching
//! skeleton in `reconcile/mod.rs`.

use crate::command::{encode_volume_timelines, Command};
use crate::flatten::{FlatOscillator, FlatSound};
use crate::ids::NodeGroupId;
use crate::time::{AudioDuration, AudioTime};
use crate::tree::Source;

use super::wire_loop;

/// A flattened instance that can be matched across ticks by identity and
/// diffed field-by-field into mutation commands.
pub(super) trait Instance: PartialEq + Sized {
    type Key: PartialEq;

    fn identity_key(&self) -> Self::Key;

    /// The command that brings this instance into existence.
    fn start_command(&self, id: NodeGroupId) -> Command;

    /// Commands for every field that differs between `self` (new) and
    /// `old` (currently running). Order matters: callers rely on volume
    /// preceding loop config preceding playback rate preceding timelines.
    fn diff_commands(&self, id: NodeGroupId, old: &Self) -> Vec<Command>;
}

impl Instance for FlatSound {
    type Key = (Source, AudioTime, AudioDuration);

    fn identity_key(&self) -> Self::Key {
        (self.source, self.start_time, self.start_at)
    }

    fn start_command(&self, id: NodeGroupId) -> Command {
        Command::StartSound {
            node_group_id: id,
            buffer_id: self.source.buffer_id,
            start_time: self.start_time,
            start_at: self.start_at.as_millis(),
            volume: self.volume,
            volume_timelines: encode_volume_timelines(&self.volume_timelines),
            loop_config: wire_loop(self.loop_config),
            playback_rate: self.playback_rate,
        }
    }

    fn diff_commands(&self, id: NodeGroupId, old: &Self) -> Vec<Command> {
        let mut commands = Vec::new();
        if self.volume != old.volume {
            commands.push(Command::SetVolume { node_group_id: id, volume: self.volume });
        }
        if self.loop_config != old.loop_config {
            commands.push(Command::SetLoopConfig { node_group_id: id, loop_config: wire_loop(self.loop_config) });
        }
        if self.playback_rate != old.playback_rate {
            commands.push(Command::SetPlaybackRate { node_group_id: id, playback_rate: self.playback_rate });
        }
        if self.volume_timelines != old.volume_timelines {
            commands.push(Command::SetVolumeAt { node_group_id: id, volume_at: encode_volume_timelines(&self.volume_timelines) });
        }
        commands
    }
}

impl Instance for FlatOscillator {
    type Key = AudioTime;

    fn identity_key(&self) -> Self::Key {
        self.start_time
    }

    fn start_command(&self, id: NodeGroupId) -> Command {
        Command::StartOscillator {
            node_group_id: id,
            oscillator_type: self.oscillator_type.wire_name().to_string(),
            start_time: self.start_time,
            volume: self.volume,
            volume_timelines: encode_volume_timelines(&self.volume_timelines),
            frequency: self.oscillator_type.frequency(),
        }
    }

    fn diff_commands(&self, id: NodeGroupId, old: &Self) -> Vec<Command> {
        let mut commands = Vec::new();
        if self.volume != old.volume {
            commands.push(Command::SetVolume { node_group_id: id, volume: self.volume });
        }
        if self.volume_timelines != old.volume_timelines {
            commands.push(Command::SetVolumeAt { node_group_id: id, volume_at: encode_volume_timelines(&self.volume_timelines) });
        }
        commands
    }
}
