//! The flattener (C2): collapses a tree of groups and effects into
//! normalized, flat instance records. Total, deterministic, and stateless
//! — it never allocates node group ids and never inspects engine state.

use crate::time::{AudioDuration, AudioTime};
use crate::tree::{AudioTree, EffectType, LoopConfig, OscillatorType, Source, VolumeTimeline};

/// A flattened sound instance: the normalized form of one `File` leaf
/// after collapsing the groups and effects that enclose it.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatSound {
    pub source: Source,
    pub start_time: AudioTime,
    pub start_at: AudioDuration,
    pub volume: f64,
    /// Enclosing `ScaleVolumeAt` timelines, inner-to-outer.
    pub volume_timelines: Vec<VolumeTimeline>,
    pub loop_config: Option<LoopConfig>,
    pub playback_rate: f64,
}

impl Eq for FlatSound {}

/// A flattened oscillator instance.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatOscillator {
    pub oscillator_type: OscillatorType,
    pub start_time: AudioTime,
    pub volume: f64,
    pub volume_timelines: Vec<VolumeTimeline>,
}

impl Eq for FlatOscillator {}

/// The flattener's output: one normalized list per instance kind, in tree
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flattened {
    pub sounds: Vec<FlatSound>,
    pub oscillators: Vec<FlatOscillator>,
}

/// Flattens `tree` into normalized sound and oscillator instances.
pub fn flatten(tree: &AudioTree) -> Flattened {
    let mut out = Flattened::default();
    flatten_into(tree, &mut out);
    out
}

fn flatten_into(tree: &AudioTree, out: &mut Flattened) {
    match tree {
        AudioTree::Group(children) => {
            for child in children {
                flatten_into(child, out);
            }
        }
        AudioTree::File { source, start_time, settings } => {
            out.sounds.push(FlatSound {
                source: *source,
                start_time: *start_time,
                start_at: settings.start_at,
                volume: 1.0,
                volume_timelines: Vec::new(),
                loop_config: settings.loop_config,
                playback_rate: settings.playback_rate,
            });
        }
        AudioTree::Oscillator { oscillator_type, start_time } => {
            out.oscillators.push(FlatOscillator {
                oscillator_type: *oscillator_type,
                start_time: *start_time,
                volume: 1.0,
                volume_timelines: Vec::new(),
            });
        }
        AudioTree::Effect { effect_type, child } => {
            let start = out.sounds.len();
            let osc_start = out.oscillators.len();
            flatten_into(child, out);
            apply_effect(effect_type, &mut out.sounds[start..], &mut out.oscillators[osc_start..]);
        }
    }
}

fn apply_effect(effect_type: &EffectType, sounds: &mut [FlatSound], oscillators: &mut [FlatOscillator]) {
    match effect_type {
        EffectType::ScaleVolume(factor) => {
            for sound in sounds.iter_mut() {
                sound.volume *= factor;
            }
            for osc in oscillators.iter_mut() {
                osc.volume *= factor;
            }
        }
        EffectType::ScaleVolumeAt(timeline) => {
            for sound in sounds.iter_mut() {
                sound.volume_timelines.insert(0, timeline.clone());
            }
            for osc in oscillators.iter_mut() {
                osc.volume_timelines.insert(0, timeline.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::VolumePoint;

    fn t(ms: i64) -> AudioTime {
        AudioTime::new(ms)
    }

    #[test]
    fn file_playback_flattens_to_one_sound_with_default_volume() {
        let tree = AudioTree::audio(Source::new(1), t(100));
        let flat = flatten(&tree);
        assert_eq!(flat.sounds.len(), 1);
        assert_eq!(flat.sounds[0].volume, 1.0);
        assert!(flat.sounds[0].volume_timelines.is_empty());
        assert!(flat.oscillators.is_empty());
    }

    #[test]
    fn nested_scale_volume_multiplies_clamped_factors() {
        let tree = AudioTree::audio(Source::new(1), t(0))
            .scale_volume(0.5)
            .scale_volume(-4.0); // clamped to 0, outer factor
        let flat = flatten(&tree);
        assert_eq!(flat.sounds[0].volume, 0.0);
    }

    #[test]
    fn volume_distribution_property() {
        // scaleVolume(k, scaleVolume(j, audio(src, t))) => volume = k*j
        let tree = AudioTree::audio(Source::new(7), t(0)).scale_volume(0.25).scale_volume(2.0);
        let flat = flatten(&tree);
        assert_eq!(flat.sounds[0].volume, 0.5);
    }

    #[test]
    fn nested_scale_volume_at_stacks_inner_to_outer() {
        let tree = AudioTree::audio(Source::new(1), t(0))
            .scale_volume_at([VolumePoint { time: t(0), volume: 1.0 }])
            .scale_volume_at([VolumePoint { time: t(0), volume: 0.5 }]);
        let flat = flatten(&tree);
        assert_eq!(flat.sounds[0].volume_timelines.len(), 2);
        assert_eq!(flat.sounds[0].volume_timelines[0].points()[0].volume, 1.0);
        assert_eq!(flat.sounds[0].volume_timelines[1].points()[0].volume, 0.5);
    }

    #[test]
    fn group_preserves_order_and_applies_effect_to_all_children() {
        let tree = AudioTree::group([
            AudioTree::audio(Source::new(1), t(0)),
            AudioTree::audio(Source::new(2), t(10)),
        ])
        .scale_volume(0.5);
        let flat = flatten(&tree);
        assert_eq!(flat.sounds.len(), 2);
        assert_eq!(flat.sounds[0].source.buffer_id, 1);
        assert_eq!(flat.sounds[1].source.buffer_id, 2);
        assert_eq!(flat.sounds[0].volume, 0.5);
        assert_eq!(flat.sounds[1].volume, 0.5);
    }

    #[test]
    fn oscillator_flattens_with_default_volume() {
        let tree = AudioTree::sine(440.0, t(0));
        let flat = flatten(&tree);
        assert_eq!(flat.oscillators.len(), 1);
        assert_eq!(flat.oscillators[0].volume, 1.0);
    }
}
