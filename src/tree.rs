//! The audio tree (C1): an algebraic, value-type description of what
//! should currently be audible. Pure data — no engine or counter state is
//! ever referenced from here.

use crate::time::{AudioDuration, AudioTime};

/// Opaque handle to a decoded buffer, obtained only from a successful
/// [`crate::loader::LoadTracker`] callback — so every `source` field in a
/// declared tree is valid by construction.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Source {
    pub buffer_id: i32,
    pub duration_in_seconds: Option<f64>,
}

impl Source {
    pub fn new(buffer_id: i32) -> Self {
        Self { buffer_id, duration_in_seconds: None }
    }

    pub fn with_duration(buffer_id: i32, duration_in_seconds: f64) -> Self {
        Self { buffer_id, duration_in_seconds: Some(duration_in_seconds) }
    }
}

impl Eq for Source {}

/// Loop configuration for a file-playback node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    pub loop_start: AudioDuration,
    pub loop_end: AudioDuration,
}

/// Settings attached to a file-playback node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSettings {
    pub start_at: AudioDuration,
    pub playback_rate: f64,
    pub loop_config: Option<LoopConfig>,
}

impl Eq for PlaybackSettings {}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            start_at: AudioDuration::ZERO,
            playback_rate: 1.0,
            loop_config: None,
        }
    }
}

/// One oscillator waveform, carrying its frequency where applicable. Noise
/// variants have no frequency (the codec emits `0` for them).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OscillatorType {
    Sine(f64),
    Square(f64),
    Sawtooth(f64),
    Triangle(f64),
    WhiteNoise,
    PinkNoise,
    BrownNoise,
}

impl Eq for OscillatorType {}

impl OscillatorType {
    /// The wire-format name for this waveform.
    pub fn wire_name(&self) -> &'static str {
        match self {
            OscillatorType::Sine(_) => "sine",
            OscillatorType::Square(_) => "square",
            OscillatorType::Sawtooth(_) => "sawtooth",
            OscillatorType::Triangle(_) => "triangle",
            OscillatorType::WhiteNoise => "whiteNoise",
            OscillatorType::PinkNoise => "pinkNoise",
            OscillatorType::BrownNoise => "brownNoise",
        }
    }

    /// Frequency in cycles/second, or `0` for noise variants.
    pub fn frequency(&self) -> f64 {
        match self {
            OscillatorType::Sine(f)
            | OscillatorType::Square(f)
            | OscillatorType::Sawtooth(f)
            | OscillatorType::Triangle(f) => *f,
            OscillatorType::WhiteNoise | OscillatorType::PinkNoise | OscillatorType::BrownNoise => 0.0,
        }
    }
}

/// A single `(time, volume)` point used by `ScaleVolumeAt`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumePoint {
    pub time: AudioTime,
    pub volume: f64,
}

impl Eq for VolumePoint {}

/// A nonempty, time-sorted sequence of volume points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeTimeline(Vec<VolumePoint>);

impl VolumeTimeline {
    /// Builds a timeline from arbitrary points: clamps each volume to >= 0
    /// and sorts by ascending time. An empty input falls back to the
    /// documented safe default `(time=0, volume=1)`.
    pub fn new(points: impl IntoIterator<Item = VolumePoint>) -> Self {
        let mut points: Vec<VolumePoint> = points
            .into_iter()
            .map(|p| VolumePoint { time: p.time, volume: p.volume.max(0.0) })
            .collect();
        if points.is_empty() {
            points.push(VolumePoint { time: AudioTime::new(0), volume: 1.0 });
        }
        points.sort_by_key(|p| p.time);
        Self(points)
    }

    pub fn points(&self) -> &[VolumePoint] {
        &self.0
    }
}

/// An effect wrapping a child tree.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectType {
    /// Scales volume by a constant factor, clamped to `>= 0`.
    ScaleVolume(f64),
    /// Scales volume along a timeline of `(time, volume)` points.
    ScaleVolumeAt(VolumeTimeline),
}

/// The audio tree: what should currently be playing, as a pure value.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioTree {
    /// An ordered sequence of children. An empty group is silence.
    Group(Vec<AudioTree>),
    /// Play `source` starting at `start_time`, per `settings`.
    File {
        source: Source,
        start_time: AudioTime,
        settings: PlaybackSettings,
    },
    /// A synthesized waveform starting at `start_time`.
    Oscillator {
        oscillator_type: OscillatorType,
        start_time: AudioTime,
    },
    /// A volume effect wrapping a child tree.
    Effect {
        effect_type: EffectType,
        child: Box<AudioTree>,
    },
}

impl AudioTree {
    /// The empty group — nothing should be playing.
    pub fn silence() -> Self {
        AudioTree::Group(Vec::new())
    }

    /// An ordered group of children.
    pub fn group(children: impl IntoIterator<Item = AudioTree>) -> Self {
        AudioTree::Group(children.into_iter().collect())
    }

    /// Plays `source` starting at `start_time` with default settings
    /// (no loop, playback rate 1, offset 0).
    pub fn audio(source: Source, start_time: AudioTime) -> Self {
        AudioTree::File { source, start_time, settings: PlaybackSettings::default() }
    }

    /// Plays `source` starting at `start_time` with explicit settings.
    pub fn audio_with_config(source: Source, start_time: AudioTime, settings: PlaybackSettings) -> Self {
        AudioTree::File { source, start_time, settings }
    }

    pub fn sine(frequency: f64, start_time: AudioTime) -> Self {
        Self::oscillator(OscillatorType::Sine(frequency), start_time)
    }

    pub fn square(frequency: f64, start_time: AudioTime) -> Self {
        Self::oscillator(OscillatorType::Square(frequency), start_time)
    }

    pub fn sawtooth(frequency: f64, start_time: AudioTime) -> Self {
        Self::oscillator(OscillatorType::Sawtooth(frequency), start_time)
    }

    pub fn triangle(frequency: f64, start_time: AudioTime) -> Self {
        Self::oscillator(OscillatorType::Triangle(frequency), start_time)
    }

    pub fn white_noise(start_time: AudioTime) -> Self {
        Self::oscillator(OscillatorType::WhiteNoise, start_time)
    }

    pub fn pink_noise(start_time: AudioTime) -> Self {
        Self::oscillator(OscillatorType::PinkNoise, start_time)
    }

    pub fn brown_noise(start_time: AudioTime) -> Self {
        Self::oscillator(OscillatorType::BrownNoise, start_time)
    }

    fn oscillator(oscillator_type: OscillatorType, start_time: AudioTime) -> Self {
        AudioTree::Oscillator { oscillator_type, start_time }
    }

    /// Wraps `self` so every leaf's volume is scaled by `factor`, clamped
    /// to `>= 0`.
    pub fn scale_volume(self, factor: f64) -> Self {
        AudioTree::Effect {
            effect_type: EffectType::ScaleVolume(factor.max(0.0)),
            child: Box::new(self),
        }
    }

    /// Wraps `self` with a volume timeline. An empty `points` defaults to
    /// a single `(time=0, volume=1)` point.
    pub fn scale_volume_at(self, points: impl IntoIterator<Item = VolumePoint>) -> Self {
        AudioTree::Effect {
            effect_type: EffectType::ScaleVolumeAt(VolumeTimeline::new(points)),
            child: Box::new(self),
        }
    }
}
