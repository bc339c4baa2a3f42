//! `sonance`: a declarative audio reconciler.
//!
//! An application describes which sounds should currently be audible as a
//! pure function of its state — analogous to a view function returning a
//! virtual DOM. This crate observes successive declarations and computes
//! the minimum side-effecting commands needed to make an external Web
//! Audio-style engine's playing set match what was most recently
//! declared. Starts, stops, volume ramps, loop reconfiguration, and
//! playback-rate changes are all inferred; the caller never says "start"
//! or "stop", only "this is what should be playing".
//!
//! The core pieces, leaves first:
//!
//! - [`tree`] — the audio tree (C1): groups, file playback, oscillators,
//!   volume effects.
//! - [`flatten`] — the flattener (C2): collapses a tree into normalized
//!   instance records.
//! - [`reconcile`] — the reconciler (C3): diffs old vs. new flattened
//!   state and emits the minimal command batch.
//! - [`command`] — the wire codec (C4): JSON commands and load requests.
//! - [`incoming`] — the ingress codec (C4): decodes engine replies.
//! - [`loader`] — the load-request tracker (C5).
//! - [`harness`] — the host-integration harness (C6).
//!
//! Everything here is single-threaded and synchronous: one call into the
//! harness is one tick, and the engine on the other end is treated as a
//! remote peer reached through an ordered message channel owned by the
//! caller, never by this crate.

pub mod command;
pub mod config;
pub mod error;
pub mod flatten;
pub mod harness;
pub mod ids;
pub mod incoming;
pub mod loader;
pub mod reconcile;
pub mod time;
pub mod tree;

pub use command::{Command, OutgoingMessage};
pub use config::ReconcilerConfig;
pub use error::AudioError;
pub use harness::{ContextState, Harness, Host, HostCmd};
pub use ids::{NodeGroupId, RequestId};
pub use incoming::{decode_incoming, IncomingMessage, LoadError};
pub use loader::LoadTracker;
pub use reconcile::Reconciler;
pub use time::{AudioDuration, AudioTime};
pub use tree::{AudioTree, EffectType, LoopConfig, OscillatorType, PlaybackSettings, Source, VolumePoint};
