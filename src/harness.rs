//! The host-integration harness (C6): wraps an arbitrary host
//! update/init cycle, owning the reconciler, the load tracker, and the
//! `LoadingContext → Ready` state machine.
//!
//! `update`/`init` stay pure: they return `(state', Vec<HostCmd>)` rather
//! than performing any effect themselves, so the harness is the only
//! place that actually talks to the loader and reconciler.

use log::debug;

use crate::config::ReconcilerConfig;
use crate::error::AudioError;
use crate::ids::RequestId;
use crate::incoming::IncomingMessage;
use crate::loader::{LoadCallback, LoadTracker};
use crate::reconcile::Reconciler;
use crate::tree::AudioTree;

/// A command the host's `update` wants the harness to carry out, alongside
/// whatever the host does with its own state.
pub enum HostCmd {
    /// Request that `url` be loaded; `callback` fires exactly once with
    /// the outcome.
    LoadAudio { url: String, callback: LoadCallback },
}

/// Whether the engine has reported an initialized `AudioContext` yet.
/// Declarations are reconciled and delivered either way — the core never
/// blocks on this, only records it for the host to consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    Loading,
    Ready { samples_per_second: u32 },
}

/// An arbitrary host application, wired into the harness. The harness
/// never inspects `Model`/`Msg` beyond calling these four entry points.
pub trait Host {
    type Model;
    type Msg;

    fn init(&self) -> (Self::Model, Vec<HostCmd>);
    fn update(&self, msg: &Self::Msg, model: &mut Self::Model) -> Vec<HostCmd>;
    fn audio(&self, model: &Self::Model) -> AudioTree;
}

/// Wraps a [`Host`], owning the reconciler and load tracker for its
/// lifetime. One `run_update` (or `run_init`) call is one tick: it runs
/// the host's own update, applies any `HostCmd`s, reconciles the
/// resulting audio tree, and returns the wire message for the engine.
pub struct Harness<H: Host> {
    host: H,
    reconciler: Reconciler,
    loader: LoadTracker,
    context: ContextState,
}

impl<H: Host> Harness<H> {
    pub fn new(host: H, config: ReconcilerConfig) -> Self {
        Self {
            host,
            reconciler: Reconciler::new(),
            loader: LoadTracker::with_max_simultaneous_loads(config.max_simultaneous_loads),
            context: ContextState::Loading,
        }
    }

    pub fn context_state(&self) -> ContextState {
        self.context
    }

    /// Runs the host's `init`, then reconciles the resulting tree. Returns
    /// the initial model and the first outgoing message.
    pub fn run_init(&mut self) -> (H::Model, crate::command::OutgoingMessage) {
        let (model, host_cmds) = self.host.init();
        let message = self.apply_cmds_and_reconcile(&model, host_cmds);
        (model, message)
    }

    /// Runs one tick: the host's `update`, then a reconcile pass.
    pub fn run_update(&mut self, msg: &H::Msg, model: &mut H::Model) -> crate::command::OutgoingMessage {
        let host_cmds = self.host.update(msg, model);
        self.apply_cmds_and_reconcile(model, host_cmds)
    }

    /// Feeds one decoded engine message back into the harness: resolves a
    /// pending load or records the `AudioContext` becoming ready.
    pub fn handle_incoming(&mut self, message: IncomingMessage) {
        match message {
            IncomingMessage::LoadSuccess { request_id, source } => {
                self.loader.resolve_success(request_id, source);
            }
            IncomingMessage::LoadFailed { request_id, error } => {
                self.loader.resolve_failure(request_id, error.into());
            }
            IncomingMessage::ContextInitialized { samples_per_second } => {
                debug!("audio context ready at {samples_per_second} Hz");
                self.context = ContextState::Ready { samples_per_second };
            }
            IncomingMessage::Unknown { kind } => {
                debug!("ignoring unknown inbound message type {kind}");
            }
        }
    }

    /// Registers a load request directly (bypassing a `HostCmd`), for
    /// callers that don't route loads through `update`.
    pub fn load_audio(&mut self, url: impl Into<String>, callback: LoadCallback) -> Result<RequestId, AudioError> {
        self.loader.load_audio(url, callback).map(|wire| wire.request_id)
    }

    fn apply_cmds_and_reconcile(&mut self, model: &H::Model, host_cmds: Vec<HostCmd>) -> crate::command::OutgoingMessage {
        let mut audio_cmds = Vec::new();
        for cmd in host_cmds {
            match cmd {
                HostCmd::LoadAudio { url, callback } => match self.loader.load_audio(url, callback) {
                    Ok(wire) => audio_cmds.push(wire),
                    Err(err) => debug!("load request rejected: {err}"),
                },
            }
        }

        let tree = self.host.audio(model);
        let audio = self.reconciler.reconcile(&tree);
        crate::command::OutgoingMessage { audio, audio_cmds }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::AudioTime;
    use crate::tree::Source;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Model {
        playing: bool,
        source: Option<Source>,
    }

    enum Msg {
        SetPlaying(bool),
        SourceLoaded(Source),
    }

    struct ToyHost;

    impl Host for ToyHost {
        type Model = Model;
        type Msg = Msg;

        fn init(&self) -> (Model, Vec<HostCmd>) {
            (Model::default(), Vec::new())
        }

        fn update(&self, msg: &Msg, model: &mut Model) -> Vec<HostCmd> {
            match msg {
                Msg::SetPlaying(playing) => model.playing = *playing,
                Msg::SourceLoaded(source) => model.source = Some(*source),
            }
            Vec::new()
        }

        fn audio(&self, model: &Model) -> AudioTree {
            match (model.playing, model.source) {
                (true, Some(source)) => AudioTree::audio(source, AudioTime::new(0)),
                _ => AudioTree::silence(),
            }
        }
    }

    #[test]
    fn init_then_update_reconciles_each_tick() {
        let mut harness = Harness::new(ToyHost, ReconcilerConfig::new());
        let (mut model, first) = harness.run_init();
        assert!(first.audio.is_empty());

        let loaded = harness.run_update(&Msg::SourceLoaded(Source::new(1)), &mut model);
        assert!(loaded.audio.is_empty(), "loading a source alone doesn't start playback");

        let playing = harness.run_update(&Msg::SetPlaying(true), &mut model);
        assert_eq!(playing.audio.len(), 1);
    }

    #[test]
    fn load_then_play_end_to_end() {
        let mut harness = Harness::new(ToyHost, ReconcilerConfig::new());
        let (mut model, _) = harness.run_init();

        let received: Rc<RefCell<Option<Source>>> = Rc::new(RefCell::new(None));
        let received_clone = received.clone();
        let request_id = harness
            .load_audio("song.mp3", Box::new(move |result| {
                if let Ok(source) = result {
                    *received_clone.borrow_mut() = Some(source);
                }
            }))
            .expect("load accepted");

        harness.handle_incoming(IncomingMessage::LoadSuccess {
            request_id,
            source: Source::with_duration(7, 123.0),
        });

        let source = received.borrow().expect("callback resolved");
        assert_eq!(source.buffer_id, 7);

        let tick = harness.run_update(&Msg::SourceLoaded(source), &mut model);
        assert!(tick.audio.is_empty());
        let tick2 = harness.run_update(&Msg::SetPlaying(true), &mut model);
        match &tick2.audio[0] {
            crate::command::Command::StartSound { buffer_id, .. } => assert_eq!(*buffer_id, 7),
            other => panic!("expected StartSound, got {other:?}"),
        }
    }

    #[test]
    fn context_starts_loading_then_ready_on_init_event() {
        let _ = env_logger::try_init();
        let mut harness = Harness::new(ToyHost, ReconcilerConfig::new());
        assert_eq!(harness.context_state(), ContextState::Loading);
        harness.handle_incoming(IncomingMessage::ContextInitialized { samples_per_second: 48_000 });
        assert_eq!(harness.context_state(), ContextState::Ready { samples_per_second: 48_000 });
    }
}
