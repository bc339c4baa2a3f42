//! End-to-end scenarios driven entirely through the public API, plus a
//! check that outbound JSON matches the documented wire shape exactly.

use sonance::{
    AudioTime, AudioTree, Command, NodeGroupId, OutgoingMessage, Reconciler, Source,
};

fn t(ms: i64) -> AudioTime {
    AudioTime::new(ms)
}

#[test]
fn steady_tree_starts_once_then_settles() {
    let mut r = Reconciler::new();
    let tree = AudioTree::audio(Source::new(1), t(100_000));

    let first = r.reconcile(&tree);
    assert_eq!(first, vec![Command::StartSound {
        node_group_id: NodeGroupId(0),
        buffer_id: 1,
        start_time: t(100_000),
        start_at: 0.0,
        volume: 1.0,
        volume_timelines: vec![],
        loop_config: None,
        playback_rate: 1.0,
    }]);

    assert!(r.reconcile(&tree).is_empty());
}

#[test]
fn wire_message_matches_spec_shape() {
    let mut r = Reconciler::new();
    let commands = r.reconcile(&AudioTree::audio(Source::new(1), t(0)));
    let message = OutgoingMessage { audio: commands, audio_cmds: vec![] };

    let json: serde_json::Value = serde_json::to_value(&message).unwrap();
    assert_eq!(json["audio"][0]["action"], "startSound");
    assert_eq!(json["audio"][0]["nodeGroupId"], 0);
    assert_eq!(json["audio"][0]["bufferId"], 1);
    assert_eq!(json["audio"][0]["startAt"], 0.0);
    assert_eq!(json["audio"][0]["playbackRate"], 1.0);
    assert!(json["audio"][0]["loop"].is_null());
    assert!(json["audioCmds"].as_array().unwrap().is_empty());
}

#[test]
fn stop_sound_wire_shape_carries_only_action_and_id() {
    let mut r = Reconciler::new();
    r.reconcile(&AudioTree::audio(Source::new(1), t(0)));
    let commands = r.reconcile(&AudioTree::silence());

    let json = serde_json::to_value(&commands[0]).unwrap();
    assert_eq!(json["action"], "stopSound");
    assert_eq!(json["nodeGroupId"], 0);
    assert_eq!(json.as_object().unwrap().len(), 2);
}

#[test]
fn oscillator_commands_precede_sound_commands_in_same_tick() {
    let mut r = Reconciler::new();
    let tree = AudioTree::group([
        AudioTree::audio(Source::new(1), t(0)),
        AudioTree::sine(440.0, t(0)),
    ]);
    let commands = r.reconcile(&tree);
    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[0], Command::StartOscillator { .. }));
    assert!(matches!(commands[1], Command::StartSound { .. }));
}
