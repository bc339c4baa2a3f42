//! The reconciler (C3): diffs the previous flattened state against the
//! new one, finds identity-preserving matches, and emits the minimal
//! ordered command batch an engine needs to catch up.

mod instance;

use std::collections::BTreeMap;

use crate::command::{Command, WireLoop};
use crate::flatten::{flatten, FlatOscillator, FlatSound};
use crate::ids::NodeGroupId;
use crate::tree::AudioTree;

use instance::Instance;

/// Owns the running-instance maps and the node-group counter. Diffs are
/// computed against this state in place: there is exactly one reconciler
/// per live audio session, owning its counters for the session's lifetime.
#[derive(Debug, Default)]
pub struct Reconciler {
    sound_instances: BTreeMap<NodeGroupId, FlatSound>,
    oscillator_instances: BTreeMap<NodeGroupId, FlatOscillator>,
    node_group_counter: u64,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sound instances currently tracked as live.
    pub fn sound_count(&self) -> usize {
        self.sound_instances.len()
    }

    /// Number of oscillator instances currently tracked as live.
    pub fn oscillator_count(&self) -> usize {
        self.oscillator_instances.len()
    }

    pub fn sound(&self, id: NodeGroupId) -> Option<&FlatSound> {
        self.sound_instances.get(&id)
    }

    pub fn oscillator(&self, id: NodeGroupId) -> Option<&FlatOscillator> {
        self.oscillator_instances.get(&id)
    }

    /// Diffs `tree` against the current state, mutates it to match, and
    /// returns the commands an engine must process to catch up.
    ///
    /// Oscillator commands precede sound commands; within each category,
    /// stops/mutations (in old-map insertion order) precede starts for
    /// newly-allocated groups.
    pub fn reconcile(&mut self, tree: &AudioTree) -> Vec<Command> {
        let flattened = flatten(tree);

        let mut commands = Vec::new();
        reconcile_instances(
            &mut self.oscillator_instances,
            flattened.oscillators,
            &mut self.node_group_counter,
            &mut commands,
        );
        reconcile_instances(
            &mut self.sound_instances,
            flattened.sounds,
            &mut self.node_group_counter,
            &mut commands,
        );
        commands
    }
}

/// The matching skeleton, generic over `Instance` so sounds and
/// oscillators share one implementation with different identity
/// predicates and different per-mutation command sets.
fn reconcile_instances<I: Instance>(
    map: &mut BTreeMap<NodeGroupId, I>,
    mut new_list: Vec<I>,
    counter: &mut u64,
    commands: &mut Vec<Command>,
) {
    let mut next_map = BTreeMap::new();

    // BTreeMap iterates in key order, which is insertion order here since
    // NodeGroupId is assigned monotonically and never reused.
    let old_ids: Vec<NodeGroupId> = map.keys().copied().collect();
    for old_id in old_ids {
        let old_instance = map.remove(&old_id).expect("id came from this map's own keys");
        let mut candidates = new_list
            .iter()
            .enumerate()
            .filter(|(_, candidate)| candidate.identity_key() == old_instance.identity_key())
            .map(|(pos, _)| pos);
        let exact = candidates.clone().find(|&pos| new_list[pos] == old_instance);
        let chosen = exact.or_else(|| candidates.next());

        match chosen {
            Some(pos) if new_list[pos] == old_instance => {
                let matched = new_list.remove(pos);
                next_map.insert(old_id, matched);
            }
            Some(pos) => {
                let matched = new_list.remove(pos);
                commands.extend(matched.diff_commands(old_id, &old_instance));
                next_map.insert(old_id, matched);
            }
            None => {
                commands.push(Command::StopSound { node_group_id: old_id });
            }
        }
    }

    for instance in new_list {
        let id = NodeGroupId(*counter);
        *counter += 1;
        commands.push(instance.start_command(id));
        next_map.insert(id, instance);
    }

    *map = next_map;
}

pub(crate) fn wire_loop(loop_config: Option<crate::tree::LoopConfig>) -> Option<WireLoop> {
    loop_config.map(WireLoop::from)
}
