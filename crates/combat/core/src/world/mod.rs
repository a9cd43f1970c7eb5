//! The combat world: owns every participant and in-flight execution and
//! advances them on the simulation clock.
//!
//! All state transitions run synchronously inside [`CombatWorld::tick`] or
//! an entry point such as [`CombatWorld::spell_skill`]. Actions in flight
//! live on the caller's stack and borrow the world mutably while they
//! resolve; listeners receive the same world.

mod dispatch;
mod execution;
mod hit_volume;
mod spell;
mod status;

use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

use crate::action::{ActionError, SpellSkillAction, intercept_attack};
use crate::config::CombatConfig;
use crate::env::{CombatHost, ConfigOracle, NullHost, PcgRng, RngOracle};
use crate::error::CombatError;
use crate::execution::{AttackExecution, SkillExecution};
use crate::hit_volume::{HitVolume, Pose};
use crate::ids::{
    AttackId, ExecutionId, HitVolumeId, IdAllocator, ListenerId, Millis, ParticipantId,
    StatusInstanceId,
};
use crate::participant::{Participant, ParticipantSpec};
use crate::point::{ActionPointType, Fault, ListenerError, ListenerFn, PointPayload};

/// Single-threaded combat simulation.
pub struct CombatWorld {
    config: CombatConfig,
    configs: Arc<dyn ConfigOracle>,
    rng: Box<dyn RngOracle>,
    host: Box<dyn CombatHost>,
    now: Millis,
    ids: IdAllocator,
    participants: BTreeMap<ParticipantId, Participant>,
    executions: BTreeMap<ExecutionId, SkillExecution>,
    attacks: BTreeMap<AttackId, AttackExecution>,
    volumes: BTreeMap<HitVolumeId, HitVolume>,
    pending_spells: Vec<SpellSkillAction>,
    faults: Vec<Fault>,
    dispatch_depth: u32,
    /// Executions currently beginning inside one another.
    execution_depth: u32,
}

impl CombatWorld {
    pub fn new(config: CombatConfig, configs: Arc<dyn ConfigOracle>) -> Self {
        Self {
            config,
            configs,
            rng: Box::new(PcgRng::default()),
            host: Box::new(NullHost),
            now: 0,
            ids: IdAllocator::default(),
            participants: BTreeMap::new(),
            executions: BTreeMap::new(),
            attacks: BTreeMap::new(),
            volumes: BTreeMap::new(),
            pending_spells: Vec::new(),
            faults: Vec::new(),
            dispatch_depth: 0,
            execution_depth: 0,
        }
    }

    #[must_use]
    pub fn with_rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: impl CombatHost + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// Shared handle to the content catalog.
    pub fn configs(&self) -> Arc<dyn ConfigOracle> {
        Arc::clone(&self.configs)
    }

    pub fn rng(&mut self) -> &mut dyn RngOracle {
        self.rng.as_mut()
    }

    pub fn host(&mut self) -> &mut dyn CombatHost {
        self.host.as_mut()
    }

    // ------------------------------------------------------------------
    // Participants
    // ------------------------------------------------------------------

    /// Registers a participant; blockers get their interception installed.
    pub fn spawn_participant(&mut self, spec: ParticipantSpec) -> ParticipantId {
        let id = ParticipantId(self.ids.allocate());
        let can_block = spec.can_block;
        let mut participant = Participant::new(id, spec);
        if can_block {
            let listener = ListenerId(self.ids.allocate());
            let handler = handler(move |world, payload| {
                let PointPayload::Attack(attack) = payload else {
                    return Ok(());
                };
                intercept_attack(world, id, *attack)
            });
            participant
                .points
                .listen(ActionPointType::PreReceiveAttackEffect, listener, handler);
        }
        tracing::info!(
            target: "combat::world",
            participant = %id,
            name = %participant.name,
            "participant spawned"
        );
        self.participants.insert(id, participant);
        id
    }

    /// Removes a participant and cancels everything it started.
    ///
    /// Idempotent: returns false when the participant was already gone.
    pub fn despawn_participant(&mut self, id: ParticipantId) -> bool {
        let Some(mut participant) = self.participants.remove(&id) else {
            return false;
        };
        participant.points.clear();

        self.pending_spells.retain(|spell| spell.creator != id);
        self.attacks
            .retain(|_, attack| attack.creator != id && attack.target != id);

        let owned: Vec<ExecutionId> = self
            .executions
            .values()
            .filter(|execution| execution.owner == id)
            .map(|execution| execution.id)
            .collect();
        for execution in owned {
            self.end_execution(execution);
        }
        for execution in self.executions.values_mut() {
            execution.input.targets.retain(|target| *target != id);
        }

        let volumes: Vec<HitVolumeId> = self
            .volumes
            .values()
            .filter(|volume| volume.owner == id)
            .map(|volume| volume.id)
            .collect();
        for volume in volumes {
            self.despawn_hit_volume(volume);
        }

        tracing::info!(target: "combat::world", participant = %id, "participant despawned");
        true
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.get(&id)
    }

    pub fn participant_mut(&mut self, id: ParticipantId) -> Option<&mut Participant> {
        self.participants.get_mut(&id)
    }

    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }

    pub fn set_pose(&mut self, id: ParticipantId, pose: Pose) -> Result<(), CombatError> {
        let participant = self
            .participants
            .get_mut(&id)
            .ok_or(CombatError::UnknownParticipant(id))?;
        participant.pose = pose;
        Ok(())
    }

    pub(crate) fn require(&self, id: ParticipantId) -> Result<&Participant, ActionError> {
        self.participants
            .get(&id)
            .ok_or(ActionError::ParticipantMissing(id))
    }

    pub(crate) fn require_mut(&mut self, id: ParticipantId) -> Result<&mut Participant, ActionError> {
        self.participants
            .get_mut(&id)
            .ok_or(ActionError::ParticipantMissing(id))
    }

    pub(crate) fn allocate_status_instance(&mut self) -> StatusInstanceId {
        StatusInstanceId(self.ids.allocate())
    }

    // ------------------------------------------------------------------
    // Executions
    // ------------------------------------------------------------------

    pub fn execution(&self, id: ExecutionId) -> Option<&SkillExecution> {
        self.executions.get(&id)
    }

    pub fn executions(&self) -> impl Iterator<Item = &SkillExecution> {
        self.executions.values()
    }

    pub fn attack(&self, id: AttackId) -> Option<&AttackExecution> {
        self.attacks.get(&id)
    }

    pub(crate) fn attack_mut(&mut self, id: AttackId) -> Option<&mut AttackExecution> {
        self.attacks.get_mut(&id)
    }

    pub fn hit_volume(&self, id: HitVolumeId) -> Option<&HitVolume> {
        self.volumes.get(&id)
    }

    pub fn hit_volumes(&self) -> impl Iterator<Item = &HitVolume> {
        self.volumes.values()
    }

    /// Skill spells still waiting on their execution.
    pub fn pending_spells(&self) -> &[SpellSkillAction] {
        &self.pending_spells
    }

    pub(crate) fn push_pending_spell(&mut self, spell: SpellSkillAction) {
        self.pending_spells.push(spell);
    }

    // ------------------------------------------------------------------
    // Clock
    // ------------------------------------------------------------------

    /// Advances the clock by `dt` and runs every piece of timed work.
    ///
    /// Order: statuses, basic attacks, skill executions, hit volumes, then
    /// pending spells, so a spell finishes on the frame its execution ends.
    pub fn tick(&mut self, dt: Millis) {
        self.now = self.now.saturating_add(dt);
        tracing::trace!(target: "combat::world", now = self.now, "tick");
        self.update_statuses();
        self.update_attacks();
        self.update_executions();
        self.update_hit_volumes();
        self.update_pending_spells();
    }

    fn update_pending_spells(&mut self) {
        let mut pending = std::mem::take(&mut self.pending_spells);
        pending.retain_mut(|spell| !spell.poll(self));
        pending.append(&mut self.pending_spells);
        pending.retain(|spell| self.participants.contains_key(&spell.creator));
        self.pending_spells = pending;
    }
}

/// Boxes a closure as a point handler.
pub(crate) fn handler<F>(f: F) -> Rc<ListenerFn>
where
    F: Fn(&mut CombatWorld, &mut PointPayload<'_>) -> Result<(), ListenerError> + 'static,
{
    Rc::new(f)
}
