//! Two-participant duel driven frame by frame.

use std::cell::RefCell;
use std::f32::consts::PI;
use std::rc::Rc;

use anyhow::Result;
use combat_core::{
    ActionPointType, AttackId, CombatWorld, Fault, Millis, ParticipantId, ParticipantSpec,
    SkillId, SpellInput,
};
use glam::{Quat, Vec3};
use strum::IntoEnumIterator;

/// Distance between the duelists along the z axis.
const SPACING: f32 = 3.0;

#[derive(Debug)]
struct TimelineEntry {
    at: Millis,
    participant: String,
    point: ActionPointType,
    payload: &'static str,
}

type Timeline = Rc<RefCell<Vec<TimelineEntry>>>;

pub struct Duel {
    world: CombatWorld,
    attacker: ParticipantId,
    defender: ParticipantId,
    skill: Option<SkillId>,
    last_attack: Option<AttackId>,
    timeline: Timeline,
    printed: usize,
}

impl Duel {
    /// Spawns an attacker at the origin facing a blocking defender.
    pub fn new(mut world: CombatWorld, skill: Option<SkillId>) -> Result<Self> {
        let mut attacker_spec = ParticipantSpec::new("attacker")
            .with_attack(40.0, 5.0)
            .with_critical(0.2)
            .with_health(300);
        if let Some(skill) = skill {
            attacker_spec = attacker_spec.with_skill(skill, 1);
        }
        let attacker = world.spawn_participant(attacker_spec);

        let defender = world.spawn_participant(
            ParticipantSpec::new("defender")
                .with_attack(20.0, 15.0)
                .with_block(1500)
                .with_health(300)
                .at(Vec3::new(0.0, 0.0, SPACING), Quat::from_rotation_y(PI)),
        );

        let timeline = Timeline::default();
        for participant in [attacker, defender] {
            record(&mut world, &timeline, participant)?;
        }

        tracing::info!(%attacker, %defender, skill = ?skill, "duel ready");

        Ok(Self {
            world,
            attacker,
            defender,
            skill,
            last_attack: None,
            timeline,
            printed: 0,
        })
    }

    /// Spells when idle, then advances the world by one frame.
    pub fn step(&mut self, dt: Millis) -> Result<()> {
        match self.skill {
            Some(skill) => self.spell_skill(skill)?,
            None => self.spell_attack()?,
        }

        self.world.tick(dt);
        let contacts = self.world.probe_contacts();
        if contacts > 0 {
            tracing::debug!(contacts, now = self.world.now(), "hit volume contacts");
        }

        for fault in self.world.drain_faults() {
            log_fault(&fault);
        }
        self.print_timeline();
        Ok(())
    }

    pub fn is_over(&self) -> bool {
        [self.attacker, self.defender].into_iter().any(|id| {
            self.world
                .participant(id)
                .is_none_or(|participant| participant.is_dead())
        })
    }

    /// Prints the remaining timeline and the final health of both duelists.
    pub fn report(&mut self) {
        self.print_timeline();
        println!();
        println!("after {} ms", self.world.now());
        for id in [self.attacker, self.defender] {
            match self.world.participant(id) {
                Some(participant) => println!(
                    "  {:<10} {:>4} / {} hp",
                    participant.name,
                    participant.health.current(),
                    participant.health.max()
                ),
                None => println!("  {id} despawned"),
            }
        }
    }

    fn spell_skill(&mut self, skill: SkillId) -> Result<()> {
        let busy = self
            .world
            .participant(self.attacker)
            .is_none_or(|participant| participant.spelling().is_some());
        if busy {
            return Ok(());
        }
        let (Some(from), Some(to)) = (
            self.world.participant(self.attacker).map(|p| p.position()),
            self.world.participant(self.defender).map(|p| p.position()),
        ) else {
            return Ok(());
        };

        let input = SpellInput {
            targets: vec![self.defender],
            point: Some(to),
            direction: Some((to - from).normalize_or_zero()),
        };
        if let Some(execution) = self.world.spell_skill(self.attacker, skill, input)? {
            tracing::debug!(%execution, %skill, "skill spelled");
        }
        Ok(())
    }

    fn spell_attack(&mut self) -> Result<()> {
        if self
            .last_attack
            .is_some_and(|attack| self.world.attack(attack).is_some())
        {
            return Ok(());
        }
        self.last_attack = self.world.spell_attack(self.attacker, self.defender)?;
        Ok(())
    }

    fn print_timeline(&mut self) {
        let timeline = self.timeline.borrow();
        for entry in &timeline[self.printed..] {
            println!(
                "{:>6} ms  {:<10} {:<24} {}",
                entry.at, entry.participant, entry.point, entry.payload
            );
        }
        self.printed = timeline.len();
    }
}

/// Registers a recorder on every point of `participant`.
fn record(world: &mut CombatWorld, timeline: &Timeline, participant: ParticipantId) -> Result<()> {
    let name = world
        .participant(participant)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| participant.to_string());

    for point in ActionPointType::iter() {
        let timeline = Rc::clone(timeline);
        let name = name.clone();
        world.listen(participant, point, move |world, payload| {
            timeline.borrow_mut().push(TimelineEntry {
                at: world.now(),
                participant: name.clone(),
                point,
                payload: payload.kind(),
            });
            Ok(())
        })?;
    }
    Ok(())
}

fn log_fault(fault: &Fault) {
    match fault {
        Fault::Listener {
            at,
            participant,
            point,
            error,
            ..
        } => tracing::warn!(at, %participant, %point, %error, "listener fault"),
        Fault::DispatchDepth {
            at,
            participant,
            point,
            depth,
        } => tracing::warn!(at, %participant, %point, depth, "dispatch too deep"),
        Fault::Scheduled { at, context, error } => {
            tracing::warn!(at, context, %error, "scheduled work failed")
        }
    }
}
