//! Shared fixtures for the scenario tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use combat_core::{
    ActionControl, ActionEventData, ActionPointType, AttributeKind, AttributeModifier,
    ClipKind, ColliderShape, CollisionExecuteData, CollisionMoveType, CombatConfig, CombatWorld,
    ConfigCatalog, CureEffect, DamageEffect, Effect, EffectSelection, ExecuteClip,
    ExecutionConfig, ItemConfig, ItemId, ParticipantId, ParticipantSpec, RngOracle,
    SkillConfig, SkillId, StatusConfig, StatusId, TargetFalloff, ValueFormula,
};
use glam::{Quat, Vec3};

pub const STRIKE: SkillId = SkillId(1);
pub const NOVA: SkillId = SkillId(2);
pub const COMBO: SkillId = SkillId(3);

pub const GUARD: StatusId = StatusId(1);
pub const BURN: StatusId = StatusId(2);
pub const SILENCE: StatusId = StatusId(3);

pub const POTION: ItemId = ItemId(1);

pub fn damage(formula: ValueFormula) -> Effect {
    Effect::Damage(DamageEffect {
        formula,
        can_crit: false,
        falloff: None,
    })
}

fn clip(start_ms: u64, end_ms: u64, kind: ClipKind) -> ExecuteClip {
    ExecuteClip {
        start_ms,
        end_ms,
        kind,
    }
}

/// Three skills, three statuses and one potion.
///
/// - `STRIKE` plays a 600 ms swing that assigns 12 damage at 200 ms.
/// - `NOVA` drops a radius-2 sphere at the selected point from 100 to 400 ms;
///   later targets take half damage.
/// - `COMBO` runs 300 ms and starts the strike timeline at 100 ms.
pub fn catalog() -> ConfigCatalog {
    let mut catalog = ConfigCatalog::new();
    catalog
        .add_execution(ExecutionConfig {
            id: "strike".into(),
            total_time_ms: 600,
            clips: vec![
                clip(0, 600, ClipKind::Animation("strike_swing".into())),
                clip(
                    200,
                    300,
                    ClipKind::ActionEvent(ActionEventData::AssignEffect(EffectSelection::All)),
                ),
            ],
        })
        .unwrap();
    catalog
        .add_execution(ExecutionConfig {
            id: "nova".into(),
            total_time_ms: 500,
            clips: vec![clip(
                100,
                400,
                ClipKind::CollisionExecute(CollisionExecuteData {
                    shape: ColliderShape::Sphere { radius: 2.0 },
                    move_type: CollisionMoveType::SelectedPosition,
                    path: Vec::new(),
                    effects: EffectSelection::All,
                }),
            )],
        })
        .unwrap();
    catalog
        .add_execution(ExecutionConfig {
            id: "combo".into(),
            total_time_ms: 300,
            clips: vec![clip(
                100,
                100,
                ClipKind::ActionEvent(ActionEventData::TriggerNewExecution("strike".into())),
            )],
        })
        .unwrap();
    catalog
        .add_skill(SkillConfig {
            id: COMBO,
            name: "Combo".into(),
            cooldown_ms: 0,
            execution: "combo".into(),
            effects: vec![damage(ValueFormula::Constant(12.0))],
        })
        .unwrap();
    catalog
        .add_skill(SkillConfig {
            id: STRIKE,
            name: "Strike".into(),
            cooldown_ms: 1_000,
            execution: "strike".into(),
            effects: vec![damage(ValueFormula::Constant(12.0))],
        })
        .unwrap();
    catalog
        .add_skill(SkillConfig {
            id: NOVA,
            name: "Nova".into(),
            cooldown_ms: 0,
            execution: "nova".into(),
            effects: vec![Effect::Damage(DamageEffect {
                formula: ValueFormula::Constant(10.0),
                can_crit: false,
                falloff: Some(TargetFalloff {
                    reduce_percent: 50.0,
                    min_percent: 20.0,
                }),
            })],
        })
        .unwrap();
    catalog
        .add_status(
            StatusConfig::new(GUARD, "Guard", 3_000)
                .with_modifier(AttributeModifier::new(AttributeKind::Defense, 10.0)),
        )
        .unwrap();
    catalog
        .add_status(
            StatusConfig::new(BURN, "Burn", 3_000)
                .with_periodic(1_000, vec![damage(ValueFormula::Constant(5.0))]),
        )
        .unwrap();
    catalog
        .add_status(
            StatusConfig::new(SILENCE, "Silence", 2_000)
                .with_action_control(ActionControl::SPELL_FORBID),
        )
        .unwrap();
    catalog
        .add_item(ItemConfig {
            id: POTION,
            name: "Potion".into(),
            effects: vec![Effect::Cure(CureEffect {
                formula: ValueFormula::Constant(30.0),
            })],
        })
        .unwrap();
    catalog.validate().unwrap();
    catalog
}

pub fn world(config: CombatConfig, rng: impl RngOracle + 'static) -> CombatWorld {
    CombatWorld::new(config, Arc::new(catalog())).with_rng(rng)
}

/// Attacker (attack 50) at the origin, defender (defense 30) one unit ahead.
pub fn duel(world: &mut CombatWorld) -> (ParticipantId, ParticipantId) {
    let attacker = world.spawn_participant(
        ParticipantSpec::new("attacker")
            .with_attack(50.0, 0.0)
            .with_health(200)
            .with_skill(STRIKE, 1)
            .with_skill(NOVA, 1)
            .with_skill(COMBO, 1)
            .with_item(POTION, 1),
    );
    let defender = world.spawn_participant(
        ParticipantSpec::new("defender")
            .with_attack(10.0, 30.0)
            .with_health(200)
            .at(Vec3::new(0.0, 0.0, 1.0), Quat::IDENTITY),
    );
    (attacker, defender)
}

pub type PointLog = Rc<RefCell<Vec<(ParticipantId, ActionPointType)>>>;

/// Records every firing of `points` on `participant` into `log`.
pub fn record(
    world: &mut CombatWorld,
    log: &PointLog,
    participant: ParticipantId,
    points: &[ActionPointType],
) {
    for &point in points {
        let log = Rc::clone(log);
        world
            .listen(participant, point, move |_, _| {
                log.borrow_mut().push((participant, point));
                Ok(())
            })
            .unwrap();
    }
}

pub fn health(world: &CombatWorld, participant: ParticipantId) -> u32 {
    world.participant(participant).unwrap().health.current()
}
