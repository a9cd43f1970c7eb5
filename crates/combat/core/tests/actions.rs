mod common;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use combat_core::{
    ActionPointType, AddStatusEffect, AddStatusOutcome, AssignOutcome, CombatConfig, CombatError,
    CureEffect, CustomEffect, DamageEffect, DamageOutcome, Effect, EffectOrigin, EffectSource,
    Fault, ListenerError, ParticipantId, ParticipantSpec, PointPayload, ScriptedRng, SpellInput,
    ValueFormula, drive,
};
use common::{BURN, GUARD, POTION, PointLog, SILENCE, STRIKE, damage, duel, health, record, world};

fn add_status(status: combat_core::StatusId) -> Effect {
    Effect::AddStatus(AddStatusEffect {
        status,
        duration_ms: None,
        params: BTreeMap::new(),
    })
}

fn skill_source() -> EffectSource {
    EffectSource::new(EffectOrigin::Skill(STRIKE))
}

#[test]
fn melee_attack_subtracts_defense() {
    let mut world = world(CombatConfig::default(), ScriptedRng::never());
    let (attacker, defender) = duel(&mut world);

    let attack = world.spell_attack(attacker, defender).unwrap();

    assert!(attack.is_some());
    assert_eq!(health(&world, defender), 180);
}

#[test]
fn forced_critical_scales_attack_damage() {
    let mut world = world(CombatConfig::default(), ScriptedRng::always());
    let attacker = world.spawn_participant(
        combat_core::ParticipantSpec::new("crit")
            .with_attack(50.0, 0.0)
            .with_critical(0.5),
    );
    let defender = world.spawn_participant(
        combat_core::ParticipantSpec::new("target")
            .with_attack(10.0, 30.0)
            .with_health(200),
    );

    world.spell_attack(attacker, defender).unwrap();

    assert_eq!(health(&world, defender), 170);
}

#[test]
fn damage_action_reports_outcome() {
    let mut world = world(CombatConfig::default(), ScriptedRng::never());
    let (attacker, defender) = duel(&mut world);

    let action = world
        .participant(attacker)
        .unwrap()
        .abilities
        .damage
        .try_make_action(defender)
        .unwrap();
    let outcome = drive(action, &mut world).unwrap();

    assert_eq!(outcome.dealt, 20);
    assert!(!outcome.critical);
    assert!(!outcome.killed);
}

#[test]
fn non_stackable_status_refreshes_instead_of_stacking() {
    let mut world = world(CombatConfig::default(), ScriptedRng::never());
    let (attacker, defender) = duel(&mut world);
    let log = PointLog::default();
    record(&mut world, &log, defender, &[ActionPointType::PostReceiveStatus]);

    let first = world
        .assign_effect(attacker, defender, add_status(GUARD), skill_source())
        .unwrap();
    assert!(matches!(
        first,
        Some(AssignOutcome::Status(AddStatusOutcome::Applied(_)))
    ));

    world.tick(1_000);
    let second = world
        .assign_effect(attacker, defender, add_status(GUARD), skill_source())
        .unwrap();
    assert!(matches!(
        second,
        Some(AssignOutcome::Status(AddStatusOutcome::Refreshed(_)))
    ));

    let participant = world.participant(defender).unwrap();
    assert_eq!(participant.statuses.count_of(GUARD), 1);
    let status = participant.statuses.iter().next().unwrap();
    assert_eq!(status.remaining(world.now()), 3_000);
    assert_eq!(participant.defense(), 40.0);
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn cure_at_full_health_still_fires_post_points() {
    let mut world = world(CombatConfig::default(), ScriptedRng::never());
    let (attacker, defender) = duel(&mut world);
    let log = PointLog::default();
    record(&mut world, &log, attacker, &[ActionPointType::PostGiveCure]);
    record(&mut world, &log, defender, &[ActionPointType::PostReceiveCure]);

    let cure = Effect::Cure(CureEffect {
        formula: ValueFormula::Constant(30.0),
    });
    let outcome = world
        .assign_effect(attacker, defender, cure, skill_source())
        .unwrap();

    assert_eq!(outcome, Some(AssignOutcome::Cure(0)));
    assert_eq!(health(&world, defender), 200);
    assert_eq!(
        *log.borrow(),
        vec![
            (attacker, ActionPointType::PostGiveCure),
            (defender, ActionPointType::PostReceiveCure),
        ]
    );
}

#[test]
fn certain_block_marks_attack_blocked_before_damage() {
    let config = CombatConfig::default().with_attack_timing(100, 100);
    let mut world = world(config, ScriptedRng::never());
    let attacker = world.spawn_participant(combat_core::ParticipantSpec::new("attacker"));
    let blocker = world.spawn_participant(
        combat_core::ParticipantSpec::new("blocker")
            .with_health(50)
            .with_block(10_000),
    );
    let log = PointLog::default();
    record(&mut world, &log, blocker, &[ActionPointType::PostGiveBlock]);
    record(&mut world, &log, attacker, &[ActionPointType::PostReceiveBlock]);

    let attack = world.spell_attack(attacker, blocker).unwrap().unwrap();
    assert!(!world.attack(attack).unwrap().is_blocked());

    world.tick(100);

    let execution = world.attack(attack).unwrap();
    assert!(execution.is_applied());
    assert!(execution.is_blocked());
    assert_eq!(health(&world, blocker), 50);
    assert_eq!(
        *log.borrow(),
        vec![
            (blocker, ActionPointType::PostGiveBlock),
            (attacker, ActionPointType::PostReceiveBlock),
        ]
    );

    world.tick(100);
    assert!(world.attack(attack).is_none());
}

#[test]
fn disabled_ability_is_a_silent_no_op() {
    let mut world = world(CombatConfig::default(), ScriptedRng::never());
    let (attacker, defender) = duel(&mut world);
    let log = PointLog::default();
    record(
        &mut world,
        &log,
        attacker,
        &[ActionPointType::PreGiveAttack, ActionPointType::PostGiveAttack],
    );
    world
        .participant_mut(attacker)
        .unwrap()
        .abilities
        .spell_attack
        .set_enabled(false);

    let attack = world.spell_attack(attacker, defender).unwrap();

    assert!(attack.is_none());
    assert!(log.borrow().is_empty());
    assert_eq!(health(&world, defender), 200);
}

#[test]
fn failing_listener_does_not_stop_the_others() {
    let mut world = world(CombatConfig::default(), ScriptedRng::never());
    let (attacker, defender) = duel(&mut world);
    let order = Rc::new(RefCell::new(Vec::new()));

    for step in 1..=3 {
        let order = Rc::clone(&order);
        world
            .listen(defender, ActionPointType::PreReceiveDamage, move |_, _| {
                if step == 2 {
                    return Err(ListenerError::rejected("second listener"));
                }
                order.borrow_mut().push(step);
                Ok(())
            })
            .unwrap();
    }
    let log = PointLog::default();
    record(&mut world, &log, defender, &[ActionPointType::PostReceiveDamage]);

    world
        .assign_effect(
            attacker,
            defender,
            damage(ValueFormula::Melee),
            skill_source(),
        )
        .unwrap();

    assert_eq!(*order.borrow(), vec![1, 3]);
    assert_eq!(log.borrow().len(), 1);
    assert_eq!(health(&world, defender), 180);

    let faults = world.drain_faults();
    assert_eq!(faults.len(), 1);
    assert!(matches!(
        &faults[0],
        Fault::Listener {
            point: ActionPointType::PreReceiveDamage,
            ..
        }
    ));
    assert!(world.faults().is_empty());
}

#[test]
fn listener_rewrites_damage_before_apply() {
    let mut world = world(CombatConfig::default(), ScriptedRng::never());
    let (attacker, defender) = duel(&mut world);
    world
        .listen(defender, ActionPointType::PreReceiveDamage, |_, payload| {
            if let PointPayload::Damage(action) = payload {
                action.damage_value = 1;
            }
            Ok(())
        })
        .unwrap();

    world.spell_attack(attacker, defender).unwrap();

    assert_eq!(health(&world, defender), 199);
}

#[test]
fn listener_removing_a_later_listener_skips_it() {
    let mut world = world(CombatConfig::default(), ScriptedRng::never());
    let (attacker, defender) = duel(&mut world);
    let fired = Rc::new(RefCell::new(0));

    let later = Rc::new(RefCell::new(None));
    let handle = Rc::clone(&later);
    world
        .listen(defender, ActionPointType::PreReceiveDamage, move |world, _| {
            if let Some(id) = *handle.borrow() {
                world.unlisten(defender, ActionPointType::PreReceiveDamage, id);
            }
            Ok(())
        })
        .unwrap();
    let counter = Rc::clone(&fired);
    let id = world
        .listen(defender, ActionPointType::PreReceiveDamage, move |_, _| {
            *counter.borrow_mut() += 1;
            Ok(())
        })
        .unwrap();
    *later.borrow_mut() = Some(id);

    world.spell_attack(attacker, defender).unwrap();

    assert_eq!(*fired.borrow(), 0);
}

#[test]
fn runaway_listener_cascade_is_cut_off() {
    let config = CombatConfig::default().with_max_dispatch_depth(4);
    let mut world = world(config, ScriptedRng::never());
    let (attacker, defender) = duel(&mut world);
    world
        .listen(defender, ActionPointType::PreReceiveDamage, move |world, _| {
            world.assign_effect(
                attacker,
                defender,
                damage(ValueFormula::Constant(1.0)),
                EffectSource::new(EffectOrigin::Attack),
            )?;
            Ok(())
        })
        .unwrap();

    world
        .assign_effect(
            attacker,
            defender,
            damage(ValueFormula::Constant(1.0)),
            skill_source(),
        )
        .unwrap();

    // The outer damage plus one nested damage per permitted depth.
    assert_eq!(health(&world, defender), 195);
    assert!(
        world
            .faults()
            .iter()
            .any(|fault| matches!(fault, Fault::DispatchDepth { depth: 4, .. }))
    );
}

#[test]
fn items_heal_and_are_consumed() {
    let mut world = world(CombatConfig::default(), ScriptedRng::never());
    let (attacker, defender) = duel(&mut world);
    world
        .assign_effect(
            defender,
            attacker,
            damage(ValueFormula::Constant(50.0)),
            skill_source(),
        )
        .unwrap();
    assert_eq!(health(&world, attacker), 150);

    let outcomes = world.spell_item(attacker, POTION, attacker).unwrap();

    assert_eq!(outcomes, Some(vec![AssignOutcome::Cure(30)]));
    assert_eq!(health(&world, attacker), 180);
    assert_eq!(
        world.participant(attacker).unwrap().abilities.item_count(POTION),
        0
    );
    assert!(matches!(
        world.spell_item(attacker, POTION, attacker),
        Err(CombatError::ItemNotHeld { .. })
    ));
}

#[test]
fn silence_forbids_spelling_until_it_expires() {
    let mut world = world(CombatConfig::default(), ScriptedRng::never());
    let (attacker, defender) = duel(&mut world);
    let log = PointLog::default();
    record(&mut world, &log, attacker, &[ActionPointType::PostRemoveStatus]);

    world
        .assign_effect(defender, attacker, add_status(SILENCE), skill_source())
        .unwrap();
    let spelled = world
        .spell_skill(attacker, STRIKE, SpellInput::target(defender))
        .unwrap();
    assert!(spelled.is_none());

    world.tick(2_000);

    assert_eq!(log.borrow().len(), 1);
    let spelled = world
        .spell_skill(attacker, STRIKE, SpellInput::target(defender))
        .unwrap();
    assert!(spelled.is_some());
}

#[test]
fn periodic_status_ticks_until_expiry() {
    let mut world = world(CombatConfig::default(), ScriptedRng::never());
    let (attacker, defender) = duel(&mut world);

    world
        .assign_effect(attacker, defender, add_status(BURN), skill_source())
        .unwrap();
    for _ in 0..3 {
        world.tick(1_000);
    }

    assert_eq!(health(&world, defender), 185);
    assert!(world.participant(defender).unwrap().statuses.is_empty());

    world.tick(1_000);
    assert_eq!(health(&world, defender), 185);
}

#[test]
fn long_frame_catches_up_periodic_ticks() {
    let mut world = world(CombatConfig::default(), ScriptedRng::never());
    let (attacker, defender) = duel(&mut world);

    world
        .assign_effect(attacker, defender, add_status(BURN), skill_source())
        .unwrap();
    world.tick(5_000);

    assert_eq!(health(&world, defender), 185);
}

#[test]
fn clear_all_status_removes_every_instance() {
    let mut world = world(CombatConfig::default(), ScriptedRng::never());
    let (attacker, defender) = duel(&mut world);
    world
        .assign_effect(attacker, defender, add_status(GUARD), skill_source())
        .unwrap();
    world
        .assign_effect(attacker, defender, add_status(BURN), skill_source())
        .unwrap();

    let outcome = world
        .assign_effect(attacker, defender, Effect::ClearAllStatus, skill_source())
        .unwrap();

    assert_eq!(outcome, Some(AssignOutcome::Removed(2)));
    assert_eq!(world.participant(defender).unwrap().defense(), 30.0);
}

#[test]
fn custom_effect_reaches_receive_effect_listeners() {
    let mut world = world(CombatConfig::default(), ScriptedRng::never());
    let (attacker, defender) = duel(&mut world);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let names = Rc::clone(&seen);
    world
        .listen(defender, ActionPointType::ReceiveEffect, move |_, payload| {
            if let PointPayload::EffectAssign(action) = payload
                && let Some(Effect::Custom(custom)) = &action.effect
            {
                names.borrow_mut().push(custom.name.clone());
            }
            Ok(())
        })
        .unwrap();

    let custom = Effect::Custom(CustomEffect {
        name: "taunt".into(),
        params: BTreeMap::new(),
    });
    let outcome = world
        .assign_effect(attacker, defender, custom, skill_source())
        .unwrap();

    assert_eq!(outcome, Some(AssignOutcome::Custom));
    assert_eq!(*seen.borrow(), vec!["taunt".to_string()]);
}

fn sharp_duel(
    world: &mut combat_core::CombatWorld,
    critical: f32,
) -> (ParticipantId, ParticipantId) {
    let attacker = world.spawn_participant(
        ParticipantSpec::new("sharp")
            .with_attack(50.0, 0.0)
            .with_critical(critical),
    );
    let defender = world.spawn_participant(
        ParticipantSpec::new("target")
            .with_attack(10.0, 30.0)
            .with_health(200),
    );
    (attacker, defender)
}

fn skill_damage(can_crit: bool) -> Effect {
    Effect::Damage(DamageEffect {
        formula: ValueFormula::Constant(20.0),
        can_crit,
        falloff: None,
    })
}

#[test]
fn skill_damage_without_can_crit_never_crits() {
    let mut world = world(CombatConfig::default(), ScriptedRng::always());
    let (attacker, defender) = sharp_duel(&mut world, 0.99);

    let outcome = world
        .assign_effect(attacker, defender, skill_damage(false), skill_source())
        .unwrap();

    assert!(matches!(
        outcome,
        Some(AssignOutcome::Damage(DamageOutcome {
            dealt: 20,
            critical: false,
            ..
        }))
    ));
    assert_eq!(health(&world, defender), 180);
}

#[test]
fn skill_damage_with_can_crit_rolls_and_rounds_up() {
    let mut world = world(CombatConfig::default(), ScriptedRng::always());
    let (attacker, defender) = sharp_duel(&mut world, 0.99);

    let outcome = world
        .assign_effect(attacker, defender, skill_damage(true), skill_source())
        .unwrap();

    assert!(matches!(
        outcome,
        Some(AssignOutcome::Damage(DamageOutcome {
            dealt: 30,
            critical: true,
            ..
        }))
    ));
    assert_eq!(health(&world, defender), 170);
}

#[test]
fn critical_roll_equal_to_probability_misses() {
    let mut world = world(CombatConfig::default(), ScriptedRng::new([0.5]));
    let (attacker, defender) = sharp_duel(&mut world, 0.5);

    world.spell_attack(attacker, defender).unwrap();

    assert_eq!(health(&world, defender), 180);
}
