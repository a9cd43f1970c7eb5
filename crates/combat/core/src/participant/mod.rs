//! Combat participants: attributes, health, statuses, abilities and the
//! per-participant action point bus.

mod attributes;

pub use attributes::{AttributeKind, AttributeModifier, Attributes, Health};

use glam::{Quat, Vec3};

use crate::ability::{Abilities, SkillAbility};
use crate::hit_volume::Pose;
use crate::ids::{ExecutionId, ItemId, ParticipantId, SkillId};
use crate::point::ActionPointBus;
use crate::status::StatusSet;

/// Everything needed to register a participant with the world.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticipantSpec {
    pub name: String,
    pub attributes: Attributes,
    pub max_health: u32,
    pub pose: Pose,
    /// Radius used by the built-in contact probe.
    pub radius: f32,
    pub skills: Vec<(SkillId, u32)>,
    pub items: Vec<(ItemId, u32)>,
    /// Registers the attack-block interception on spawn.
    pub can_block: bool,
}

impl ParticipantSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::default(),
            max_health: 100,
            pose: Pose::default(),
            radius: 0.5,
            skills: Vec::new(),
            items: Vec::new(),
            can_block: false,
        }
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    #[must_use]
    pub fn with_attack(mut self, attack: f32, defense: f32) -> Self {
        self.attributes.attack = attack;
        self.attributes.defense = defense;
        self
    }

    #[must_use]
    pub fn with_critical(mut self, probability: f32) -> Self {
        self.attributes.critical_probability = probability;
        self
    }

    /// Enables blocking with `basis_points` / 10000 probability.
    #[must_use]
    pub fn with_block(mut self, basis_points: u32) -> Self {
        self.attributes.block_probability = basis_points;
        self.can_block = true;
        self
    }

    #[must_use]
    pub fn with_health(mut self, max_health: u32) -> Self {
        self.max_health = max_health;
        self
    }

    #[must_use]
    pub fn at(mut self, position: Vec3, rotation: Quat) -> Self {
        self.pose = Pose::new(position, rotation);
        self
    }

    #[must_use]
    pub fn with_skill(mut self, skill: SkillId, level: u32) -> Self {
        self.skills.push((skill, level));
        self
    }

    #[must_use]
    pub fn with_item(mut self, item: ItemId, count: u32) -> Self {
        self.items.push((item, count));
        self
    }
}

/// A combatant registered with the world.
#[derive(Debug)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub pose: Pose,
    pub radius: f32,
    pub base: Attributes,
    pub health: Health,
    pub statuses: StatusSet,
    pub abilities: Abilities,
    pub(crate) points: ActionPointBus,
    spelling: Option<ExecutionId>,
}

impl Participant {
    pub(crate) fn new(id: ParticipantId, spec: ParticipantSpec) -> Self {
        let mut abilities = Abilities::new(id);
        for (skill, level) in spec.skills {
            abilities.skills.insert(skill, SkillAbility::new(skill, level));
        }
        for (item, count) in spec.items {
            *abilities.items.entry(item).or_default() += count;
        }
        abilities.attack_block.set_enabled(spec.can_block);
        Self {
            id,
            name: spec.name,
            pose: spec.pose,
            radius: spec.radius,
            base: spec.attributes,
            health: Health::full(spec.max_health),
            statuses: StatusSet::new(),
            abilities,
            points: ActionPointBus::new(),
            spelling: None,
        }
    }

    pub fn attack(&self) -> f32 {
        self.base.attack + self.statuses.modifier_total(AttributeKind::Attack)
    }

    pub fn defense(&self) -> f32 {
        self.base.defense + self.statuses.modifier_total(AttributeKind::Defense)
    }

    pub fn critical_probability(&self) -> f32 {
        (self.base.critical_probability
            + self.statuses.modifier_total(AttributeKind::CriticalProbability))
        .clamp(0.0, 1.0)
    }

    pub fn block_probability(&self) -> u32 {
        self.base.block_probability
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_depleted()
    }

    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    /// Execution currently occupying the spelling slot.
    pub fn spelling(&self) -> Option<ExecutionId> {
        self.spelling
    }

    pub(crate) fn set_spelling(&mut self, execution: Option<ExecutionId>) {
        self.spelling = execution;
    }

    pub fn points(&self) -> &ActionPointBus {
        &self.points
    }

    /// Re-derives ability suppression from the live statuses.
    pub(crate) fn refresh_action_control(&mut self) {
        let control = self.statuses.action_control();
        self.abilities.apply_action_control(control);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{StatusId, StatusInstanceId};
    use crate::status::{ActionControl, Status, StatusConfig};

    #[test]
    fn spec_seeds_abilities() {
        let spec = ParticipantSpec::new("hero")
            .with_skill(SkillId(1), 2)
            .with_item(ItemId(5), 1)
            .with_item(ItemId(5), 2)
            .with_block(2_500);
        let participant = Participant::new(ParticipantId(1), spec);
        assert_eq!(participant.abilities.skill(SkillId(1)).unwrap().level(), 2);
        assert_eq!(participant.abilities.item_count(ItemId(5)), 3);
        assert!(participant.abilities.attack_block.is_enabled());
        assert_eq!(participant.block_probability(), 2_500);
        assert_eq!(participant.health.current(), 100);
    }

    #[test]
    fn statuses_modify_attributes_and_control() {
        let mut participant = Participant::new(
            ParticipantId(1),
            ParticipantSpec::new("hero").with_attack(50.0, 30.0),
        );
        let config = StatusConfig::new(StatusId(2), "rage", 1_000)
            .with_modifier(AttributeModifier::new(AttributeKind::Attack, 5.0))
            .with_action_control(ActionControl::ITEM_FORBID);
        let status = Status::start(StatusInstanceId(1), &config, ParticipantId(1), 1, 1_000, 0);
        participant.statuses.insert(status).unwrap();
        participant.refresh_action_control();
        assert_eq!(participant.attack(), 55.0);
        assert_eq!(participant.defense(), 30.0);
        assert!(!participant.abilities.spell_item.is_enabled());
    }
}
