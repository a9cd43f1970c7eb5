//! Abilities: persistent, enable-gated capabilities that produce actions.
//!
//! Each participant owns exactly one [`Ability`] per action kind plus one
//! [`SkillAbility`] per learned skill. An ability is the only producer of its
//! action kind; [`Ability::try_make_action`] returns `None` when the ability
//! is disabled, which is the designed no-op path rather than an error.

mod content;
mod skill;

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

pub use content::{AttackConfig, ItemConfig};
pub use skill::{SkillAbility, SkillConfig};

use crate::action::{
    ActionKind, AddStatusAction, AttackBlockAction, CureAction, DamageAction, EffectAssignAction,
    SpellAttackAction, SpellItemAction, SpellSkillAction,
};
use crate::ids::{ItemId, ParticipantId, SkillId};
use crate::status::ActionControl;

/// Back-reference from an action to the ability that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AbilityRef {
    pub owner: ParticipantId,
    pub kind: ActionKind,
}

/// Action kinds an [`Ability`] can instantiate.
pub trait AbilityAction: Sized {
    const KIND: ActionKind;

    /// Builds a fresh action wired to `ability`, with its owner as creator.
    fn from_ability(ability: AbilityRef, target: ParticipantId) -> Self;
}

/// Enable-gated factory for one action kind.
pub struct Ability<A> {
    owner: ParticipantId,
    enabled: bool,
    suppressed: bool,
    _action: PhantomData<fn() -> A>,
}

impl<A: AbilityAction> Ability<A> {
    pub fn new(owner: ParticipantId) -> Self {
        Self {
            owner,
            enabled: true,
            suppressed: false,
            _action: PhantomData,
        }
    }

    pub fn owner(&self) -> ParticipantId {
        self.owner
    }

    pub fn kind(&self) -> ActionKind {
        A::KIND
    }

    /// `Enable` flag: false while disabled by gameplay or suppressed by a status.
    pub fn is_enabled(&self) -> bool {
        self.enabled && !self.suppressed
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub(crate) fn set_suppressed(&mut self, suppressed: bool) {
        self.suppressed = suppressed;
    }

    /// Instantiates an action against `target`, or `None` when disabled.
    pub fn try_make_action(&self, target: ParticipantId) -> Option<A> {
        if !self.is_enabled() {
            return None;
        }
        let ability = AbilityRef {
            owner: self.owner,
            kind: A::KIND,
        };
        Some(A::from_ability(ability, target))
    }
}

impl<A> Clone for Ability<A> {
    fn clone(&self) -> Self {
        Self {
            owner: self.owner,
            enabled: self.enabled,
            suppressed: self.suppressed,
            _action: PhantomData,
        }
    }
}

impl<A> fmt::Debug for Ability<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ability")
            .field("owner", &self.owner)
            .field("enabled", &self.enabled)
            .field("suppressed", &self.suppressed)
            .finish()
    }
}

/// Every ability one participant owns.
#[derive(Clone, Debug)]
pub struct Abilities {
    pub add_status: Ability<AddStatusAction>,
    pub attack_block: Ability<AttackBlockAction>,
    pub cure: Ability<CureAction>,
    pub damage: Ability<DamageAction>,
    pub effect_assign: Ability<EffectAssignAction>,
    pub spell_attack: Ability<SpellAttackAction>,
    pub spell_item: Ability<SpellItemAction>,
    pub spell_skill: Ability<SpellSkillAction>,
    pub skills: BTreeMap<SkillId, SkillAbility>,
    pub items: BTreeMap<ItemId, u32>,
}

impl Abilities {
    pub fn new(owner: ParticipantId) -> Self {
        Self {
            add_status: Ability::new(owner),
            attack_block: Ability::new(owner),
            cure: Ability::new(owner),
            damage: Ability::new(owner),
            effect_assign: Ability::new(owner),
            spell_attack: Ability::new(owner),
            spell_item: Ability::new(owner),
            spell_skill: Ability::new(owner),
            skills: BTreeMap::new(),
            items: BTreeMap::new(),
        }
    }

    /// Suppresses the spell/attack/item abilities named by `control`.
    pub(crate) fn apply_action_control(&mut self, control: ActionControl) {
        self.spell_skill
            .set_suppressed(control.contains(ActionControl::SPELL_FORBID));
        self.spell_attack
            .set_suppressed(control.contains(ActionControl::ATTACK_FORBID));
        self.spell_item
            .set_suppressed(control.contains(ActionControl::ITEM_FORBID));
    }

    pub fn skill(&self, skill: SkillId) -> Option<&SkillAbility> {
        self.skills.get(&skill)
    }

    pub fn skill_mut(&mut self, skill: SkillId) -> Option<&mut SkillAbility> {
        self.skills.get_mut(&skill)
    }

    pub fn item_count(&self, item: ItemId) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    /// Removes one charge of `item`; false when none is held.
    pub(crate) fn consume_item(&mut self, item: ItemId) -> bool {
        match self.items.get_mut(&item) {
            Some(count) if *count > 0 => {
                *count -= 1;
                if *count == 0 {
                    self.items.remove(&item);
                }
                true
            }
            _ => false,
        }
    }
}
