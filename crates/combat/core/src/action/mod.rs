//! Actions: transient, single-use resolution units.
//!
//! Synchronous actions implement [`CombatAction`] and are driven through
//! `PreProcess -> Apply -> PostProcess -> Finished` by [`drive`], which
//! consumes the action so a finished action cannot be touched again.
//! [`SpellSkillAction`] spans several frames and has its own pending state.
//!
//! # Module Structure
//!
//! - `damage`, `cure`, `add_status`: effect-level actions
//! - `attack_block`: target-side interception of basic attacks
//! - `effect_assign`: fan-out from one authored effect to a concrete action
//! - `spell_attack`, `spell_item`, `spell_skill`: caster entry points

mod add_status;
mod attack_block;
mod cure;
mod damage;
mod effect_assign;
mod error;
mod spell_attack;
mod spell_item;
mod spell_skill;

pub use add_status::{AddStatusAction, AddStatusOutcome};
pub use attack_block::AttackBlockAction;
pub use cure::CureAction;
pub use damage::{DamageAction, DamageOutcome};
pub use effect_assign::{AssignOutcome, EffectAssignAction};
pub use error::ActionError;
pub use spell_attack::SpellAttackAction;
pub use spell_item::SpellItemAction;
pub use spell_skill::{SpellPhase, SpellSkillAction};

pub(crate) use attack_block::intercept_attack;

use strum::Display;

use crate::ability::AbilityAction;
use crate::error::{CombatFault, ErrorSeverity};
use crate::world::CombatWorld;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum ActionKind {
    AddStatus,
    AttackBlock,
    Cure,
    Damage,
    EffectAssign,
    SpellAttack,
    SpellItem,
    SpellSkill,
}

/// Lifecycle of a synchronous action. Phases only move forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum ActionPhase {
    Created,
    PreProcess,
    Apply,
    PostProcess,
    Finished,
}

/// Associates the failing phase with the underlying error.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{kind} action failed during {phase}: {error}")]
pub struct ActionPhaseError {
    pub kind: ActionKind,
    pub phase: ActionPhase,
    #[source]
    pub error: ActionError,
}

impl ActionPhaseError {
    pub fn new(kind: ActionKind, phase: ActionPhase, error: ActionError) -> Self {
        Self { kind, phase, error }
    }
}

impl CombatFault for ActionPhaseError {
    fn severity(&self) -> ErrorSeverity {
        self.error.severity()
    }

    fn error_code(&self) -> &'static str {
        self.error.error_code()
    }
}

/// Defines how a synchronous action resolves.
pub trait CombatAction: AbilityAction {
    type Outcome;

    fn phase(&self) -> ActionPhase;

    fn set_phase(&mut self, phase: ActionPhase);

    /// Resolves values and fires the `Pre*` points.
    fn pre_process(&mut self, _world: &mut CombatWorld) -> Result<(), ActionError> {
        Ok(())
    }

    /// Core resolution step.
    fn apply(&mut self, world: &mut CombatWorld) -> Result<Self::Outcome, ActionError>;

    /// Fires the `Post*` points.
    fn post_process(&mut self, _world: &mut CombatWorld) -> Result<(), ActionError> {
        Ok(())
    }
}

fn enter<A: CombatAction>(action: &mut A, next: ActionPhase) {
    debug_assert!(
        action.phase() < next,
        "{} action moved from {} back to {}",
        A::KIND,
        action.phase(),
        next
    );
    tracing::trace!(target: "combat::action", kind = %A::KIND, phase = %next, "phase");
    action.set_phase(next);
}

/// Runs an action through every phase and disposes it.
///
/// Listener faults never surface here; only the action's own failures do.
pub fn drive<A>(mut action: A, world: &mut CombatWorld) -> Result<A::Outcome, ActionPhaseError>
where
    A: CombatAction,
{
    let fail = |phase: ActionPhase| {
        move |error: ActionError| ActionPhaseError::new(A::KIND, phase, error)
    };

    enter(&mut action, ActionPhase::PreProcess);
    action
        .pre_process(world)
        .map_err(fail(ActionPhase::PreProcess))?;

    enter(&mut action, ActionPhase::Apply);
    let outcome = action.apply(world).map_err(fail(ActionPhase::Apply))?;

    enter(&mut action, ActionPhase::PostProcess);
    action
        .post_process(world)
        .map_err(fail(ActionPhase::PostProcess))?;

    enter(&mut action, ActionPhase::Finished);
    Ok(outcome)
}
