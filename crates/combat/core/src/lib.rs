//! Frame-driven real-time combat resolution.
//!
//! `combat-core` resolves damage, healing, statuses, blocks, skill timelines
//! and hit volumes between participants. Callers drive it through
//! [`CombatWorld`]: spawn participants, call an entry point such as
//! [`CombatWorld::spell_skill`], then advance the clock with
//! [`CombatWorld::tick`]. Gameplay scripts hook in by registering listeners
//! on a participant's [`ActionPointType`]s.
//!
//! The core performs no I/O. Authored content comes in through
//! [`ConfigOracle`], randomness through [`RngOracle`] and physics or
//! presentation through [`CombatHost`].
pub mod ability;
pub mod action;
pub mod config;
pub mod effect;
pub mod env;
pub mod error;
pub mod execution;
pub mod hit_volume;
pub mod ids;
pub mod participant;
pub mod point;
pub mod status;
pub mod world;

pub use ability::{
    Abilities, Ability, AbilityAction, AbilityRef, AttackConfig, ItemConfig, SkillAbility,
    SkillConfig,
};
pub use action::{
    ActionError, ActionKind, ActionPhase, ActionPhaseError, AddStatusAction, AddStatusOutcome,
    AssignOutcome, AttackBlockAction, CombatAction, CureAction, DamageAction, DamageOutcome,
    EffectAssignAction, SpellAttackAction, SpellItemAction, SpellPhase, SpellSkillAction, drive,
};
pub use config::CombatConfig;
pub use effect::{
    AddStatusEffect, CureEffect, CustomEffect, DamageEffect, DamagePipeline, DamageSource,
    DamageStage, DamageStep, Effect, EffectKind, EffectOrigin, EffectSelection, EffectSource,
    FormulaInputs, RemoveStatusEffect, TargetFalloff, ValueFormula,
};
pub use env::{
    CombatHost, ConfigCatalog, ConfigError, ConfigOracle, HostEvent, NullHost, PcgRng,
    RecordingHost, RngOracle, ScriptedRng,
};
pub use error::{CombatError, CombatFault, ErrorSeverity};
pub use execution::{
    ActionEventData, AttackExecution, ClipKind, CollisionExecuteData, CueKind, ExecuteClip,
    ExecutionConfig, PresentationCue, SkillExecution, SpellInput,
};
pub use hit_volume::{ColliderShape, CollisionMoveType, HitVolume, Pose, VolumeStep};
pub use ids::{
    AttackId, ExecutionId, HitVolumeId, ItemId, ListenerId, Millis, ParticipantId, SkillId,
    StatusId, StatusInstanceId,
};
pub use participant::{
    AttributeKind, AttributeModifier, Attributes, Health, Participant, ParticipantSpec,
};
pub use point::{ActionPointBus, ActionPointType, Fault, ListenerError, PointPayload};
pub use status::{ActionControl, PeriodicEffect, Status, StatusConfig, StatusSet};
pub use world::CombatWorld;
