//! Collaborators outside the combat core: physics colliders and presentation.

use std::cell::RefCell;
use std::rc::Rc;

use crate::execution::PresentationCue;
use crate::hit_volume::{ColliderShape, Pose};
use crate::ids::{HitVolumeId, ParticipantId};

/// Engine-side hooks invoked by the world.
///
/// Every method defaults to a no-op so headless drivers only implement what
/// they render. Contacts flow the other way, through
/// [`crate::CombatWorld::report_contact`].
pub trait CombatHost {
    fn spawn_collider(&mut self, _volume: HitVolumeId, _shape: &ColliderShape, _pose: Pose) {}

    fn move_collider(&mut self, _volume: HitVolumeId, _pose: Pose) {}

    fn despawn_collider(&mut self, _volume: HitVolumeId) {}

    fn play_cue(&mut self, _owner: ParticipantId, _cue: &PresentationCue) {}

    fn participant_died(&mut self, _participant: ParticipantId, _killer: ParticipantId) {}
}

/// Host that ignores every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullHost;

impl CombatHost for NullHost {}

/// One call observed by a [`RecordingHost`].
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    Spawned { volume: HitVolumeId, pose: Pose },
    Moved { volume: HitVolumeId, pose: Pose },
    Despawned(HitVolumeId),
    Cue { owner: ParticipantId, cue: PresentationCue },
    Died { participant: ParticipantId, killer: ParticipantId },
}

/// Host that appends every call to a shared log.
#[derive(Clone, Debug, Default)]
pub struct RecordingHost {
    log: Rc<RefCell<Vec<HostEvent>>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the log; stays valid after the host is moved into a world.
    pub fn log(&self) -> Rc<RefCell<Vec<HostEvent>>> {
        Rc::clone(&self.log)
    }

    fn push(&self, event: HostEvent) {
        self.log.borrow_mut().push(event);
    }
}

impl CombatHost for RecordingHost {
    fn spawn_collider(&mut self, volume: HitVolumeId, _shape: &ColliderShape, pose: Pose) {
        self.push(HostEvent::Spawned { volume, pose });
    }

    fn move_collider(&mut self, volume: HitVolumeId, pose: Pose) {
        self.push(HostEvent::Moved { volume, pose });
    }

    fn despawn_collider(&mut self, volume: HitVolumeId) {
        self.push(HostEvent::Despawned(volume));
    }

    fn play_cue(&mut self, owner: ParticipantId, cue: &PresentationCue) {
        self.push(HostEvent::Cue {
            owner,
            cue: cue.clone(),
        });
    }

    fn participant_died(&mut self, participant: ParticipantId, killer: ParticipantId) {
        self.push(HostEvent::Died {
            participant,
            killer,
        });
    }
}
