//! Action point dispatch and the listener fault channel.

use super::{CombatWorld, handler};
use crate::error::CombatError;
use crate::ids::{ListenerId, ParticipantId};
use crate::point::{ActionPointType, Fault, ListenerError, PointPayload};

impl CombatWorld {
    /// Registers a handler on one of a participant's action points.
    pub fn listen<F>(
        &mut self,
        participant: ParticipantId,
        point: ActionPointType,
        f: F,
    ) -> Result<ListenerId, CombatError>
    where
        F: Fn(&mut CombatWorld, &mut PointPayload<'_>) -> Result<(), ListenerError> + 'static,
    {
        let id = ListenerId(self.ids.allocate());
        self.participants
            .get_mut(&participant)
            .ok_or(CombatError::UnknownParticipant(participant))?
            .points
            .listen(point, id, handler(f));
        tracing::trace!(
            target: "combat::bus",
            %participant,
            %point,
            listener = %id,
            "listener registered"
        );
        Ok(id)
    }

    /// Removes a handler; false when it (or its participant) is gone.
    pub fn unlisten(
        &mut self,
        participant: ParticipantId,
        point: ActionPointType,
        listener: ListenerId,
    ) -> bool {
        self.participants
            .get_mut(&participant)
            .is_some_and(|p| p.points.unlisten(point, listener))
    }

    /// Fires `point` on `participant`, invoking every handler in
    /// registration order.
    ///
    /// Handlers see the live payload and may mutate it. A failing handler
    /// is recorded as a [`Fault`] and the rest still run. Handlers removed
    /// mid-dispatch, or whose participant is disposed, are skipped.
    pub fn trigger(
        &mut self,
        participant: ParticipantId,
        point: ActionPointType,
        payload: &mut PointPayload<'_>,
    ) {
        let Some(owner) = self.participants.get(&participant) else {
            return;
        };
        let handlers = owner.points.snapshot(point);
        if handlers.is_empty() {
            return;
        }

        if self.dispatch_depth >= self.config.max_dispatch_depth {
            tracing::warn!(
                target: "combat::bus",
                %participant,
                %point,
                depth = self.dispatch_depth,
                "dispatch depth exceeded, trigger skipped"
            );
            self.faults.push(Fault::DispatchDepth {
                at: self.now,
                participant,
                point,
                depth: self.dispatch_depth,
            });
            return;
        }

        tracing::trace!(
            target: "combat::bus",
            %participant,
            %point,
            payload = payload.kind(),
            handlers = handlers.len(),
            "trigger"
        );
        self.dispatch_depth += 1;
        for (listener, f) in handlers {
            let registered = self
                .participants
                .get(&participant)
                .is_some_and(|p| p.points.contains(point, listener));
            if !registered {
                continue;
            }
            if let Err(error) = f(self, payload) {
                tracing::error!(
                    target: "combat::bus",
                    %participant,
                    %point,
                    %listener,
                    %error,
                    "listener failed"
                );
                self.faults.push(Fault::Listener {
                    at: self.now,
                    participant,
                    point,
                    listener,
                    error,
                });
            }
        }
        self.dispatch_depth -= 1;
    }

    /// Faults recorded since the last drain, oldest first.
    pub fn faults(&self) -> &[Fault] {
        &self.faults
    }

    pub fn drain_faults(&mut self) -> Vec<Fault> {
        std::mem::take(&mut self.faults)
    }

    pub(crate) fn record_scheduled_fault(&mut self, context: &'static str, error: CombatError) {
        tracing::error!(target: "combat::world", context, %error, "scheduled work failed");
        self.faults.push(Fault::Scheduled {
            at: self.now,
            context,
            error,
        });
    }
}
