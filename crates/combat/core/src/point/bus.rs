use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::{ActionPointType, ListenerError, PointPayload};
use crate::ids::ListenerId;
use crate::world::CombatWorld;

/// Handler signature for an action point.
pub type ListenerFn =
    dyn Fn(&mut CombatWorld, &mut PointPayload<'_>) -> Result<(), ListenerError>;

struct Registration {
    id: ListenerId,
    handler: Rc<ListenerFn>,
}

/// Ordered handler lists keyed by point type, owned by one participant.
///
/// Dispatch iterates over a snapshot, so handlers may register or remove
/// listeners (including themselves) while a point is firing.
#[derive(Default)]
pub struct ActionPointBus {
    listeners: HashMap<ActionPointType, Vec<Registration>>,
}

impl ActionPointBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen(&mut self, point: ActionPointType, id: ListenerId, handler: Rc<ListenerFn>) {
        self.listeners
            .entry(point)
            .or_default()
            .push(Registration { id, handler });
    }

    /// Removes a registration; returns whether it was present.
    pub fn unlisten(&mut self, point: ActionPointType, id: ListenerId) -> bool {
        let Some(list) = self.listeners.get_mut(&point) else {
            return false;
        };
        let before = list.len();
        list.retain(|registration| registration.id != id);
        let removed = list.len() != before;
        if list.is_empty() {
            self.listeners.remove(&point);
        }
        removed
    }

    pub fn contains(&self, point: ActionPointType, id: ListenerId) -> bool {
        self.listeners
            .get(&point)
            .is_some_and(|list| list.iter().any(|registration| registration.id == id))
    }

    pub fn len(&self, point: ActionPointType) -> usize {
        self.listeners.get(&point).map_or(0, Vec::len)
    }

    /// Handlers registered on `point`, in registration order.
    pub fn snapshot(&self, point: ActionPointType) -> Vec<(ListenerId, Rc<ListenerFn>)> {
        self.listeners
            .get(&point)
            .map(|list| {
                list.iter()
                    .map(|registration| (registration.id, Rc::clone(&registration.handler)))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

impl fmt::Debug for ActionPointBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (point, list) in &self.listeners {
            let ids: Vec<ListenerId> = list.iter().map(|registration| registration.id).collect();
            map.entry(point, &ids);
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Rc<ListenerFn> {
        Rc::new(|_: &mut CombatWorld, _: &mut PointPayload<'_>| {
            Ok::<(), ListenerError>(())
        })
    }

    #[test]
    fn keeps_registration_order() {
        let mut bus = ActionPointBus::new();
        bus.listen(ActionPointType::PreSpell, ListenerId(3), noop());
        bus.listen(ActionPointType::PreSpell, ListenerId(1), noop());
        bus.listen(ActionPointType::PostSpell, ListenerId(2), noop());
        let ids: Vec<_> = bus
            .snapshot(ActionPointType::PreSpell)
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, [ListenerId(3), ListenerId(1)]);
    }

    #[test]
    fn unlisten_removes_only_that_registration() {
        let mut bus = ActionPointBus::new();
        bus.listen(ActionPointType::AssignEffect, ListenerId(1), noop());
        bus.listen(ActionPointType::AssignEffect, ListenerId(2), noop());
        assert!(bus.unlisten(ActionPointType::AssignEffect, ListenerId(1)));
        assert!(!bus.unlisten(ActionPointType::AssignEffect, ListenerId(1)));
        assert!(!bus.contains(ActionPointType::AssignEffect, ListenerId(1)));
        assert!(bus.contains(ActionPointType::AssignEffect, ListenerId(2)));
        assert_eq!(bus.len(ActionPointType::AssignEffect), 1);
    }

    #[test]
    fn snapshot_is_detached_from_later_changes() {
        let mut bus = ActionPointBus::new();
        bus.listen(ActionPointType::PostCauseDamage, ListenerId(1), noop());
        let snapshot = bus.snapshot(ActionPointType::PostCauseDamage);
        bus.clear();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(bus.len(ActionPointType::PostCauseDamage), 0);
    }
}
