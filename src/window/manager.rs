//! Registry of active overlay windows.
//!
//! The manager tracks every overlay currently on screen in presentation
//! (z) order and answers the single focus question the rest of the crate
//! needs: which window is key. It never owns window memory — windows are
//! owned by their presenters and check in and out of the registry as they
//! move through their lifecycle.
//!
//! # Invariants
//!
//! - Entries are ordered by presentation time, most recent last (topmost).
//! - Every entry is in an active state; a window deregisters the instant
//!   it reaches `Dismissed`.
//! - At most one window is key: the topmost entry that is Appearing or
//!   Visible. Key-ness is computed from the registry, never stored, so it
//!   cannot drift out of sync with the stacking order.

use std::cell::RefCell;
use std::rc::Rc;

use super::{OverlayId, PresentationState};

/// Capability contract between overlay windows and the registry that
/// tracks them.
///
/// Concrete managers may differ in how they map overlays onto screens or
/// scenes; windows only depend on this surface, held as
/// `Rc<dyn OverlayRegistry>`.
pub trait OverlayRegistry {
    /// Hand out the next window id. Ids are unique per registry.
    fn allocate_id(&self) -> OverlayId;

    /// Append `id` at the top of the stacking order. The newly registered
    /// window becomes key by construction. Registering an id twice in one
    /// show-cycle is a programming error; the window's state guard is the
    /// primary defense and the registry degrades to a no-op.
    fn register(&self, id: OverlayId, state: PresentationState);

    /// Remove `id` wherever it occurs. Out-of-order removal (a lower
    /// window dismissed under a higher one) preserves the relative order
    /// of the remaining entries.
    fn deregister(&self, id: OverlayId);

    /// Record a lifecycle transition for a registered window.
    fn update_state(&self, id: OverlayId, state: PresentationState);

    /// The window currently eligible for input, if any: the topmost entry
    /// in an interactive state.
    fn key_window(&self) -> Option<OverlayId>;

    /// Ids of all registered windows, bottom to top.
    fn stacking_order(&self) -> Vec<OverlayId>;
}

struct Entry {
    id: OverlayId,
    state: PresentationState,
}

#[derive(Default)]
pub(crate) struct Registry {
    entries: Vec<Entry>,
    next_seq: u64,
}

impl OverlayRegistry for RefCell<Registry> {
    fn allocate_id(&self) -> OverlayId {
        let mut registry = self.borrow_mut();
        let id = OverlayId::new(registry.next_seq);
        registry.next_seq = registry.next_seq.saturating_add(1);
        id
    }

    fn register(&self, id: OverlayId, state: PresentationState) {
        let mut registry = self.borrow_mut();
        if registry.entries.iter().any(|entry| entry.id == id) {
            debug_assert!(false, "overlay window registered twice");
            tracing::warn!(id = id.get(), "ignoring duplicate registration");
            return;
        }
        tracing::debug!(id = id.get(), ?state, "overlay registered");
        registry.entries.push(Entry { id, state });
    }

    fn deregister(&self, id: OverlayId) {
        let mut registry = self.borrow_mut();
        let before = registry.entries.len();
        registry.entries.retain(|entry| entry.id != id);
        if registry.entries.len() == before {
            tracing::warn!(id = id.get(), "deregister of unknown overlay ignored");
        } else {
            tracing::debug!(id = id.get(), "overlay deregistered");
        }
    }

    fn update_state(&self, id: OverlayId, state: PresentationState) {
        let mut registry = self.borrow_mut();
        match registry.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => entry.state = state,
            None => {
                tracing::warn!(id = id.get(), ?state, "state update for unknown overlay");
            }
        }
    }

    fn key_window(&self) -> Option<OverlayId> {
        self.borrow()
            .entries
            .iter()
            .rev()
            .find(|entry| entry.state.is_interactive())
            .map(|entry| entry.id)
    }

    fn stacking_order(&self) -> Vec<OverlayId> {
        self.borrow().entries.iter().map(|entry| entry.id).collect()
    }
}

/// The concrete overlay registry.
///
/// A cheap-to-clone handle: clones share one registry. Single-threaded by
/// design — every operation happens on the UI-affine execution context, so
/// interior mutability through `RefCell` is sufficient and no locking
/// exists anywhere in the crate.
#[derive(Clone, Default)]
pub struct OverlayManager {
    inner: Rc<RefCell<Registry>>,
}

impl OverlayManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry surface consumed by overlay windows. Each window holds
    /// one of these for its whole lifetime.
    pub fn registry(&self) -> Rc<dyn OverlayRegistry> {
        self.inner.clone()
    }

    pub fn key_window(&self) -> Option<OverlayId> {
        self.inner.key_window()
    }

    pub fn stacking_order(&self) -> Vec<OverlayId> {
        self.inner.stacking_order()
    }

    pub fn contains(&self, id: OverlayId) -> bool {
        self.inner
            .borrow()
            .entries
            .iter()
            .any(|entry| entry.id == id)
    }

    /// Registered state of `id`, if the window is currently tracked.
    pub fn state_of(&self, id: OverlayId) -> Option<PresentationState> {
        self.inner
            .borrow()
            .entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.state)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(manager: &OverlayManager, n: usize) -> Vec<OverlayId> {
        (0..n).map(|_| manager.registry().allocate_id()).collect()
    }

    #[test]
    fn register_orders_lifo_and_tracks_key() {
        let manager = OverlayManager::new();
        let registry = manager.registry();
        let ids = ids(&manager, 3);
        for &id in &ids {
            registry.register(id, PresentationState::Visible);
        }
        assert_eq!(manager.stacking_order(), ids);
        assert_eq!(manager.key_window(), Some(ids[2]));
    }

    #[test]
    fn deregister_preserves_order_of_remaining() {
        let manager = OverlayManager::new();
        let registry = manager.registry();
        let ids = ids(&manager, 3);
        for &id in &ids {
            registry.register(id, PresentationState::Visible);
        }
        registry.deregister(ids[1]);
        assert_eq!(manager.stacking_order(), vec![ids[0], ids[2]]);
        assert_eq!(manager.key_window(), Some(ids[2]));
    }

    #[test]
    fn dismissing_window_is_not_key() {
        let manager = OverlayManager::new();
        let registry = manager.registry();
        let ids = ids(&manager, 2);
        registry.register(ids[0], PresentationState::Visible);
        registry.register(ids[1], PresentationState::Visible);
        registry.update_state(ids[1], PresentationState::Dismissing);
        // Key falls back to the next interactive window below.
        assert_eq!(manager.key_window(), Some(ids[0]));
        registry.update_state(ids[0], PresentationState::Dismissing);
        assert_eq!(manager.key_window(), None);
    }

    #[test]
    fn appearing_window_is_key() {
        let manager = OverlayManager::new();
        let registry = manager.registry();
        let id = manager.registry().allocate_id();
        registry.register(id, PresentationState::Appearing);
        assert_eq!(manager.key_window(), Some(id));
    }

    #[test]
    fn deregister_unknown_is_noop() {
        let manager = OverlayManager::new();
        let registry = manager.registry();
        let id = registry.allocate_id();
        registry.deregister(id);
        assert!(manager.is_empty());
    }

    #[test]
    fn independent_managers_do_not_share_ids_or_entries() {
        let a = OverlayManager::new();
        let b = OverlayManager::new();
        let id_a = a.registry().allocate_id();
        let id_b = b.registry().allocate_id();
        // Both registries start counting from zero.
        assert_eq!(id_a, id_b);
        a.registry().register(id_a, PresentationState::Visible);
        assert!(!b.contains(id_b));
    }
}
