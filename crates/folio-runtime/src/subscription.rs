#![forbid(unsafe_code)]

//! Declarative subscriptions.
//!
//! Models declare the timers and window listeners they need through
//! [`Model::subscriptions`](crate::Model::subscriptions). After every update
//! the runtime reconciles the declared set against the running set and
//! reports the difference as [`SubChange`]s; the host owns the real
//! `setInterval` / `addEventListener` handles and starts or releases them
//! accordingly.
//!
//! There is no way for a component to start a timer except by declaring it,
//! so dropping the component drops the declaration, and the next
//! reconciliation stops the timer.

use core::time::Duration;

use folio_core::SubId;

/// Window-level event sources a model may listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    /// `scroll` on the window.
    Scroll,
    /// `resize` on the window.
    Resize,
}

/// What a subscription asks the host to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubKind {
    /// Fire [`folio_core::Event::Timer`] with the subscription id every period.
    Interval(Duration),
    /// Forward the matching window event.
    Listen(Listener),
}

/// A declared subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sub {
    /// Identity used for reconciliation.
    pub id: SubId,
    /// Requested host resource.
    pub kind: SubKind,
}

impl Sub {
    /// An interval timer.
    pub fn every(id: SubId, period: Duration) -> Self {
        Self {
            id,
            kind: SubKind::Interval(period),
        }
    }

    /// A window listener.
    pub fn listen(id: SubId, listener: Listener) -> Self {
        Self {
            id,
            kind: SubKind::Listen(listener),
        }
    }
}

/// A change the host must apply to its live handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubChange {
    /// Acquire a handle for this subscription.
    Start(Sub),
    /// Release the handle with this id.
    Stop(SubId),
}

/// Hands out subscription ids that are never reused.
///
/// Each mounted component takes fresh ids, so a remounted component never
/// inherits a handle from its previous incarnation.
#[derive(Debug, Clone)]
pub struct SubIds {
    next: SubId,
}

impl Default for SubIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl SubIds {
    /// Create a generator starting at 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next id.
    pub fn next_id(&mut self) -> SubId {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// The set of subscriptions the host currently holds handles for.
#[derive(Debug, Default, Clone)]
pub struct SubscriptionSet {
    active: Vec<Sub>,
}

impl SubscriptionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the active set to match `declared`.
    ///
    /// - Stops subscriptions that are no longer declared
    /// - Restarts subscriptions whose kind changed under the same id
    /// - Starts subscriptions that are new
    /// - Leaves unchanged subscriptions running
    ///
    /// Duplicate ids in `declared` keep their first occurrence. Stops are
    /// reported before starts.
    pub fn reconcile(&mut self, declared: Vec<Sub>) -> Vec<SubChange> {
        let mut wanted: Vec<Sub> = Vec::with_capacity(declared.len());
        for sub in declared {
            if wanted.iter().any(|w| w.id == sub.id) {
                tracing::debug!(sub_id = sub.id, "duplicate subscription id ignored");
                continue;
            }
            wanted.push(sub);
        }

        let mut changes = Vec::new();
        self.active.retain(|running| {
            let keep = wanted.contains(running);
            if !keep {
                tracing::debug!(sub_id = running.id, "stopping subscription");
                changes.push(SubChange::Stop(running.id));
            }
            keep
        });

        for sub in wanted {
            if !self.active.contains(&sub) {
                tracing::debug!(sub_id = sub.id, kind = ?sub.kind, "starting subscription");
                changes.push(SubChange::Start(sub));
                self.active.push(sub);
            }
        }
        changes
    }

    /// Stop everything.
    pub fn stop_all(&mut self) -> Vec<SubChange> {
        self.active
            .drain(..)
            .map(|sub| SubChange::Stop(sub.id))
            .collect()
    }

    /// Number of running subscriptions.
    #[inline]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether nothing is running.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Whether a subscription with `id` is running.
    pub fn is_active(&self, id: SubId) -> bool {
        self.get(id).is_some()
    }

    /// Look up a running subscription.
    pub fn get(&self, id: SubId) -> Option<&Sub> {
        self.active.iter().find(|s| s.id == id)
    }

    /// Running subscriptions in start order.
    pub fn iter(&self) -> impl Iterator<Item = &Sub> {
        self.active.iter()
    }

    /// Number of running interval timers.
    pub fn timer_count(&self) -> usize {
        self.active
            .iter()
            .filter(|s| matches!(s.kind, SubKind::Interval(_)))
            .count()
    }

    /// Number of running listeners of the given kind.
    pub fn listener_count(&self, listener: Listener) -> usize {
        self.active
            .iter()
            .filter(|s| s.kind == SubKind::Listen(listener))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TICK: Duration = Duration::from_millis(35);

    #[test]
    fn starts_new_subscriptions() {
        let mut set = SubscriptionSet::new();
        let changes = set.reconcile(vec![Sub::every(1, TICK), Sub::listen(2, Listener::Scroll)]);
        assert_eq!(
            changes,
            vec![
                SubChange::Start(Sub::every(1, TICK)),
                SubChange::Start(Sub::listen(2, Listener::Scroll)),
            ]
        );
        assert_eq!(set.len(), 2);
        assert_eq!(set.timer_count(), 1);
        assert_eq!(set.listener_count(Listener::Scroll), 1);
    }

    #[test]
    fn keeps_unchanged() {
        let mut set = SubscriptionSet::new();
        set.reconcile(vec![Sub::every(1, TICK)]);
        assert!(set.reconcile(vec![Sub::every(1, TICK)]).is_empty());
        assert!(set.is_active(1));
    }

    #[test]
    fn stops_removed() {
        let mut set = SubscriptionSet::new();
        set.reconcile(vec![Sub::every(1, TICK), Sub::listen(2, Listener::Resize)]);
        let changes = set.reconcile(vec![Sub::listen(2, Listener::Resize)]);
        assert_eq!(changes, vec![SubChange::Stop(1)]);
        assert!(!set.is_active(1));
    }

    #[test]
    fn changed_kind_restarts() {
        let mut set = SubscriptionSet::new();
        set.reconcile(vec![Sub::every(1, TICK)]);
        let slower = Sub::every(1, Duration::from_millis(100));
        let changes = set.reconcile(vec![slower]);
        assert_eq!(changes, vec![SubChange::Stop(1), SubChange::Start(slower)]);
        assert_eq!(set.get(1), Some(&slower));
    }

    #[test]
    fn dedupes_duplicate_ids() {
        let mut set = SubscriptionSet::new();
        let changes = set.reconcile(vec![Sub::every(7, TICK), Sub::listen(7, Listener::Scroll)]);
        assert_eq!(changes, vec![SubChange::Start(Sub::every(7, TICK))]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn empty_reconcile_stops_everything() {
        let mut set = SubscriptionSet::new();
        set.reconcile(vec![Sub::every(1, TICK), Sub::every(2, TICK)]);
        let changes = set.reconcile(Vec::new());
        assert_eq!(changes, vec![SubChange::Stop(1), SubChange::Stop(2)]);
        assert!(set.is_empty());
    }

    #[test]
    fn stop_all_drains() {
        let mut set = SubscriptionSet::new();
        set.reconcile(vec![Sub::listen(3, Listener::Scroll)]);
        assert_eq!(set.stop_all(), vec![SubChange::Stop(3)]);
        assert!(set.is_empty());
        assert!(set.stop_all().is_empty());
    }

    #[test]
    fn ids_are_never_reused() {
        let mut ids = SubIds::new();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert!(a > 0 && b > a);
    }
}
