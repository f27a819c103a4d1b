use std::collections::{BTreeMap, VecDeque};
use std::time::Instant;

use crate::dom::{apply, Dom, DomPatch, PatchOutcome};

/// Lane a patch is serialized on: its container, narrowed to a row for row-scoped patches
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct QueueKey {
    pub container: String,
    pub row: Option<usize>,
}

impl QueueKey {
    #[must_use]
    pub fn of(patch: &DomPatch) -> Self {
        Self {
            container: patch.container(),
            row: patch.row(),
        }
    }

    /// Two lanes must be ordered against each other when they share a
    /// container and at least one of them covers the whole container.
    fn overlaps(&self, other: &Self) -> bool {
        self.container == other.container
            && (self.row.is_none() || other.row.is_none() || self.row == other.row)
    }
}

/// A patch waiting for its container to become idle
#[derive(Debug, Clone)]
pub struct PendingPatch {
    pub seq: u64,
    pub patch: DomPatch,
}

#[derive(Debug, Default)]
struct Lane {
    pending: VecDeque<PendingPatch>,
    busy_until: Option<Instant>,
}

impl Lane {
    fn is_idle(&self, now: Instant) -> bool {
        self.busy_until.map_or(true, |until| now >= until)
    }

    fn head_seq(&self) -> Option<u64> {
        self.pending.front().map(|p| p.seq)
    }
}

/// Serializes patches per container.
///
/// Patches on one container apply in arrival order, and an animated patch
/// keeps its container busy until the animation has finished. Patches on
/// other containers (or other rows of the same table) are not held up.
#[derive(Debug, Default)]
pub struct PatchQueue {
    lanes: BTreeMap<QueueKey, Lane>,
    next_seq: u64,
}

impl PatchQueue {
    /// Create a new empty patch queue
    pub fn new() -> Self {
        Self {
            lanes: BTreeMap::new(),
            next_seq: 0,
        }
    }

    /// Add a patch behind everything already queued for its container
    pub fn enqueue(&mut self, patch: DomPatch) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.lanes
            .entry(QueueKey::of(&patch))
            .or_default()
            .pending
            .push_back(PendingPatch { seq, patch });
    }

    /// Add several patches in order
    pub fn enqueue_all(&mut self, patches: impl IntoIterator<Item = DomPatch>) {
        for patch in patches {
            self.enqueue(patch);
        }
    }

    /// Apply every patch whose container is idle at `now`, oldest first.
    ///
    /// Returns the outcome of each applied patch in application order.
    pub fn apply_ready<D: Dom + ?Sized>(&mut self, dom: &mut D, now: Instant) -> Vec<PatchOutcome> {
        let mut outcomes = Vec::new();

        while let Some(key) = self.next_ready(now) {
            let Some(lane) = self.lanes.get_mut(&key) else {
                break;
            };
            let Some(pending) = lane.pending.pop_front() else {
                break;
            };

            let outcome = apply(dom, &pending.patch);
            let busy = pending.patch.busy_for();
            if outcome.is_applied() && !busy.is_zero() {
                lane.busy_until = Some(now + busy);
            }
            outcomes.push(outcome);
        }

        self.lanes
            .retain(|_, lane| !lane.pending.is_empty() || !lane.is_idle(now));

        outcomes
    }

    fn next_ready(&self, now: Instant) -> Option<QueueKey> {
        self.lanes
            .iter()
            .filter_map(|(key, lane)| lane.head_seq().map(|seq| (seq, key)))
            .filter(|(seq, key)| self.is_ready(key, *seq, now))
            .min_by_key(|(seq, _)| *seq)
            .map(|(_, key)| key.clone())
    }

    fn is_ready(&self, key: &QueueKey, seq: u64, now: Instant) -> bool {
        self.lanes
            .iter()
            .filter(|(other, _)| key.overlaps(other))
            .all(|(other, lane)| {
                lane.is_idle(now)
                    && (other == key || lane.head_seq().map_or(true, |head| head > seq))
            })
    }

    /// Earliest instant after `now` at which a blocked patch may become ready.
    ///
    /// After [`PatchQueue::apply_ready`] a non-empty queue always has one.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        self.lanes
            .values()
            .filter_map(|lane| lane.busy_until)
            .filter(|until| *until > now)
            .min()
    }

    /// Check if nothing is waiting
    pub fn is_empty(&self) -> bool {
        self.lanes.values().all(|lane| lane.pending.is_empty())
    }

    /// Get the number of queued patches
    pub fn len(&self) -> usize {
        self.lanes.values().map(|lane| lane.pending.len()).sum()
    }

    /// Get the number of queued patches for one container, across its rows
    pub fn pending_for(&self, container: &str) -> usize {
        self.lanes
            .iter()
            .filter(|(key, _)| key.container == container)
            .map(|(_, lane)| lane.pending.len())
            .sum()
    }
}
