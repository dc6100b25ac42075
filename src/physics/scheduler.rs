//! Drop Scheduler
//!
//! Explicit delayed-task queue behind the gravity cascade. Each step is
//! scheduled a fixed number of ticks ahead and executed in schedule order
//! once due. Steps belong to a cascade chain, and a whole chain can be
//! cancelled without touching the others.

use crate::world::GridPos;

/// Handle for one cascade chain, usable to cancel its remaining steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CascadeId(u64);

/// A unit of deferred gravity work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallStep {
    /// Move the loose block at `from` one row down, then continue the fall.
    Settle { from: GridPos },
    /// Re-inspect the cell above `pos` for loose material left unsupported.
    RecheckAbove { pos: GridPos },
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    due: u64,
    seq: u64,
    cascade: CascadeId,
    step: FallStep,
}

/// Queue of pending fall steps, ordered by due tick then schedule order.
pub struct DropScheduler {
    queue: Vec<Scheduled>,
    next_seq: u64,
    next_cascade: u64,
}

impl Default for DropScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl DropScheduler {
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            next_seq: 0,
            next_cascade: 0,
        }
    }

    /// Open a new cascade chain and hand back its cancellation id.
    pub fn begin_cascade(&mut self) -> CascadeId {
        let id = CascadeId(self.next_cascade);
        self.next_cascade += 1;
        id
    }

    /// Queue a step for execution at tick `due`.
    pub fn schedule(&mut self, cascade: CascadeId, step: FallStep, due: u64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Scheduled {
            due,
            seq,
            cascade,
            step,
        });
    }

    /// Remove every remaining step of one chain.
    pub fn cancel(&mut self, cascade: CascadeId) {
        self.queue.retain(|s| s.cascade != cascade);
    }

    /// Remove everything. Used on game reset so no cascade leaks into the
    /// next session.
    pub fn cancel_all(&mut self) {
        self.queue.clear();
    }

    /// Pop the earliest step due at or before `now`, if any. The queue is
    /// small (a handful of in-flight falls), so a linear scan is fine.
    pub fn pop_due(&mut self, now: u64) -> Option<(CascadeId, FallStep)> {
        let idx = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due <= now)
            .min_by_key(|(_, s)| (s.due, s.seq))
            .map(|(i, _)| i)?;
        let scheduled = self.queue.swap_remove(idx);
        Some((scheduled.cascade, scheduled.step))
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(row: usize, col: usize) -> FallStep {
        FallStep::Settle {
            from: GridPos::new(row, col),
        }
    }

    #[test]
    fn pops_in_due_then_schedule_order() {
        let mut scheduler = DropScheduler::new();
        let a = scheduler.begin_cascade();
        let b = scheduler.begin_cascade();
        scheduler.schedule(a, settle(0, 0), 2);
        scheduler.schedule(b, settle(1, 1), 1);
        scheduler.schedule(a, settle(2, 2), 1);

        assert_eq!(scheduler.pop_due(2), Some((b, settle(1, 1))));
        assert_eq!(scheduler.pop_due(2), Some((a, settle(2, 2))));
        assert_eq!(scheduler.pop_due(2), Some((a, settle(0, 0))));
        assert_eq!(scheduler.pop_due(2), None);
    }

    #[test]
    fn nothing_pops_before_due() {
        let mut scheduler = DropScheduler::new();
        let id = scheduler.begin_cascade();
        scheduler.schedule(id, settle(0, 0), 5);
        assert_eq!(scheduler.pop_due(4), None);
        assert!(scheduler.pop_due(5).is_some());
    }

    #[test]
    fn cancel_drops_only_that_chain() {
        let mut scheduler = DropScheduler::new();
        let a = scheduler.begin_cascade();
        let b = scheduler.begin_cascade();
        scheduler.schedule(a, settle(0, 0), 1);
        scheduler.schedule(b, settle(1, 0), 1);
        scheduler.cancel(a);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.pop_due(1), Some((b, settle(1, 0))));
    }

    #[test]
    fn cancel_all_empties_the_queue() {
        let mut scheduler = DropScheduler::new();
        let a = scheduler.begin_cascade();
        scheduler.schedule(a, settle(0, 0), 1);
        scheduler.schedule(a, settle(1, 0), 2);
        scheduler.cancel_all();
        assert!(scheduler.is_empty());
    }
}
