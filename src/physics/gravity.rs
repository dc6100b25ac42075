//! Falling-Block Gravity
//!
//! Delay-driven cascade for loose material. Removing the support under sand,
//! or placing sand over a hole, schedules a chain of one-row falls. Every
//! step re-validates the grid when it fires rather than trusting the state
//! at trigger time, so a click landing mid-cascade resolves deterministically
//! instead of corrupting the column.

use std::collections::HashMap;

use log::{debug, trace};

use crate::error::WorldError;
use crate::physics::scheduler::{CascadeId, DropScheduler, FallStep};
use crate::world::{GridPos, Material, WorldGrid};

/// What happened during a simulation tick, per affected block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallEvent {
    /// A loose block moved one row down.
    Moved {
        cascade: CascadeId,
        from: GridPos,
        to: GridPos,
    },
    /// A cascade finished: its block rests at `pos` on solid ground or the
    /// grid floor.
    Landed { cascade: CascadeId, pos: GridPos },
}

/// Drives the gravity cascade for loose materials.
///
/// A cell may source at most one in-flight fall at a time; re-triggering a
/// cell that is already falling is a no-op until its pending step fires.
pub struct FallingBlockSimulator {
    scheduler: DropScheduler,
    delay_ticks: u64,
    in_flight: HashMap<GridPos, CascadeId>,
}

impl FallingBlockSimulator {
    pub fn new(delay_ticks: u64) -> Self {
        Self {
            scheduler: DropScheduler::new(),
            delay_ticks,
            in_flight: HashMap::new(),
        }
    }

    /// Start a cascade rooted at `pos`, if its block is loose, not already
    /// falling, and has an empty cell below. Returns the chain's id when a
    /// fall was scheduled.
    pub fn drop_block(
        &mut self,
        grid: &WorldGrid,
        pos: GridPos,
        now: u64,
    ) -> Result<Option<CascadeId>, WorldError> {
        if !self.can_fall(grid, pos)? {
            return Ok(None);
        }
        let cascade = self.scheduler.begin_cascade();
        self.schedule_settle(cascade, pos, now);
        debug!("drop cascade {:?} started at {:?}", cascade, pos);
        Ok(Some(cascade))
    }

    /// After `pos` became empty, inspect the cell directly above it and
    /// start a fall if it holds loose material. The check re-arms itself one
    /// row higher after each step, climbing the column as it empties.
    pub fn check_falling_above(
        &mut self,
        grid: &WorldGrid,
        pos: GridPos,
        now: u64,
    ) -> Result<Option<CascadeId>, WorldError> {
        let Some(above) = pos.above() else {
            return Ok(None);
        };
        if !grid.material(above)?.is_loose() {
            return Ok(None);
        }
        let Some(cascade) = self.drop_block(grid, above, now)? else {
            return Ok(None);
        };
        self.scheduler.schedule(
            cascade,
            FallStep::RecheckAbove { pos: above },
            now + self.delay_ticks,
        );
        Ok(Some(cascade))
    }

    /// Run every step due at or before `now`, mutating the grid.
    pub fn tick(
        &mut self,
        grid: &mut WorldGrid,
        now: u64,
    ) -> Result<Vec<FallEvent>, WorldError> {
        let mut events = Vec::new();
        while let Some((cascade, step)) = self.scheduler.pop_due(now) {
            match step {
                FallStep::Settle { from } => {
                    self.settle(grid, cascade, from, now, &mut events)?;
                }
                FallStep::RecheckAbove { pos } => {
                    if let Some(chained) = self.check_falling_above(grid, pos, now)? {
                        trace!("recheck above {:?} chained cascade {:?}", pos, chained);
                    }
                }
            }
        }
        Ok(events)
    }

    /// Cancel one cascade chain.
    pub fn cancel(&mut self, cascade: CascadeId) {
        self.scheduler.cancel(cascade);
        self.in_flight.retain(|_, c| *c != cascade);
    }

    /// Cancel everything in flight. Called on game reset.
    pub fn cancel_all(&mut self) {
        self.scheduler.cancel_all();
        self.in_flight.clear();
    }

    /// True when no fall steps remain scheduled.
    pub fn is_idle(&self) -> bool {
        self.scheduler.is_empty()
    }

    fn can_fall(&self, grid: &WorldGrid, pos: GridPos) -> Result<bool, WorldError> {
        if self.in_flight.contains_key(&pos) {
            return Ok(false);
        }
        if !grid.material(pos)?.is_loose() {
            return Ok(false);
        }
        match pos.below(grid.height()) {
            Some(below) => Ok(grid.material(below)? == Material::Empty),
            None => Ok(false),
        }
    }

    fn schedule_settle(&mut self, cascade: CascadeId, from: GridPos, now: u64) {
        self.in_flight.insert(from, cascade);
        self.scheduler
            .schedule(cascade, FallStep::Settle { from }, now + self.delay_ticks);
    }

    fn settle(
        &mut self,
        grid: &mut WorldGrid,
        cascade: CascadeId,
        from: GridPos,
        now: u64,
        events: &mut Vec<FallEvent>,
    ) -> Result<(), WorldError> {
        self.in_flight.remove(&from);

        // Re-validate: the cell may have been mined or filled mid-flight.
        let material = grid.material(from)?;
        if !material.is_loose() {
            debug!("cascade {:?} died at {:?}: material changed", cascade, from);
            return Ok(());
        }
        let Some(below) = from.below(grid.height()) else {
            events.push(FallEvent::Landed { cascade, pos: from });
            return Ok(());
        };
        if grid.material(below)? != Material::Empty {
            events.push(FallEvent::Landed { cascade, pos: from });
            return Ok(());
        }

        grid.set_material(below, material)?;
        grid.set_material(from, Material::Empty)?;
        trace!("cascade {:?}: {:?} -> {:?}", cascade, from, below);
        events.push(FallEvent::Moved {
            cascade,
            from,
            to: below,
        });

        let keeps_falling = match below.below(grid.height()) {
            Some(next) => grid.material(next)? == Material::Empty,
            None => false,
        };
        if keeps_falling {
            self.schedule_settle(cascade, below, now);
        } else {
            events.push(FallEvent::Landed {
                cascade,
                pos: below,
            });
        }
        Ok(())
    }
}
