//! Itinerary time model.
//!
//! Each vehicle runs its own clock starting at `Tick::ZERO`.  The clock only
//! moves by the cost of traversed edges, so a tick is the same unit as a
//! [`Cost`].  Clocks never reset between packages of one vehicle.

use std::fmt;

use crate::Cost;

/// Elapsed time on one vehicle's itinerary.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick reached after travelling for `cost`.
    ///
    /// `None` if `cost` is infinite or the clock would overflow.
    #[inline]
    pub fn after(self, cost: Cost) -> Option<Tick> {
        cost.value()
            .and_then(|c| self.0.checked_add(c))
            .map(Tick)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
