//! Path cost with an explicit "unreachable" value.
//!
//! Costs are integer travel-time units.  `Cost::INFINITE` is reserved: no
//! edge may carry it and [`Cost::checked_add`] never produces it from two
//! finite operands, so "unreachable" cannot be forged by overflow.

use std::fmt;

/// A shortest-path cost, either finite or [`Cost::INFINITE`].
///
/// Ordering puts `INFINITE` above every finite cost, which is what the
/// relaxation and nearest-vehicle comparisons need.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cost(u64);

impl Cost {
    pub const ZERO: Cost = Cost(0);
    pub const INFINITE: Cost = Cost(u64::MAX);

    /// Largest value a finite cost may hold.
    pub const MAX_FINITE: u64 = u64::MAX - 1;

    /// Wrap a finite value.  Returns `None` for the reserved sentinel.
    #[inline]
    pub fn new(value: u64) -> Option<Cost> {
        (value <= Self::MAX_FINITE).then_some(Cost(value))
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0 != u64::MAX
    }

    /// The finite value, or `None` when unreachable.
    #[inline]
    pub fn value(self) -> Option<u64> {
        self.is_finite().then_some(self.0)
    }

    /// Sum of two finite costs.
    ///
    /// `None` if either side is infinite or the sum would not fit in a
    /// finite cost.
    #[inline]
    pub fn checked_add(self, rhs: Cost) -> Option<Cost> {
        if !self.is_finite() || !rhs.is_finite() {
            return None;
        }
        self.0.checked_add(rhs.0).and_then(Cost::new)
    }

    /// Like [`checked_add`](Self::checked_add) but collapses every failure to
    /// `INFINITE`.
    #[inline]
    pub fn saturating_add(self, rhs: Cost) -> Cost {
        self.checked_add(rhs).unwrap_or(Cost::INFINITE)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(v) => write!(f, "{v}"),
            None    => f.write_str("inf"),
        }
    }
}
