//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  Stations, packages and vehicles are
//! numbered densely from 0 in input order, so every ID doubles as an index
//! into the owning `Vec`.

use std::fmt;

use crate::FleetError;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID", equal to `u32::MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Build an ID from a `Vec` position, failing if it does not fit.
            pub fn from_index(index: usize) -> Result<$name, FleetError> {
                <$inner>::try_from(index)
                    .ok()
                    .filter(|&raw| raw != <$inner>::MAX)
                    .map($name)
                    .ok_or(FleetError::IdOverflow { what: stringify!($name), index })
            }

            #[inline]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }
    };
}

typed_id! {
    /// Index of a station in the network.
    pub struct StationId(u32);
}

typed_id! {
    /// Index of an undirected edge, in the order edges were added.
    pub struct EdgeId(u32);
}

typed_id! {
    /// Index of a package in input order.
    pub struct PackageId(u32);
}

typed_id! {
    /// Index of a vehicle in input order.
    pub struct VehicleId(u32);
}
