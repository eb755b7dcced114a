//! Package and vehicle records.

use fleet_core::{StationId, VehicleId};

/// A delivery request.  Consumed exactly once by the assignment step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Package {
    pub name:        String,
    /// Pickup station.
    pub source:      StationId,
    /// Drop-off station.
    pub destination: StationId,
    pub weight:      u64,
}

/// A capacity-constrained vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    pub name:     String,
    pub start:    StationId,
    /// Largest package weight the vehicle can carry.
    pub capacity: u64,
}

impl Vehicle {
    #[inline]
    pub fn can_carry(&self, package: &Package) -> bool {
        package.weight <= self.capacity
    }
}

/// Working record for one vehicle while packages are being assigned.
///
/// `location` starts at the vehicle's start station and moves to the
/// drop-off of every package the vehicle accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleCursor {
    pub vehicle:  VehicleId,
    pub location: StationId,
    pub capacity: u64,
}

impl VehicleCursor {
    pub fn new(vehicle: VehicleId, v: &Vehicle) -> Self {
        Self { vehicle, location: v.start, capacity: v.capacity }
    }

    /// Commit `package` to this vehicle: it will finish at the drop-off.
    #[inline]
    pub fn accept(&mut self, package: &Package) {
        self.location = package.destination;
    }
}
