//! The result of an assignment strategy.

use fleet_core::{PackageId, VehicleId};

use crate::DispatchError;

/// A package the strategy had to give up on, with the reason.
#[derive(Debug)]
pub struct AssignmentFailure {
    pub package: PackageId,
    pub error:   DispatchError,
}

/// Vehicle → ordered package list, plus the packages no vehicle could take.
///
/// Per-vehicle order is assignment order, which is also delivery order.
/// Every package appears at most once across all lists and failures.
#[derive(Debug, Default)]
pub struct Assignment {
    per_vehicle: Vec<Vec<PackageId>>,
    failures:    Vec<AssignmentFailure>,
}

impl Assignment {
    /// An assignment with `vehicle_count` empty package lists.
    pub fn new(vehicle_count: usize) -> Self {
        Self {
            per_vehicle: vec![Vec::new(); vehicle_count],
            failures:    Vec::new(),
        }
    }

    /// Append `package` to `vehicle`'s delivery order.
    ///
    /// # Panics
    ///
    /// Panics if `vehicle` is out of range.
    pub fn push(&mut self, vehicle: VehicleId, package: PackageId) {
        self.per_vehicle[vehicle.index()].push(package);
    }

    /// Record that `package` could not be assigned.
    pub fn reject(&mut self, package: PackageId, error: DispatchError) {
        self.failures.push(AssignmentFailure { package, error });
    }

    /// Packages assigned to `vehicle`, in delivery order.  Empty if the
    /// vehicle is unknown.
    pub fn packages_for(&self, vehicle: VehicleId) -> &[PackageId] {
        self.per_vehicle
            .get(vehicle.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The vehicle `package` was assigned to, if any.
    pub fn vehicle_of(&self, package: PackageId) -> Option<VehicleId> {
        self.per_vehicle
            .iter()
            .position(|list| list.contains(&package))
            .map(|i| VehicleId(i as u32))
    }

    /// `(vehicle, packages)` for every vehicle, including idle ones.
    pub fn iter(&self) -> impl Iterator<Item = (VehicleId, &[PackageId])> + '_ {
        self.per_vehicle
            .iter()
            .enumerate()
            .map(|(i, list)| (VehicleId(i as u32), list.as_slice()))
    }

    pub fn vehicle_count(&self) -> usize {
        self.per_vehicle.len()
    }

    /// Total number of packages assigned to some vehicle.
    pub fn assigned_count(&self) -> usize {
        self.per_vehicle.iter().map(Vec::len).sum()
    }

    pub fn failures(&self) -> &[AssignmentFailure] {
        &self.failures
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Move the recorded failures out, leaving none behind.
    pub fn take_failures(&mut self) -> Vec<AssignmentFailure> {
        std::mem::take(&mut self.failures)
    }
}
