use crate::clock::Time;
use crate::coaster::PlanError;
use crate::config::{CoasterConfig, ParkDefaults};
use std::convert::TryFrom;

/// Physical and operational parameters of one coaster, fixed for a whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub route_length: f64,
    pub safe_distance: f64,
    pub seats_to_length_converter: f64,
    pub wait_time: f64,
    pub operating_from: Time,
    pub operating_to: Time,
    pub base_staff_per_coaster: u32,
    pub staff_per_wagon: u32,
}

impl Track {
    pub fn from_config(coaster: &CoasterConfig, defaults: &ParkDefaults) -> Track {
        Track {
            route_length: coaster.route_length,
            safe_distance: defaults.safe_distance,
            seats_to_length_converter: defaults.seats_to_length_converter,
            wait_time: defaults.wait_time,
            operating_from: coaster.time_from.seconds(),
            operating_to: coaster.time_to.seconds(),
            base_staff_per_coaster: defaults.base_staff_per_coaster,
            staff_per_wagon: defaults.staff_per_wagon,
        }
    }

    /// Staff needed to run `wagon_count` wagons, whatever the simulation yields.
    /// `None` when the count does not fit in a `u64`.
    pub fn required_staff(&self, wagon_count: usize) -> Option<u64> {
        u64::try_from(wagon_count)
            .ok()?
            .checked_mul(u64::from(self.staff_per_wagon))?
            .checked_add(u64::from(self.base_staff_per_coaster))
    }

    pub fn validate(&self) -> Result<(), PlanError> {
        if !(self.route_length > 0.0) {
            return Err(PlanError::invalid(format!(
                "route length {} is not positive",
                self.route_length
            )));
        }

        if !(self.seats_to_length_converter > 0.0) {
            return Err(PlanError::invalid(format!(
                "seats to length converter {} is not positive",
                self.seats_to_length_converter
            )));
        }

        if !(self.safe_distance >= 0.0) || !(self.wait_time >= 0.0) {
            return Err(PlanError::invalid(
                "safe distance and wait time cannot be negative".to_string(),
            ));
        }

        if self.operating_to < self.operating_from {
            return Err(PlanError::invalid(format!(
                "operating window ends ({}) before it starts ({})",
                self.operating_to, self.operating_from
            )));
        }

        Ok(())
    }
}
