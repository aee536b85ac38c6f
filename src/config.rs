use crate::clock::TimeOfDay;
use failure::Error;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

pub type Id = String;

/// Constants shared by every coaster in the park
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ParkDefaults {
    pub base_staff_per_coaster: u32, // Staff needed by a coaster regardless of its wagons
    pub staff_per_wagon: u32,        // Additional staff for every wagon on the track
    pub wait_time: f64,              // Seconds a wagon stays at the station between trips
    pub safe_distance: f64,          // Minimum gap between two wagons on the track
    pub seats_to_length_converter: f64, // Track length taken by one seat
}

impl Default for ParkDefaults {
    fn default() -> ParkDefaults {
        ParkDefaults {
            base_staff_per_coaster: 1,
            staff_per_wagon: 2,
            wait_time: 5.0 * 60.0,
            safe_distance: 50.0,
            seats_to_length_converter: 1.0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WagonConfig {
    pub id: Id,
    pub seat_quantity: u32,
    pub speed: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CoasterConfig {
    pub id: Id,
    pub staff_quantity: u32,    // Staff declared as available for the day
    pub customer_quantity: u32, // Customers expected during the day
    pub route_length: f64,
    pub time_from: TimeOfDay,
    pub time_to: TimeOfDay,
    #[serde(default)]
    pub wagons: Vec<WagonConfig>,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct SystemConfig {
    #[serde(default)]
    pub defaults: ParkDefaults,
    pub coasters: Vec<CoasterConfig>,
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<SystemConfig, Error> {
    let file = File::open(path)?;

    let config = serde_json::from_reader(file)?;

    Ok(config)
}

/// A missing file means an empty park on default constants. A file that is
/// there has to parse.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<SystemConfig, Error> {
    if !path.as_ref().exists() {
        return Ok(SystemConfig::default());
    }

    load(path)
}
