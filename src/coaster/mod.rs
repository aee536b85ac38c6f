use crate::clock::TimeOfDay;
use crate::config::{CoasterConfig, Id, ParkDefaults, SystemConfig};
use failure::Fail;
use serde::{Deserialize, Serialize};

pub mod admission;
pub mod capacity;
pub mod dispatcher;
pub mod track;

use self::capacity::CapacityStatus;
use self::dispatcher::SimulationResult;
use self::track::Track;

/// The planning core works on complete, already validated snapshots. The only
/// way it fails is a violated precondition, detected before any simulation work.
#[derive(Debug, Fail, PartialEq)]
pub enum PlanError {
    #[fail(display = "invalid input: {}", reason)]
    InvalidInput { reason: String },
}

impl PlanError {
    pub fn invalid(reason: String) -> PlanError {
        PlanError::InvalidInput { reason }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoasterReport {
    pub coaster_id: Id,
    pub time_from: TimeOfDay,
    pub time_to: TimeOfDay,
    pub wagon_count: usize,
    pub required_staff: u64,
    pub available_staff: u32,
    pub served_customers: u64,
    pub expected_customers: u32,
    pub status: CapacityStatus,
    pub unadmitted_wagons: Vec<Id>,
    pub simulation: SimulationResult,
}

/// Simulates one coaster's day and checks it against what the coaster declares.
pub fn plan_coaster(coaster: &CoasterConfig, defaults: &ParkDefaults) -> Result<CoasterReport, PlanError> {
    let track = Track::from_config(coaster, defaults);
    let wagon_count = coaster.wagons.len();

    let simulation = dispatcher::simulate(&coaster.wagons, &track)?;

    let status = capacity::evaluate(
        &simulation,
        coaster.staff_quantity,
        coaster.customer_quantity,
        &track,
        wagon_count,
    );

    let unadmitted_wagons = admission::unadmitted_wagons(&coaster.wagons, &track)
        .into_iter()
        .cloned()
        .collect();

    Ok(CoasterReport {
        coaster_id: coaster.id.clone(),
        time_from: coaster.time_from,
        time_to: coaster.time_to,
        wagon_count,
        required_staff: simulation.required_staff,
        available_staff: coaster.staff_quantity,
        served_customers: simulation.total_passengers,
        expected_customers: coaster.customer_quantity,
        status,
        unadmitted_wagons,
        simulation,
    })
}

pub fn plan_fleet(config: &SystemConfig) -> Result<Vec<CoasterReport>, PlanError> {
    config
        .coasters
        .iter()
        .map(|coaster| plan_coaster(coaster, &config.defaults))
        .collect()
}
