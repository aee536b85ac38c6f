//! 1. Wagons are ordered by descending speed, equal speeds keep their input order
//! 2. Every wagon is available at `operating_from`
//! 3. Every tick, while `current_time < operating_to`, each available wagon (in order)
//!     * Checks every active dispatch
//!         * If the active wagon has not yet put `length + safe_distance` between itself
//!           and the station, the wagon is blocked
//!     * If blocked
//!         1) Becomes available again at the latest conflicting end time plus the time
//!            it needs to cover `safe_distance`
//!     * Otherwise
//!         1) Records a trip with all its seats taken
//!         2) Becomes available after its travel time and `wait_time`
//!         3) Is added to the active dispatches
//! 4. After each tick the clock advances by one and finished dispatches are dropped

use crate::clock::Time;
use crate::coaster::track::Track;
use crate::coaster::PlanError;
use crate::config::{Id, WagonConfig};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WagonStat {
    pub trips: u32,
    pub passengers: u64,
}

/// One launch of a wagon onto the track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dispatch {
    pub wagon_id: Id,
    pub start_time: Time,
    pub end_time: f64,
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub wagon_stats: BTreeMap<Id, WagonStat>,
    pub total_passengers: u64,
    pub required_staff: u64,
    pub dispatches: Vec<Dispatch>,
}

#[derive(Debug)]
struct WagonSlot<'a> {
    config: &'a WagonConfig,
    next_available_time: f64,
}

#[derive(Debug)]
struct ActiveDispatch {
    start_time: f64,
    end_time: f64,
    speed: f64,
}

struct Dispatcher<'a> {
    track: &'a Track,
    slots: Vec<WagonSlot<'a>>,
    active: Vec<ActiveDispatch>,
    current_time: Time,
    wagon_stats: BTreeMap<Id, WagonStat>,
    total_passengers: u64,
    dispatches: Vec<Dispatch>,
}

/// Runs one operating day of `wagons` on `track`.
///
/// Fails with `InvalidInput` before the first tick when the track or any
/// wagon is degenerate. The caller's slice is never reordered.
pub fn simulate(wagons: &[WagonConfig], track: &Track) -> Result<SimulationResult, PlanError> {
    track.validate()?;
    validate_wagons(wagons)?;

    let required_staff = track.required_staff(wagons.len()).ok_or_else(|| {
        PlanError::invalid(format!("staff needed for {} wagons does not fit a counter", wagons.len()))
    })?;

    let mut dispatcher = Dispatcher::new(wagons, track);

    dispatcher.run();

    Ok(dispatcher.finish(required_staff))
}

fn validate_wagons(wagons: &[WagonConfig]) -> Result<(), PlanError> {
    let mut ids = HashSet::new();

    for wagon in wagons {
        if !ids.insert(wagon.id.as_str()) {
            return Err(PlanError::invalid(format!(
                "wagon id \"{}\" is used more than once",
                wagon.id
            )));
        }

        if wagon.seat_quantity == 0 {
            return Err(PlanError::invalid(format!(
                "wagon \"{}\" has no seats",
                wagon.id
            )));
        }

        if !(wagon.speed > 0.0) {
            return Err(PlanError::invalid(format!(
                "wagon \"{}\" has non-positive speed {}",
                wagon.id, wagon.speed
            )));
        }
    }

    Ok(())
}

impl<'a> Dispatcher<'a> {
    fn new(wagons: &'a [WagonConfig], track: &'a Track) -> Dispatcher<'a> {
        let mut slots: Vec<WagonSlot> = wagons
            .iter()
            .map(|config| WagonSlot {
                config,
                next_available_time: track.operating_from as f64,
            })
            .collect();

        // sort_by is stable, ties keep input order
        slots.sort_by(|a, b| b.config.speed.total_cmp(&a.config.speed));

        Dispatcher {
            track,
            slots,
            active: Vec::new(),
            current_time: track.operating_from,
            wagon_stats: BTreeMap::new(),
            total_passengers: 0,
            dispatches: Vec::new(),
        }
    }

    fn run(&mut self) {
        while self.current_time < self.track.operating_to {
            let now = self.current_time as f64;

            for index in 0..self.slots.len() {
                if self.slots[index].next_available_time <= now {
                    self.try_dispatch(index);
                }
            }

            self.current_time += 1;

            let now = self.current_time as f64;
            self.active.retain(|dispatch| dispatch.end_time > now);
        }
    }

    fn try_dispatch(&mut self, index: usize) {
        let track = self.track;
        let now = self.current_time as f64;
        let wagon = self.slots[index].config;

        let length = wagon.seat_quantity as f64 * track.seats_to_length_converter;
        let travel_time = track.route_length / wagon.speed;

        let blocked_until = self
            .active
            .iter()
            .filter(|active| (now - active.start_time) * active.speed < length + track.safe_distance)
            .map(|active| active.end_time)
            .fold(None, |latest: Option<f64>, end| Some(latest.map_or(end, |l| l.max(end))));

        if let Some(end_time) = blocked_until {
            let retry_at = end_time + track.safe_distance / wagon.speed;

            debug!(
                "wagon {} blocked at {}, next attempt at {:.2}",
                wagon.id, self.current_time, retry_at
            );

            self.slots[index].next_available_time = retry_at;
            return;
        }

        let stat = self.wagon_stats.entry(wagon.id.clone()).or_default();
        stat.trips += 1;
        stat.passengers += u64::from(wagon.seat_quantity);
        self.total_passengers += u64::from(wagon.seat_quantity);

        self.slots[index].next_available_time = now + travel_time + track.wait_time;

        self.active.push(ActiveDispatch {
            start_time: now,
            end_time: now + travel_time,
            speed: wagon.speed,
        });

        self.dispatches.push(Dispatch {
            wagon_id: wagon.id.clone(),
            start_time: self.current_time,
            end_time: now + travel_time,
            speed: wagon.speed,
        });
    }

    fn finish(self, required_staff: u64) -> SimulationResult {
        SimulationResult {
            wagon_stats: self.wagon_stats,
            total_passengers: self.total_passengers,
            required_staff,
            dispatches: self.dispatches,
        }
    }
}
