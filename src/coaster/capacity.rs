use crate::coaster::dispatcher::SimulationResult;
use crate::coaster::track::Track;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShortfallKind {
    Staff,
    Demand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    pub kind: ShortfallKind,
    pub deficit: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CapacityStatus {
    Ok,
    Shortfalls(Vec<Shortfall>),
}

impl CapacityStatus {
    pub fn is_ok(&self) -> bool {
        match self {
            CapacityStatus::Ok => true,
            CapacityStatus::Shortfalls(_) => false,
        }
    }

    pub fn deficit(&self, kind: ShortfallKind) -> Option<u64> {
        match self {
            CapacityStatus::Ok => None,
            CapacityStatus::Shortfalls(shortfalls) => shortfalls
                .iter()
                .find(|shortfall| shortfall.kind == kind)
                .map(|shortfall| shortfall.deficit),
        }
    }
}

/// Compares a simulated day against the declared staff and customer demand.
/// Every shortfall is reported, staff first.
pub fn evaluate(
    result: &SimulationResult,
    declared_staff: u32,
    declared_demand: u32,
    track: &Track,
    wagon_count: usize,
) -> CapacityStatus {
    let mut shortfalls = Vec::new();

    // a count too large for u64 can never be staffed
    let needed_staff = track.required_staff(wagon_count).unwrap_or(u64::MAX);
    let declared_staff = u64::from(declared_staff);
    let declared_demand = u64::from(declared_demand);

    if declared_staff < needed_staff {
        shortfalls.push(Shortfall {
            kind: ShortfallKind::Staff,
            deficit: needed_staff - declared_staff,
        });
    }

    if result.total_passengers < declared_demand {
        shortfalls.push(Shortfall {
            kind: ShortfallKind::Demand,
            deficit: declared_demand - result.total_passengers,
        });
    }

    if shortfalls.is_empty() {
        CapacityStatus::Ok
    } else {
        CapacityStatus::Shortfalls(shortfalls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn track() -> Track {
        Track {
            route_length: 100.0,
            safe_distance: 10.0,
            seats_to_length_converter: 1.0,
            wait_time: 300.0,
            operating_from: 8 * 3600,
            operating_to: 9 * 3600,
            base_staff_per_coaster: 1,
            staff_per_wagon: 2,
        }
    }

    fn result(total_passengers: u64) -> SimulationResult {
        SimulationResult {
            wagon_stats: BTreeMap::new(),
            total_passengers,
            required_staff: 0,
            dispatches: Vec::new(),
        }
    }

    #[test]
    fn enough_of_everything_is_ok() {
        let status = evaluate(&result(240), 5, 240, &track(), 2);

        assert_eq!(status, CapacityStatus::Ok);
        assert!(status.is_ok());
    }

    #[test]
    fn reports_missing_staff() {
        let status = evaluate(&result(240), 3, 100, &track(), 2);

        assert_eq!(
            status,
            CapacityStatus::Shortfalls(vec![Shortfall { kind: ShortfallKind::Staff, deficit: 2 }])
        );
    }

    #[test]
    fn reports_unserved_customers() {
        let status = evaluate(&result(240), 5, 1000, &track(), 2);

        assert_eq!(status.deficit(ShortfallKind::Demand), Some(760));
        assert_eq!(status.deficit(ShortfallKind::Staff), None);
    }

    #[test]
    fn reports_both_shortfalls() {
        let status = evaluate(&result(0), 0, 50, &track(), 3);

        assert_eq!(
            status,
            CapacityStatus::Shortfalls(vec![
                Shortfall { kind: ShortfallKind::Staff, deficit: 7 },
                Shortfall { kind: ShortfallKind::Demand, deficit: 50 },
            ])
        );
    }

    #[test]
    fn large_figures_do_not_wrap() {
        let mut track = track();
        track.staff_per_wagon = u32::MAX;

        let status = evaluate(&result(6_000_000_000), 1, u32::MAX, &track, 2);

        // 2 * u32::MAX + 1 needed, 1 declared
        assert_eq!(status.deficit(ShortfallKind::Staff), Some(2 * u64::from(u32::MAX)));
        assert_eq!(status.deficit(ShortfallKind::Demand), None);
    }

    #[test]
    fn staff_need_ignores_simulation_outcome() {
        let mut busy = result(10_000);
        busy.required_staff = 99;

        let idle = result(0);

        assert_eq!(
            evaluate(&busy, 4, 0, &track(), 2).deficit(ShortfallKind::Staff),
            evaluate(&idle, 4, 0, &track(), 2).deficit(ShortfallKind::Staff)
        );
    }
}
