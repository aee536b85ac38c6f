use crate::coaster::track::Track;
use crate::config::{Id, WagonConfig};

/// Static space budget for putting `candidate` on a track that already holds
/// `existing`.
///
/// Every existing wagon takes its own length plus one safe distance, the
/// candidate takes its length plus one more safe distance. This does not prove
/// the wagons can be dispatched; the simulation may still find the track
/// over-subscribed.
pub fn can_admit(existing: &[WagonConfig], candidate: &WagonConfig, track: &Track) -> bool {
    let occupied: f64 = existing
        .iter()
        .map(|wagon| wagon_length(wagon, track) + track.safe_distance)
        .sum();

    occupied + wagon_length(candidate, track) + track.safe_distance <= track.route_length
}

/// Admission for an update: the wagon being replaced gives its space back
/// before the candidate is measured.
pub fn can_replace(
    existing: &[WagonConfig],
    replaced_id: &str,
    candidate: &WagonConfig,
    track: &Track,
) -> bool {
    let remaining: Vec<WagonConfig> = existing
        .iter()
        .filter(|wagon| wagon.id != replaced_id)
        .cloned()
        .collect();

    can_admit(&remaining, candidate, track)
}

/// Replays the gate over a stored snapshot in listed order and returns the
/// wagons it would have turned away. Refused wagons do not take up space.
pub fn unadmitted_wagons<'a>(wagons: &'a [WagonConfig], track: &Track) -> Vec<&'a Id> {
    let mut admitted: Vec<WagonConfig> = Vec::with_capacity(wagons.len());
    let mut refused = Vec::new();

    for wagon in wagons {
        if can_admit(&admitted, wagon, track) {
            admitted.push(wagon.clone());
        } else {
            refused.push(&wagon.id);
        }
    }

    refused
}

fn wagon_length(wagon: &WagonConfig, track: &Track) -> f64 {
    wagon.seat_quantity as f64 * track.seats_to_length_converter
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(route_length: f64, safe_distance: f64) -> Track {
        Track {
            route_length,
            safe_distance,
            seats_to_length_converter: 1.0,
            wait_time: 300.0,
            operating_from: 8 * 3600,
            operating_to: 9 * 3600,
            base_staff_per_coaster: 1,
            staff_per_wagon: 2,
        }
    }

    fn wagon(id: &str, seat_quantity: u32) -> WagonConfig {
        WagonConfig {
            id: id.to_string(),
            seat_quantity,
            speed: 1.0,
        }
    }

    #[test]
    fn refuses_candidate_that_overflows_budget() {
        let track = track(50.0, 10.0);
        let existing = vec![wagon("w1", 20)];

        // 30 taken + 15 + 10 = 55
        assert!(!can_admit(&existing, &wagon("big", 15), &track));
        // 30 taken + 9 + 10 = 49
        assert!(can_admit(&existing, &wagon("small", 9), &track));
    }

    #[test]
    fn exact_fit_is_admitted() {
        let track = track(50.0, 10.0);

        assert!(can_admit(&[wagon("w1", 20)], &wagon("w2", 10), &track));
    }

    #[test]
    fn empty_track_only_checks_candidate() {
        let track = track(50.0, 10.0);

        assert!(can_admit(&[], &wagon("w1", 40), &track));
        assert!(!can_admit(&[], &wagon("w1", 41), &track));
    }

    #[test]
    fn seat_converter_scales_length() {
        let mut track = track(50.0, 10.0);
        track.seats_to_length_converter = 2.0;

        assert!(can_admit(&[], &wagon("w1", 20), &track));
        assert!(!can_admit(&[], &wagon("w1", 21), &track));
    }

    #[test]
    fn order_of_existing_wagons_does_not_matter() {
        let track = track(100.0, 5.0);
        let forward = vec![wagon("a", 10), wagon("b", 30), wagon("c", 5)];
        let backward: Vec<WagonConfig> = forward.iter().rev().cloned().collect();

        for seats in 1..60 {
            let candidate = wagon("x", seats);
            assert_eq!(
                can_admit(&forward, &candidate, &track),
                can_admit(&backward, &candidate, &track),
                "order changed the outcome for {} seats",
                seats
            );
        }
    }

    #[test]
    fn refusal_is_never_undone_by_more_wagons() {
        let track = track(120.0, 10.0);
        let candidate = wagon("x", 40);
        let mut existing = vec![wagon("a", 30), wagon("b", 25)];

        // 40 + 35 + 40 + 10 = 125
        assert!(!can_admit(&existing, &candidate, &track));

        for (i, seats) in [1, 5, 20].iter().enumerate() {
            existing.push(wagon(&format!("extra{}", i), *seats));
            assert!(
                !can_admit(&existing, &candidate, &track),
                "candidate admitted again after adding {} wagons",
                i + 1
            );
        }
    }

    #[test]
    fn replacement_frees_the_old_space() {
        let track = track(50.0, 10.0);
        let existing = vec![wagon("w1", 20)];

        assert!(!can_admit(&existing, &wagon("w1", 25), &track));
        assert!(can_replace(&existing, "w1", &wagon("w1", 25), &track));
        assert!(!can_replace(&existing, "w1", &wagon("w1", 41), &track));
    }

    #[test]
    fn replay_skips_refused_wagons() {
        let track = track(100.0, 10.0);
        let wagons = vec![wagon("a", 30), wagon("b", 50), wagon("c", 20)];

        // a uses 40; b needs 40 + 50 + 10 = 100 -> fits; c needs 40 + 60 + 20 + 10 = 130
        assert_eq!(unadmitted_wagons(&wagons, &track), vec!["c"]);

        let wagons = vec![wagon("a", 30), wagon("b", 60), wagon("c", 20)];

        // b refused (110), c measured against a only: 40 + 20 + 10 = 70
        assert_eq!(unadmitted_wagons(&wagons, &track), vec!["b"]);
    }
}
