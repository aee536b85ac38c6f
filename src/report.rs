use crate::coaster::capacity::{CapacityStatus, ShortfallKind};
use crate::coaster::CoasterReport;
use colored::{Color, Colorize};

fn availability_color(enough: bool) -> Color {
    if enough {
        Color::Green
    } else {
        Color::Red
    }
}

/// Text of the last report line, `None` when the coaster is fine.
pub fn describe_problems(status: &CapacityStatus) -> Option<String> {
    match status {
        CapacityStatus::Ok => None,
        CapacityStatus::Shortfalls(shortfalls) => Some(
            shortfalls
                .iter()
                .map(|shortfall| match shortfall.kind {
                    ShortfallKind::Staff => format!("employees are missing ({})", shortfall.deficit),
                    ShortfallKind::Demand => format!(
                        "wagons are missing, {} persons will not be served",
                        shortfall.deficit
                    ),
                })
                .collect::<Vec<_>>()
                .join("; "),
        ),
    }
}

pub fn print_report(report: &CoasterReport) {
    println!("{}", format!("[Coaster : {}]", report.coaster_id).yellow());
    println!();

    println!(
        "{}",
        format!("1. Hours of operation : {} - {}", report.time_from, report.time_to).cyan()
    );
    println!("{}", format!("2. Wagon quantity : {}", report.wagon_count).cyan());
    println!(
        "{}",
        format!("3. Staff available : {}/{}", report.required_staff, report.available_staff)
            .color(availability_color(report.status.deficit(ShortfallKind::Staff).is_none()))
    );
    println!(
        "{}",
        format!(
            "4. Customers per day : {}/{}",
            report.served_customers, report.expected_customers
        )
        .color(availability_color(report.status.deficit(ShortfallKind::Demand).is_none()))
    );

    match describe_problems(&report.status) {
        Some(problems) => println!("{}", format!("5. Problem : {}", problems).red()),
        None => println!("{}", "5. Status : OK".cyan()),
    }

    for (id, stat) in report.simulation.wagon_stats.iter() {
        println!("   Wagon({}) - {} trips, {} passengers", id, stat.trips, stat.passengers);
    }

    for id in report.unadmitted_wagons.iter() {
        println!(
            "{}",
            format!("   Wagon({}) would not be admitted, not enough space on the track", id).yellow()
        );
    }

    println!();
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coaster::capacity::Shortfall;

    #[test]
    fn ok_status_has_no_problems() {
        assert_eq!(describe_problems(&CapacityStatus::Ok), None);
    }

    #[test]
    fn lists_every_shortfall() {
        let status = CapacityStatus::Shortfalls(vec![
            Shortfall { kind: ShortfallKind::Staff, deficit: 2 },
            Shortfall { kind: ShortfallKind::Demand, deficit: 760 },
        ]);

        assert_eq!(
            describe_problems(&status).as_deref(),
            Some("employees are missing (2); wagons are missing, 760 persons will not be served")
        );
    }
}
