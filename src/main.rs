#[macro_use]
extern crate failure;

use crate::coaster::admission;
use crate::coaster::track::Track;
use crate::coaster::CoasterReport;
use crate::config::{CoasterConfig, Id, ParkDefaults, SystemConfig, WagonConfig};
use colored::Colorize;
use failure::Error;
use log::{info, warn};
use rocket::response::status::BadRequest;
use rocket::serde::json::Json;
use rocket::{get, post, routes, Build, Rocket, State};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::fmt::Display;
use std::process;

mod clock;
mod coaster;
mod config;
mod report;

#[derive(Debug, Fail)]
#[fail(display = "validation failed because of \"{}\"", error)]
struct ValidationError {
    error: String,
}

fn validate_defaults(defaults: &ParkDefaults) -> Result<(), Error> {
    if !(defaults.safe_distance >= 0.0) || !(defaults.wait_time >= 0.0) {
        return Err(ValidationError {
            error: "Safe distance and wait time cannot be negative".to_string(),
        }
        .into());
    }

    if !(defaults.seats_to_length_converter > 0.0) {
        return Err(ValidationError {
            error: "Seats to length converter has to be positive".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_wagon(coaster_id: &str, wagon: &WagonConfig) -> Result<(), Error> {
    if wagon.seat_quantity == 0 {
        return Err(ValidationError {
            error: format!("There is wagon \"{}\" on coaster \"{}\" without seats", wagon.id, coaster_id),
        }
        .into());
    }

    if !(wagon.speed > 0.0) {
        return Err(ValidationError {
            error: format!("There is wagon \"{}\" on coaster \"{}\" with invalid speed", wagon.id, coaster_id),
        }
        .into());
    }

    Ok(())
}

fn validate_coaster(coaster: &CoasterConfig) -> Result<(), Error> {
    if coaster.staff_quantity == 0 || coaster.customer_quantity == 0 {
        return Err(ValidationError {
            error: format!("There is coaster \"{}\" with invalid staff or customer quantity", coaster.id),
        }
        .into());
    }

    if !(coaster.route_length > 0.0) {
        return Err(ValidationError {
            error: format!("There is coaster \"{}\" with invalid route length", coaster.id),
        }
        .into());
    }

    if coaster.time_to <= coaster.time_from {
        return Err(ValidationError {
            error: format!("There is coaster \"{}\" closing before it opens", coaster.id),
        }
        .into());
    }

    let mut s = HashSet::new();

    for wagon in coaster.wagons.iter() {
        if !s.insert(&wagon.id) {
            return Err(ValidationError {
                error: format!("There is wagon id \"{}\" collision on coaster \"{}\"", wagon.id, coaster.id),
            }
            .into());
        }

        validate_wagon(&coaster.id, wagon)?;
    }

    Ok(())
}

fn validate_config(config: &SystemConfig) -> Result<(), Error> {
    validate_defaults(&config.defaults)?;

    let mut s = HashSet::new();

    for coaster in config.coasters.iter() {
        if !s.insert(&coaster.id) {
            return Err(ValidationError {
                error: format!("There is coaster id \"{}\" collision", coaster.id),
            }
            .into());
        }

        validate_coaster(coaster)?;
    }

    Ok(())
}

fn bad_request<E: Display>(error: E) -> BadRequest<String> {
    warn!("Rejecting request: {}", error);

    BadRequest(error.to_string())
}

#[derive(Deserialize)]
struct AdmissionRequest {
    coaster: CoasterConfig,
    wagon: WagonConfig,
    #[serde(default)]
    replaces: Option<Id>,
}

#[derive(Serialize)]
struct AdmissionResponse {
    admitted: bool,
    message: String,
}

#[get("/health")]
fn server_health() -> &'static str {
    "Healthy"
}

#[post("/plan", format = "json", data = "<config>")]
fn server_plan(config: Json<SystemConfig>) -> Result<Json<Vec<CoasterReport>>, BadRequest<String>> {
    let config = config.into_inner();

    validate_config(&config).map_err(bad_request)?;

    info!("Planning {} coasters", config.coasters.len());

    let reports = coaster::plan_fleet(&config).map_err(bad_request)?;

    let failing = reports.iter().filter(|report| !report.status.is_ok()).count();

    if failing > 0 {
        warn!("{} of {} coasters are short on staff or wagons", failing, reports.len());
    }

    Ok(Json(reports))
}

#[post("/coasters/plan", format = "json", data = "<request>")]
fn server_plan_coaster(
    request: Json<CoasterConfig>,
    defaults: &State<ParkDefaults>,
) -> Result<Json<CoasterReport>, BadRequest<String>> {
    validate_coaster(&request).map_err(bad_request)?;

    let report = coaster::plan_coaster(&request, defaults.inner()).map_err(bad_request)?;

    info!(
        "Coaster {} serves {}/{} customers",
        report.coaster_id, report.served_customers, report.expected_customers
    );

    Ok(Json(report))
}

#[post("/coasters/admit", format = "json", data = "<request>")]
fn server_admit(
    request: Json<AdmissionRequest>,
    defaults: &State<ParkDefaults>,
) -> Result<Json<AdmissionResponse>, BadRequest<String>> {
    let request = request.into_inner();

    validate_coaster(&request.coaster).map_err(bad_request)?;
    validate_wagon(&request.coaster.id, &request.wagon).map_err(bad_request)?;

    let track = Track::from_config(&request.coaster, defaults.inner());
    let existing = &request.coaster.wagons;

    let admitted = match &request.replaces {
        Some(replaced_id) => {
            if !existing.iter().any(|wagon| &wagon.id == replaced_id) {
                return Err(bad_request(format!("Wagon \"{}\" not found", replaced_id)));
            }

            admission::can_replace(existing, replaced_id, &request.wagon, &track)
        }
        None => {
            if existing.iter().any(|wagon| wagon.id == request.wagon.id) {
                return Err(bad_request(format!("Wagon \"{}\" already exists", request.wagon.id)));
            }

            admission::can_admit(existing, &request.wagon, &track)
        }
    };

    let message = if admitted {
        "The wagon fits on the track.".to_string()
    } else {
        "Not enough space on the track for this wagon, considering safe distances.".to_string()
    };

    info!("Wagon {} on coaster {}: {}", request.wagon.id, request.coaster.id, message);

    Ok(Json(AdmissionResponse { admitted, message }))
}

fn build_server(defaults: ParkDefaults) -> Result<Rocket<Build>, Error> {
    let cors = rocket_cors::CorsOptions::default().to_cors()?;

    Ok(rocket::build().manage(defaults).attach(cors).mount(
        "/",
        routes![server_health, server_plan, server_plan_coaster, server_admit],
    ))
}

fn default_config_path() -> String {
    format!("{}/config.json", env!("CARGO_MANIFEST_DIR"))
}

fn run_server() -> Result<(), Error> {
    let config = config::load_or_default(default_config_path())?;

    validate_defaults(&config.defaults)?;

    let server = build_server(config.defaults)?;

    rocket::execute(server.launch()).map_err(|error| format_err!("server failed: {}", error))?;

    Ok(())
}

fn run_local(path: Option<String>) -> Result<(), Error> {
    let config = match path {
        Some(path) => config::load(path)?,
        None => config::load_or_default(default_config_path())?,
    };

    validate_config(&config)?;

    for report in coaster::plan_fleet(&config)?.iter() {
        report::print_report(report);
    }

    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let result = if args.len() >= 2 && args[1] == "-console" {
        run_local(args.get(2).cloned())
    } else {
        run_server()
    };

    if let Err(error) = result {
        eprintln!("{}", error.to_string().red());
        process::exit(1);
    }
}
