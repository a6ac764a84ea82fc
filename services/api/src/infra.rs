use car_rent::rentals::{Car, CarRepository, InMemoryCarRepository, NewCar, RepositoryError};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Cars loaded into a fresh fleet for demos and `--seed-fleet`.
pub(crate) fn demo_fleet() -> Vec<Car> {
    vec![
        Car::new(NewCar {
            color: "black".to_string(),
            year: 2005,
        }),
        Car::new(NewCar {
            color: "black".to_string(),
            year: 2011,
        }),
    ]
}

pub(crate) fn seed_repository(
    repository: &InMemoryCarRepository,
) -> Result<Vec<Car>, RepositoryError> {
    demo_fleet()
        .into_iter()
        .map(|car| repository.save(car))
        .collect()
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
