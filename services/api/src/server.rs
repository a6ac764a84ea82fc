use crate::cli::ServeArgs;
use crate::infra::{seed_repository, AppState};
use crate::routes::with_car_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use car_rent::config::AppConfig;
use car_rent::error::AppError;
use car_rent::rentals::{CarService, CarServiceError, InMemoryCarRepository};
use car_rent::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if args.seed_fleet {
        config.fleet.seed_demo_fleet = true;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryCarRepository::default());
    if config.fleet.seed_demo_fleet {
        let seeded = seed_repository(&repository).map_err(CarServiceError::from)?;
        info!(cars = seeded.len(), "demo fleet seeded");
    }
    let car_service = Arc::new(CarService::new(repository));

    let app = with_car_routes(car_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "car rental service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
