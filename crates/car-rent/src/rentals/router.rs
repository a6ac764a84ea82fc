use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, put},
    Json, Router,
};
use serde_json::json;

use super::domain::{Car, CarDto, CarId};
use super::policy::RentalError;
use super::repository::{CarRepository, RepositoryError};
use super::service::{CarService, CarServiceError};

/// Router builder exposing the fleet and rental endpoints.
pub fn car_router<R>(service: Arc<CarService<R>>) -> Router
where
    R: CarRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/cars",
            get(list_handler::<R>)
                .post(create_handler::<R>)
                .delete(delete_all_handler::<R>),
        )
        .route(
            "/api/v1/cars/:car_id",
            get(find_handler::<R>).delete(delete_handler::<R>),
        )
        .route("/api/v1/rentals", put(rent_handler::<R>))
        .route("/api/v1/rentals/:car_id", delete(release_handler::<R>))
        .with_state(service)
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<CarService<R>>>,
    Json(payload): Json<CarDto>,
) -> Response
where
    R: CarRepository + 'static,
{
    let result = Car::try_from(payload)
        .map_err(CarServiceError::from)
        .and_then(|car| service.save(car));

    match result {
        Ok(dto) => (StatusCode::CREATED, Json(dto)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_handler<R>(State(service): State<Arc<CarService<R>>>) -> Response
where
    R: CarRepository + 'static,
{
    match service.find_all() {
        Ok(cars) => (StatusCode::OK, Json(cars)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn find_handler<R>(
    State(service): State<Arc<CarService<R>>>,
    Path(car_id): Path<u64>,
) -> Response
where
    R: CarRepository + 'static,
{
    let id = CarId(car_id);
    match service.find_by_id(id) {
        Ok(Some(car)) => (StatusCode::OK, Json(CarDto::from(car))).into_response(),
        Ok(None) => error_response(RepositoryError::NotFound(id).into()),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn rent_handler<R>(
    State(service): State<Arc<CarService<R>>>,
    Json(payload): Json<CarDto>,
) -> Response
where
    R: CarRepository + 'static,
{
    match service.rent(payload) {
        Ok(dto) => (StatusCode::OK, Json(dto)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn release_handler<R>(
    State(service): State<Arc<CarService<R>>>,
    Path(car_id): Path<u64>,
) -> Response
where
    R: CarRepository + 'static,
{
    match service.release(CarId(car_id)) {
        Ok(dto) => (StatusCode::OK, Json(dto)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<CarService<R>>>,
    Path(car_id): Path<u64>,
) -> Response
where
    R: CarRepository + 'static,
{
    match service.delete_by_id(CarId(car_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_all_handler<R>(State(service): State<Arc<CarService<R>>>) -> Response
where
    R: CarRepository + 'static,
{
    match service.delete_all() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) fn status_for(err: &CarServiceError) -> StatusCode {
    match err {
        CarServiceError::Rental(RentalError::AlreadyRented) => StatusCode::CONFLICT,
        CarServiceError::Repository(RepositoryError::NotFound(_)) => StatusCode::NOT_FOUND,
        CarServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        CarServiceError::Rental(RentalError::MissingCustomer)
        | CarServiceError::Record(_)
        | CarServiceError::MissingId
        | CarServiceError::IncompleteRental => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn error_response(err: CarServiceError) -> Response {
    let payload = json!({ "error": err.to_string() });
    (status_for(&err), Json(payload)).into_response()
}
