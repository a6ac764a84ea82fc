use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::rentals::domain::{Car, CarDto, CarId, NewCar, Rental, RentalRequest};
use crate::rentals::repository::{CarRepository, InMemoryCarRepository, RepositoryError};
use crate::rentals::{car_router, CarService};

pub(super) fn black_2005() -> Car {
    Car::with_id(
        CarId(1),
        NewCar {
            color: "black".to_string(),
            year: 2005,
        },
    )
}

pub(super) fn black_2011() -> Car {
    Car::with_id(
        CarId(2),
        NewCar {
            color: "black".to_string(),
            year: 2011,
        },
    )
}

pub(super) fn rent_end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 7, 22).expect("valid date")
}

pub(super) fn doaa_request() -> RentalRequest {
    RentalRequest {
        customer_name: "doaa".to_string(),
        rent_end_date: rent_end_date(),
    }
}

pub(super) fn rented_by_doaa(car: Car) -> Car {
    Car {
        rental: Some(Rental {
            customer_name: "doaa".to_string(),
            rent_end_date: rent_end_date(),
        }),
        ..car
    }
}

/// Transfer record asking for `car` to be rented by doaa.
pub(super) fn rent_payload(car: &Car) -> CarDto {
    CarDto::from(&rented_by_doaa(car.clone()))
}

pub(super) fn build_service() -> (
    CarService<InMemoryCarRepository>,
    Arc<InMemoryCarRepository>,
) {
    let repository = Arc::new(InMemoryCarRepository::default());
    let service = CarService::new(repository.clone());
    (service, repository)
}

pub(super) fn seeded_service() -> (
    CarService<InMemoryCarRepository>,
    Arc<InMemoryCarRepository>,
) {
    let (service, repository) = build_service();
    repository.save(black_2005()).expect("seed car 1");
    repository.save(black_2011()).expect("seed car 2");
    (service, repository)
}

pub(super) struct UnavailableRepository;

impl CarRepository for UnavailableRepository {
    fn save(&self, _car: Car) -> Result<Car, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_all(&self) -> Result<Vec<Car>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_by_id(&self, _id: &CarId) -> Result<Option<Car>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete_by_id(&self, _id: &CarId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete_all(&self) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Serves reads from a fixed car but refuses every write.
pub(super) struct ReadOnlyRepository(pub(super) Car);

impl CarRepository for ReadOnlyRepository {
    fn save(&self, _car: Car) -> Result<Car, RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn find_all(&self) -> Result<Vec<Car>, RepositoryError> {
        Ok(vec![self.0.clone()])
    }

    fn find_by_id(&self, id: &CarId) -> Result<Option<Car>, RepositoryError> {
        Ok(Some(self.0.clone()).filter(|car| car.id == Some(*id)))
    }

    fn delete_by_id(&self, _id: &CarId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn delete_all(&self) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(service: CarService<InMemoryCarRepository>) -> axum::Router {
    car_router(Arc::new(service))
}
