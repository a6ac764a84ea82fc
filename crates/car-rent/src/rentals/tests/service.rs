use super::common::*;
use crate::rentals::domain::{CarDto, CarId, CarStatus, NewCar};
use crate::rentals::repository::{CarRepository, RepositoryError};
use crate::rentals::{Car, CarService, CarServiceError, RentalError};
use chrono::NaiveDate;
use std::sync::Arc;

#[test]
fn save_returns_transfer_record() {
    let (service, _) = build_service();
    let car = black_2005();

    let saved = service.save(car.clone()).expect("save succeeds");

    assert_eq!(saved.color, CarDto::from(&car).color);
    assert_eq!(saved.id, Some(1));
}

#[test]
fn save_assigns_id_to_new_cars() {
    let (service, repository) = build_service();

    let saved = service
        .save(Car::new(NewCar {
            color: "silver".to_string(),
            year: 2021,
        }))
        .expect("save succeeds");

    let id = CarId(saved.id.expect("id assigned"));
    let stored = repository.find_by_id(&id).expect("lookup");
    assert_eq!(stored.map(|car| car.color), Some("silver".to_string()));
}

#[test]
fn find_all_returns_every_car() {
    let (service, _) = seeded_service();

    let cars = service.find_all().expect("list succeeds");

    assert_eq!(cars.len(), 2);
    assert!(cars.contains(&CarDto::from(&black_2005())));
    assert!(cars.contains(&CarDto::from(&black_2011())));
}

#[test]
fn find_by_id_returns_saved_record() {
    let (service, _) = seeded_service();

    let found = service.find_by_id(CarId(1)).expect("lookup succeeds");

    assert_eq!(found, Some(black_2005()));
    assert!(service.find_by_id(CarId(99)).expect("lookup").is_none());
}

#[test]
fn rent_sets_customer_and_end_date() {
    let (service, repository) = seeded_service();

    let rented = service
        .rent(rent_payload(&black_2005()))
        .expect("available car rents");

    assert_eq!(rented.customer_name.as_deref(), Some("doaa"));
    assert_eq!(rented.rent_end_date, Some(rent_end_date()));

    let stored = repository
        .find_by_id(&CarId(1))
        .expect("lookup")
        .expect("car present");
    assert_eq!(stored.status(), CarStatus::Rented);
    assert_eq!(stored.year, 2005);
}

#[test]
fn rent_rejects_already_rented_car() {
    let (service, repository) = build_service();
    let rented = rented_by_doaa(black_2005());
    repository.save(rented.clone()).expect("seed rented car");

    let err = service
        .rent(CarDto::from(&rented))
        .expect_err("second rental is rejected");

    assert!(matches!(
        err,
        CarServiceError::Rental(RentalError::AlreadyRented)
    ));
    assert_eq!(err.to_string(), "The car is rented by another customer.");

    let stored = repository
        .find_by_id(&CarId(1))
        .expect("lookup")
        .expect("car present");
    assert_eq!(stored, rented, "rejected rental leaves the record untouched");
}

#[test]
fn rent_requires_car_id() {
    let (service, _) = seeded_service();
    let mut payload = rent_payload(&black_2005());
    payload.id = None;

    let err = service.rent(payload).expect_err("id is required");
    assert!(matches!(err, CarServiceError::MissingId));
}

#[test]
fn rent_requires_both_renter_fields() {
    let (service, _) = seeded_service();
    let mut payload = rent_payload(&black_2005());
    payload.rent_end_date = None;

    let err = service.rent(payload).expect_err("end date is required");
    assert!(matches!(err, CarServiceError::IncompleteRental));
}

#[test]
fn rent_reports_unknown_car() {
    let (service, _) = seeded_service();
    let mut payload = rent_payload(&black_2005());
    payload.id = Some(42);

    let err = service.rent(payload).expect_err("car 42 does not exist");
    assert!(matches!(
        err,
        CarServiceError::Repository(RepositoryError::NotFound(CarId(42)))
    ));
}

#[test]
fn rent_propagates_repository_write_failures() {
    let service = CarService::new(Arc::new(ReadOnlyRepository(black_2005())));

    let err = service
        .rent(rent_payload(&black_2005()))
        .expect_err("write is refused");
    assert!(matches!(
        err,
        CarServiceError::Repository(RepositoryError::Unavailable(_))
    ));
}

#[test]
fn release_makes_car_available() {
    let (service, repository) = build_service();
    repository
        .save(rented_by_doaa(black_2005()))
        .expect("seed rented car");

    let released = service.release(CarId(1)).expect("release succeeds");

    assert_eq!(released.customer_name, None);
    assert_eq!(released.rent_end_date, None);
    service
        .rent(rent_payload(&black_2005()))
        .expect("released car can be rented again");
}

#[test]
fn release_expired_only_touches_past_rentals() {
    let (service, repository) = build_service();
    repository
        .save(rented_by_doaa(black_2005()))
        .expect("seed expiring car");
    let mut later = rented_by_doaa(black_2011());
    if let Some(rental) = later.rental.as_mut() {
        rental.rent_end_date = NaiveDate::from_ymd_opt(2023, 8, 30).expect("valid");
    }
    repository.save(later.clone()).expect("seed active car");

    let today = NaiveDate::from_ymd_opt(2023, 7, 23).expect("valid");
    let released = service.release_expired(today).expect("sweep succeeds");

    assert_eq!(released.len(), 1);
    assert_eq!(released[0].id, Some(1));
    let still_rented = repository
        .find_by_id(&CarId(2))
        .expect("lookup")
        .expect("car present");
    assert_eq!(still_rented, later);
}

#[test]
fn release_expired_keeps_rentals_ending_today() {
    let (service, repository) = build_service();
    repository
        .save(rented_by_doaa(black_2005()))
        .expect("seed rented car");

    let released = service
        .release_expired(rent_end_date())
        .expect("sweep succeeds");

    assert!(released.is_empty());
}

#[test]
fn delete_by_id_removes_record() {
    let (service, _) = seeded_service();

    service.delete_by_id(CarId(1)).expect("delete succeeds");

    assert!(service.find_by_id(CarId(1)).expect("lookup").is_none());
    service
        .delete_by_id(CarId(1))
        .expect("deleting twice is harmless");
}

#[test]
fn delete_all_empties_fleet() {
    let (service, repository) = seeded_service();

    service.delete_all().expect("clear succeeds");

    assert!(repository.is_empty().expect("store readable"));
    assert!(service.find_all().expect("list").is_empty());
}

#[test]
fn repository_outage_surfaces_unchanged() {
    let service = CarService::new(Arc::new(UnavailableRepository));

    let err = service.find_all().expect_err("repository is down");
    assert_eq!(err.to_string(), "repository unavailable: database offline");
}
