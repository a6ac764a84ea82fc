//! Fleet records, the rental eligibility policy, and the service and routes built on them.

pub mod domain;
pub mod policy;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Car, CarDto, CarId, CarRecordError, CarStatus, NewCar, Rental, RentalRequest};
pub use policy::{RentalError, RentalPolicy};
pub use repository::{CarRepository, InMemoryCarRepository, RepositoryError};
pub use router::car_router;
pub use service::{CarService, CarServiceError};
