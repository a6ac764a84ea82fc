use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::domain::{Car, CarDto, CarId, CarRecordError};
use super::policy::{RentalError, RentalPolicy};
use super::repository::{CarRepository, RepositoryError};

/// Service composing the fleet repository with the rental policy.
pub struct CarService<R> {
    repository: Arc<R>,
    policy: RentalPolicy,
}

impl<R> CarService<R>
where
    R: CarRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            policy: RentalPolicy::new(),
        }
    }

    /// Add a car to the fleet, returning the stored record.
    pub fn save(&self, car: Car) -> Result<CarDto, CarServiceError> {
        let stored = self.repository.save(car)?;
        debug!(car_id = ?stored.id, color = %stored.color, year = stored.year, "car saved");
        Ok(CarDto::from(stored))
    }

    pub fn find_all(&self) -> Result<Vec<CarDto>, CarServiceError> {
        let cars = self.repository.find_all()?;
        Ok(cars.iter().map(CarDto::from).collect())
    }

    pub fn find_by_id(&self, id: CarId) -> Result<Option<Car>, CarServiceError> {
        Ok(self.repository.find_by_id(&id)?)
    }

    /// Rent the car named by `request.id` to the customer carried in the record.
    pub fn rent(&self, request: CarDto) -> Result<CarDto, CarServiceError> {
        let id = request.id.map(CarId).ok_or(CarServiceError::MissingId)?;
        let rental = request
            .rental_request()
            .ok_or(CarServiceError::IncompleteRental)?;

        let current = self
            .repository
            .find_by_id(&id)?
            .ok_or(RepositoryError::NotFound(id))?;

        let updated = match self.policy.evaluate(current, rental) {
            Ok(car) => car,
            Err(err) => {
                warn!(car_id = %id, "rental rejected: {err}");
                return Err(err.into());
            }
        };

        let stored = self.repository.save(updated)?;
        info!(
            car_id = %id,
            rent_end_date = ?stored.rent_end_date(),
            "car rented"
        );
        Ok(CarDto::from(stored))
    }

    /// Clear the renter fields of a car, making it available again.
    pub fn release(&self, id: CarId) -> Result<CarDto, CarServiceError> {
        let current = self
            .repository
            .find_by_id(&id)?
            .ok_or(RepositoryError::NotFound(id))?;

        let stored = self.repository.save(self.policy.release(current))?;
        info!(car_id = %id, "car released");
        Ok(CarDto::from(stored))
    }

    /// Release every rental whose end date is strictly before `today`.
    pub fn release_expired(&self, today: NaiveDate) -> Result<Vec<CarDto>, CarServiceError> {
        let expired: Vec<Car> = self
            .repository
            .find_all()?
            .into_iter()
            .filter(|car| car.rent_end_date().is_some_and(|end| end < today))
            .collect();

        let mut released = Vec::with_capacity(expired.len());
        for car in expired {
            let stored = self.repository.save(self.policy.release(car))?;
            released.push(CarDto::from(stored));
        }

        if !released.is_empty() {
            info!(count = released.len(), %today, "expired rentals released");
        }
        Ok(released)
    }

    pub fn delete_by_id(&self, id: CarId) -> Result<(), CarServiceError> {
        self.repository.delete_by_id(&id)?;
        debug!(car_id = %id, "car deleted");
        Ok(())
    }

    pub fn delete_all(&self) -> Result<(), CarServiceError> {
        self.repository.delete_all()?;
        info!("fleet cleared");
        Ok(())
    }
}

/// Error raised by the car service.
#[derive(Debug, thiserror::Error)]
pub enum CarServiceError {
    #[error(transparent)]
    Rental(#[from] RentalError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Record(#[from] CarRecordError),
    #[error("rental request must name a car id")]
    MissingId,
    #[error("rental request must carry customer_name and rent_end_date")]
    IncompleteRental,
}
