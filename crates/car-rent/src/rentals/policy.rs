use super::domain::{non_blank, Car, CarStatus, RentalRequest};

/// Rental eligibility rule applied to a snapshot of a car.
///
/// A rented car is never handed to anyone else, including the customer who
/// already holds it. The renter fields only clear through [`RentalPolicy::release`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RentalPolicy;

impl RentalPolicy {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, current: Car, request: RentalRequest) -> Result<Car, RentalError> {
        if current.status() == CarStatus::Rented {
            return Err(RentalError::AlreadyRented);
        }
        if non_blank(Some(&request.customer_name)).is_none() {
            return Err(RentalError::MissingCustomer);
        }

        Ok(Car {
            rental: Some(request.into()),
            ..current
        })
    }

    /// Returns the car to the available pool. Releasing an available car is a no-op.
    pub fn release(&self, current: Car) -> Car {
        Car {
            rental: None,
            ..current
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RentalError {
    #[error("The car is rented by another customer.")]
    AlreadyRented,
    #[error("rental request must name a customer")]
    MissingCustomer,
}
