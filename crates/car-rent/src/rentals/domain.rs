use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Repository-assigned identifier for a fleet car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CarId(pub u64);

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Field values for a car that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCar {
    pub color: String,
    pub year: i32,
}

/// An active rental: who has the car and until when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rental {
    pub customer_name: String,
    pub rent_end_date: NaiveDate,
}

/// A fleet car. The renter fields live together in `rental`, so a car is either
/// available or rented to one customer until one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    pub id: Option<CarId>,
    pub color: String,
    pub year: i32,
    pub rental: Option<Rental>,
}

impl Car {
    pub fn new(fields: NewCar) -> Self {
        Self {
            id: None,
            color: fields.color,
            year: fields.year,
            rental: None,
        }
    }

    pub fn with_id(id: CarId, fields: NewCar) -> Self {
        Self {
            id: Some(id),
            ..Self::new(fields)
        }
    }

    /// The rental, unless its customer name is blank. A nameless rental holds nobody.
    pub fn active_rental(&self) -> Option<&Rental> {
        self.rental
            .as_ref()
            .filter(|rental| non_blank(Some(&rental.customer_name)).is_some())
    }

    pub fn status(&self) -> CarStatus {
        match self.active_rental() {
            Some(_) => CarStatus::Rented,
            None => CarStatus::Available,
        }
    }

    pub fn customer_name(&self) -> Option<&str> {
        self.active_rental().map(|rental| rental.customer_name.as_str())
    }

    pub fn rent_end_date(&self) -> Option<NaiveDate> {
        self.active_rental().map(|rental| rental.rent_end_date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarStatus {
    Available,
    Rented,
}

impl CarStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CarStatus::Available => "available",
            CarStatus::Rented => "rented",
        }
    }
}

/// Proposed renter for a car.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalRequest {
    pub customer_name: String,
    pub rent_end_date: NaiveDate,
}

impl From<RentalRequest> for Rental {
    fn from(request: RentalRequest) -> Self {
        Rental {
            customer_name: request.customer_name,
            rent_end_date: request.rent_end_date,
        }
    }
}

/// Flat transfer record used at the service and HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CarDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub color: String,
    pub year: i32,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub rent_end_date: Option<NaiveDate>,
}

impl CarDto {
    /// The renter fields as a rental request, when both are present.
    pub fn rental_request(&self) -> Option<RentalRequest> {
        let customer_name = non_blank(self.customer_name.as_deref())?;
        let rent_end_date = self.rent_end_date?;
        Some(RentalRequest {
            customer_name: customer_name.to_string(),
            rent_end_date,
        })
    }
}

impl From<&Car> for CarDto {
    fn from(car: &Car) -> Self {
        CarDto {
            id: car.id.map(|id| id.0),
            color: car.color.clone(),
            year: car.year,
            customer_name: car.customer_name().map(str::to_string),
            rent_end_date: car.rent_end_date(),
        }
    }
}

impl From<Car> for CarDto {
    fn from(car: Car) -> Self {
        CarDto::from(&car)
    }
}

impl TryFrom<CarDto> for Car {
    type Error = CarRecordError;

    fn try_from(dto: CarDto) -> Result<Self, Self::Error> {
        let customer_name = non_blank(dto.customer_name.as_deref()).map(str::to_string);
        let rental = match (customer_name, dto.rent_end_date) {
            (Some(customer_name), Some(rent_end_date)) => Some(Rental {
                customer_name,
                rent_end_date,
            }),
            (None, None) => None,
            _ => return Err(CarRecordError::PartialRental),
        };

        Ok(Car {
            id: dto.id.map(CarId),
            color: dto.color,
            year: dto.year,
            rental,
        })
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|name| !name.trim().is_empty())
}

/// Raised when a transfer record cannot be turned into a car.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CarRecordError {
    #[error("customer_name and rent_end_date must be provided together")]
    PartialRental,
}
