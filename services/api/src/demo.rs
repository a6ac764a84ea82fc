use crate::infra::{demo_fleet, parse_date};
use car_rent::error::AppError;
use car_rent::rentals::{
    CarDto, CarId, CarService, CarServiceError, CarStatus, InMemoryCarRepository,
};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Customer renting the first car
    #[arg(long, default_value = "doaa")]
    pub(crate) customer: String,
    /// Rental end date (YYYY-MM-DD). Defaults to today + 7 days.
    #[arg(long, value_parser = parse_date)]
    pub(crate) rent_end_date: Option<NaiveDate>,
    /// Keep the fleet at the end instead of clearing it.
    #[arg(long)]
    pub(crate) keep_fleet: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        customer,
        rent_end_date,
        keep_fleet,
    } = args;

    let rent_end_date =
        rent_end_date.unwrap_or_else(|| Local::now().date_naive() + chrono::Duration::days(7));

    let repository = Arc::new(InMemoryCarRepository::default());
    let service = CarService::new(repository);

    println!("Car rental demo");
    let mut saved = Vec::new();
    for car in demo_fleet() {
        saved.push(service.save(car)?);
    }
    render_fleet("Fleet after intake", &service.find_all()?);

    let Some(first) = saved.first().cloned() else {
        println!("\nNo cars available to rent");
        return Ok(());
    };

    let request = CarDto {
        customer_name: Some(customer.clone()),
        rent_end_date: Some(rent_end_date),
        ..first
    };

    let rented = service.rent(request.clone())?;
    println!(
        "\nRented car {} to {} until {}",
        describe_id(&rented),
        customer,
        rent_end_date
    );

    match service.rent(request) {
        Ok(_) => println!("Second rental unexpectedly accepted"),
        Err(CarServiceError::Rental(err)) => println!("Second rental rejected: {err}"),
        Err(other) => return Err(other.into()),
    }

    if let Some(id) = rented.id.map(CarId) {
        let released = service.release(id)?;
        println!(
            "Released car {} (status {})",
            describe_id(&released),
            status_label(&released)
        );
    }

    render_fleet("Fleet after release", &service.find_all()?);

    if !keep_fleet {
        service.delete_all()?;
        println!("\nFleet cleared ({} cars left)", service.find_all()?.len());
    }

    Ok(())
}

fn render_fleet(title: &str, cars: &[CarDto]) {
    println!("\n{title}");
    if cars.is_empty() {
        println!("- none");
        return;
    }

    for car in cars {
        let renter = match (&car.customer_name, car.rent_end_date) {
            (Some(name), Some(end)) => format!("rented by {name} until {end}"),
            _ => "available".to_string(),
        };
        println!(
            "- #{} | {} | {} | {}",
            describe_id(car),
            car.color,
            car.year,
            renter
        );
    }
}

fn describe_id(car: &CarDto) -> String {
    car.id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "?".to_string())
}

fn status_label(car: &CarDto) -> &'static str {
    match car.rental_request() {
        Some(_) => CarStatus::Rented.label(),
        None => CarStatus::Available.label(),
    }
}
