use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{Car, CarId};

/// Storage abstraction so the service module can be exercised in isolation.
pub trait CarRepository: Send + Sync {
    /// Persists the car, assigning an id when it has none, and returns the stored record.
    fn save(&self, car: Car) -> Result<Car, RepositoryError>;
    fn find_all(&self) -> Result<Vec<Car>, RepositoryError>;
    fn find_by_id(&self, id: &CarId) -> Result<Option<Car>, RepositoryError>;
    /// Removing an unknown id succeeds.
    fn delete_by_id(&self, id: &CarId) -> Result<(), RepositoryError>;
    fn delete_all(&self) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("car {0} not found")]
    NotFound(CarId),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-local fleet store keyed by id.
#[derive(Debug, Clone)]
pub struct InMemoryCarRepository {
    cars: Arc<Mutex<BTreeMap<CarId, Car>>>,
    sequence: Arc<AtomicU64>,
}

impl Default for InMemoryCarRepository {
    fn default() -> Self {
        Self {
            cars: Arc::new(Mutex::new(BTreeMap::new())),
            sequence: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl InMemoryCarRepository {
    pub fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<CarId, Car>>, RepositoryError> {
        self.cars
            .lock()
            .map_err(|_| RepositoryError::Unavailable("fleet store lock poisoned".to_string()))
    }

    fn assign_id(&self, car: &mut Car) -> CarId {
        match car.id {
            Some(id) => {
                // keep generated ids clear of explicitly supplied ones
                self.sequence.fetch_max(id.0.saturating_add(1), Ordering::Relaxed);
                id
            }
            None => {
                let id = CarId(self.sequence.fetch_add(1, Ordering::Relaxed));
                car.id = Some(id);
                id
            }
        }
    }
}

impl CarRepository for InMemoryCarRepository {
    fn save(&self, mut car: Car) -> Result<Car, RepositoryError> {
        let mut cars = self.lock()?;
        let id = self.assign_id(&mut car);
        cars.insert(id, car.clone());
        Ok(car)
    }

    fn find_all(&self) -> Result<Vec<Car>, RepositoryError> {
        Ok(self.lock()?.values().cloned().collect())
    }

    fn find_by_id(&self, id: &CarId) -> Result<Option<Car>, RepositoryError> {
        Ok(self.lock()?.get(id).cloned())
    }

    fn delete_by_id(&self, id: &CarId) -> Result<(), RepositoryError> {
        self.lock()?.remove(id);
        Ok(())
    }

    fn delete_all(&self) -> Result<(), RepositoryError> {
        self.lock()?.clear();
        Ok(())
    }
}
