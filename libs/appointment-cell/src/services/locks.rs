use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard as StdMutexGuard, PoisonError};

use tokio::sync::{Mutex, OwnedMutexGuard};

use shared_models::DoctorId;

type Registry = HashMap<DoctorId, Arc<Mutex<()>>>;

/// One async mutex per doctor. Holding the guard makes a read-then-write on
/// that doctor's appointments atomic with respect to this process.
///
/// An entry lives only while some task holds or waits on it, so the
/// registry stays bounded by the number of doctors with requests in flight.
#[derive(Default)]
pub struct DoctorLocks {
    locks: Arc<StdMutex<Registry>>,
}

/// Releases the doctor's lock on drop and forgets the entry when nobody
/// else is holding or waiting on it.
pub struct DoctorLockGuard {
    guard: Option<OwnedMutexGuard<()>>,
    doctor_id: DoctorId,
    locks: Arc<StdMutex<Registry>>,
}

impl DoctorLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, doctor_id: &DoctorId) -> DoctorLockGuard {
        let lock = registry(&self.locks)
            .entry(doctor_id.clone())
            .or_default()
            .clone();

        DoctorLockGuard {
            guard: Some(lock.lock_owned().await),
            doctor_id: doctor_id.clone(),
            locks: Arc::clone(&self.locks),
        }
    }

    /// Number of doctors currently tracked.
    pub fn tracked(&self) -> usize {
        registry(&self.locks).len()
    }
}

impl Drop for DoctorLockGuard {
    fn drop(&mut self) {
        // Release first so our own Arc no longer counts.
        self.guard.take();

        let mut locks = registry(&self.locks);
        let idle = locks
            .get(&self.doctor_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1);
        if idle {
            locks.remove(&self.doctor_id);
        }
    }
}

// The registry is never left half-updated, so a poisoned lock is still usable.
fn registry(locks: &StdMutex<Registry>) -> StdMutexGuard<'_, Registry> {
    locks.lock().unwrap_or_else(PoisonError::into_inner)
}
