use super::types::{HorizonResult, SchedError, WorkloadSnapshot};
use super::Scheduler;
use crate::model::{Assignment, DayRequest};
use chrono::NaiveDate;
use std::sync::{Arc, Mutex, MutexGuard};

/// Scheduler partageable entre threads (couche service).
///
/// Chaque appel garde le verrou pendant toute la séquence
/// lecture de l'état → décision → écriture, jour par jour.
#[derive(Debug, Clone)]
pub struct SharedScheduler {
    inner: Arc<Mutex<Scheduler>>,
}

impl SharedScheduler {
    pub fn new(scheduler: Scheduler) -> Self {
        Self {
            inner: Arc::new(Mutex::new(scheduler)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Scheduler>, SchedError> {
        self.inner.lock().map_err(|_| SchedError::StatePoisoned)
    }

    pub fn assign_day(
        &self,
        date: NaiveDate,
        required: i64,
        label: Option<&str>,
    ) -> Result<Assignment, SchedError> {
        self.lock()?.assign_day(date, required, label)
    }

    pub fn assign_horizon(&self, requests: &[DayRequest]) -> Result<HorizonResult, SchedError> {
        self.lock()?.assign_horizon(requests)
    }

    pub fn get_state(&self) -> Result<WorkloadSnapshot, SchedError> {
        Ok(self.lock()?.get_state())
    }

    pub fn reset_state(&self) -> Result<(), SchedError> {
        self.lock()?.reset_state();
        Ok(())
    }

    pub fn load_state(&self, snapshot: &WorkloadSnapshot) -> Result<(), SchedError> {
        self.lock()?.load_state(snapshot)
    }

    /// Accès en lecture sous verrou.
    pub fn with<R>(&self, f: impl FnOnce(&Scheduler) -> R) -> Result<R, SchedError> {
        let guard = self.lock()?;
        Ok(f(&guard))
    }
}
