mod assignment;
mod eligibility;
mod shared;
mod state;
mod summary;
mod types;
mod util;

pub use eligibility::DailyPool;
pub use shared::SharedScheduler;
pub use state::AssignmentState;
pub use types::{
    HorizonResult, SchedError, StaffInfo, SummaryStats, WorkloadEntry, WorkloadSnapshot,
};

use crate::model::{Assignment, DayRequest, Staff};
use crate::registry::StaffRegistry;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Scheduler : registre figé + état d'affectation détenu explicitement.
#[derive(Debug, Clone)]
pub struct Scheduler {
    registry: StaffRegistry,
    state: AssignmentState,
}

impl Scheduler {
    pub fn new(staff: Vec<Staff>) -> Result<Self, SchedError> {
        Ok(Self::from_registry(StaffRegistry::new(staff)?))
    }

    pub fn from_registry(registry: StaffRegistry) -> Self {
        let state = AssignmentState::new(&registry);
        Self { registry, state }
    }

    pub fn registry(&self) -> &StaffRegistry {
        &self.registry
    }
    pub fn state(&self) -> &AssignmentState {
        &self.state
    }
    pub fn history(&self) -> &[Assignment] {
        self.state.history()
    }

    /// Disponibles / éligibles pour une date, sans effet de bord.
    pub fn pool(&self, date: NaiveDate) -> Result<DailyPool<'_>, SchedError> {
        eligibility::resolve(date, &self.registry, &self.state)
    }

    pub fn assign_day(
        &mut self,
        date: NaiveDate,
        required: i64,
        label: Option<&str>,
    ) -> Result<Assignment, SchedError> {
        let request = DayRequest::new(date, required, label.map(str::to_string))?;
        self.process(&request)
    }

    pub fn assign_request(&mut self, request: &DayRequest) -> Result<Assignment, SchedError> {
        self.process(request)
    }

    pub fn assign_horizon(&mut self, requests: &[DayRequest]) -> Result<HorizonResult, SchedError> {
        summary::assign_horizon(self, requests)
    }

    fn process(&mut self, request: &DayRequest) -> Result<Assignment, SchedError> {
        if let Some(previous) = self.state.last_processed() {
            if request.date <= previous {
                return Err(SchedError::OutOfOrder {
                    previous,
                    current: request.date,
                });
            }
        }

        let pool = eligibility::resolve(request.date, &self.registry, &self.state)?;
        let decided = assignment::allocate(request, &pool, &self.state)?;

        #[cfg(feature = "logging")]
        {
            tracing::debug!(
                date = %decided.date,
                required = decided.required,
                available = pool.available.len(),
                eligible = pool.eligible.len(),
                selected = ?decided.selected,
                "day allocated"
            );
            if decided.overtime {
                tracing::info!(date = %decided.date, "overtime: rest rule overridden");
            }
            if decided.shortage > 0 {
                tracing::info!(date = %decided.date, shortage = decided.shortage, "staff shortage");
            }
        }

        let applied = self.state.apply(&self.registry, decided)?;
        Ok(applied.clone())
    }

    pub fn get_state(&self) -> WorkloadSnapshot {
        self.state.snapshot()
    }

    /// Nouvel horizon avec le même registre.
    pub fn reset_state(&mut self) {
        self.state.reset();
        #[cfg(feature = "logging")]
        tracing::info!(staff = self.registry.len(), "assignment state reset");
    }

    pub fn load_state(&mut self, snapshot: &WorkloadSnapshot) -> Result<(), SchedError> {
        self.state.restore(&self.registry, snapshot)?;
        #[cfg(feature = "logging")]
        tracing::info!(entries = snapshot.workdays.len(), "assignment state restored");
        Ok(())
    }

    pub fn workload_balance(&self) -> Result<Vec<WorkloadEntry>, SchedError> {
        self.state.workload_balance(&self.registry)
    }

    pub fn holiday_conflicts(&self, dates: &[NaiveDate]) -> BTreeMap<NaiveDate, Vec<String>> {
        self.registry.holiday_conflicts(dates)
    }

    pub fn staff_info(&self) -> Result<StaffInfo, SchedError> {
        let mut worked_yesterday = Vec::new();
        for name in self.registry.names() {
            if self.state.worked_yesterday(name)? {
                worked_yesterday.push(name.to_string());
            }
        }
        Ok(StaffInfo {
            total_staff: self.registry.len(),
            staff_names: self.registry.names().map(str::to_string).collect(),
            current_workload: self.workload_balance()?,
            worked_yesterday,
            total_assignments_made: self.state.history().len(),
        })
    }
}
