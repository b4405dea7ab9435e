use super::types::{HorizonResult, SchedError, SummaryStats};
use super::Scheduler;
use crate::model::{Assignment, DayRequest};

/// Traite un horizon jour après jour. Tout l'horizon est validé (ordre
/// strictement chronologique, cohérence de l'état) avant la première
/// écriture.
pub(super) fn assign_horizon(
    scheduler: &mut Scheduler,
    requests: &[DayRequest],
) -> Result<HorizonResult, SchedError> {
    scheduler.state.ensure_consistent(&scheduler.registry)?;

    let mut previous = scheduler.state.last_processed();
    for request in requests {
        if let Some(prev) = previous {
            if request.date <= prev {
                return Err(SchedError::OutOfOrder {
                    previous: prev,
                    current: request.date,
                });
            }
        }
        previous = Some(request.date);
    }

    let mut assignments = Vec::with_capacity(requests.len());
    for request in requests {
        assignments.push(scheduler.process(request)?);
    }

    let summary = SummaryStats::from_assignments(&assignments);
    #[cfg(feature = "logging")]
    tracing::info!(
        days = summary.total_assignments,
        overtime_days = summary.overtime_days,
        total_shortage = summary.total_shortage,
        "horizon processed"
    );

    Ok(HorizonResult {
        workload_balance: scheduler.state.workload_balance(&scheduler.registry)?,
        assignments,
        summary,
    })
}

impl SummaryStats {
    pub fn from_assignments(assignments: &[Assignment]) -> Self {
        let total_required: u64 = assignments.iter().map(|a| u64::from(a.required)).sum();
        let total_assigned: u64 = assignments
            .iter()
            .map(|a| u64::from(a.assigned_count))
            .sum();

        let assignment_rate = if total_required == 0 {
            100.0
        } else {
            total_assigned as f64 / total_required as f64 * 100.0
        };
        let average_coverage = if assignments.is_empty() {
            100.0
        } else {
            assignments
                .iter()
                .map(Assignment::coverage_percentage)
                .sum::<f64>()
                / assignments.len() as f64
        };

        Self {
            total_assignments: assignments.len(),
            total_required,
            total_assigned,
            assignment_rate,
            overtime_days: assignments.iter().filter(|a| a.overtime).count(),
            total_shortage: assignments.iter().map(|a| u64::from(a.shortage)).sum(),
            average_coverage,
        }
    }
}
