use super::state::AssignmentState;
use super::types::SchedError;
use crate::registry::StaffRegistry;
use chrono::NaiveDate;

/// Personnel mobilisable pour une date, dans l'ordre du registre.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DailyPool<'a> {
    /// Pas en congé.
    pub available: Vec<&'a str>,
    /// Disponible et n'a pas travaillé le jour traité précédent.
    pub eligible: Vec<&'a str>,
}

pub(super) fn resolve<'a>(
    date: NaiveDate,
    registry: &'a StaffRegistry,
    state: &AssignmentState,
) -> Result<DailyPool<'a>, SchedError> {
    let mut pool = DailyPool::default();

    for staff in registry.iter() {
        let rested = !state.worked_yesterday(&staff.name)?;
        if !staff.is_available(date) {
            continue;
        }
        pool.available.push(staff.name.as_str());
        if rested {
            pool.eligible.push(staff.name.as_str());
        }
    }

    Ok(pool)
}
