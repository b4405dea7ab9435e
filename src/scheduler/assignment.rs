use super::eligibility::DailyPool;
use super::state::AssignmentState;
use super::types::SchedError;
use super::util;
use crate::model::{Assignment, DayRequest};

/// Décision gloutonne d'une journée.
///
/// 1. Les éligibles sont classés par charge croissante (départage : registre).
/// 2. S'ils suffisent, on prend les `required` premiers, sans heures sup.
/// 3. Sinon on reclasse tous les disponibles, repos ignoré, et on en prend
///    `min(required, available)` : heures sup.
///
/// Le manque vaut toujours `max(0, required - available)`.
pub(super) fn allocate(
    request: &DayRequest,
    pool: &DailyPool<'_>,
    state: &AssignmentState,
) -> Result<Assignment, SchedError> {
    let required = request.required as usize;
    let ranked_eligible = util::rank_by_workload(&pool.eligible, state)?;

    let (selected, overtime) = if required <= ranked_eligible.len() {
        (ranked_eligible[..required].to_vec(), false)
    } else {
        let ranked_available = util::rank_by_workload(&pool.available, state)?;
        let take = required.min(ranked_available.len());
        (ranked_available[..take].to_vec(), true)
    };

    let shortage = required.saturating_sub(pool.available.len());
    let selected: Vec<String> = selected.into_iter().map(str::to_string).collect();

    // les deux valeurs sont bornées par `required`, qui tient dans un u32
    Ok(Assignment {
        date: request.date,
        day_label: request.label(),
        required: request.required,
        assigned_count: selected.len() as u32,
        selected,
        overtime,
        shortage: shortage as u32,
    })
}
