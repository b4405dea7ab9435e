use super::state::AssignmentState;
use super::types::SchedError;

/// Classe par nombre de jours travaillés croissant. Le tri est stable :
/// à égalité, l'ordre d'entrée (celui du registre) est conservé.
pub(super) fn rank_by_workload<'a>(
    names: &[&'a str],
    state: &AssignmentState,
) -> Result<Vec<&'a str>, SchedError> {
    let mut keyed = names
        .iter()
        .map(|&name| state.workdays(name).map(|count| (count, name)))
        .collect::<Result<Vec<_>, _>>()?;
    keyed.sort_by_key(|&(count, _)| count);
    Ok(keyed.into_iter().map(|(_, name)| name).collect())
}
