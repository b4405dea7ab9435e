use super::types::{SchedError, WorkloadEntry, WorkloadSnapshot};
use crate::model::Assignment;
use crate::registry::StaffRegistry;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

/// État mutable entre deux journées : compteurs de jours travaillés,
/// drapeau « a travaillé la veille » et historique des affectations.
///
/// Chaque nom du registre a exactement une entrée dans chaque table.
#[derive(Debug, Clone, Default)]
pub struct AssignmentState {
    workdays: HashMap<String, u32>,
    worked_yesterday: HashMap<String, bool>,
    history: Vec<Assignment>,
}

impl AssignmentState {
    pub fn new(registry: &StaffRegistry) -> Self {
        Self {
            workdays: registry.names().map(|n| (n.to_string(), 0)).collect(),
            worked_yesterday: registry.names().map(|n| (n.to_string(), false)).collect(),
            history: Vec::new(),
        }
    }

    pub fn workdays(&self, name: &str) -> Result<u32, SchedError> {
        self.workdays
            .get(name)
            .copied()
            .ok_or_else(|| SchedError::MissingStateEntry(name.to_string()))
    }

    pub fn worked_yesterday(&self, name: &str) -> Result<bool, SchedError> {
        self.worked_yesterday
            .get(name)
            .copied()
            .ok_or_else(|| SchedError::MissingStateEntry(name.to_string()))
    }

    pub fn history(&self) -> &[Assignment] {
        &self.history
    }

    pub fn last_processed(&self) -> Option<NaiveDate> {
        self.history.last().map(|a| a.date)
    }

    /// Vérifie que chaque membre du registre est présent dans les deux tables.
    pub fn ensure_consistent(&self, registry: &StaffRegistry) -> Result<(), SchedError> {
        for name in registry.names() {
            if !self.workdays.contains_key(name) || !self.worked_yesterday.contains_key(name) {
                return Err(SchedError::MissingStateEntry(name.to_string()));
            }
        }
        Ok(())
    }

    /// Applique une journée : drapeaux recalculés pour tout le registre,
    /// compteurs incrémentés pour les sélectionnés, ajout à l'historique.
    /// Rien n'est modifié si une entrée manque ou si un compteur déborde.
    pub(crate) fn apply(
        &mut self,
        registry: &StaffRegistry,
        assignment: Assignment,
    ) -> Result<&Assignment, SchedError> {
        self.ensure_consistent(registry)?;
        let mut next = Vec::with_capacity(assignment.selected.len());
        for name in &assignment.selected {
            let count = self.workdays(name)?;
            let bumped = count
                .checked_add(1)
                .ok_or_else(|| SchedError::WorkdayOverflow(name.clone()))?;
            next.push((name.as_str(), bumped));
        }

        let selected: HashSet<&str> = assignment.selected.iter().map(String::as_str).collect();
        for (name, flag) in self.worked_yesterday.iter_mut() {
            *flag = selected.contains(name.as_str());
        }
        for (name, bumped) in next {
            if let Some(count) = self.workdays.get_mut(name) {
                *count = bumped;
            }
        }

        self.history.push(assignment);
        Ok(&self.history[self.history.len() - 1])
    }

    pub fn reset(&mut self) {
        self.workdays.values_mut().for_each(|c| *c = 0);
        self.worked_yesterday.values_mut().for_each(|f| *f = false);
        self.history.clear();
    }

    pub fn snapshot(&self) -> WorkloadSnapshot {
        WorkloadSnapshot {
            workdays: self
                .workdays
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect(),
            worked_yesterday: self
                .worked_yesterday
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect(),
        }
    }

    /// Mise à jour partielle : les noms absents du snapshot gardent leur
    /// valeur ; un nom inconnu du registre est refusé avant toute écriture.
    pub fn restore(
        &mut self,
        registry: &StaffRegistry,
        snapshot: &WorkloadSnapshot,
    ) -> Result<(), SchedError> {
        if let Some(name) = snapshot
            .workdays
            .keys()
            .chain(snapshot.worked_yesterday.keys())
            .find(|name| !registry.contains(name))
        {
            return Err(SchedError::UnknownStaff(name.clone()));
        }

        for (name, count) in &snapshot.workdays {
            self.workdays.insert(name.clone(), *count);
        }
        for (name, flag) in &snapshot.worked_yesterday {
            self.worked_yesterday.insert(name.clone(), *flag);
        }
        Ok(())
    }

    /// Compteurs dans l'ordre du registre.
    pub fn workload_balance(
        &self,
        registry: &StaffRegistry,
    ) -> Result<Vec<WorkloadEntry>, SchedError> {
        registry
            .names()
            .map(|name| {
                Ok(WorkloadEntry {
                    name: name.to_string(),
                    workdays: self.workdays(name)?,
                })
            })
            .collect()
    }
}
