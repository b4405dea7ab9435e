use crate::model::Assignment;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid required headcount {0}: must be a non-negative integer")]
    InvalidRequirement(i64),
    #[error("day requests out of order: {current} does not follow {previous}")]
    OutOfOrder {
        previous: NaiveDate,
        current: NaiveDate,
    },
    #[error("duplicate staff name: {0}")]
    DuplicateStaffName(String),
    #[error("duplicate staff id: {0}")]
    DuplicateStaffId(u32),
    #[error("unknown staff name: {0}")]
    UnknownStaff(String),
    #[error("unknown method: {0}")]
    UnknownMethod(String),
    #[error("not enough history: need {needed} record(s), got {got}")]
    InsufficientHistory { needed: usize, got: usize },
    /// Invariant interne cassé : l'état ne couvre pas tout le registre.
    #[error("assignment state has no entry for registered staff {0}")]
    MissingStateEntry(String),
    #[error("workday counter overflow for {0}")]
    WorkdayOverflow(String),
    #[error("shared scheduler lock poisoned")]
    StatePoisoned,
}

/// Export/import des compteurs (l'historique n'en fait pas partie).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadSnapshot {
    #[serde(default)]
    pub workdays: BTreeMap<String, u32>,
    #[serde(default)]
    pub worked_yesterday: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadEntry {
    pub name: String,
    pub workdays: u32,
}

/// Statistiques agrégées d'un horizon traité.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_assignments: usize,
    pub total_required: u64,
    pub total_assigned: u64,
    /// `total_assigned / total_required * 100`, 100 si rien n'était demandé.
    pub assignment_rate: f64,
    pub overtime_days: usize,
    pub total_shortage: u64,
    /// Moyenne des couvertures journalières, 100 pour un horizon vide.
    pub average_coverage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonResult {
    pub assignments: Vec<Assignment>,
    /// Ordre du registre.
    pub workload_balance: Vec<WorkloadEntry>,
    pub summary: SummaryStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffInfo {
    pub total_staff: usize,
    pub staff_names: Vec<String>,
    pub current_workload: Vec<WorkloadEntry>,
    pub worked_yesterday: Vec<String>,
    pub total_assignments_made: usize,
}
