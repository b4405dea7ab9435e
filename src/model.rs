use crate::scheduler::SchedError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identifiant fort pour Staff (entier unique dans le registre)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffId(u32);

impl StaffId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
    pub fn get(self) -> u32 {
        self.0
    }
}

/// Membre du personnel et ses jours d'indisponibilité (congés).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub holidays: BTreeSet<NaiveDate>,
}

impl Staff {
    pub fn new<N: Into<String>>(id: u32, name: N) -> Self {
        Self {
            id: StaffId::new(id),
            name: name.into(),
            holidays: BTreeSet::new(),
        }
    }

    pub fn with_holidays<I: IntoIterator<Item = NaiveDate>>(mut self, dates: I) -> Self {
        self.holidays.extend(dates);
        self
    }

    /// Vrai si la date n'est pas un jour de congé.
    pub fn is_available(&self, date: NaiveDate) -> bool {
        !self.holidays.contains(&date)
    }
}

/// Besoin en personnel pour un jour donné.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRequest {
    pub date: NaiveDate,
    pub required: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl DayRequest {
    /// Valide l'effectif demandé (entier >= 0).
    pub fn new(date: NaiveDate, required: i64, label: Option<String>) -> Result<Self, SchedError> {
        let required =
            u32::try_from(required).map_err(|_| SchedError::InvalidRequirement(required))?;
        Ok(Self {
            date,
            required,
            label,
        })
    }

    /// Libellé fourni, sinon le nom du jour (`Monday`, ...).
    pub fn label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.date.format("%A").to_string())
    }
}

/// Affectation d'une journée traitée. Immuable une fois dans l'historique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub date: NaiveDate,
    pub day_label: String,
    pub required: u32,
    pub selected: Vec<String>,
    pub assigned_count: u32,
    pub overtime: bool,
    /// `max(0, required - available)`, jamais `required - assigned`.
    pub shortage: u32,
}

impl Assignment {
    pub fn coverage_percentage(&self) -> f64 {
        if self.required == 0 {
            return 100.0;
        }
        f64::from(self.assigned_count) / f64::from(self.required) * 100.0
    }

    pub fn is_fully_staffed(&self) -> bool {
        self.shortage == 0
    }
}
