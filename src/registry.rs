use crate::model::{Staff, StaffId};
use crate::scheduler::SchedError;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Registre figé du personnel. L'ordre d'insertion sert de départage
/// pour tout le reste du moteur.
#[derive(Debug, Clone, Default)]
pub struct StaffRegistry {
    staff: Vec<Staff>,
    by_name: HashMap<String, usize>,
}

impl StaffRegistry {
    /// Refuse les identifiants ou noms en double.
    pub fn new(staff: Vec<Staff>) -> Result<Self, SchedError> {
        let mut ids: HashSet<StaffId> = HashSet::with_capacity(staff.len());
        let mut by_name = HashMap::with_capacity(staff.len());

        for (idx, member) in staff.iter().enumerate() {
            if !ids.insert(member.id) {
                return Err(SchedError::DuplicateStaffId(member.id.get()));
            }
            if by_name.insert(member.name.clone(), idx).is_some() {
                return Err(SchedError::DuplicateStaffName(member.name.clone()));
            }
        }

        Ok(Self { staff, by_name })
    }

    pub fn len(&self) -> usize {
        self.staff.len()
    }
    pub fn is_empty(&self) -> bool {
        self.staff.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Staff> {
        self.staff.iter()
    }

    /// Noms dans l'ordre d'insertion.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.staff.iter().map(|s| s.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&Staff> {
        self.by_name.get(name).map(|&idx| &self.staff[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn is_available(&self, name: &str, date: NaiveDate) -> Result<bool, SchedError> {
        self.get(name)
            .map(|s| s.is_available(date))
            .ok_or_else(|| SchedError::UnknownStaff(name.to_string()))
    }

    /// Personnel en congé par date ; les dates sans absent n'ont pas d'entrée.
    pub fn holiday_conflicts(&self, dates: &[NaiveDate]) -> BTreeMap<NaiveDate, Vec<String>> {
        let mut out = BTreeMap::new();
        for &date in dates {
            let away: Vec<String> = self
                .staff
                .iter()
                .filter(|s| !s.is_available(date))
                .map(|s| s.name.clone())
                .collect();
            if !away.is_empty() {
                out.insert(date, away);
            }
        }
        out
    }
}
