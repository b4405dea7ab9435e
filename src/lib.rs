#![forbid(unsafe_code)]
//! Roulement : affectation quotidienne du personnel sur un horizon glissant.
//!
//! - Glouton jour par jour, équilibrage par nombre de jours travaillés.
//! - Un jour de repos après chaque jour travaillé, sauf heures sup.
//! - Congés individuels, manque de personnel signalé sans erreur.
//! - Prévision de charge, stockage fichiers (JSON/CSV) en dehors du cœur.

pub mod forecast;
pub mod io;
pub mod model;
pub mod registry;
pub mod report;
pub mod scheduler;
pub mod storage;

pub use forecast::{Evaluation, Forecast, ForecastMethod, ForecastOptions, Forecaster, LoadRecord};
pub use model::{Assignment, DayRequest, Staff, StaffId};
pub use registry::StaffRegistry;
pub use report::{SummaryRenderer, TextSummary};
pub use scheduler::{
    AssignmentState, DailyPool, HorizonResult, SchedError, Scheduler, SharedScheduler, StaffInfo,
    SummaryStats, WorkloadEntry, WorkloadSnapshot,
};
pub use storage::{JsonStorage, Storage};
