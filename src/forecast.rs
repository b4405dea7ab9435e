//! Prévision de charge : transforme un historique `date → charge` en
//! besoins journaliers (`DayRequest`) consommés par le scheduler.

use crate::model::DayRequest;
use crate::scheduler::SchedError;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Point d'historique de charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadRecord {
    pub date: NaiveDate,
    pub load_units: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    /// Rejoue la dernière semaine observée.
    #[default]
    LastWeekPattern,
    MovingAverage,
    SeasonalMovingAverage,
    DayOfWeekAverage,
    SimpleAverage,
}

impl ForecastMethod {
    pub const ALL: [ForecastMethod; 5] = [
        ForecastMethod::LastWeekPattern,
        ForecastMethod::MovingAverage,
        ForecastMethod::SeasonalMovingAverage,
        ForecastMethod::DayOfWeekAverage,
        ForecastMethod::SimpleAverage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ForecastMethod::LastWeekPattern => "last_week_pattern",
            ForecastMethod::MovingAverage => "moving_average",
            ForecastMethod::SeasonalMovingAverage => "seasonal_moving_average",
            ForecastMethod::DayOfWeekAverage => "day_of_week_average",
            ForecastMethod::SimpleAverage => "simple_average",
        }
    }
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ForecastMethod {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| SchedError::UnknownMethod(wanted.to_string()))
    }
}

/// Options de prévision
#[derive(Debug, Clone, Copy)]
pub struct ForecastOptions {
    pub method: ForecastMethod,
    pub days: u32,
    pub window: usize,
}

impl Default for ForecastOptions {
    fn default() -> Self {
        Self {
            method: ForecastMethod::LastWeekPattern,
            days: 7,
            window: 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forecast {
    pub method: ForecastMethod,
    pub requests: Vec<DayRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub method: ForecastMethod,
    pub mae: f64,
    pub rmse: f64,
    /// En %, les jours à charge nulle sont ignorés.
    pub mape: f64,
}

#[derive(Debug, Clone)]
pub struct Forecaster {
    history: Vec<LoadRecord>,
}

impl Forecaster {
    /// L'historique est trié par date ; il ne peut pas être vide.
    pub fn new(mut history: Vec<LoadRecord>) -> Result<Self, SchedError> {
        if history.is_empty() {
            return Err(SchedError::InsufficientHistory { needed: 1, got: 0 });
        }
        history.sort_by_key(|r| r.date);
        Ok(Self { history })
    }

    pub fn history(&self) -> &[LoadRecord] {
        &self.history
    }

    pub fn last_date(&self) -> NaiveDate {
        self.history[self.history.len() - 1].date
    }

    pub fn forecast(&self, opts: &ForecastOptions) -> Forecast {
        let start = self.last_date();
        let dates: Vec<NaiveDate> = (1..=i64::from(opts.days))
            .map(|offset| start + Duration::days(offset))
            .collect();
        let predictions = self.predict(opts.method, &dates, opts.window);

        let requests = dates
            .into_iter()
            .zip(predictions)
            .map(|(date, required)| DayRequest {
                date,
                required,
                label: Some(date.format("%A").to_string()),
            })
            .collect();

        Forecast {
            method: opts.method,
            requests,
        }
    }

    /// Compare la méthode aux valeurs réelles d'une période de test.
    pub fn evaluate(
        &self,
        method: ForecastMethod,
        actuals: &[LoadRecord],
        window: usize,
    ) -> Result<Evaluation, SchedError> {
        if actuals.is_empty() {
            return Err(SchedError::InsufficientHistory { needed: 1, got: 0 });
        }
        let dates: Vec<NaiveDate> = actuals.iter().map(|r| r.date).collect();
        let predictions = self.predict(method, &dates, window);

        let n = actuals.len() as f64;
        let mut abs_sum = 0.0;
        let mut sq_sum = 0.0;
        let mut pct_sum = 0.0;
        let mut pct_count = 0usize;
        for (actual, predicted) in actuals.iter().zip(&predictions) {
            let actual = f64::from(actual.load_units);
            let err = actual - f64::from(*predicted);
            abs_sum += err.abs();
            sq_sum += err * err;
            if actual != 0.0 {
                pct_sum += (err / actual).abs();
                pct_count += 1;
            }
        }

        Ok(Evaluation {
            method,
            mae: abs_sum / n,
            rmse: (sq_sum / n).sqrt(),
            mape: if pct_count == 0 {
                0.0
            } else {
                pct_sum / pct_count as f64 * 100.0
            },
        })
    }

    fn predict(&self, method: ForecastMethod, dates: &[NaiveDate], window: usize) -> Vec<u32> {
        match method {
            ForecastMethod::LastWeekPattern => {
                let tail = &self.history[self.history.len().saturating_sub(7)..];
                (0..dates.len())
                    .map(|i| tail[i % tail.len()].load_units)
                    .collect()
            }
            ForecastMethod::MovingAverage => {
                let value = at_least_one(self.moving_average(window));
                vec![value; dates.len()]
            }
            ForecastMethod::SeasonalMovingAverage => {
                let base = self.moving_average(window);
                let overall = self.mean();
                let weekly = self.weekday_means();
                dates
                    .iter()
                    .map(|d| {
                        let multiplier = match weekly[weekday_index(*d)] {
                            Some(day_mean) if overall > 0.0 => day_mean / overall,
                            _ => 1.0,
                        };
                        at_least_one(base * multiplier)
                    })
                    .collect()
            }
            ForecastMethod::DayOfWeekAverage => {
                let overall = self.mean();
                let weekly = self.weekday_means();
                dates
                    .iter()
                    .map(|d| at_least_one(weekly[weekday_index(*d)].unwrap_or(overall)))
                    .collect()
            }
            ForecastMethod::SimpleAverage => {
                let value = at_least_one(self.mean());
                vec![value; dates.len()]
            }
        }
    }

    fn mean(&self) -> f64 {
        mean_of(&self.history)
    }

    fn moving_average(&self, window: usize) -> f64 {
        let window = window.max(1);
        mean_of(&self.history[self.history.len().saturating_sub(window)..])
    }

    /// Moyenne par jour de semaine (lundi = 0) ; `None` si jamais observé.
    fn weekday_means(&self) -> [Option<f64>; 7] {
        let mut sums = [0.0f64; 7];
        let mut counts = [0usize; 7];
        for r in &self.history {
            let idx = weekday_index(r.date);
            sums[idx] += f64::from(r.load_units);
            counts[idx] += 1;
        }
        let mut out = [None; 7];
        for idx in 0..7 {
            if counts[idx] > 0 {
                out[idx] = Some(sums[idx] / counts[idx] as f64);
            }
        }
        out
    }
}

fn mean_of(records: &[LoadRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records.iter().map(|r| f64::from(r.load_units)).sum::<f64>() / records.len() as f64
}

fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

/// Arrondi au pair le plus proche, jamais moins d'une personne.
fn at_least_one(value: f64) -> u32 {
    let rounded = value.round_ties_even();
    if rounded < 1.0 {
        1
    } else {
        rounded as u32
    }
}
