#![forbid(unsafe_code)]
use chrono::{Duration, NaiveDate};
use roulement::{ForecastMethod, ForecastOptions, Forecaster, LoadRecord, SchedError};

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

fn records(start: NaiveDate, values: &[u32]) -> Vec<LoadRecord> {
    values
        .iter()
        .enumerate()
        .map(|(i, &load_units)| LoadRecord {
            date: start + Duration::days(i as i64),
            load_units,
        })
        .collect()
}

/// Deux semaines complètes, du lundi 6 au dimanche 19 janvier.
fn two_weeks() -> Forecaster {
    let mut history = records(monday(), &[4, 5, 6, 7, 8, 3, 2, 5, 6, 7, 8, 9, 4, 3]);
    history.reverse();
    Forecaster::new(history).unwrap()
}

fn predicted(method: ForecastMethod) -> Vec<u32> {
    let opts = ForecastOptions {
        method,
        ..ForecastOptions::default()
    };
    two_weeks()
        .forecast(&opts)
        .requests
        .iter()
        .map(|r| r.required)
        .collect()
}

#[test]
fn forecast_starts_the_day_after_history() {
    let forecast = two_weeks().forecast(&ForecastOptions::default());
    assert_eq!(forecast.method, ForecastMethod::LastWeekPattern);
    assert_eq!(forecast.requests.len(), 7);

    let first = &forecast.requests[0];
    assert_eq!(first.date, NaiveDate::from_ymd_opt(2025, 1, 20).unwrap());
    assert_eq!(first.label(), "Monday");
    assert_eq!(forecast.requests[6].label(), "Sunday");
}

#[test]
fn last_week_pattern_replays_and_cycles() {
    assert_eq!(
        predicted(ForecastMethod::LastWeekPattern),
        [5, 6, 7, 8, 9, 4, 3]
    );

    let opts = ForecastOptions {
        days: 9,
        ..ForecastOptions::default()
    };
    let longer: Vec<u32> = two_weeks()
        .forecast(&opts)
        .requests
        .iter()
        .map(|r| r.required)
        .collect();
    assert_eq!(longer, [5, 6, 7, 8, 9, 4, 3, 5, 6]);
}

#[test]
fn averages_use_half_to_even_rounding() {
    assert_eq!(predicted(ForecastMethod::MovingAverage), [6; 7]);
    assert_eq!(predicted(ForecastMethod::SimpleAverage), [6; 7]);
    assert_eq!(
        predicted(ForecastMethod::DayOfWeekAverage),
        [4, 6, 6, 8, 8, 4, 2]
    );
    assert_eq!(
        predicted(ForecastMethod::SeasonalMovingAverage),
        [5, 6, 7, 8, 9, 4, 3]
    );

    let short = Forecaster::new(records(monday(), &[2, 3])).unwrap();
    let opts = ForecastOptions {
        method: ForecastMethod::SimpleAverage,
        days: 1,
        window: 7,
    };
    assert_eq!(short.forecast(&opts).requests[0].required, 2);
}

#[test]
fn averages_never_go_below_one_person() {
    let quiet = Forecaster::new(records(monday(), &[0, 0, 0])).unwrap();
    for method in [
        ForecastMethod::MovingAverage,
        ForecastMethod::SeasonalMovingAverage,
        ForecastMethod::DayOfWeekAverage,
        ForecastMethod::SimpleAverage,
    ] {
        let opts = ForecastOptions {
            method,
            days: 3,
            window: 7,
        };
        assert!(quiet.forecast(&opts).requests.iter().all(|r| r.required == 1));
    }
}

#[test]
fn method_names_parse_and_reject_unknown() {
    for method in ForecastMethod::ALL {
        assert_eq!(method.to_string().parse::<ForecastMethod>().unwrap(), method);
    }
    let err = "arima".parse::<ForecastMethod>().unwrap_err();
    assert!(matches!(err, SchedError::UnknownMethod(ref m) if m == "arima"));
}

#[test]
fn empty_history_is_refused() {
    let err = Forecaster::new(Vec::new()).unwrap_err();
    assert!(matches!(err, SchedError::InsufficientHistory { got: 0, .. }));
}

#[test]
fn evaluation_scores_against_actuals() {
    let next_week = records(
        NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
        &[5, 6, 7, 8, 9, 4, 3],
    );
    let f = two_weeks();

    let exact = f
        .evaluate(ForecastMethod::LastWeekPattern, &next_week, 7)
        .unwrap();
    assert_eq!(exact.mae, 0.0);
    assert_eq!(exact.rmse, 0.0);
    assert_eq!(exact.mape, 0.0);

    // prévision constante 6 : erreurs -1,0,1,2,3,-2,-3
    let flat = f
        .evaluate(ForecastMethod::SimpleAverage, &next_week, 7)
        .unwrap();
    assert!((flat.mae - 12.0 / 7.0).abs() < 1e-9);
    assert!((flat.rmse - (28.0f64 / 7.0).sqrt()).abs() < 1e-9);

    assert!(f.evaluate(ForecastMethod::SimpleAverage, &[], 7).is_err());
}

/// Lundi → vendredi seulement : samedi et dimanche jamais observés.
fn weekdays_only() -> Forecaster {
    Forecaster::new(records(monday(), &[4, 6, 8, 10, 2])).unwrap()
}

#[test]
fn unobserved_weekday_falls_back_to_overall_mean() {
    // moyenne globale 30 / 5 = 6 ; prévision sam., dim., lun.
    let opts = ForecastOptions {
        method: ForecastMethod::DayOfWeekAverage,
        days: 3,
        window: 7,
    };
    let got: Vec<u32> = weekdays_only()
        .forecast(&opts)
        .requests
        .iter()
        .map(|r| r.required)
        .collect();
    assert_eq!(got, [6, 6, 4]);
}

#[test]
fn unobserved_weekday_keeps_seasonal_base() {
    // base sur une fenêtre d'un jour = 2 ; lundi : 2 * 4 / 6 ≈ 1.33
    let opts = ForecastOptions {
        method: ForecastMethod::SeasonalMovingAverage,
        days: 3,
        window: 1,
    };
    let requests = weekdays_only().forecast(&opts).requests;
    assert_eq!(requests[0].label(), "Saturday");
    let got: Vec<u32> = requests.iter().map(|r| r.required).collect();
    assert_eq!(got, [2, 2, 1]);
}

#[test]
fn mape_ignores_zero_actuals() {
    // prévision constante 6 ; le jour à 0 compte dans la MAE, pas dans la MAPE
    let actuals = records(NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(), &[0, 3, 12]);
    let e = two_weeks()
        .evaluate(ForecastMethod::SimpleAverage, &actuals, 7)
        .unwrap();
    assert!((e.mae - 5.0).abs() < 1e-9);
    assert!((e.mape - 75.0).abs() < 1e-9);
    assert!(e.mape.is_finite());
}
