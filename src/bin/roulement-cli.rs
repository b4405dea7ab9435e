#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use roulement::{
    forecast::{ForecastMethod, ForecastOptions, Forecaster},
    io,
    report::{SummaryRenderer, TextSummary},
    scheduler::Scheduler,
    storage::{JsonStorage, Storage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI d'affectation quotidienne du personnel (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON des compteurs (jours travaillés, repos)
    #[arg(long, global = true, default_value = "state.json")]
    state: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Prévoir les besoins à partir d'un historique de charge
    Forecast {
        /// CSV `date,load_units`
        #[arg(long)]
        history: String,
        #[arg(long, default_value_t = 7)]
        days: u32,
        #[arg(long, default_value = "last_week_pattern")]
        method: String,
        #[arg(long, default_value_t = 7)]
        window: usize,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Affecter le personnel sur un horizon
    Assign {
        /// CSV `employee_id,name,holidays`
        #[arg(long)]
        staff: String,
        /// CSV `date,people_required[,day_name]`
        #[arg(long, conflicts_with = "history")]
        requests: Option<String>,
        /// CSV `date,load_units` (prévision puis affectation)
        #[arg(long)]
        history: Option<String>,
        #[arg(long, default_value_t = 7)]
        days: u32,
        #[arg(long, default_value = "last_week_pattern")]
        method: String,
        #[arg(long, default_value_t = 7)]
        window: usize,
        /// Repartir de compteurs à zéro
        #[arg(long)]
        reset: bool,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Affecter une seule journée
    Day {
        #[arg(long)]
        staff: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        #[arg(long, allow_negative_numbers = true)]
        required: i64,
        #[arg(long)]
        label: Option<String>,
    },

    /// Lister les congés qui tombent sur des dates données
    Holidays {
        #[arg(long)]
        staff: String,
        /// YYYY-MM-DD (répétable)
        #[arg(long = "date", required = true)]
        dates: Vec<NaiveDate>,
    },

    /// Afficher les compteurs sauvegardés
    State,

    /// Remettre les compteurs à zéro (nouvel horizon)
    Reset {
        #[arg(long)]
        staff: String,
    },

    /// Résumé du personnel et de sa charge
    Info {
        #[arg(long)]
        staff: String,
    },

    /// Évaluer les méthodes de prévision sur une période de test
    Evaluate {
        #[arg(long)]
        history: String,
        /// CSV `date,load_units` des valeurs réelles
        #[arg(long)]
        test: String,
        /// Toutes les méthodes si absent
        #[arg(long)]
        method: Option<String>,
        #[arg(long, default_value_t = 7)]
        window: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.state)?;

    let code = match cli.cmd {
        Commands::Forecast {
            history,
            days,
            method,
            window,
            out_csv,
        } => {
            let forecaster = Forecaster::new(io::import_load_csv(history)?)?;
            let opts = ForecastOptions {
                method: method.parse()?,
                days,
                window,
            };
            let forecast = forecaster.forecast(&opts);
            if let Some(path) = out_csv {
                io::export_forecast_csv(path, &forecast)?;
            }
            println!("method: {}", forecast.method);
            for r in &forecast.requests {
                println!("{} ({}): {} people", r.date, r.label(), r.required);
            }
            0
        }
        Commands::Assign {
            staff,
            requests,
            history,
            days,
            method,
            window,
            reset,
            out_json,
            out_csv,
        } => {
            let requests = match (requests, history) {
                (Some(path), _) => io::import_requests_csv(path)?,
                (None, Some(path)) => {
                    let forecaster = Forecaster::new(io::import_load_csv(path)?)?;
                    let opts = ForecastOptions {
                        method: method.parse()?,
                        days,
                        window,
                    };
                    forecaster.forecast(&opts).requests
                }
                (None, None) => bail!("either --requests or --history is required"),
            };

            let mut scheduler = open_scheduler(&staff, &storage)?;
            if reset {
                scheduler.reset_state();
            }
            let result = scheduler.assign_horizon(&requests)?;

            print!("{}", TextSummary.render(&result));
            if let Some(path) = out_json {
                io::export_result_json(path, &result)?;
            }
            if let Some(path) = out_csv {
                io::export_assignments_csv(path, &result.assignments)?;
            }
            storage.save(&scheduler.get_state())?;

            // Code 2 = manque de personnel sur au moins un jour
            if result.summary.total_shortage > 0 {
                2
            } else {
                0
            }
        }
        Commands::Day {
            staff,
            date,
            required,
            label,
        } => {
            let mut scheduler = open_scheduler(&staff, &storage)?;
            let a = scheduler.assign_day(date, required, label.as_deref())?;
            println!(
                "{} ({}): {}/{} - {} [{}]",
                a.date,
                a.day_label,
                a.assigned_count,
                a.required,
                if a.overtime { "OVERTIME" } else { "normal" },
                a.selected.join(", ")
            );
            storage.save(&scheduler.get_state())?;
            if a.shortage > 0 {
                eprintln!("short by {} person(s)", a.shortage);
                2
            } else {
                0
            }
        }
        Commands::Holidays { staff, dates } => {
            let scheduler = Scheduler::new(io::import_staff_csv(staff)?)?;
            let conflicts = scheduler.holiday_conflicts(&dates);
            if conflicts.is_empty() {
                println!("OK: no holiday conflicts");
            }
            for (date, names) in &conflicts {
                println!("{date}: {}", names.join(", "));
            }
            0
        }
        Commands::State => {
            let snapshot = if storage.exists() {
                storage.load()?
            } else {
                Default::default()
            };
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            0
        }
        Commands::Reset { staff } => {
            let mut scheduler = Scheduler::new(io::import_staff_csv(staff)?)?;
            scheduler.reset_state();
            storage.save(&scheduler.get_state())?;
            println!("state reset: {}", storage.path().display());
            0
        }
        Commands::Info { staff } => {
            let scheduler = open_scheduler(&staff, &storage)?;
            let info = scheduler.staff_info()?;
            println!("total staff: {}", info.total_staff);
            for entry in &info.current_workload {
                let rest = if info.worked_yesterday.contains(&entry.name) {
                    " (worked last day)"
                } else {
                    ""
                };
                println!("  {}: {} days{}", entry.name, entry.workdays, rest);
            }
            0
        }
        Commands::Evaluate {
            history,
            test,
            method,
            window,
        } => {
            let forecaster = Forecaster::new(io::import_load_csv(history)?)?;
            let actuals = io::import_load_csv(test)?;
            let methods = match method {
                Some(m) => vec![m.parse::<ForecastMethod>()?],
                None => ForecastMethod::ALL.to_vec(),
            };
            for m in methods {
                let e = forecaster.evaluate(m, &actuals, window)?;
                println!(
                    "{}: mae={:.2} rmse={:.2} mape={:.1}%",
                    e.method, e.mae, e.rmse, e.mape
                );
            }
            0
        }
    };

    std::process::exit(code);
}

/// Construit le scheduler et recharge les compteurs sauvegardés s'il y en a.
fn open_scheduler(staff: &str, storage: &JsonStorage) -> Result<Scheduler> {
    let mut scheduler = Scheduler::new(io::import_staff_csv(staff)?)?;
    if storage.exists() {
        scheduler.load_state(&storage.load()?)?;
    }
    Ok(scheduler)
}
