use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use thidua::model::Snapshot;

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum RankingFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum TrendFormat {
    #[default]
    Table,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum ListFormat {
    #[default]
    Table,
    Tsv,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank all classes by total points (default if no subcommand)
    Ranking {
        /// Only count entries recorded for this week id
        #[arg(short, long)]
        week: Option<String>,

        #[arg(short, long, value_enum, default_value_t)]
        format: RankingFormat,
    },
    /// Cumulative weekly totals for the top-ranked classes
    Trend {
        /// Number of classes to chart (overrides engine.top_n)
        #[arg(short, long)]
        top: Option<usize>,

        #[arg(short, long, value_enum, default_value_t)]
        format: TrendFormat,
    },
    /// Class and entry counts, top three classes, latest entries
    Summary,
    /// List the class roster (id, name, grade)
    Classes {
        #[arg(short, long, value_enum, default_value_t)]
        format: ListFormat,
    },
    /// List the fault catalog (id, name, signed point)
    Faults {
        #[arg(short, long, value_enum, default_value_t)]
        format: ListFormat,
    },
    /// Validate config and snapshot without ranking
    Check,
}

#[derive(Parser, Debug)]
#[command(name = "thidua")]
#[command(about = "Class standings from merit and demerit points", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/thidua/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to a JSON snapshot (overrides `snapshot` in the config file)
    #[arg(short, long, global = true)]
    data: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Ranking {
        week: None,
        format: RankingFormat::Table,
    });
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match thidua::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let engine = config.effective_engine();
    if let Err(errors) = thidua::scoring::validate_engine(&engine) {
        eprintln!("Engine config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if cli.verbose {
        eprintln!(
            "Engine: base score {}, top {}",
            engine.base_score(),
            engine.top_n()
        );
    }

    // Load snapshot
    let data_path = cli.data.map(PathBuf::from).or(config.snapshot);
    let snapshot = match data_path {
        Some(path) => match thidua::model::load_snapshot(&path) {
            Ok(s) => {
                if cli.verbose {
                    eprintln!("Loaded snapshot from {}", path.display());
                }
                s
            }
            Err(e) => {
                eprintln!("Snapshot error: {:#}", e);
                std::process::exit(EXIT_DATA);
            }
        },
        None => {
            if cli.verbose {
                eprintln!("No snapshot configured, using the seed roster");
            }
            Snapshot::seed()
        }
    };

    if cli.verbose {
        eprintln!(
            "  {} classes, {} weeks, {} faults, {} entries",
            snapshot.classes.len(),
            snapshot.weeks.len(),
            snapshot.faults.len(),
            snapshot.entries.len()
        );
    }

    let warnings = thidua::scoring::validate_snapshot(&snapshot);
    if cli.verbose && !matches!(command, Commands::Check) {
        for warning in &warnings {
            eprintln!("  warning: {}", warning);
        }
    }

    let use_colors = thidua::output::should_use_colors();

    match command {
        Commands::Ranking { week, format } => {
            let week_entries;
            let entries = match week {
                Some(ref week_id) => {
                    if !snapshot.weeks.iter().any(|w| &w.id == week_id) {
                        eprintln!("Unknown week '{}'", week_id);
                        std::process::exit(EXIT_DATA);
                    }
                    week_entries = snapshot.entries_for_week(week_id);
                    if cli.verbose {
                        eprintln!("Week {}: {} entries", week_id, week_entries.len());
                    }
                    &week_entries[..]
                }
                None => &snapshot.entries[..],
            };

            let rows = thidua::scoring::aggregate(&snapshot.classes, entries, &engine);

            match format {
                RankingFormat::Table => println!(
                    "{}",
                    thidua::output::format_ranking_table(&rows, engine.base_score(), use_colors)
                ),
                RankingFormat::Tsv => println!(
                    "{}",
                    thidua::output::format_ranking_tsv(&rows, engine.base_score())
                ),
                RankingFormat::Json => print_json(&rows),
            }
        }
        Commands::Trend { top, format } => {
            let top_n = top.unwrap_or_else(|| engine.top_n());
            if top_n == 0 {
                eprintln!("--top must be at least 1");
                std::process::exit(EXIT_CONFIG);
            }

            let weeks = thidua::scoring::order_weeks(&snapshot.weeks);
            let rows = thidua::scoring::aggregate(&snapshot.classes, &snapshot.entries, &engine);
            let charted = thidua::scoring::top_classes(&rows, top_n);
            let series =
                thidua::scoring::build_series(&charted, &weeks, &snapshot.entries, &engine);

            if cli.verbose {
                eprintln!(
                    "Charting {} classes over {} weeks",
                    charted.len(),
                    series.len()
                );
            }

            match format {
                TrendFormat::Table => {
                    println!("{}", thidua::output::format_trend_table(&series, use_colors))
                }
                TrendFormat::Json => print_json(&series),
            }
        }
        Commands::Summary => {
            let rows = thidua::scoring::aggregate(&snapshot.classes, &snapshot.entries, &engine);
            println!(
                "{}",
                thidua::output::format_summary(&snapshot, &rows, engine.base_score(), use_colors)
            );
        }
        Commands::Classes { format } => match format {
            ListFormat::Table => println!(
                "{}",
                thidua::output::format_roster(&snapshot.classes, use_colors)
            ),
            ListFormat::Tsv => println!("{}", thidua::output::format_roster_tsv(&snapshot.classes)),
        },
        Commands::Faults { format } => match format {
            ListFormat::Table => println!(
                "{}",
                thidua::output::format_faults(&snapshot.faults, use_colors)
            ),
            ListFormat::Tsv => println!("{}", thidua::output::format_faults_tsv(&snapshot.faults)),
        },
        Commands::Check => {
            if warnings.is_empty() {
                println!(
                    "Snapshot OK: {} classes, {} weeks, {} entries",
                    snapshot.classes.len(),
                    snapshot.weeks.len(),
                    snapshot.entries.len()
                );
            } else {
                eprintln!("Snapshot warnings:");
                for warning in &warnings {
                    eprintln!("  - {}", warning);
                }
                std::process::exit(EXIT_DATA);
            }
        }
    }

    if cli.verbose {
        eprintln!("Done in {:?}", start_time.elapsed());
    }

    std::process::exit(EXIT_SUCCESS);
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            std::process::exit(EXIT_DATA);
        }
    }
}
