mod analysis;
mod config;
mod io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use analysis::{run_analysis, AnalysisResult, Optimum, SkippedPoint};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const SCHEMA_VERSION: &str = "1.0.0";

#[derive(Parser, Debug)]
#[command(name = "hesscan")]
#[command(version)]
#[command(about = "Deterministic second-derivative-test classifier for critical points")]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to TOML configuration file (built-in point sets when omitted)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Output path for CSV results
    #[arg(short, long, global = true)]
    out: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the full pipeline and report the global optima
    Run {
        /// Generate a JSON result bundle alongside the report
        #[arg(long)]
        json: bool,
    },
    /// Write the per-candidate classification table as CSV
    Table,
    /// Validate a configuration file
    Validate,
    /// Print version information
    Version,
}

// ============================================================================
// JSON Output Structures
// ============================================================================

#[derive(Serialize)]
struct Manifest {
    schema_version: String,
    solver_version: String,
    timestamp_utc: String,
    platform: String,
    config_hash: String,
    config_snapshot: config::Root,
}

#[derive(Serialize)]
struct Summary {
    candidates: usize,
    local_optima: usize,
    maxima: usize,
    minima: usize,
    saddles: usize,
    skipped: Vec<SkippedPoint>,
    maximum: Option<Optimum>,
    minimum: Option<Optimum>,
    wall_time_ms: f64,
}

#[derive(Serialize)]
struct ResultBundle {
    manifest: Manifest,
    summary: Summary,
}

// ============================================================================
// Helper Functions
// ============================================================================

fn compute_hash(data: &str) -> String {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    let mut hasher = DefaultHasher::new();
    data.hash(&mut hasher);
    data.len().hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let days_since_epoch = now / 86400;
    let secs_today = now % 86400;

    let is_leap = |y: u64| y % 4 == 0 && (y % 100 != 0 || y % 400 == 0);
    let mut year = 1970u64;
    let mut remaining = days_since_epoch;
    loop {
        let days_in_year = if is_leap(year) { 366 } else { 365 };
        if remaining < days_in_year {
            break;
        }
        remaining -= days_in_year;
        year += 1;
    }
    let month_days = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let mut month = 1u64;
    for (i, &days) in month_days.iter().enumerate() {
        let d = if i == 1 && is_leap(year) { 29 } else { days };
        if remaining < d {
            break;
        }
        remaining -= d;
        month += 1;
    }

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        year,
        month,
        remaining + 1,
        secs_today / 3600,
        (secs_today % 3600) / 60,
        secs_today % 60
    )
}

fn create_manifest(cfg: &config::Root, cfg_text: &str) -> Manifest {
    Manifest {
        schema_version: SCHEMA_VERSION.to_string(),
        solver_version: VERSION.to_string(),
        timestamp_utc: get_timestamp(),
        platform: std::env::consts::OS.to_string(),
        config_hash: compute_hash(cfg_text),
        config_snapshot: cfg.clone(),
    }
}

fn create_summary(result: &AnalysisResult, wall_time_ms: f64) -> Summary {
    Summary {
        candidates: result.candidates,
        local_optima: result.classified.maxima.len() + result.classified.minima.len(),
        maxima: result.classified.maxima.len(),
        minima: result.classified.minima.len(),
        saddles: result.classified.saddles,
        skipped: result.classified.skipped.clone(),
        maximum: result.maximum,
        minimum: result.minimum,
        wall_time_ms,
    }
}

/// Load, parse, and validate the config file, or fall back to the
/// built-in point sets. The raw text feeds the manifest hash.
fn load_config(path: Option<&str>) -> Result<(config::Root, String)> {
    match path {
        Some(p) => {
            let text = fs::read_to_string(p)
                .with_context(|| format!("failed to read config: {}", p))?;
            let cfg: config::Root = toml::from_str(&text)
                .with_context(|| format!("failed to parse config: {}", p))?;
            cfg.validate()?;
            Ok((cfg, text))
        }
        None => {
            let cfg = config::Root::builtin();
            let text = toml::to_string(&cfg)?;
            Ok((cfg, text))
        }
    }
}

// ============================================================================
// Run Modes
// ============================================================================

fn run_report(
    cfg: &config::Root,
    cfg_text: &str,
    out_path: Option<&str>,
    json_output: bool,
) -> Result<()> {
    let start = Instant::now();
    let result = run_analysis(
        &cfg.points.x_set,
        &cfg.points.y_set,
        cfg.numerics.degeneracy_tol,
    );
    let wall_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    eprintln!(
        "[hesscan] tested {} candidates: {} maxima, {} minima, {} saddles, {} skipped ({:.1}ms)",
        result.candidates,
        result.classified.maxima.len(),
        result.classified.minima.len(),
        result.classified.saddles,
        result.classified.skipped.len(),
        wall_time_ms
    );

    for skip in &result.classified.skipped {
        eprintln!(
            "[hesscan] skipped {}: {}",
            skip.point,
            skip.class.name()
        );
    }

    match result.maximum {
        Some(max) => {
            println!("The greatest value for the objective function is {}", max.value);
            println!("Achieved at point {}", max.point);
        }
        None => eprintln!("[hesscan] no local maxima among the candidates; maximum not reported"),
    }
    match result.minimum {
        Some(min) => {
            println!("The smallest value for the objective function is {}", min.value);
            println!("Achieved at point {}", min.point);
        }
        None => eprintln!("[hesscan] no local minima among the candidates; minimum not reported"),
    }

    if let Some(out_path) = out_path {
        write_table(cfg, out_path)?;
        eprintln!("[hesscan] CSV table: {}", out_path);
    }

    if json_output {
        let json_path = match out_path {
            Some(p) => p.replace(".csv", ".json"),
            None => "report.json".to_string(),
        };
        let bundle = ResultBundle {
            manifest: create_manifest(cfg, cfg_text),
            summary: create_summary(&result, wall_time_ms),
        };
        let json = serde_json::to_string_pretty(&bundle)?;
        fs::write(&json_path, json)?;
        eprintln!("[hesscan] JSON bundle: {}", json_path);
    }

    Ok(())
}

fn write_table(cfg: &config::Root, out_path: &str) -> Result<()> {
    let candidates = analysis::candidate_points(&cfg.points.x_set, &cfg.points.y_set);

    let mut w = io::CsvWriter::create(out_path, cfg.numerics.degeneracy_tol)?;
    w.write_header()?;
    for (i, &point) in candidates.iter().enumerate() {
        w.write_row(i, point)?;
    }
    w.flush()?;
    Ok(())
}

fn run_table(cfg: &config::Root, out_path: &str) -> Result<()> {
    let start = Instant::now();
    write_table(cfg, out_path)?;
    let wall_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    eprintln!(
        "[hesscan] classification table ({}x{} candidates) written to {} in {:.1}ms",
        cfg.points.x_set.len(),
        cfg.points.y_set.len(),
        out_path,
        wall_time_ms
    );
    Ok(())
}

fn validate_config(cfg_path: &str) -> Result<()> {
    let (cfg, _) = load_config(Some(cfg_path))?;

    eprintln!("[hesscan] config valid: {}", cfg_path);
    eprintln!(
        "  program: {} v{} - {}",
        cfg.program.name, cfg.program.version, cfg.program.module
    );
    eprintln!("  numerics: degeneracy_tol={:e}", cfg.numerics.degeneracy_tol);
    eprintln!(
        "  points: x_set has {} entries, y_set has {} entries ({} candidates)",
        cfg.points.x_set.len(),
        cfg.points.y_set.len(),
        cfg.points.x_set.len() * cfg.points.y_set.len()
    );

    Ok(())
}

fn print_version() {
    eprintln!("hesscan - Deterministic Second-Derivative-Test Classifier");
    eprintln!();
    eprintln!("  Solver Version:  {}", VERSION);
    eprintln!("  Schema Version:  {}", SCHEMA_VERSION);
    eprintln!("  Platform:        {}", std::env::consts::OS);
    eprintln!("  Architecture:    {}", std::env::consts::ARCH);
    eprintln!();
    eprintln!("Objective:");
    eprintln!("  f(x,y) = cos(3pi(x+y))*cos(3pi(x-y)) - x^2 - y^2 + 2(x-y) + 2");
    eprintln!();
    eprintln!("Pipeline:");
    eprintln!("  - Cartesian candidate generation from two coordinate lists");
    eprintln!("  - Diagonal Hessian determinant: det(H) = fxx(x)*fxx(y)");
    eprintln!("  - Second-derivative test: det(H) > 0, sign of fxx decides the class");
    eprintln!("  - Global optimum selection with first-seen tie-break");
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Some(Commands::Version) => {
            print_version();
            Ok(())
        }
        Some(Commands::Validate) => {
            let cfg_path = args.config.context("--config required for validate")?;
            validate_config(&cfg_path)
        }
        Some(Commands::Table) => {
            let (cfg, _) = load_config(args.config.as_deref())?;
            let out_path = args
                .out
                .unwrap_or_else(|| "classification.csv".to_string());

            eprintln!(
                "[hesscan] {} v{} - {}",
                cfg.program.name, cfg.program.version, cfg.program.module
            );
            run_table(&cfg, &out_path)
        }
        Some(Commands::Run { json }) => run(args.config.as_deref(), args.out.as_deref(), json),
        None => run(args.config.as_deref(), args.out.as_deref(), false),
    }
}

fn run(cfg_path: Option<&str>, out_path: Option<&str>, json: bool) -> Result<()> {
    let (cfg, cfg_text) = load_config(cfg_path)?;

    eprintln!(
        "[hesscan] {} v{} - {}",
        cfg.program.name, cfg.program.version, cfg.program.module
    );
    run_report(&cfg, &cfg_text, out_path, json)
}
