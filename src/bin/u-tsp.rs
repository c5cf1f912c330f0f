//! Swap-search TSP command-line tool.
//!
//! Generates (or loads) a city set, prints it as an ASCII map, optimizes the
//! tour and prints the result.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use env_logger::{Builder, Target};
use log::{info, LevelFilter};

use u_tsp::instance::{seeded_cities, InstanceBounds, MAX_CITIES};
use u_tsp::local_search::{optimize_with, CostEvaluation, SearchStrategy, SwapSearchConfig};
use u_tsp::models::City;
use u_tsp::render::AsciiMap;
use u_tsp::{Result, TspError};

#[derive(Parser)]
#[command(name = "u-tsp")]
#[command(about = "Pairwise-swap local search for random Euclidean TSP instances")]
#[command(version)]
struct Cli {
    /// Number of random cities (2..=1000). Ignored with --input.
    #[arg(required_unless_present = "input")]
    cities: Option<usize>,

    /// Load cities from a JSON array of {"x": .., "y": ..} objects
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Random seed (defaults to the current time)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Map width in cells
    #[arg(long, default_value = "70")]
    width: u32,

    /// Map height in cells
    #[arg(long, default_value = "40")]
    height: u32,

    /// Swap acceptance strategy
    #[arg(long, value_enum, default_value = "first")]
    strategy: StrategyArg,

    /// Candidate cost evaluation
    #[arg(long, value_enum, default_value = "full")]
    evaluation: EvaluationArg,

    /// Stop after this many sweeps (0 = until convergence)
    #[arg(long, default_value = "0")]
    max_sweeps: usize,

    /// Pause after drawing the initial map, in milliseconds
    #[arg(long, default_value = "1000")]
    delay_ms: u64,

    /// Skip the ASCII maps
    #[arg(long)]
    no_map: bool,

    /// Print the result as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log level
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevelArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    First,
    Best,
}

impl From<StrategyArg> for SearchStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::First => SearchStrategy::FirstImprovement,
            StrategyArg::Best => SearchStrategy::BestImprovement,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum EvaluationArg {
    Full,
    Incremental,
}

impl From<EvaluationArg> for CostEvaluation {
    fn from(arg: EvaluationArg) -> Self {
        match arg {
            EvaluationArg::Full => CostEvaluation::Full,
            EvaluationArg::Incremental => CostEvaluation::Incremental,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    fn to_filter(self) -> LevelFilter {
        match self {
            LogLevelArg::Off => LevelFilter::Off,
            LogLevelArg::Error => LevelFilter::Error,
            LogLevelArg::Warn => LevelFilter::Warn,
            LogLevelArg::Info => LevelFilter::Info,
            LogLevelArg::Debug => LevelFilter::Debug,
            LogLevelArg::Trace => LevelFilter::Trace,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    init_logger(cli.log_level.to_filter())?;

    let cities = match &cli.input {
        Some(path) => load_cities(path)?,
        None => generate(cli)?,
    };
    info!("loaded {} cities", cities.len());

    let config = SwapSearchConfig::default()
        .with_strategy(cli.strategy.into())
        .with_evaluation(cli.evaluation.into())
        .with_max_sweeps(cli.max_sweeps);

    let map = AsciiMap::new(cli.width as usize, cli.height as usize);
    let show_map = !cli.no_map && !cli.json;

    let mut stdout = std::io::stdout().lock();
    if show_map {
        write_out(&mut stdout, &map.render(&cities, None))?;
        thread::sleep(Duration::from_millis(cli.delay_ms));
    }

    let result = optimize_with(&cities, &config)?;

    if cli.json {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| TspError::InvalidArgument(format!("cannot encode result: {e}")))?;
        write_out(&mut stdout, &format!("{json}\n"))?;
    } else {
        write_out(
            &mut stdout,
            &format!("total distance = {:.6}\n", result.total_length),
        )?;
        if show_map {
            write_out(&mut stdout, &map.render(&cities, Some(&result.tour)))?;
        }
    }

    Ok(())
}

fn generate(cli: &Cli) -> Result<Vec<City>> {
    let n = cli.cities.unwrap_or_default();
    if !(2..=MAX_CITIES).contains(&n) {
        return Err(TspError::InvalidArgument(format!(
            "number of cities must be in 2..={MAX_CITIES}, got {n}"
        )));
    }
    let seed = cli.seed.unwrap_or_else(time_seed);
    info!("generating {n} cities with seed {seed}");
    seeded_cities(n, &InstanceBounds::new(cli.width, cli.height), seed)
}

fn load_cities(path: &Path) -> Result<Vec<City>> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text)
        .map_err(|e| TspError::InvalidArgument(format!("cannot parse {}: {e}", path.display())))
}

fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn write_out(out: &mut impl Write, text: &str) -> Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

fn init_logger(level: LevelFilter) -> Result<()> {
    Builder::new()
        .filter_level(level)
        .write_style(env_logger::WriteStyle::Never)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {} [{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(Target::Stderr)
        .try_init()
        .map_err(|e| TspError::InvalidArgument(format!("logger init failed: {e}")))
}
