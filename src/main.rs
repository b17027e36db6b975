use anyhow::Context;
use clap::Parser;
use crossover_sim::backtest::BacktestRunner;
use crossover_sim::SimulationConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Backtest a moving-average crossover rule on a synthetic random-walk price series
#[derive(Parser, Debug)]
#[command(name = "crossover-sim")]
#[command(version)]
struct Args {
    /// TOML file with simulation settings
    #[arg(long, env = "CROSSOVER_CONFIG")]
    config: Option<PathBuf>,

    /// Number of simulated trading days
    #[arg(long)]
    days: Option<usize>,

    /// Short moving average window
    #[arg(long)]
    short_window: Option<usize>,

    /// Long moving average window
    #[arg(long)]
    long_window: Option<usize>,

    /// Starting cash
    #[arg(long)]
    cash: Option<f64>,

    /// Seed for a reproducible price series
    #[arg(long)]
    seed: Option<u64>,

    /// First price of the random walk
    #[arg(long)]
    start_price: Option<f64>,

    /// Standard deviation of the daily price step
    #[arg(long)]
    step_std_dev: Option<f64>,

    /// Lowest price the walk may reach
    #[arg(long)]
    floor: Option<f64>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

impl Args {
    /// Command-line flags take precedence over file and environment settings
    fn apply(&self, config: &mut SimulationConfig) {
        if let Some(days) = self.days {
            config.days = days;
        }
        if let Some(short_window) = self.short_window {
            config.short_window = short_window;
        }
        if let Some(long_window) = self.long_window {
            config.long_window = long_window;
        }
        if let Some(cash) = self.cash {
            config.starting_cash = cash;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(start_price) = self.start_price {
            config.walk.start_price = start_price;
        }
        if let Some(step_std_dev) = self.step_std_dev {
            config.walk.step_std_dev = step_std_dev;
        }
        if let Some(floor) = self.floor {
            config.walk.floor = floor;
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();

    let args = Args::parse();

    let mut config = SimulationConfig::load(args.config.as_deref())
        .context("Failed to read simulation settings")?;
    args.apply(&mut config);

    let runner = BacktestRunner::new(config).context("Invalid simulation settings")?;

    let config = runner.config();
    tracing::info!(
        "Configuration: {} days, {}/{} SMA, cash ${:.2}, seed {:?}",
        config.days,
        config.short_window,
        config.long_window,
        config.starting_cash,
        config.seed
    );

    let (_, report) = runner.simulate()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print_report();
    }

    Ok(())
}

fn setup_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crossover_sim=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
