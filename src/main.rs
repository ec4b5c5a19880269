use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;

use revsim::config::ScenarioConfig;
use revsim::simulation::ExportFormat;
use revsim::ui::cli::drivers::InquireDriver;
use revsim::ui::cli::wizard::run_interactive;
use revsim::ui::report::render_outcome;
use revsim::ui::{Command, Session};

#[derive(Parser, Debug)]
#[command(name = "revsim", version, about = "Monte Carlo revenue estimator")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs one scenario and prints its summary.
    Simulate(SimulateArgs),
    /// Menu-driven session.
    Interactive {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Writes the default scenario file.
    InitConfig { path: PathBuf },
    /// Prints the JSON Schema of scenario files.
    Schema,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    trials: Option<u64>,
    #[arg(long)]
    seed: Option<u64>,
    /// Confidence level of the interval around the mean, in (0, 1).
    #[arg(long)]
    confidence: Option<f64>,
    /// Split the trials over this many parallel chunks.
    #[arg(long)]
    parallel: Option<usize>,
    #[arg(long)]
    export: Option<PathBuf>,
    #[arg(long, default_value = "csv")]
    format: ExportFormat,
    /// Also print the revenue distribution.
    #[arg(long)]
    histogram: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<ScenarioConfig> {
    match path {
        Some(p) => ScenarioConfig::load(p),
        None => Ok(ScenarioConfig::default()),
    }
}

fn simulate(args: SimulateArgs) -> Result<()> {
    let mut config = load_config(args.config.as_ref())?;
    if let Some(trials) = args.trials {
        config.trials = trials;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(level) = args.confidence {
        config.confidence_level = level;
    }

    let request = config.request()?;
    let mut session = Session::new(config.seed, config.summary_options());
    let command = match args.parallel {
        Some(chunks) if chunks > 1 => Command::SimulateParallel { request, chunks },
        _ => Command::Simulate(request),
    };
    println!("{}", render_outcome(&session.dispatch(command)?));

    if args.histogram {
        let outcome = session.dispatch(Command::Histogram {
            bins: config.histogram_bins,
        })?;
        println!("\n{}", render_outcome(&outcome));
    }
    if let Some(path) = args.export {
        let outcome = session.dispatch(Command::Save {
            path,
            format: args.format,
        })?;
        println!("{}", render_outcome(&outcome));
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    debug!("{cli:?}");

    match cli.command {
        Commands::Simulate(args) => simulate(args),
        Commands::Interactive { config, seed } => {
            let config = load_config(config.as_ref())?;
            let mut session = Session::new(seed.or(config.seed), config.summary_options());
            run_interactive(&InquireDriver, &mut session)
        }
        Commands::InitConfig { path } => {
            ScenarioConfig::default().save(&path)?;
            println!("Wrote {}", path.display());
            Ok(())
        }
        Commands::Schema => {
            let schema = serde_json::to_string_pretty(&ScenarioConfig::schema())
                .context("serializing scenario schema")?;
            println!("{schema}");
            Ok(())
        }
    }
}
