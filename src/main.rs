use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use shift_scheduler::config::{make_rng, RunConfig, WebConfig};
use shift_scheduler::display::{print_schedule, write_schedule_to_file};
use shift_scheduler::form::{save_assignments, save_preferences};
use shift_scheduler::parser::{load_preferences, populate_store};
use shift_scheduler::prompt::enter_employees;
use shift_scheduler::schedule::{generate, EmployeeStore};
use shift_scheduler::{logging, web};

#[derive(Parser, Debug)]
#[command(name = "shift-scheduler")]
#[command(version)]
#[command(about = "Assigns employees to weekly shifts from their preferences")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import preferences from a CSV file and generate the schedule
    Run {
        /// CSV file with columns Name, Monday..Sunday and codes M/A/E/N
        #[arg(long, short)]
        input: PathBuf,

        /// Save the rendered schedule to this text file
        #[arg(long)]
        report: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Enter employee preferences interactively, then generate the schedule
    Enter {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Start the web front end
    Web {
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Seed for the coverage pass
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Seed for the coverage pass; the same seed reproduces the same schedule
    #[arg(long)]
    seed: Option<u64>,

    /// Export the preference table to this CSV file
    #[arg(long)]
    save_preferences: Option<PathBuf>,

    /// Export the assigned shifts to this CSV file
    #[arg(long)]
    save_assignments: Option<PathBuf>,
}

fn run(config: RunConfig, mut store: EmployeeStore) -> anyhow::Result<()> {
    let seed = config.seed.unwrap_or_else(rand::random);
    match &config.input {
        Some(path) => info!(seed, input = %path.display(), "generating schedule"),
        None => info!(seed, "generating schedule"),
    }

    let mut rng = make_rng(Some(seed));
    let outcome = generate(&mut store, &mut rng)?;
    print_schedule(&outcome);

    if let Some(path) = &config.report_path {
        write_schedule_to_file(&outcome, path)
            .with_context(|| format!("writing report to {}", path.display()))?;
        println!("Schedule saved to {}", path.display());
    }
    if let Some(path) = &config.preferences_path {
        save_preferences(&store, path)?;
        println!("Preferences saved to {}", path.display());
    }
    if let Some(path) = &config.assignments_path {
        save_assignments(&store, path)?;
        println!("Assignments saved to {}", path.display());
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Run { input, report, output } => {
            let records = load_preferences(&input)?;
            let mut store = EmployeeStore::new();
            populate_store(&mut store, &records)?;
            println!("Loaded {} employees from {}", store.len(), input.display());

            let config = RunConfig {
                input: Some(input),
                seed: output.seed,
                report_path: report,
                preferences_path: output.save_preferences,
                assignments_path: output.save_assignments,
            };
            run(config, store)
        }
        Command::Enter { output } => {
            let stdin = io::stdin();
            let store = enter_employees(&mut stdin.lock(), &mut io::stdout())?;
            let config = RunConfig {
                seed: output.seed,
                preferences_path: output.save_preferences,
                assignments_path: output.save_assignments,
                ..RunConfig::default()
            };
            run(config, store)
        }
        Command::Web { port, seed } => {
            let config = WebConfig {
                port,
                seed,
                ..WebConfig::default()
            }
            .with_env_password();

            println!("Starting web server on port {}...", config.port);
            println!("Access the site at http://localhost:{}", config.port);
            web::start_server(config).await?;
            Ok(())
        }
    }
}
