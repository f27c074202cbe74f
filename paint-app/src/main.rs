use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tokio::io::BufReader;
use tracing::{debug, info};

use paint_app::app::{self, QUIT_COMMAND};
use paint_app::form_args::FormArgs;
use paint_app::logging;
use paint_app::report::{AreaReport, EstimateReport, PriceReport};
use paint_data::{DEFAULT_FILE_NAME, export_to_file, write_price_sheet};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Paint budget estimator for school buildings.
///
/// Computes paintable wall area, paint buckets, labor and scaffolding cost
/// from the building dimensions, and can discuss the result with an AI
/// consultant. The form is remembered between runs.
#[derive(Debug, Parser)]
#[command(name = "school-paint-estimator", version)]
struct Cli {
    /// Log filter, e.g. `debug` or `paint_core=trace`. Overrides RUST_LOG.
    #[arg(long, global = true, value_name = "FILTER")]
    log_level: Option<String>,

    /// Also append logs to this file.
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Hide log output on the console.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Settings file to use instead of the per-user default.
    #[arg(long, global = true, value_name = "FILE")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Pricing sheet option shared by the commands that price work.
#[derive(Debug, Args)]
struct PriceArgs {
    /// CSV pricing sheet (`item,price`) overriding the factory prices.
    #[arg(long, value_name = "FILE")]
    prices: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Update the form, save it and print the area summary and estimate.
    Estimate {
        #[command(flatten)]
        form: FormArgs,

        #[command(flatten)]
        prices: PriceArgs,

        /// Do not save the updated form.
        #[arg(long)]
        no_save: bool,
    },

    /// Write the bill of quantities as CSV.
    Export {
        #[command(flatten)]
        form: FormArgs,

        #[command(flatten)]
        prices: PriceArgs,

        /// Output file.
        #[arg(short, long, default_value = DEFAULT_FILE_NAME)]
        output: PathBuf,
    },

    /// Ask the AI consultant one question about the current estimate.
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,

        #[command(flatten)]
        prices: PriceArgs,
    },

    /// Chat with the AI consultant. Type /quit to leave.
    Chat {
        #[command(flatten)]
        prices: PriceArgs,
    },

    /// Show the effective price table or write it as a pricing sheet.
    Prices {
        #[command(flatten)]
        prices: PriceArgs,

        /// Write the table to this CSV file instead of printing it.
        #[arg(long, value_name = "FILE")]
        write: Option<PathBuf>,
    },

    /// Inspect or reset the saved form.
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Debug, Subcommand)]
enum SettingsAction {
    /// Print the saved form.
    Show,
    /// Delete the saved form.
    Reset,
    /// Print the settings file location.
    Path,
}

// ─── logging ─────────────────────────────────────────────────────────────────

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    logging::init_default_logging();

    if let Some(level) = &cli.log_level {
        logging::set_log_level(level)?;
    }
    if cli.quiet {
        logging::set_console_enabled(false)?;
    }
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let store = app::open_store(cli.settings.clone())?;
    debug!(path = %store.path().display(), "using settings file");

    match cli.command {
        Command::Estimate {
            form,
            prices,
            no_save,
        } => {
            let prices = app::load_prices(prices.prices.as_deref())?;
            let state = app::build_state(&store, &form, prices)?;

            if !no_save {
                store.save(state.form()).context("cannot save settings")?;
            }

            println!(
                "{}",
                AreaReport {
                    areas: state.areas(),
                    include_ceiling: state.form().include_ceiling,
                }
            );
            print!("{}", EstimateReport(state.estimate()));
        }

        Command::Export {
            form,
            prices,
            output,
        } => {
            let prices = app::load_prices(prices.prices.as_deref())?;
            let state = app::build_state(&store, &form, prices)?;

            export_to_file(&output, state.estimate())
                .with_context(|| format!("cannot write '{}'", output.display()))?;
            println!("{}", output.display());
        }

        Command::Ask { question, prices } => {
            let prices = app::load_prices(prices.prices.as_deref())?;
            let state = app::build_state(&store, &FormArgs::default(), prices)?;
            let relay = app::build_relay()?;

            let reply = relay.ask(&question.join(" "), Some(state.estimate())).await;
            println!("{reply}");
        }

        Command::Chat { prices } => {
            let prices = app::load_prices(prices.prices.as_deref())?;
            let state = app::build_state(&store, &FormArgs::default(), prices)?;
            let relay = app::build_relay()?;

            info!("chat started, type {QUIT_COMMAND} to leave");
            let input = BufReader::new(tokio::io::stdin());
            let transcript =
                app::run_chat(&relay, Some(state.estimate()), input, &mut io::stdout()).await?;
            debug!(messages = transcript.messages().len(), "chat ended");
        }

        Command::Prices { prices, write } => {
            let prices = app::load_prices(prices.prices.as_deref())?;

            match write {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("cannot create '{}'", path.display()))?;
                    write_price_sheet(file, &prices)?;
                    println!("{}", path.display());
                }
                None => print!("{}", PriceReport(&prices)),
            }
        }

        Command::Settings { action } => match action {
            SettingsAction::Show => print!("{}", store.load().to_toml_string()?),
            SettingsAction::Reset => {
                store.reset()?;
                println!("settings reset");
            }
            SettingsAction::Path => println!("{}", store.path().display()),
        },
    }

    Ok(())
}
