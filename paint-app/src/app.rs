//! Command implementations shared by the binary and its tests.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use paint_core::{ConsultationRelay, FullEstimate, PricingTable};
use paint_data::PriceSheetLoader;
use paint_gemini::{GeminiClient, GeminiConfig};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::form_args::FormArgs;
use crate::settings::SettingsStore;
use crate::state::{AppState, ChatTranscript, GREETING};

/// Typed at the chat prompt to leave the session.
pub const QUIT_COMMAND: &str = "/quit";

/// Opens the settings store at `path`, or at the platform default.
pub fn open_store(path: Option<PathBuf>) -> Result<SettingsStore> {
    match path {
        Some(path) => Ok(SettingsStore::new(path)),
        None => SettingsStore::at_default_location().context("cannot locate settings file"),
    }
}

/// Factory prices, overridden by the pricing sheet at `path` if given.
pub fn load_prices(path: Option<&Path>) -> Result<PricingTable> {
    let Some(path) = path else {
        return Ok(PricingTable::default());
    };

    let file = File::open(path)
        .with_context(|| format!("cannot open pricing sheet '{}'", path.display()))?;
    let prices = PriceSheetLoader::load(file)
        .with_context(|| format!("invalid pricing sheet '{}'", path.display()))?;

    info!(path = %path.display(), "loaded pricing sheet");
    Ok(prices)
}

/// Loads the stored form, applies `overrides` and computes the estimate.
pub fn build_state(
    store: &SettingsStore,
    overrides: &FormArgs,
    prices: PricingTable,
) -> Result<AppState> {
    let mut state =
        AppState::new(store.load(), prices).context("stored settings cannot be estimated")?;
    state
        .update(|form| overrides.apply(form))
        .context("cannot estimate with the given values")?;
    Ok(state)
}

/// Relay backed by the Gemini API, configured from the environment.
pub fn build_relay() -> Result<ConsultationRelay> {
    let config = GeminiConfig::from_env().context("consultation is not configured")?;
    debug!(base_url = %config.base_url, model = %config.model, "consultation backend ready");
    Ok(ConsultationRelay::new(Box::new(GeminiClient::new(config))))
}

/// Interactive consultation loop.
///
/// Reads one question per line from `input` until end of input or
/// [`QUIT_COMMAND`]; blank lines are skipped. Each answer is written to
/// `out`. Returns the full transcript.
pub async fn run_chat<R, W>(
    relay: &ConsultationRelay,
    estimate: Option<&FullEstimate>,
    input: R,
    out: &mut W,
) -> Result<ChatTranscript>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut transcript = ChatTranscript::new();
    writeln!(out, "AI: {GREETING}")?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim() == QUIT_COMMAND {
            break;
        }
        if let Some(reply) = transcript.ask(relay, &line, estimate).await {
            writeln!(out, "AI: {reply}")?;
        }
    }

    writeln!(out)?;
    Ok(transcript)
}
