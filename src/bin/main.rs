use anyhow::{Context, Result, anyhow};
use lexipad_core::{
    app::{self, AppConfig},
    lexicon::LookupEngine,
    settings::FilterSettings,
    ui::Navigator,
};
use lexipad_hal_linux::{
    input::tokens::TokenInput,
    platform::display::{DisplayHandle, open_panel},
    storage::{font_file::FontFile, sqlite_lexicon::SqliteLexicon},
};
use log::{info, warn};

use config::HostConfig;
use signals::SignalGuard;

#[path = "main/config.rs"]
mod config;
#[path = "main/signals.rs"]
mod signals;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("lexipad {}", env!("CARGO_PKG_VERSION"));

    let config = HostConfig::from_env();
    info!("config: {:?}", config);

    let font = FontFile::load(&config.font_path, config.font_layout)
        .with_context(|| format!("loading font {}", config.font_path.display()))?;
    let store = SqliteLexicon::open(&config.db_path)
        .with_context(|| format!("opening lexicon {}", config.db_path.display()))?;
    let mut navigator = Navigator::new(
        LookupEngine::new(store, FilterSettings::default()),
        &AppConfig::default(),
    );

    let panel = open_panel(&config.pins, st7920::Config::default())
        .context("acquiring panel lines")?;
    let mut display = DisplayHandle::start(panel, config.backlight)
        .map_err(|err| anyhow!("initializing panel: {err:?}"))?;

    let mut input = TokenInput::stdin().context("starting token reader")?;
    let _signals = SignalGuard::install(input.interrupter()).context("installing signal handler")?;

    let glyphs = font.glyphs();
    let outcome = app::run(&mut navigator, &glyphs, &mut input, &mut display);

    if let Err(err) = navigator.close() {
        warn!("lexicon: close failed: {err}");
    }
    display
        .shutdown()
        .map_err(|err| anyhow!("shutting down panel: {err:?}"))?;

    let summary = outcome.map_err(|err| anyhow!("event loop stopped: {err}"))?;
    info!(
        "bye: events={} frames={} words={}",
        summary.events, summary.frames, summary.words_written
    );
    Ok(())
}
