//! Terminal front end for the twenty48 puzzle.

use std::io;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod input;
mod session;
mod settings;
mod store;

use session::Session;
use settings::Settings;
use store::SaveFile;

fn main() -> anyhow::Result<()> {
    // Initialize tracing; logs go to stderr so they never interleave with the board
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let settings = Settings::from_env()?;
    info!(
        "Starting twenty48 (win at {}, {} undo steps, save file {})",
        settings.game.win_threshold,
        settings.game.history_limit,
        settings.save_path.display()
    );

    let store = SaveFile::new(settings.save_path);
    let game = store.load(settings.game)?;

    let mut session = Session::new(game, Some(store));
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    session.run(stdin.lock(), &mut stdout)?;

    info!("Saved, bye");
    Ok(())
}
