mod config;
mod session;

use anyhow::Context;
use chess_engine::Position;
use clap::Parser;
use config::Config;
use session::Session;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Play chess in the terminal against people or move policies")]
struct Cli {
    /// Session configuration file
    #[arg(short, long, default_value = "chess.toml")]
    config: PathBuf,
    /// Starting position as FEN (a bare piece placement is accepted)
    #[arg(long)]
    fen: Option<String>,
    /// Log engine activity to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    let position = match &cli.fen {
        Some(fen) => Position::from_fen(fen).with_context(|| format!("parsing FEN '{}'", fen))?,
        None => Position::startpos(),
    };

    tracing::info!(
        white = ?config.players.white,
        black = ?config.players.black,
        fen = %position.to_fen(),
        "starting session"
    );

    let mut session = Session::new(position, config);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    session.run(stdin.lock(), &mut stdout)?;

    tracing::info!(
        plies = session.position().ply(),
        fen = %session.position().to_fen(),
        "session ended"
    );
    Ok(())
}
