//! Interactive game session over a line-based text stream.

use chess_core::{Color, Move};
use chess_engine::{GameStatus, Position};
use chess_policy::MovePolicy;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

use crate::config::Config;

const HELP: &str = "\
commands:
  e2e4     move a piece (origin then destination; e7e8q also accepted)
  undo     take back your last move
  reset    start again from the initial position
  fen      print the position as FEN
  moves    list the legal moves
  help     show this text
  quit     leave the session";

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move(String),
    Undo,
    Reset,
    Fen,
    Moves,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Command {
        let text = line.trim();
        match text.to_ascii_lowercase().as_str() {
            "" => Command::Empty,
            "undo" | "u" => Command::Undo,
            "reset" => Command::Reset,
            "fen" => Command::Fen,
            "moves" => Command::Moves,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ if Move::parse_squares(text).is_some() => Command::Move(text.to_string()),
            _ => Command::Unknown(text.to_string()),
        }
    }
}

/// Whether the session keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

enum Player {
    Human,
    Computer(Box<dyn MovePolicy>),
}

impl Player {
    fn is_human(&self) -> bool {
        matches!(self, Player::Human)
    }
}

/// A game between two players, humans or policies.
pub struct Session {
    initial: Position,
    position: Position,
    players: [Player; 2],
    config: Config,
}

impl Session {
    /// Creates a session starting from `initial`.
    pub fn new(initial: Position, config: Config) -> Self {
        let seed = config.players.seed;
        let players = Color::ALL.map(|color| {
            match config.players.get(color).policy() {
                Some(kind) => {
                    let side_seed = seed.map(|s| s.wrapping_add(color.index() as u64));
                    Player::Computer(kind.build(side_seed))
                }
                None => Player::Human,
            }
        });
        Session {
            position: initial.clone(),
            initial,
            players,
            config,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Renders the opening board, then handles commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        writeln!(out, "type 'help' for commands")?;
        self.render(out)?;
        self.play_computers(out)?;

        for line in input.lines() {
            if self.handle(&line?, out)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Handles one line of input.
    pub fn handle<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        match Command::parse(line) {
            Command::Move(text) => self.human_move(&text, out)?,
            Command::Undo => self.undo(out)?,
            Command::Reset => {
                self.position = self.initial.clone();
                info!("session reset");
                self.render(out)?;
                self.play_computers(out)?;
            }
            Command::Fen => writeln!(out, "{}", self.position.to_fen())?,
            Command::Moves => self.list_moves(out)?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Empty => {}
            Command::Unknown(text) => writeln!(out, "unknown command: {}", text)?,
        }
        Ok(Flow::Continue)
    }

    fn human_move<W: Write>(&mut self, text: &str, out: &mut W) -> io::Result<()> {
        if self.position.is_game_over() {
            return writeln!(out, "the game is over; 'undo' or 'reset' to continue");
        }
        if !self.current_player().is_human() {
            return writeln!(out, "it is not your turn");
        }

        let found = Move::parse_squares(text)
            .and_then(|(from, to)| self.position.find_move(from, to));
        let Some(m) = found else {
            return writeln!(out, "illegal move: {}", text);
        };

        if let Err(e) = self.position.apply(m) {
            return writeln!(out, "{}", e);
        }
        self.render(out)?;
        self.play_computers(out)
    }

    /// Takes back one ply, and a second one if that leaves a computer to move.
    fn undo<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if self.position.ply() == 0 {
            return writeln!(out, "nothing to undo");
        }

        let mut undone = 0;
        while self.position.ply() > 0 && (undone == 0 || !self.current_player().is_human()) {
            if self.position.undo().is_err() {
                break;
            }
            undone += 1;
            if undone == 2 {
                break;
            }
        }
        debug!(plies = undone, "undo");

        self.render(out)?;
        self.play_computers(out)
    }

    /// Lets computer players move until a human is to move or the game ends.
    fn play_computers<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        while !self.position.is_game_over() {
            if self.position.ply() >= self.config.players.move_limit {
                return writeln!(
                    out,
                    "move limit of {} plies reached",
                    self.config.players.move_limit
                );
            }

            let idx = self.position.side_to_move().index();
            let Player::Computer(policy) = &mut self.players[idx] else {
                return Ok(());
            };
            let Some(m) = policy.choose_move(&mut self.position) else {
                return Ok(());
            };
            writeln!(out, "{} plays {}", policy.name(), m)?;
            if let Err(e) = self.position.apply(m) {
                return writeln!(out, "{}", e);
            }
            self.render(out)?;
        }
        Ok(())
    }

    fn current_player(&self) -> &Player {
        &self.players[self.position.side_to_move().index()]
    }

    fn list_moves<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut moves: Vec<String> = self
            .position
            .legal_moves()
            .as_slice()
            .iter()
            .map(|m| m.to_uci())
            .collect();
        moves.sort();
        writeln!(out, "{}", moves.join(" "))
    }

    fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", self.position.board())?;
        if let Some(m) = self.position.last_move() {
            write!(out, "last move: {}", m)?;
            if let Some(victim) = m.captured() {
                write!(out, ", takes {}", victim)?;
            }
            if let Some(kind) = m.promotion_piece() {
                write!(out, ", promotes to {}", kind)?;
            }
            writeln!(out)?;
        }

        let side = self.position.side_to_move();
        match self.position.status() {
            GameStatus::Normal => writeln!(out, "{} to move", side)?,
            GameStatus::Check => writeln!(out, "{} to move, in check", side)?,
            GameStatus::Checkmate => writeln!(out, "checkmate, {} wins", side.opposite())?,
            GameStatus::Stalemate => writeln!(out, "stalemate, draw")?,
        }

        if self.config.display.show_fen {
            writeln!(out, "fen: {}", self.position.to_fen())?;
        }
        if self.config.display.show_legal_moves && !self.position.is_game_over() {
            self.list_moves(out)?;
        }
        Ok(())
    }
}
