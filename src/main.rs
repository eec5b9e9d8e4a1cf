use std::error::Error;
use std::io::IsTerminal;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;
use url::Url;

use turnwise_chess::game::game_mode::GameMode;
use turnwise_chess::game::observer::{GameObserver, LinkStore};
use turnwise_chess::game::session::GameSession;
use turnwise_chess::game::turn_orchestrator::{
    GameError, HumanMoveOutcome, OrchestratorConfig, TurnOrchestrator,
};
use turnwise_chess::game_state::chess_types::*;
use turnwise_chess::game_state::game_outcome::GameReport;
use turnwise_chess::search::ai_search::SearchEngine;
use turnwise_chess::search::difficulty::Difficulty;
use turnwise_chess::utils::algebraic::algebraic_to_square;
use turnwise_chess::utils::game_link::{GameLink, LinkError};
use turnwise_chess::utils::long_algebraic::{move_to_long_algebraic, parse_long_algebraic};
use turnwise_chess::utils::render_game_state::render_board_for;
use turnwise_chess::utils::save_file::save_document;

#[derive(Parser, Debug)]
#[command(name = "turnwise", about = "Terminal chess against tiered computer opponents")]
struct Cli {
    /// Shareable link (URL or query string) to resume.
    #[arg(long)]
    link: Option<String>,
    /// Starting position in FEN.
    #[arg(long)]
    fen: Option<String>,
    /// 0 two players, 1-4 against that tier, 5 computer against computer.
    #[arg(long)]
    game: Option<i64>,
    /// Side the human plays: w or b.
    #[arg(long)]
    play_as: Option<String>,
    #[arg(long)]
    piece_set: Option<String>,
    /// Light's tier when the computer plays itself.
    #[arg(long)]
    light: Option<i64>,
    /// Dark's tier when the computer plays itself.
    #[arg(long)]
    dark: Option<i64>,
    /// Stop a computer-vs-computer game after this many plies.
    #[arg(long)]
    max_plies: Option<u32>,
    /// Seed for the computer's random choices.
    #[arg(long)]
    seed: Option<u64>,
    /// Read commands from a non-interactive stdin.
    #[arg(long)]
    batch: bool,
    /// Page that hosts the game; saved files redirect here.
    #[arg(long)]
    base_url: Option<String>,
}

const DEFAULT_BASE_URL: &str = "http://localhost/chess/";

impl Cli {
    fn game_link(&self) -> Result<GameLink, GameError> {
        let mut link = match &self.link {
            Some(text) => GameLink::parse(text)?,
            None => GameLink::default(),
        };
        if let Some(fen) = &self.fen {
            link.fen = Some(fen.clone());
        }
        if let Some(game) = self.game {
            link.game = game;
        }
        if let Some(side) = &self.play_as {
            link.play_as = if side == "b" { Color::Dark } else { Color::Light };
        }
        if let Some(piece_set) = &self.piece_set {
            link.piece_set = Some(piece_set.clone());
        }
        Ok(link)
    }

    fn session(&self) -> Result<GameSession, GameError> {
        let link = self.game_link()?;
        let session = GameSession::from_link(&link)?;
        let GameMode::ComputerVsComputer { light, dark } = session.mode() else {
            return Ok(session);
        };
        if self.light.is_none() && self.dark.is_none() {
            return Ok(session);
        }

        let mode = GameMode::ComputerVsComputer {
            light: self.light.map(Difficulty::from_level).unwrap_or(light),
            dark: self.dark.map(Difficulty::from_level).unwrap_or(dark),
        };
        let mut custom = GameSession::new(link.position()?, mode, link.play_as);
        if let Some(piece_set) = &link.piece_set {
            custom = custom.with_piece_set(piece_set.clone());
        }
        Ok(custom)
    }

    /// `--base-url`, else the page of a full `--link`, else the local default.
    fn base_url(&self) -> Result<Url, GameError> {
        let from_link = self.link.as_deref().filter(|link| link.contains("://"));
        let base = self
            .base_url
            .as_deref()
            .or(from_link)
            .unwrap_or(DEFAULT_BASE_URL);
        Url::parse(base).map_err(|err| GameError::Link(LinkError::from(err)))
    }
}

/// Prints everything the game reports to the terminal.
struct TerminalObserver {
    side: Color,
}

impl GameObserver for TerminalObserver {
    fn move_executed(&mut self, mv: &Move, position: &Position, _animate: bool) {
        let notation = move_to_long_algebraic(mv).unwrap_or_else(|_| "??".to_owned());
        println!("{} plays {notation}", mv.piece.color.name());
        println!("{}\n", render_board_for(position.board(), self.side, &[]));
    }

    fn outcome(&mut self, report: &GameReport) {
        if let Some(message) = report.describe() {
            println!("{message}");
        }
    }

    fn thinking_started(&mut self, side: Color, difficulty: Difficulty) {
        println!("{difficulty} is thinking for {}...", side.name());
    }
}

/// Keeps the newest link for the `link` command.
#[derive(Default)]
struct LatestLink(Option<GameLink>);

impl LinkStore for LatestLink {
    fn store(&mut self, link: &GameLink) {
        self.0 = Some(link.clone());
    }
}

type Game = TurnOrchestrator<TerminalObserver, LatestLink>;

const HELP: &str = "commands: <from><to>[piece] (e2e4, e7e8q), <square> to show moves, \
board, undo, redo, link, save, help, quit";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let session = cli.session()?;
    let base_url = cli.base_url()?;
    let side = session.play_as();

    let needs_human = !session.mode().is_computer_vs_computer();
    if needs_human && !cli.batch && !std::io::stdin().is_terminal() {
        let reason = "stdin is not a terminal; pass --batch to read piped commands";
        return Err(GameError::MissingHost(reason.to_owned()).into());
    }

    let engine = match cli.seed {
        Some(seed) => SearchEngine::seeded(seed),
        None => SearchEngine::new(),
    };
    let observer = TerminalObserver { side };
    let mut game: Game = TurnOrchestrator::new(session, engine, observer, LatestLink::default())
        .with_config(OrchestratorConfig {
            ai_delay: Duration::from_millis(250),
            max_plies: cli.max_plies,
        });

    println!("{}\n", show(&game, &[]));
    game.start().await?;
    if !needs_human {
        return Ok(());
    }

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if !handle_command(&mut game, &base_url, line.trim()).await? {
            break;
        }
    }
    Ok(())
}

fn show(game: &Game, highlights: &[Move]) -> String {
    let session = game.session();
    render_board_for(session.current().board(), session.play_as(), highlights)
}

/// Runs one terminal command. `false` ends the session.
async fn handle_command(
    game: &mut Game,
    base_url: &Url,
    command: &str,
) -> Result<bool, Box<dyn Error>> {
    match command {
        "" => {}
        "quit" | "exit" => return Ok(false),
        "help" => println!("{HELP}"),
        "board" => println!("{}", show(game, &[])),
        "undo" | "redo" => {
            let moved = if command == "undo" { game.undo() } else { game.redo() };
            match moved {
                Ok(()) => println!("{}", show(game, &[])),
                Err(err) => println!("{err}"),
            }
        }
        "link" => {
            let link = game.links().0.clone();
            println!("{}", link.unwrap_or_else(|| game.session().link()).to_url(base_url));
        }
        "save" => {
            let href = game.session().link().to_url(base_url);
            let doc = save_document(href.as_str(), chrono::Local::now().date_naive());
            std::fs::write(&doc.file_name, doc.contents)?;
            println!("saved {}", doc.file_name);
        }
        square if square.len() == 2 => match algebraic_to_square(square) {
            Ok(sq) => {
                let moves = game.select_piece(sq)?;
                if moves.is_empty() {
                    println!("nothing to move there");
                } else {
                    println!("{}", show(game, &moves));
                }
            }
            Err(err) => println!("{err}"),
        },
        text => {
            let input = match parse_long_algebraic(text) {
                Ok(input) => input,
                Err(err) => {
                    println!("{err}; {HELP}");
                    return Ok(true);
                }
            };
            match game.submit_human_move(input.from, input.to, input.promotion).await? {
                HumanMoveOutcome::Executed { .. } => {}
                HumanMoveOutcome::PromotionRequired => {
                    println!("What would you like to promote to? (rook, bishop, knight, queen)");
                    println!("resubmit with a suffix, for example {text}q");
                }
                HumanMoveOutcome::Ignored => {
                    warn!(command = text, "move not accepted");
                    println!("not a legal move");
                }
            }
        }
    }
    Ok(true)
}
