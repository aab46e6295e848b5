//! Real or AI? - terminal guessing game
//!
//! Two images per round, one a real photo and one AI-generated; pick the
//! real one. Ten rounds, three mistakes allowed, and a safe-or-danger
//! verdict at the end.

mod cli;
mod game;

use clap::Parser;
use cli::display::Display;
use cli::input::InputHandler;
use cli::share;
use game::{
    AssetCatalog, Choice, GameConfig, MessagePools, OutcomeClass, OutcomeResolver,
    PendingTransition, Phase, Session,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::process::Command;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "Real or AI?")]
#[command(about = "Spot the real photo before the AI fools you three times")]
struct Args {
    /// Rounds per session
    #[arg(short, long, default_value = "10")]
    rounds: u32,

    /// Wrong picks allowed before elimination
    #[arg(short = 'w', long, default_value = "3")]
    max_wrong: u32,

    /// Minimum score counted as a safe result
    #[arg(long, default_value = "7")]
    safe_threshold: u32,

    /// Number of images in the REAL pool
    #[arg(long, default_value = "10")]
    real_count: u32,

    /// Number of images in the FAKE pool
    #[arg(long, default_value = "10")]
    fake_count: u32,

    /// Root directory of the image pools (expects REAL/ and FAKE/ inside)
    #[arg(short, long, default_value = "image")]
    assets: String,

    /// Optional JSON file with safe/danger outcome messages
    #[arg(long)]
    messages: Option<String>,

    /// Command used to open staged images (e.g. xdg-open, open)
    #[arg(long)]
    viewer: Option<String>,

    /// RNG seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Link advertised in the share URLs
    #[arg(long, default_value = "https://real-or-ai.example/play")]
    game_url: String,
}

/// Stage the current pair under neutral names and return the two labels
/// shown next to the choice keys. Missing images degrade to a notice;
/// they never abort the session.
fn stage_labels(catalog: &AssetCatalog, session: &Session, viewer: Option<&str>) -> [String; 2] {
    let pair = match session.current_pair() {
        Some(pair) => pair,
        None => return [String::new(), String::new()],
    };

    match catalog.stage_pair(&pair) {
        Ok(staged) => {
            if let Some(viewer) = viewer {
                for path in &staged {
                    // Viewer failures are presentational, not fatal
                    let _ = Command::new(viewer).arg(path).spawn();
                }
            }
            [
                staged[0].display().to_string(),
                staged[1].display().to_string(),
            ]
        }
        Err(e) => {
            let note = format!("(image unavailable: {})", e);
            [note.clone(), note]
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config = GameConfig {
        total_rounds: args.rounds,
        max_wrong: args.max_wrong,
        safe_threshold: args.safe_threshold,
        real_count: args.real_count,
        fake_count: args.fake_count,
    };

    let pools = match &args.messages {
        Some(path) => MessagePools::load(path)?,
        None => MessagePools::defaults(),
    };
    let resolver = OutcomeResolver::new(pools, args.safe_threshold);

    // Pool-size precondition is checked here, before any round runs
    let mut session = Session::new(config, resolver)?;
    let catalog = AssetCatalog::new(&args.assets);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let display = Display::simple()?;
    InputHandler::enable_raw_mode()?;
    let input = InputHandler::new();

    // The single pending slot: at most one scheduled transition exists
    // at a time (the session's phase lock guarantees it)
    let mut pending: Option<(PendingTransition, Instant)> = None;
    let mut staged_round: u32 = 0;
    let mut pair_labels = [String::new(), String::new()];

    'game: loop {
        // Fire a due transition before rendering
        if let Some((transition, deadline)) = pending {
            if Instant::now() >= deadline {
                session.fire(transition, &mut rng);
                pending = None;
            }
        }

        display.clear()?;
        let snapshot = session.snapshot();
        match snapshot.phase {
            Phase::NotStarted => {
                display.show_intro()?;
            }
            Phase::InRound | Phase::RoundResolved => {
                if staged_round != snapshot.round {
                    pair_labels = stage_labels(&catalog, &session, args.viewer.as_deref());
                    staged_round = snapshot.round;
                }
                display.show_scoreboard(
                    snapshot.score,
                    snapshot.round,
                    session.total_rounds(),
                    snapshot.lives_remaining,
                )?;
                display.show_pair(&pair_labels[0], &pair_labels[1])?;
                if let Some(message) = snapshot.feedback_message {
                    let correct = session
                        .last_feedback()
                        .map(|f| f.is_correct())
                        .unwrap_or(false);
                    display.show_feedback(message, correct)?;
                }
                display.show_help()?;
            }
            Phase::Ended => {
                if let Some(outcome) = &snapshot.final_outcome {
                    display.show_final(
                        outcome.score,
                        session.total_rounds(),
                        &outcome.message,
                        outcome.class == OutcomeClass::Safe,
                    )?;
                    let links = share::share_links(
                        outcome.score,
                        session.total_rounds(),
                        &outcome.message,
                        &args.game_url,
                    );
                    display.show_share_links(&links)?;
                }
            }
        }

        // Read input
        let key = match input.read_key()? {
            Some(key) => key,
            None => continue,
        };

        if InputHandler::is_exit(&key) {
            break 'game;
        }

        match session.phase() {
            Phase::NotStarted => {
                if InputHandler::is_start(&key) {
                    session.start(&mut rng);
                    staged_round = 0;
                }
            }
            Phase::InRound => {
                if let Some(index) = InputHandler::choice_index(&key) {
                    if let Some(choice) = Choice::from_index(index) {
                        if let Some(transition) = session.submit_choice(choice) {
                            pending = Some((transition, Instant::now() + transition.delay));
                        }
                    }
                }
            }
            Phase::RoundResolved => {
                // Feedback is on display; stray picks are ignored until
                // the pending transition fires
            }
            Phase::Ended => {
                if InputHandler::is_play_again(&key) {
                    session.reset();
                    pending = None;
                    staged_round = 0;
                }
            }
        }
    }

    // Cleanup
    InputHandler::disable_raw_mode()?;
    display.shutdown()?;

    // Summary
    println!("\n👋 Thanks for playing!");
    if let Some(outcome) = session.final_outcome() {
        println!(
            "🎯 Final: {}/{} | {}",
            outcome.score,
            session.total_rounds(),
            outcome.message
        );
    }

    Ok(())
}
