//! Hot-seat duel in the terminal
//!
//! Two players share one terminal and alternate turns. Each turn: pick a
//! target region, fire one weapon (or raise a Zeno defense), then end the turn.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use quantum_fleet::board::placement::ship_cells;
use quantum_fleet::board::Orientation;
use quantum_fleet::core::config::EngineConfig;
use quantum_fleet::core::error::Result;
use quantum_fleet::core::types::{Coordinate, PlayerId};
use quantum_fleet::report::{report, report_defense};
use quantum_fleet::session::Session;
use quantum_fleet::targeting::RegionShape;
use quantum_fleet::weapons::{DefenseRequest, Weapon};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "duel")]
#[command(about = "Play a two-player quantum fleet game in one terminal")]
struct Args {
    /// Seed for every random draw in the game
    #[arg(long)]
    seed: Option<u64>,

    /// Engine config TOML (defaults built in)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Place both fleets at random instead of asking
    #[arg(long)]
    auto_place: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quantum_fleet=info")),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    tracing::info!(seed, "starting duel");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut session = Session::new(config, seed)?;

    for player in [PlayerId::One, PlayerId::Two] {
        if args.auto_place {
            session.auto_place(player)?;
        } else if !place_interactively(&mut session, player, &mut input)? {
            return Ok(());
        }
    }

    println!("\n=== QUANTUM FLEET ===");
    print_help();

    let mut announced = None;
    loop {
        let player = session.current_player();
        if announced != Some(session.turn_index()) {
            println!("\n--- Round {}: {} ---", session.round(), player);
            println!("{}", session.view(player).opponent);
            announced = Some(session.turn_index());
        }

        let Some(line) = prompt(&mut input, &format!("{}> ", player))? else {
            break;
        };
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = words.first() else {
            continue;
        };

        match command {
            "quit" | "q" => break,
            "help" | "h" => print_help(),
            "board" | "b" => {
                let view = session.view(player);
                println!("Your waters:\n{}", view.own);
                println!("Enemy waters:\n{}", view.opponent);
            }
            "target" | "t" => match parse_target(&words[1..]) {
                Some((shape, anchor)) => match session.select_target(shape, anchor) {
                    Ok(region) => println!("Targeting {} at {} ({} cells).", region.shape, anchor, region.len()),
                    Err(e) => println!("Cannot target: {}", e),
                },
                None => println!("Usage: target <single|square|row|column> <row> <col>"),
            },
            "clear" => match session.clear_target() {
                Ok(()) => println!("Target cleared."),
                Err(e) => println!("Cannot clear: {}", e),
            },
            "fire" | "f" => match words.get(1).map(|w| w.parse::<Weapon>()) {
                Some(Ok(weapon)) => match session.fire(weapon) {
                    Ok(result) => println!("{}", report(&result)),
                    Err(e) => println!("Cannot fire: {}", e),
                },
                Some(Err(e)) => println!("{}", e),
                None => println!("Usage: fire <classical|grover|ev>"),
            },
            "defend" | "d" => match words.get(1).map(|w| w.parse::<DefenseRequest>()) {
                Some(Ok(request)) => match session.defend(request) {
                    Ok(result) => println!("{}", report_defense(&result)),
                    Err(e) => println!("Cannot defend: {}", e),
                },
                Some(Err(e)) => println!("{}", e),
                None => println!("Usage: defend <partial|maximum|auto>"),
            },
            "end" | "e" => match session.end_turn() {
                Ok(expired) if !expired.is_empty() => {
                    println!("Zeno protection faded on {} cell(s).", expired.len())
                }
                Ok(_) => {}
                Err(e) => println!("Cannot end turn: {}", e),
            },
            _ => println!("Unknown command. Type 'help' for the list."),
        }

        if let Some(winner) = session.winner() {
            println!("\n{} sinks the last ship and wins in round {}!", winner, session.round());
            break;
        }
        if let Some(reason) = session.poisoned() {
            eprintln!("Game halted: {}", reason);
            break;
        }
    }

    for player in [PlayerId::One, PlayerId::Two] {
        println!("{}", session.snapshot(player));
    }
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  target <single|square|row|column> <row> <col>  - Select a region");
    println!("  clear                                          - Drop the selected region");
    println!("  fire <classical|grover|ev>                     - Attack the enemy region");
    println!("  defend <partial|maximum|auto>                  - Zeno-protect your own region");
    println!("  end                                            - End your turn");
    println!("  board                                          - Show both boards");
    println!("  quit                                           - Leave the game");
}

/// Returns false if input ran out before the fleet was placed
fn place_interactively(session: &mut Session, player: PlayerId, input: &mut impl BufRead) -> Result<bool> {
    let sizes = session.config().fleet.ship_sizes.clone();
    println!("\n{}, place your fleet ({} ships). Enter: <row> <col> [h|v]", player, sizes.len());

    loop {
        let mut layout = Vec::with_capacity(sizes.len());
        for (idx, &size) in sizes.iter().enumerate() {
            loop {
                let Some(line) = prompt(input, &format!("ship {} (length {})> ", idx + 1, size))? else {
                    return Ok(false);
                };
                let words: Vec<&str> = line.split_whitespace().collect();
                let orientation = match words.get(2).copied() {
                    Some("v") => Orientation::Vertical,
                    _ => Orientation::Horizontal,
                };
                match parse_coord(&words) {
                    Some(origin) => {
                        layout.push(ship_cells(origin, size, orientation));
                        break;
                    }
                    None => println!("Usage: <row> <col> [h|v]"),
                }
            }
        }

        match session.place_fleet(player, &layout) {
            Ok(()) => {
                // Clear the screen area so the next player does not see the layout
                println!("{}", "\n".repeat(40));
                return Ok(true);
            }
            Err(e) => println!("Fleet rejected: {}. Start again.", e),
        }
    }
}

fn parse_coord(words: &[&str]) -> Option<Coordinate> {
    let row = words.first()?.parse().ok()?;
    let col = words.get(1)?.parse().ok()?;
    Some(Coordinate::new(row, col))
}

fn parse_target(words: &[&str]) -> Option<(RegionShape, Coordinate)> {
    let shape = words.first()?.parse().ok()?;
    let anchor = parse_coord(words.get(1..)?)?;
    Some((shape, anchor))
}

fn prompt(input: &mut impl BufRead, label: &str) -> Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
