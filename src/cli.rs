#![cfg(feature = "std")]
//! Terminal presentation: coordinate notation, command parsing and board rendering.

use std::fmt::Write;
use std::string::String;

use crate::{
    board::Sea,
    common::{Coord, ShotResult, ShotState},
    events::{GameEvent, Side},
    game::{GameEngine, Turn},
    ship::{Orientation, ShipId},
};

/// A line of input from the terminal player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Fire(Coord),
    Place {
        length: usize,
        orientation: Orientation,
        anchor: Coord,
    },
    Move { ship: ShipId, anchor: Coord },
    Rotate { ship: ShipId },
    Auto,
    Default,
    Clear,
    Start,
    Help,
    Quit,
}

pub const HELP: &str = "\
Setup:  auto | default | clear | place <len> <h|v> <cell> | move <n> <cell> | rotate <n> | start
Play:   <cell> (e.g. B7) to fire
Always: help | quit";

/// Column letter followed by 1-based row, e.g. `B7`.
pub fn coord_to_string(coord: Coord) -> String {
    if coord.col < 26 {
        let col = (b'A' + coord.col as u8) as char;
        std::format!("{}{}", col, coord.row + 1)
    } else {
        std::format!("{}", coord)
    }
}

/// Parse `B7`-style notation. Returns `None` if the text is not a cell on the grid.
pub fn parse_coord(input: &str, grid_size: usize) -> Option<Coord> {
    let mut chars = input.trim().chars();
    let col_ch = chars.next()?.to_ascii_uppercase();
    if !col_ch.is_ascii_uppercase() {
        return None;
    }
    let col = (col_ch as u8 - b'A') as usize;
    let row_str: String = chars.collect();
    let row: usize = row_str.parse().ok()?;
    if row == 0 {
        return None;
    }
    let coord = Coord::new(col, row - 1);
    coord.in_bounds(grid_size).then_some(coord)
}

pub fn parse_orientation(input: &str) -> Option<Orientation> {
    match input.to_ascii_lowercase().as_str() {
        "h" | "horizontal" => Some(Orientation::Horizontal),
        "v" | "vertical" => Some(Orientation::Vertical),
        _ => None,
    }
}

/// Parse one input line. Ship numbers are 1-based on the terminal.
pub fn parse_command(line: &str, grid_size: usize) -> Option<Command> {
    let words: std::vec::Vec<&str> = line.split_whitespace().collect();
    let ship_number = |s: &str| s.parse::<usize>().ok().filter(|&n| n > 0).map(|n| n - 1);
    match words.as_slice() {
        ["auto"] => Some(Command::Auto),
        ["default"] => Some(Command::Default),
        ["clear"] => Some(Command::Clear),
        ["start"] => Some(Command::Start),
        ["help"] | ["?"] => Some(Command::Help),
        ["quit"] | ["exit"] => Some(Command::Quit),
        ["place", len, orient, cell] => Some(Command::Place {
            length: len.parse().ok()?,
            orientation: parse_orientation(orient)?,
            anchor: parse_coord(cell, grid_size)?,
        }),
        ["move", n, cell] => Some(Command::Move {
            ship: ship_number(n)?,
            anchor: parse_coord(cell, grid_size)?,
        }),
        ["rotate", n] => Some(Command::Rotate {
            ship: ship_number(n)?,
        }),
        [cell] => parse_coord(cell, grid_size).map(Command::Fire),
        _ => None,
    }
}

/// Draw a sea. `X` hit, `o` miss, `S` a visible ship segment, `.` open water.
/// With `reveal_all` every ship is drawn; otherwise only revealed ones.
pub fn render_sea(sea: &Sea, reveal_all: bool) -> String {
    let board = sea.board();
    let size = board.size();
    let mut out = String::new();
    out.push_str("   ");
    for c in 0..size {
        let ch = if c < 26 { (b'A' + c as u8) as char } else { '?' };
        let _ = write!(out, " {}", ch);
    }
    out.push('\n');
    for r in 0..size {
        let _ = write!(out, "{:2} ", r + 1);
        for c in 0..size {
            let coord = Coord::new(c, r);
            let visible_ship = match board.occupant(coord) {
                Ok(Some(id)) => reveal_all || sea.is_revealed(id),
                _ => false,
            };
            let ch = match board.shot_state(coord) {
                Ok(ShotState::Hit) => 'X',
                Ok(ShotState::Miss) => 'o',
                _ if visible_ship => 'S',
                _ => '.',
            };
            let _ = write!(out, " {}", ch);
        }
        out.push('\n');
    }
    out
}

/// List the player's ships with their 1-based numbers, for the setup phase.
pub fn render_fleet(sea: &Sea) -> String {
    let mut out = String::new();
    for (i, ship) in sea.fleet().ships().iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} (len {}) at {} {:?}{}",
            i + 1,
            ship.ship_type().name(),
            ship.length(),
            coord_to_string(ship.anchor()),
            ship.orientation(),
            if ship.is_sunk() { " - sunk" } else { "" }
        );
    }
    out
}

/// Both boards, own waters fully visible and enemy waters as revealed so far.
pub fn render_game(engine: &GameEngine) -> String {
    let mut out = String::new();
    out.push_str("Enemy waters:\n");
    out.push_str(&render_sea(engine.opponent_sea(), engine.is_over()));
    out.push_str("\nYour waters:\n");
    out.push_str(&render_sea(engine.player_sea(), true));
    out
}

/// One-line description of an engine event.
pub fn describe_event(event: &GameEvent) -> String {
    let whose = |side: &Side| match side {
        Side::Player => "your",
        Side::Opponent => "enemy",
    };
    match event {
        GameEvent::GameStarted => "Battle stations! The enemy fleet is in position.".into(),
        GameEvent::CellHit { side, coord } => {
            std::format!("Hit at {} on {} board!", coord_to_string(*coord), whose(side))
        }
        GameEvent::CellMiss { side, coord } => {
            std::format!("Miss at {} on {} board.", coord_to_string(*coord), whose(side))
        }
        GameEvent::ShipSunk { side, ship_type, .. } => match side {
            Side::Player => std::format!("Your {} has been sunk!", ship_type.name()),
            Side::Opponent => std::format!("You sank the enemy {}!", ship_type.name()),
        },
        GameEvent::ShipRevealed { ship, .. } => std::format!("Enemy ship {} revealed.", ship + 1),
        GameEvent::TurnChanged(Turn::Player) => "Your turn.".into(),
        GameEvent::TurnChanged(Turn::Computer) => "Enemy is aiming...".into(),
        GameEvent::GameOver { player_wins: true } => "VICTORY! You sank the enemy fleet.".into(),
        GameEvent::GameOver { player_wins: false } => "DEFEAT. Your fleet has been destroyed.".into(),
    }
}

/// Short label for a shot result.
pub fn describe_result(result: &ShotResult) -> String {
    match result {
        ShotResult::Miss => "miss".into(),
        ShotResult::Hit => "hit".into(),
        ShotResult::Sunk(t) => std::format!("sunk {}", t.name()),
    }
}
