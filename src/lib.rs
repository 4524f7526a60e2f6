#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod ai;
mod bitboard;
mod board;
#[cfg(feature = "std")]
pub mod cli;
mod common;
mod config;
pub mod events;
mod game;
#[cfg(feature = "std")]
mod logging;
pub mod placement;
mod ship;
#[cfg(feature = "std")]
pub mod sim;

pub use ai::{Targeting, TargetingAi, NEIGHBOR_OFFSETS};
pub use bitboard::{BitBoard, BitBoardError};
pub use board::*;
pub use common::*;
pub use config::*;
pub use events::{EventLog, GameEvent, GameObserver, ObserverId, Side};
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, parse_level};
pub use placement::{can_place, check_placement, place_fleet_randomly, place_ship};
pub use ship::*;
