// Library exports for the Battlesnake bot
// The server binary and the replay tool both drive the decision core through these modules

pub mod board_state;
pub mod bot;
pub mod config;
pub mod connectivity;
pub mod debug_logger;
pub mod error;
pub mod grid;
pub mod move_selector;
pub mod pathfinder;
pub mod replay;
pub mod types;

#[cfg(test)]
mod test_utils;
