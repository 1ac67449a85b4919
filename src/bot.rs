// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// This file wires the decision core to the Battlesnake lifecycle.
// For more info see docs.battlesnake.com

use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};
use std::time::{Duration, Instant};

use crate::board_state::BoardState;
use crate::config::{Config, PolicyConfig};
use crate::debug_logger::DebugLogger;
use crate::error::SnapshotError;
use crate::move_selector::{Decision, MoveReason, MoveSelector};
use crate::types::{Battlesnake, Board, Game, GameState};

/// Computes one turn's move from a snapshot.
///
/// Only a snapshot that cannot describe a board is an error; every other
/// situation resolves to some direction.
pub fn compute_move<R: Rng + ?Sized>(
    state: &GameState,
    policy: &PolicyConfig,
    rng: &mut R,
) -> Result<Decision, SnapshotError> {
    let board = BoardState::from_snapshot(state)?;
    Ok(MoveSelector::new(&board, policy, rng).smart_movement())
}

/// Seed for one turn's RNG: `seed ^ turn` when configured, otherwise drawn from the OS.
///
/// The seed is recorded in the decision log so a replay can rebuild the same `StdRng`.
pub fn turn_seed(policy: &PolicyConfig, turn: i32) -> u64 {
    match policy.rng_seed {
        Some(seed) => seed ^ turn as u64,
        None => rand::rng().random(),
    }
}

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Bot {
            config,
            logger: DebugLogger::disabled(),
        }
    }

    /// Creates a Bot that records every decision through `logger`
    pub fn with_logger(config: Config, logger: DebugLogger) -> Self {
        Bot { config, logger }
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": "1",
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("GAME START {}", game.id);
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("GAME OVER {} after {} turns", game.id, turn);
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// The decision runs on tokio's blocking pool and is awaited for at most
    /// the effective time budget. A late or failed computation answers with the
    /// configured fallback move.
    pub async fn get_move(&self, state: &GameState) -> Value {
        let start_time = Instant::now();
        let turn = state.turn;

        info!("Turn {}: Computing move", turn);

        let seed = turn_seed(&self.config.policy, turn);
        debug!("Turn {}: rng seed {}", turn, seed);

        let policy = self.config.policy.clone();
        let owned_state = state.clone();
        let task = tokio::task::spawn_blocking(move || {
            let mut rng = StdRng::seed_from_u64(seed);
            compute_move(&owned_state, &policy, &mut rng)
        });

        let budget = Duration::from_millis(self.config.timing.effective_budget_ms());
        let fallback = Decision {
            direction: self.config.policy.fallback_move,
            reason: MoveReason::Fallback,
        };

        let decision = match tokio::time::timeout(budget, task).await {
            Ok(Ok(Ok(decision))) => decision,
            Ok(Ok(Err(e))) => {
                error!("Turn {}: Rejected snapshot: {}", turn, e);
                fallback
            }
            Ok(Err(e)) => {
                error!("Turn {}: Move computation failed: {}", turn, e);
                fallback
            }
            Err(_) => {
                warn!(
                    "Turn {}: Exceeded {}ms budget, answering {}",
                    turn,
                    budget.as_millis(),
                    fallback.direction.as_str()
                );
                fallback
            }
        };

        info!(
            "Turn {}: Chose {} ({}, time: {}ms)",
            turn,
            decision.direction.as_str(),
            decision.reason.as_str(),
            start_time.elapsed().as_millis()
        );

        self.logger.log_move(
            turn,
            state.you.id.clone(),
            state.board.clone(),
            decision,
            seed,
        );

        json!({
            "move": decision.direction.as_str(),
            "shout": self.config.appearance.shout,
        })
    }
}
