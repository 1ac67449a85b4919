// Replay module for analyzing historical game states and debugging decision-making
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Replay the policy on historical states with the turn's recorded RNG seed
// 3. Compare logged vs replayed moves
// 4. Generate per-tier analysis reports

use log::{info, warn};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::bot::{compute_move, turn_seed};
use crate::config::Config;
use crate::debug_logger::DebugLogEntry;
use crate::move_selector::{Decision, MoveReason};
use crate::types::{Board, Direction, Game, GameState};

/// Log lines are the entries written by the debug logger
pub type LogEntry = DebugLogEntry;

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: i32,
    pub original_move: Direction,
    pub original_reason: MoveReason,
    pub replayed_move: Direction,
    pub replayed_reason: MoveReason,
    pub rng_seed: u64,
    pub matches: bool,
    pub computation_time_us: u128,
}

/// Agreement for the turns logged under one tier
#[derive(Debug, Clone, PartialEq)]
pub struct TierStats {
    pub reason: MoveReason,
    pub turns: usize,
    pub matches: usize,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
    /// Tiers in policy order, only those that appear in the log
    pub tiers: Vec<TierStats>,
    /// Turns replayed without a recorded seed; a random tier may not reproduce for them
    pub unseeded_turns: usize,
}

const TIERS: [MoveReason; 4] = [
    MoveReason::Food,
    MoveReason::Smart,
    MoveReason::Valid,
    MoveReason::Fallback,
];

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    config: Config,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine { config, verbose }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file =
            File::open(log_path.as_ref()).map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Seed to replay `entry` with: the logged one, else whatever the config derives
    pub fn seed_for(&self, entry: &LogEntry) -> u64 {
        match entry.rng_seed {
            Some(seed) => seed,
            None => {
                if self.config.policy.rng_seed.is_none() {
                    warn!(
                        "Turn {}: no seed in log or config, random tiers may not reproduce",
                        entry.turn
                    );
                }
                turn_seed(&self.config.policy, entry.turn)
            }
        }
    }

    /// Replays the policy on a single board state
    pub fn replay_turn(
        &self,
        board: &Board,
        our_snake_id: &str,
        turn: i32,
        rng_seed: u64,
    ) -> Result<(Decision, u128), String> {
        let you = board
            .snakes
            .iter()
            .find(|s| s.id == our_snake_id)
            .ok_or_else(|| format!("Snake with id '{}' not found in board state", our_snake_id))?;

        let state = GameState {
            game: Game::default(),
            turn,
            board: board.clone(),
            you: you.clone(),
        };

        let start_time = Instant::now();
        let mut rng = StdRng::seed_from_u64(rng_seed);
        let decision = compute_move(&state, &self.config.policy, &mut rng)
            .map_err(|e| format!("Turn {}: {}", turn, e))?;

        Ok((decision, start_time.elapsed().as_micros()))
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, String> {
        if self.verbose {
            info!("Replaying turn {}...", entry.turn);
        }

        let original_move = Direction::parse(&entry.chosen_move)?;
        let rng_seed = self.seed_for(entry);
        let (decision, computation_time) =
            self.replay_turn(&entry.board, &entry.you, entry.turn, rng_seed)?;
        let matches = original_move == decision.direction;

        let result = ReplayResult {
            turn: entry.turn,
            original_move,
            original_reason: entry.reason,
            replayed_move: decision.direction,
            replayed_reason: decision.reason,
            rng_seed,
            matches,
            computation_time_us: computation_time,
        };

        if self.verbose {
            if matches {
                info!(
                    "Turn {}: ✓ MATCH - {} ({}, time: {}us)",
                    entry.turn,
                    decision.direction.as_str(),
                    decision.reason.as_str(),
                    computation_time
                );
            } else {
                warn!(
                    "Turn {}: ✗ MISMATCH - Original: {} ({}), Replayed: {} ({}, time: {}us)",
                    entry.turn,
                    original_move.as_str(),
                    entry.reason.as_str(),
                    decision.direction.as_str(),
                    decision.reason.as_str(),
                    computation_time
                );
            }
        }

        Ok(result)
    }

    /// Replays all entries in a log file. Turns are independent, so they run in parallel.
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        entries
            .par_iter()
            .filter_map(|entry| match self.replay_entry(entry) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.turn, e);
                    None
                }
            })
            .collect()
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[LogEntry],
        turn_numbers: &[i32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;

            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", turn_num, e);
                }
            }
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    ///
    /// `unseeded_turns` is left at zero; `generate_stats_for` fills it from the log.
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_turns - matches;
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        let tiers = TIERS
            .iter()
            .map(|&reason| {
                let logged: Vec<_> = results
                    .iter()
                    .filter(|r| r.original_reason == reason)
                    .collect();
                TierStats {
                    reason,
                    turns: logged.len(),
                    matches: logged.iter().filter(|r| r.matches).count(),
                }
            })
            .filter(|tier| tier.turns > 0)
            .collect();

        ReplayStats {
            total_turns,
            matches,
            mismatches,
            match_rate,
            tiers,
            unseeded_turns: 0,
        }
    }

    /// Statistics for `results`, counting the log entries that carried no seed
    pub fn generate_stats_for(&self, entries: &[LogEntry], results: &[ReplayResult]) -> ReplayStats {
        let mut stats = self.generate_stats(results);
        stats.unseeded_turns = results
            .iter()
            .filter(|r| {
                entries
                    .iter()
                    .any(|e| e.turn == r.turn && e.rng_seed.is_none())
            })
            .count();
        stats
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, entries: &[LogEntry], results: &[ReplayResult]) {
        let stats = self.generate_stats_for(entries, results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        if stats.unseeded_turns > 0 {
            println!("Unseeded Turns: {}", stats.unseeded_turns);
        }
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_us as f64)
                .sum::<f64>()
                / results.len() as f64;
            println!("Average Computation Time:   {:.1}us", avg_time);
            println!();

            println!("Logged tier   Turns   Matches");
            for tier in &stats.tiers {
                println!(
                    "{:<13} {:<7} {}",
                    tier.reason.as_str(),
                    tier.turns,
                    tier.matches
                );
            }
            println!();
        }

        // Show mismatches in detail
        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Turn {}: {} ({}) → {} ({}), seed {}",
                    result.turn,
                    result.original_move.as_str(),
                    result.original_reason.as_str(),
                    result.replayed_move.as_str(),
                    result.replayed_reason.as_str(),
                    result.rng_seed
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(i32, Vec<Direction>)], // (turn, acceptable_moves)
    ) -> Result<(), String> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| format!("Turn {} not found in log", turn))?;

            let actual_move = Direction::parse(&entry.chosen_move)?;

            if !acceptable.contains(&actual_move) {
                return Err(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    actual_move.as_str()
                ));
            }
        }

        Ok(())
    }
}
