// Debug logging module for asynchronous game state logging
//
// This module provides fire-and-forget async logging to avoid blocking
// the main request/response cycle. Each turn's state is written to a JSONL file.

use log::error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::move_selector::{Decision, MoveReason};
use crate::types::Board;

/// A single line of the debug log
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DebugLogEntry {
    pub turn: i32,
    /// Id of the snake that made the move
    pub you: String,
    pub chosen_move: String,
    pub reason: MoveReason,
    pub board: Board,
    /// Seed of the turn's `StdRng`; absent in logs written before seeds were recorded
    #[serde(default)]
    pub rng_seed: Option<u64>,
    pub timestamp: String,
}

impl DebugLogEntry {
    pub fn new(turn: i32, you: String, board: Board, decision: Decision, rng_seed: u64) -> Self {
        DebugLogEntry {
            turn,
            you,
            chosen_move: decision.direction.as_str().to_string(),
            reason: decision.reason,
            board,
            rng_seed: Some(rng_seed),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Shared debug logger state
/// Uses Arc<Mutex<File>> to allow concurrent async writes from multiple tasks
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return DebugLogger::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                DebugLogger::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs a move decision asynchronously (fire-and-forget)
    /// This spawns a tokio task that writes to the file without blocking
    pub fn log_move(
        &self,
        turn: i32,
        you: String,
        board: Board,
        decision: Decision,
        rng_seed: u64,
    ) {
        if !self.enabled {
            return;
        }

        let file_handle = self.file.clone();
        let entry = DebugLogEntry::new(turn, you, board, decision, rng_seed);

        tokio::spawn(async move {
            Self::write_entry(file_handle, entry).await;
        });
    }

    /// Writes one entry and flushes, awaiting completion
    pub async fn log_move_now(
        &self,
        turn: i32,
        you: String,
        board: Board,
        decision: Decision,
        rng_seed: u64,
    ) {
        if !self.enabled {
            return;
        }
        let entry = DebugLogEntry::new(turn, you, board, decision, rng_seed);
        Self::write_entry(self.file.clone(), entry).await;
    }

    async fn write_entry(file_handle: Arc<Mutex<Option<File>>>, entry: DebugLogEntry) {
        let mut file_guard = file_handle.lock().await;

        if let Some(file) = file_guard.as_mut() {
            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    let line_with_newline = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                        error!("Failed to write debug log entry: {}", e);
                    } else if let Err(e) = file.flush().await {
                        error!("Failed to flush debug log: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize debug log entry: {}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{game_state, snake};
    use crate::types::Direction;

    #[tokio::test]
    async fn test_entries_are_written_as_json_lines() {
        let path = std::env::temp_dir().join(format!(
            "wary_snake_debug_{}.jsonl",
            std::process::id()
        ));
        let path_str = path.to_string_lossy().to_string();
        let logger = DebugLogger::new(true, &path_str).await;
        assert!(logger.is_enabled());

        let state = game_state(11, 11, snake("me", 90, &[(5, 5), (5, 6)]), vec![], &[]);
        let decision = Decision {
            direction: Direction::Left,
            reason: MoveReason::Smart,
        };
        logger
            .log_move_now(4, "me".to_string(), state.board.clone(), decision, 11)
            .await;
        logger
            .log_move_now(5, "me".to_string(), state.board, decision, 12)
            .await;

        let contents = std::fs::read_to_string(&path).unwrap();
        let entries: Vec<DebugLogEntry> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        std::fs::remove_file(&path).ok();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].turn, 4);
        assert_eq!(entries[1].chosen_move, "left");
        assert_eq!(entries[1].reason, MoveReason::Smart);
        assert_eq!(entries[1].you, "me");
        assert_eq!(entries[0].rng_seed, Some(11));
        assert_eq!(entries[1].rng_seed, Some(12));
    }

    #[test]
    fn test_entries_without_seed_still_parse() {
        let line = r#"{"turn":3,"you":"me","chosen_move":"up","reason":"food","board":{"height":11,"width":11,"food":[],"snakes":[]},"timestamp":""}"#;
        let entry: DebugLogEntry = serde_json::from_str(line).unwrap();
        assert_eq!(entry.turn, 3);
        assert_eq!(entry.rng_seed, None);
    }

    #[tokio::test]
    async fn test_disabled_logger_skips_file_creation() {
        let logger = DebugLogger::new(false, "/nonexistent/dir/never.jsonl").await;
        assert!(!logger.is_enabled());
    }
}
