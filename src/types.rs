// Battlesnake API Types
// See https://docs.battlesnake.com/api

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use crate::grid::{Coord, Direction};

/// Game metadata including ID, ruleset, and timeout
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Game {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub ruleset: Value,
    #[serde(default)]
    pub timeout: u32,
}

/// Board state including dimensions, food and snakes
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Board {
    pub height: i32,
    pub width: i32,
    pub food: Vec<Coord>,
    pub snakes: Vec<Battlesnake>,
    #[serde(default)]
    pub hazards: Vec<Coord>,
}

/// Snake representation with all state information
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Battlesnake {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub health: i32,
    pub body: Vec<Coord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shout: Option<String>,
}

/// Complete game state received from the API
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GameState {
    #[serde(default)]
    pub game: Game,
    #[serde(default)]
    pub turn: i32,
    pub board: Board,
    pub you: Battlesnake,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_snapshot_decodes() {
        let raw = r#"{
            "turn": 3,
            "board": {
                "width": 11,
                "height": 11,
                "food": [{"x": 5, "y": 0}],
                "snakes": [
                    {"id": "me", "health": 90, "body": [{"x": 5, "y": 5}, {"x": 5, "y": 6}]}
                ]
            },
            "you": {"id": "me", "health": 90, "body": [{"x": 5, "y": 5}, {"x": 5, "y": 6}]}
        }"#;

        let state: GameState = serde_json::from_str(raw).unwrap();
        assert_eq!(state.turn, 3);
        assert_eq!(state.board.food, vec![Coord::new(5, 0)]);
        assert_eq!(state.you.body[0], Coord::new(5, 5));
        assert!(state.board.hazards.is_empty());
    }

    #[test]
    fn test_snapshot_without_body_is_rejected() {
        let raw = r#"{
            "board": {"width": 3, "height": 3, "food": [], "snakes": []},
            "you": {"id": "me", "health": 90}
        }"#;

        assert!(serde_json::from_str::<GameState>(raw).is_err());
    }

    #[test]
    fn test_direction_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Direction::Left).unwrap(), "\"left\"");
        let dir: Direction = serde_json::from_str("\"down\"").unwrap();
        assert_eq!(dir, Direction::Down);
    }
}
