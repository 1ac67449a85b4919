// Snapshot builders shared by the integration tests
#![allow(dead_code)]

use wary_snake::types::{Battlesnake, Board, Coord, Game, GameState};

pub fn coords(cells: &[(i32, i32)]) -> Vec<Coord> {
    cells.iter().map(|&(x, y)| Coord { x, y }).collect()
}

pub fn snake(id: &str, health: i32, body: &[(i32, i32)]) -> Battlesnake {
    Battlesnake {
        id: id.to_string(),
        name: id.to_string(),
        health,
        body: coords(body),
        shout: None,
    }
}

/// Snapshot with `you` first in the roster
pub fn game_state(
    width: i32,
    height: i32,
    turn: i32,
    you: Battlesnake,
    others: Vec<Battlesnake>,
    food: &[(i32, i32)],
) -> GameState {
    let mut snakes = vec![you.clone()];
    snakes.extend(others);

    GameState {
        game: Game {
            id: "test-game".to_string(),
            ruleset: serde_json::json!({}),
            timeout: 500,
        },
        turn,
        board: Board {
            height,
            width,
            food: coords(food),
            snakes,
            hazards: vec![],
        },
        you,
    }
}

/// Our single-segment snake in the corner, sealed in by a snake that just ate
pub fn sealed_corner() -> GameState {
    game_state(
        11,
        11,
        7,
        snake("our-snake", 80, &[(0, 0)]),
        vec![snake("jailer", 100, &[(1, 0), (1, 1), (0, 1), (0, 2), (0, 3)])],
        &[(5, 5)],
    )
}
