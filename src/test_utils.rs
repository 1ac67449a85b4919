// Snapshot builders shared by the unit tests

use crate::types::{Battlesnake, Board, Coord, Game, GameState};

pub fn coords(cells: &[(i32, i32)]) -> Vec<Coord> {
    cells.iter().map(|&(x, y)| Coord::new(x, y)).collect()
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

/// Builds a snapshot with `you` listed first in the roster
pub fn game_state(
    width: i32,
    height: i32,
    you: Battlesnake,
    others: Vec<Battlesnake>,
    food: &[(i32, i32)],
) -> GameState {
    let mut snakes = vec![you.clone()];
    snakes.extend(others);

    GameState {
        game: Game::default(),
        turn: 0,
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
