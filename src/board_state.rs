// Per-turn view of the board used by every search
//
// A BoardState is built once from a snapshot, never mutated, and dropped when
// the turn's decision is made.

use std::collections::{HashMap, HashSet};

use crate::error::SnapshotError;
use crate::types::{Battlesnake, Coord, GameState};

/// Health reported for a snake on the turn it eats. Its tail stays put next turn.
pub const MAX_HEALTH: i32 = 100;

/// One snake as seen by the decision core
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub health: i32,
    pub head: Coord,
    pub tail: Coord,
    /// Segments after the head, tail included
    pub body: Vec<Coord>,
}

impl Agent {
    pub fn from_snake(snake: &Battlesnake) -> Result<Self, SnapshotError> {
        let (head, rest) = snake
            .body
            .split_first()
            .ok_or_else(|| SnapshotError::EmptyBody {
                id: snake.id.clone(),
            })?;
        let tail = snake.body.last().copied().unwrap_or(*head);

        Ok(Agent {
            id: snake.id.clone(),
            name: snake.name.clone(),
            health: snake.health,
            head: *head,
            tail,
            body: rest.to_vec(),
        })
    }

    /// Number of segments behind the head
    pub fn length(&self) -> usize {
        self.body.len()
    }

    /// Iterates every occupied cell, head first
    pub fn cells(&self) -> impl Iterator<Item = &Coord> {
        std::iter::once(&self.head).chain(self.body.iter())
    }
}

#[derive(Debug, Clone)]
pub struct BoardState {
    pub width: i32,
    pub height: i32,
    pub turn: i32,
    pub player: Agent,
    pub enemies: Vec<Agent>,
    /// Food cells in snapshot order
    pub food: Vec<Coord>,
    food_set: HashSet<Coord>,
    /// Every occupied cell of every snake
    pub obstacles: HashSet<Coord>,
    /// Enemy head -> that enemy's length
    pub heads: HashMap<Coord, usize>,
    /// Tail of every snake, self included -> owner's health
    pub tails: HashMap<Coord, i32>,
}

impl BoardState {
    /// Builds the turn's board in one pass over the roster
    pub fn from_snapshot(state: &GameState) -> Result<Self, SnapshotError> {
        let board = &state.board;
        if board.width <= 0 || board.height <= 0 {
            return Err(SnapshotError::InvalidDimensions {
                width: board.width,
                height: board.height,
            });
        }

        let player = Agent::from_snake(&state.you)?;
        let mut enemies = Vec::new();
        let mut obstacles = HashSet::new();
        let mut heads = HashMap::new();
        let mut tails = HashMap::new();
        let mut saw_player = false;

        for snake in &board.snakes {
            let agent = Agent::from_snake(snake)?;
            obstacles.extend(agent.cells().copied());
            tails.insert(agent.tail, agent.health);

            if agent.id == player.id {
                saw_player = true;
            } else {
                heads.insert(agent.head, agent.length());
                enemies.push(agent);
            }
        }

        // `you` is normally part of the roster; cover snapshots where it is not
        if !saw_player {
            obstacles.extend(player.cells().copied());
            tails.insert(player.tail, player.health);
        }

        Ok(BoardState {
            width: board.width,
            height: board.height,
            turn: state.turn,
            player,
            enemies,
            food: board.food.clone(),
            food_set: board.food.iter().copied().collect(),
            obstacles,
            heads,
            tails,
        })
    }

    pub fn is_outside(&self, p: &Coord) -> bool {
        p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height
    }

    /// Occupied or off the board, ignoring tails that are about to move
    pub fn is_blocked(&self, p: &Coord) -> bool {
        self.obstacles.contains(p) || self.is_outside(p)
    }

    pub fn is_food(&self, p: &Coord) -> bool {
        self.food_set.contains(p)
    }

    /// True when `p` is a tail whose owner did not just eat, so it vacates this turn
    pub fn is_vacating_tail(&self, p: &Coord) -> bool {
        matches!(self.tails.get(p), Some(&health) if health != MAX_HEALTH)
    }

    /// Whether the head may step onto `p` this turn
    pub fn is_enterable(&self, p: &Coord) -> bool {
        !self.is_blocked(p) || self.is_vacating_tail(p)
    }

    /// Open orthogonal neighbours. Every tail counts as blocked here.
    pub fn neighbors_of(&self, p: &Coord) -> Vec<Coord> {
        p.surrounding_four()
            .iter()
            .filter(|n| !self.is_blocked(n))
            .copied()
            .collect()
    }

    /// An enemy at least as long as us could move its head onto `p`
    pub fn is_threatened_by_enemy(&self, p: &Coord) -> bool {
        let our_length = self.player.length();
        self.enemies
            .iter()
            .filter(|enemy| enemy.length() >= our_length)
            .any(|enemy| enemy.head.surrounding_four().contains(p))
    }

    /// An equal-or-longer enemy head sits in the 8-neighbourhood of `p`
    pub fn is_contested(&self, p: &Coord) -> bool {
        let our_length = self.player.length();
        p.surrounding_eight().iter().any(|cell| {
            self.heads
                .get(cell)
                .map_or(false, |&length| length >= our_length)
        })
    }

    /// We ate last turn, so our tail will not retract
    pub fn player_is_growing(&self) -> bool {
        self.player.health == MAX_HEALTH
    }
}
