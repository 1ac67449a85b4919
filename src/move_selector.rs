// Per-turn move policy
//
// Tiers, first match wins:
// 1. step along the shortest path to the nearest uncontested food, if that step is smart
// 2. a random smart move
// 3. a random valid move
// 4. the configured fallback direction

use log::{debug, trace};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board_state::BoardState;
use crate::config::PolicyConfig;
use crate::connectivity::{reachable_area, reachable_area_with_boundary, RegionSummary};
use crate::pathfinder::Pathfinder;
use crate::types::{Coord, Direction};

/// Which tier of the policy produced a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveReason {
    Food,
    Smart,
    Valid,
    Fallback,
}

impl MoveReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveReason::Food => "food",
            MoveReason::Smart => "smart",
            MoveReason::Valid => "valid",
            MoveReason::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub direction: Direction,
    pub reason: MoveReason,
}

pub struct MoveSelector<'a, R: Rng + ?Sized> {
    board: &'a BoardState,
    policy: &'a PolicyConfig,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> MoveSelector<'a, R> {
    pub fn new(board: &'a BoardState, policy: &'a PolicyConfig, rng: &'a mut R) -> Self {
        MoveSelector { board, policy, rng }
    }

    fn head(&self) -> Coord {
        self.board.player.head
    }

    /// Directions whose target cell is free or a tail that retracts this turn
    pub fn valid_moves(&self) -> Vec<Direction> {
        let head = self.head();
        Direction::all()
            .iter()
            .filter(|dir| self.board.is_enterable(&dir.apply(&head)))
            .copied()
            .collect()
    }

    pub fn smart_moves(&self) -> Vec<Direction> {
        let head = self.head();
        self.valid_moves()
            .into_iter()
            .filter(|dir| self.is_smart_move(dir.apply(&head)))
            .collect()
    }

    pub fn is_smart_move(&self, p: Coord) -> bool {
        !self.is_unsafe_target(p) && !self.is_trapped(p)
    }

    /// Food touching our own tail. Eating it while growing pins the tail in place.
    pub fn food_adj_tail(&self, p: Coord) -> bool {
        self.board.is_food(&p) && self.board.player.tail.surrounding_four().contains(&p)
    }

    /// Threatened, or a tail-adjacent food while we are already growing
    fn is_unsafe_target(&self, p: Coord) -> bool {
        self.board.is_threatened_by_enemy(&p)
            || (self.board.player_is_growing() && self.food_adj_tail(p))
    }

    /// Whether stepping onto `p` gives up the best-connected pocket among our safe moves.
    ///
    /// Safe candidate cells are ranked by escape likelihood, tail margin, then
    /// area; the first candidate wins ties. `p` is not trapped only when it is
    /// one of the candidates and its pocket matches the winner's exactly.
    pub fn is_trapped(&self, p: Coord) -> bool {
        let head = self.head();
        let threshold = self.policy.escape_area_threshold;

        let candidates: Vec<(Coord, RegionSummary)> = self
            .valid_moves()
            .iter()
            .map(|dir| dir.apply(&head))
            .filter(|cell| !self.is_unsafe_target(*cell))
            .map(|cell| (cell, reachable_area_with_boundary(self.board, cell)))
            .collect();

        let mut best: Option<RegionSummary> = None;
        for (_, summary) in &candidates {
            match best {
                Some(current) if summary.rank_key(threshold) <= current.rank_key(threshold) => {}
                _ => best = Some(*summary),
            }
        }

        let best = match best {
            Some(best) => best,
            None => return true,
        };

        trace!("trap check for {:?}: candidates {:?}, best {:?}", p, candidates, best);

        let ours = reachable_area_with_boundary(self.board, p);
        !candidates.iter().any(|(cell, _)| *cell == p) || ours != best
    }

    /// Whether `p` leaves us less raw space than the roomiest valid move
    pub fn is_constricting(&self, p: Coord) -> bool {
        let head = self.head();
        let best_area = self
            .valid_moves()
            .iter()
            .map(|dir| reachable_area(self.board, dir.apply(&head)))
            .max();

        match best_area {
            Some(best) => reachable_area(self.board, p) != best,
            None => false,
        }
    }

    /// First step of the shortest path from our head to `target`
    pub fn move_towards(&self, target: Coord) -> Option<Direction> {
        let head = self.head();
        let path = Pathfinder::new(self.board).find_path(head, target);
        match path.first() {
            Some(step) => Some(head.direction_of(step)),
            None => {
                debug!("move_towards: no path found to point {:?}", target);
                None
            }
        }
    }

    /// Nearest reachable food with no equal-or-longer enemy head around it
    pub fn closest_safe_food(&self) -> Option<Coord> {
        Pathfinder::new(self.board)
            .distances_to(self.head(), &self.board.food)
            .into_iter()
            .filter(|(food, _)| !self.board.is_contested(food))
            .min_by_key(|(_, steps)| *steps)
            .map(|(food, _)| food)
    }

    /// Picks this turn's move
    pub fn smart_movement(&mut self) -> Decision {
        let head = self.head();

        match self.closest_safe_food() {
            Some(food) => match self.move_towards(food) {
                Some(dir) if self.is_smart_move(dir.apply(&head)) => {
                    return Decision {
                        direction: dir,
                        reason: MoveReason::Food,
                    };
                }
                Some(_) => debug!("smart_movement: No smart move to food"),
                None => debug!("smart_movement: No path to food"),
            },
            None => debug!("smart_movement: No safe food"),
        }

        let smart = self.smart_moves();
        if let Some(&dir) = smart.choose(&mut *self.rng) {
            return Decision {
                direction: dir,
                reason: MoveReason::Smart,
            };
        }

        let valid = self.valid_moves();
        if let Some(&dir) = valid.choose(&mut *self.rng) {
            debug!("smart_movement: No smart move, picking from {} valid", valid.len());
            return Decision {
                direction: dir,
                reason: MoveReason::Valid,
            };
        }

        debug!("smart_movement: No valid move, falling back");
        Decision {
            direction: self.policy.fallback_move,
            reason: MoveReason::Fallback,
        }
    }
}
