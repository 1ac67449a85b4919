// Reachable-space analysis
//
// Iterative flood fills over open cells. The explicit stack never holds more
// entries than the board has cells, so large boards cannot exhaust the call
// stack.

use std::collections::HashSet;

use crate::board_state::BoardState;
use crate::types::Coord;

/// Size of a flood-filled pocket and the snakes bordering it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegionSummary {
    pub area: usize,
    /// Distinct enemy heads touching the pocket
    pub heads_seen: usize,
    /// Distinct tails (any snake) touching the pocket
    pub tails_seen: usize,
}

impl RegionSummary {
    /// No enemy head borders the pocket, a tail does, and there is room to wait for it
    pub fn is_escape_likely(&self, area_threshold: usize) -> bool {
        self.heads_seen == 0 && self.tails_seen > 0 && self.area > area_threshold
    }

    pub fn tail_margin(&self) -> i64 {
        self.tails_seen as i64 - self.heads_seen as i64
    }

    /// Ranking key, larger is better: escape likelihood, then tail margin, then area
    pub fn rank_key(&self, area_threshold: usize) -> (bool, i64, usize) {
        (
            self.is_escape_likely(area_threshold),
            self.tail_margin(),
            self.area,
        )
    }
}

/// Number of open cells connected to `p`. Zero when `p` itself is blocked.
pub fn reachable_area(board: &BoardState, p: Coord) -> usize {
    reachable_cells(board, p).len()
}

/// The open cells connected to `p`
pub fn reachable_cells(board: &BoardState, p: Coord) -> HashSet<Coord> {
    let mut visited = HashSet::new();
    if board.is_blocked(&p) {
        return visited;
    }

    let mut stack = vec![p];
    visited.insert(p);
    while let Some(cell) = stack.pop() {
        for next in board.neighbors_of(&cell) {
            if visited.insert(next) {
                stack.push(next);
            }
        }
    }
    visited
}

/// Flood fill from `p` that also records the enemy heads and tails met at its edge.
///
/// The starting cell is itself checked, so filling from a blocked tail reports
/// an empty pocket bordered by that tail.
pub fn reachable_area_with_boundary(board: &BoardState, p: Coord) -> RegionSummary {
    let mut heads: HashSet<Coord> = HashSet::new();
    let mut tails: HashSet<Coord> = HashSet::new();
    let mut visited: HashSet<Coord> = HashSet::new();

    let mut record_edge = |cell: Coord| {
        if board.heads.contains_key(&cell) && cell != board.player.head {
            heads.insert(cell);
        }
        if board.tails.contains_key(&cell) {
            tails.insert(cell);
        }
    };

    if board.is_blocked(&p) {
        record_edge(p);
    } else {
        let mut stack = vec![p];
        visited.insert(p);
        while let Some(cell) = stack.pop() {
            for next in cell.surrounding_four().iter() {
                if board.is_blocked(next) {
                    record_edge(*next);
                } else if visited.insert(*next) {
                    stack.push(*next);
                }
            }
        }
    }

    RegionSummary {
        area: visited.len(),
        heads_seen: heads.len(),
        tails_seen: tails.len(),
    }
}
