// Shortest paths over the open cells of a BoardState
//
// A* with unit edge costs and a Manhattan heuristic. The open set is a binary
// heap ordered by (f, insertion order), so among nodes with equal f the one
// that entered the open set first is expanded first. Every obstacle, tails
// included, is impassable.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::board_state::BoardState;
use crate::types::Coord;

/// Open-set entry; `seq` is fixed the first time a cell enters the open set
#[derive(Debug, PartialEq, Eq)]
struct OpenNode {
    f_score: i32,
    seq: usize,
    coord: Coord,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.f_score, self.seq).cmp(&(other.f_score, other.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub struct Pathfinder<'a> {
    board: &'a BoardState,
}

impl<'a> Pathfinder<'a> {
    pub fn new(board: &'a BoardState) -> Self {
        Pathfinder { board }
    }

    /// Cells to walk from `start` to `goal`, excluding `start` and ending at `goal`.
    ///
    /// Empty when the goal is unreachable or equal to `start`.
    pub fn find_path(&self, start: Coord, goal: Coord) -> Vec<Coord> {
        let mut open: BinaryHeap<Reverse<OpenNode>> = BinaryHeap::new();
        let mut in_open: HashMap<Coord, usize> = HashMap::new();
        let mut closed: HashSet<Coord> = HashSet::new();
        let mut came_from: HashMap<Coord, Coord> = HashMap::new();
        let mut g_score: HashMap<Coord, i32> = HashMap::new();
        let mut f_score: HashMap<Coord, i32> = HashMap::new();
        let mut next_seq = 0;

        g_score.insert(start, 0);
        f_score.insert(start, start.dist(&goal));
        in_open.insert(start, next_seq);
        open.push(Reverse(OpenNode {
            f_score: start.dist(&goal),
            seq: next_seq,
            coord: start,
        }));
        next_seq += 1;

        while let Some(Reverse(node)) = open.pop() {
            let current = node.coord;
            // Skip entries superseded by a better f or already expanded
            if closed.contains(&current) || f_score.get(&current) != Some(&node.f_score) {
                continue;
            }

            if current == goal {
                return Self::reconstruct_path(&came_from, current);
            }

            in_open.remove(&current);
            closed.insert(current);

            let current_g = g_score.get(&current).copied().unwrap_or(i32::MAX);
            for neighbor in self.board.neighbors_of(&current) {
                if closed.contains(&neighbor) {
                    continue;
                }

                let seq = match in_open.get(&neighbor) {
                    Some(&seq) => seq,
                    None => {
                        let seq = next_seq;
                        next_seq += 1;
                        in_open.insert(neighbor, seq);
                        seq
                    }
                };

                let tentative_g = current_g.saturating_add(current.dist(&neighbor));
                if tentative_g >= g_score.get(&neighbor).copied().unwrap_or(i32::MAX) {
                    continue;
                }

                let f = tentative_g + neighbor.dist(&goal);
                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative_g);
                f_score.insert(neighbor, f);
                open.push(Reverse(OpenNode {
                    f_score: f,
                    seq,
                    coord: neighbor,
                }));
            }
        }

        Vec::new()
    }

    /// Path length to each reachable target. Unreachable targets are left out.
    ///
    /// Entries follow the order of `targets`.
    pub fn distances_to(&self, start: Coord, targets: &[Coord]) -> Vec<(Coord, usize)> {
        targets
            .iter()
            .filter_map(|&target| {
                let steps = self.find_path(start, target).len();
                if steps > 0 {
                    Some((target, steps))
                } else {
                    None
                }
            })
            .collect()
    }

    fn reconstruct_path(came_from: &HashMap<Coord, Coord>, goal: Coord) -> Vec<Coord> {
        let mut path = vec![goal];
        let mut current = goal;
        while let Some(&previous) = came_from.get(&current) {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        // Drop the start cell
        path.split_off(1)
    }
}
