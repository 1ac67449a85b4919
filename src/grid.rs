// Grid primitives: cell coordinates and the four movement directions
//
// The board origin is the top-left corner, so moving up decreases y.

use serde::{Deserialize, Serialize};

/// 2D coordinate on the board
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

/// Represents the four possible movement directions for a Battlesnake
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all possible directions, in the order candidate moves are generated
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Converts direction to string representation for API response
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Parses a direction name, ignoring case
    pub fn parse(s: &str) -> Result<Direction, String> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }

    /// Cell offset produced by one step in this direction
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Calculates the next coordinate when moving in this direction
    pub fn apply(&self, coord: &Coord) -> Coord {
        let (dx, dy) = self.offset();
        Coord {
            x: coord.x + dx,
            y: coord.y + dy,
        }
    }
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// Manhattan distance
    pub fn dist(&self, other: &Coord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn left(&self) -> Coord {
        Direction::Left.apply(self)
    }

    pub fn right(&self) -> Coord {
        Direction::Right.apply(self)
    }

    pub fn up(&self) -> Coord {
        Direction::Up.apply(self)
    }

    pub fn down(&self) -> Coord {
        Direction::Down.apply(self)
    }

    /// Orthogonal neighbours in left, right, up, down order
    pub fn surrounding_four(&self) -> [Coord; 4] {
        [self.left(), self.right(), self.up(), self.down()]
    }

    /// Orthogonal neighbours followed by the four diagonals
    pub fn surrounding_eight(&self) -> [Coord; 8] {
        [
            self.left(),
            self.right(),
            self.up(),
            self.down(),
            self.left().up(),
            self.left().down(),
            self.right().up(),
            self.right().down(),
        ]
    }

    pub fn is_adjacent(&self, other: &Coord) -> bool {
        self.dist(other) == 1
    }

    /// Direction of the first differing axis from `self` towards `target`.
    ///
    /// The x axis is checked before y. Identical cells yield `Left`.
    pub fn direction_of(&self, target: &Coord) -> Direction {
        if self.x < target.x {
            Direction::Right
        } else if self.x > target.x {
            Direction::Left
        } else if self.y < target.y {
            Direction::Down
        } else if self.y > target.y {
            Direction::Up
        } else {
            Direction::Left
        }
    }

    /// Nearest candidate by Manhattan distance; ties keep the earliest candidate
    pub fn closest_of<'a, I>(&self, candidates: I) -> Option<Coord>
    where
        I: IntoIterator<Item = &'a Coord>,
    {
        let mut closest: Option<Coord> = None;
        for candidate in candidates {
            match closest {
                Some(best) if self.dist(candidate) >= self.dist(&best) => {}
                _ => closest = Some(*candidate),
            }
        }
        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_up_decreases_y() {
        let c = Coord::new(5, 5);
        assert_eq!(Direction::Up.apply(&c), Coord::new(5, 4));
        assert_eq!(Direction::Down.apply(&c), Coord::new(5, 6));
        assert_eq!(Direction::Left.apply(&c), Coord::new(4, 5));
        assert_eq!(Direction::Right.apply(&c), Coord::new(6, 5));
    }

    #[test]
    fn test_dist_is_manhattan() {
        assert_eq!(Coord::new(0, 0).dist(&Coord::new(3, -4)), 7);
        assert_eq!(Coord::new(2, 2).dist(&Coord::new(2, 2)), 0);
    }

    #[test]
    fn test_direction_of_prefers_x_axis() {
        let origin = Coord::new(3, 3);
        assert_eq!(origin.direction_of(&Coord::new(4, 0)), Direction::Right);
        assert_eq!(origin.direction_of(&Coord::new(0, 9)), Direction::Left);
        assert_eq!(origin.direction_of(&Coord::new(3, 7)), Direction::Down);
        assert_eq!(origin.direction_of(&Coord::new(3, 1)), Direction::Up);
        assert_eq!(origin.direction_of(&origin), Direction::Left);
    }

    #[test]
    fn test_direction_of_neighbours_round_trips() {
        let origin = Coord::new(1, 1);
        for dir in Direction::all().iter() {
            assert_eq!(origin.direction_of(&dir.apply(&origin)), *dir);
        }
    }

    #[test]
    fn test_surrounding_eight_contains_diagonals() {
        let ring = Coord::new(0, 0).surrounding_eight();
        assert!(ring.contains(&Coord::new(-1, -1)));
        assert!(ring.contains(&Coord::new(1, 1)));
        assert!(!ring.contains(&Coord::new(0, 0)));
        assert_eq!(&ring[..4], &Coord::new(0, 0).surrounding_four()[..]);
    }

    #[test]
    fn test_closest_of_keeps_first_on_ties() {
        let from = Coord::new(0, 0);
        let candidates = vec![Coord::new(2, 0), Coord::new(0, 2), Coord::new(1, 0)];
        assert_eq!(from.closest_of(&candidates), Some(Coord::new(1, 0)));

        let tied = vec![Coord::new(0, 2), Coord::new(2, 0)];
        assert_eq!(from.closest_of(&tied), Some(Coord::new(0, 2)));

        assert_eq!(from.closest_of(&Vec::new()), None);
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!(Direction::parse("UP").unwrap(), Direction::Up);
        assert_eq!(Direction::parse("Down").unwrap(), Direction::Down);
        assert!(Direction::parse("north").is_err());
    }
}
