//! Trip direction types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown direction name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction: {0:?}")]
pub struct InvalidDirection(String);

/// The logical direction of a trip.
///
/// Each route only uses two of these as its operative pair
/// (see [`DirectionPair`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Returns the lowercase name used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = InvalidDirection;

    /// Parse a direction name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "north" => Ok(Direction::North),
            "south" => Ok(Direction::South),
            "east" => Ok(Direction::East),
            "west" => Ok(Direction::West),
            _ => Err(InvalidDirection(s.to_string())),
        }
    }
}

/// The two directions a route operates in.
///
/// Feed direction flags index into the pair: `0` is the first direction,
/// `1` the second.
///
/// # Examples
///
/// ```
/// use transit_normalizer::domain::{Direction, DirectionPair};
///
/// let pair = DirectionPair::new(Direction::North, Direction::South);
/// assert_eq!(pair.from_flag(1), Some(Direction::South));
/// assert_eq!(pair.from_flag(2), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectionPair {
    pub first: Direction,
    pub second: Direction,
}

impl DirectionPair {
    /// Create a pair from its two directions.
    pub fn new(first: Direction, second: Direction) -> Self {
        Self { first, second }
    }

    /// North/South, the pair most routes use.
    pub fn north_south() -> Self {
        Self::new(Direction::North, Direction::South)
    }

    /// East/West.
    pub fn east_west() -> Self {
        Self::new(Direction::East, Direction::West)
    }

    /// Map a feed direction flag onto the pair.
    pub fn from_flag(&self, flag: u8) -> Option<Direction> {
        match flag {
            0 => Some(self.first),
            1 => Some(self.second),
            _ => None,
        }
    }

    /// Returns true if `direction` is one of the pair.
    pub fn contains(&self, direction: Direction) -> bool {
        self.first == direction || self.second == direction
    }

    /// Both directions, first then second.
    pub fn both(&self) -> [Direction; 2] {
        [self.first, self.second]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_case() {
        assert_eq!("North".parse::<Direction>(), Ok(Direction::North));
        assert_eq!("WEST".parse::<Direction>(), Ok(Direction::West));
        assert_eq!("south".parse::<Direction>(), Ok(Direction::South));
    }

    #[test]
    fn reject_unknown() {
        assert!("inbound".parse::<Direction>().is_err());
        assert!("".parse::<Direction>().is_err());
    }

    #[test]
    fn display_matches_serde() {
        for dir in [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ] {
            let json = serde_json::to_string(&dir).unwrap();
            assert_eq!(json, format!("\"{}\"", dir));
        }
    }

    #[test]
    fn flag_mapping() {
        let pair = DirectionPair::east_west();
        assert_eq!(pair.from_flag(0), Some(Direction::East));
        assert_eq!(pair.from_flag(1), Some(Direction::West));
        assert_eq!(pair.from_flag(7), None);
    }

    #[test]
    fn contains() {
        let pair = DirectionPair::north_south();
        assert!(pair.contains(Direction::North));
        assert!(pair.contains(Direction::South));
        assert!(!pair.contains(Direction::East));
        assert_eq!(pair.both(), [Direction::North, Direction::South]);
    }
}
