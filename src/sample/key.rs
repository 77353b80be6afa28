use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SweepError};

lazy_static! {
    /// `<sample>-<iteration><H|V>` anywhere in a file name
    static ref KEY_PATTERN: Regex = Regex::new(r"(\d+)-(\d+)([HV])").expect("key pattern is valid");
}

/// Imaging direction of a micrograph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "H")]
    Horizontal,
    #[serde(rename = "V")]
    Vertical,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Horizontal => "H",
            Direction::Vertical => "V",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sample/iteration/direction key carried by a source file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SampleKey {
    pub sample: u64,
    pub iteration: u64,
    pub direction: Direction,
}

impl fmt::Display for SampleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}{}", self.sample, self.iteration, self.direction)
    }
}

/// Extract the sample key from a file name.
///
/// The first `<digits>-<digits><H|V>` match wins; leading zeros are accepted.
/// Digit groups that overflow `u64` are rejected like any other bad name.
pub fn parse_key(name: &str) -> Result<SampleKey> {
    let key_error = || SweepError::KeyFormat {
        name: name.to_string(),
    };

    let captures = KEY_PATTERN.captures(name).ok_or_else(key_error)?;

    let sample = captures[1].parse::<u64>().map_err(|_| key_error())?;
    let iteration = captures[2].parse::<u64>().map_err(|_| key_error())?;
    let direction = match &captures[3] {
        "H" => Direction::Horizontal,
        _ => Direction::Vertical,
    };

    Ok(SampleKey {
        sample,
        iteration,
        direction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_names() {
        let key = parse_key("12-3H.png").unwrap();
        assert_eq!(key.sample, 12);
        assert_eq!(key.iteration, 3);
        assert_eq!(key.direction, Direction::Horizontal);

        let key = parse_key("7-2V.jpg").unwrap();
        assert_eq!((key.sample, key.iteration, key.direction), (7, 2, Direction::Vertical));
    }

    #[test]
    fn test_key_found_anywhere_in_name() {
        let key = parse_key("scan_batch_004-012V_final.png").unwrap();
        assert_eq!((key.sample, key.iteration), (4, 12));
        assert_eq!(key.direction, Direction::Vertical);
    }

    #[test]
    fn test_round_trip_over_generated_names() {
        for sample in [0u64, 1, 9, 10, 123, 99_999] {
            for iteration in [0u64, 2, 45, 1_000] {
                for direction in [Direction::Horizontal, Direction::Vertical] {
                    let name = format!("{}-{}{}.png", sample, iteration, direction);
                    let key = parse_key(&name).unwrap();
                    assert_eq!(key, SampleKey { sample, iteration, direction });
                    assert_eq!(format!("{}.png", key), name);
                }
            }
        }
    }

    #[test]
    fn test_malformed_names_fail() {
        for name in ["sample1.png", "12-3.png", "12_3H.png", "-3H.png", "12-H.png", "12-3h.png", ""] {
            match parse_key(name) {
                Err(SweepError::KeyFormat { name: reported }) => assert_eq!(reported, name),
                other => panic!("expected KeyFormat for {:?}, got {:?}", name, other),
            }
        }
    }

    #[test]
    fn test_overflowing_digits_fail() {
        let name = "99999999999999999999999-1H.png";
        assert!(matches!(parse_key(name), Err(SweepError::KeyFormat { .. })));
    }
}
