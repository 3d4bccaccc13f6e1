use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::parse_util;
use crate::parse_util::ParseError;

/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// # Representation
/// Life rules are represented as
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
///
/// # Examples
/// ```notrust
/// b3s23:                0000_0000_0000_1000_0000_0000_0000_1100
///
/// b0s0:                 0000_0000_0000_0000_0000_0000_0000_0000
/// b012345678s012345678: 0000_0001_1111_1111_0000_0001_1111_1111
/// ```
///
/// See: https://conwaylife.com/wiki/Rulestring
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    rule: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

impl RuleSet {
    /// Create a new `RuleSet` for the given births and survivals. For both `b` and
    /// `s`, numbers are set on a bit basis. For instance if bit `i` in `b` is on, it
    /// means `i` is included in the set of births. Any bit past the 8th is ignored.
    pub const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
        }
    }

    pub fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    /// Whether a dead cell with `n` live neighbors comes alive.
    pub fn is_birth(&self, n: u8) -> bool {
        n <= 8 && self.births() & (1 << n) != 0
    }

    /// Whether a live cell with `n` live neighbors stays alive.
    pub fn is_survival(&self, n: u8) -> bool {
        n <= 8 && self.survivals() & (1 << n) != 0
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleSet({self})")
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = |mask: u16| -> String {
            (0..=8u8)
                .filter(|&n| mask & (1 << n) != 0)
                .map(|n| char::from(b'0' + n))
                .collect()
        };

        write!(f, "B{}/S{}", digits(self.births()), digits(self.survivals()))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("Rule must start with 'b' or 'B'")]
    MissingBirth,

    #[error("Survivals must start with 's' or 'S'")]
    MissingSurvival,

    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),

    #[error("Neighbor counts are digits between 0 and 8, found '{got}'")]
    InvalidCount { got: char },

    #[error("Unexpected trailing input \"{rest}\"")]
    Trailing { rest: String },
}

// Parse rules that look like b3/s23
pub(crate) fn parse_rule(bytes: &[u8]) -> Result<(RuleSet, &[u8]), RuleError> {
    let (Some(b'b' | b'B'), bytes) = parse_util::take_1(bytes) else {
        return Err(RuleError::MissingBirth);
    };

    let (b, bytes) = parse_util::take_until(b'/', bytes);
    let bytes = parse_util::expect(b'/', bytes)?;

    let (Some(b's' | b'S'), bytes) = parse_util::take_1(bytes) else {
        return Err(RuleError::MissingSurvival);
    };

    let (s, bytes) = parse_util::take_until_ws(bytes);

    let b = bytes_to_num(b)?;
    let s = bytes_to_num(s)?;

    Ok((RuleSet::new(b, s), bytes))
}

/// Convert the human readable birth/survival number to a packed bit representation
fn bytes_to_num(bytes: &[u8]) -> Result<u16, RuleError> {
    let mut n = 0;

    for &b in bytes {
        if !(b'0'..=b'8').contains(&b) {
            return Err(RuleError::InvalidCount { got: b as char });
        }

        n |= 1 << (b - b'0');
    }

    Ok(n)
}

impl FromStr for RuleSet {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rule, rest) = parse_rule(s.trim().as_bytes())?;

        if !rest.is_empty() {
            return Err(RuleError::Trailing {
                rest: String::from_utf8_lossy(rest).to_string(),
            });
        }

        Ok(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::B3S23;
    use super::RuleError;
    use super::RuleSet;

    #[test]
    fn parses_conway() {
        let rule: RuleSet = "b3/s23".parse().unwrap();

        assert_eq!(rule, B3S23);
        assert_eq!(rule.to_string(), "B3/S23");
    }

    #[test]
    fn conway_table() {
        let born: Vec<u8> = (0..=8).filter(|&n| B3S23.is_birth(n)).collect();
        let kept: Vec<u8> = (0..=8).filter(|&n| B3S23.is_survival(n)).collect();

        assert_eq!(born, vec![3]);
        assert_eq!(kept, vec![2, 3]);
    }

    #[test]
    fn empty_sets_are_allowed() {
        let rule: RuleSet = "B/S".parse().unwrap();

        assert_eq!(rule.births(), 0);
        assert_eq!(rule.survivals(), 0);
    }

    #[test]
    fn rejects_malformed_rules() {
        assert_eq!("3/23".parse::<RuleSet>(), Err(RuleError::MissingBirth));
        assert_eq!(
            "b39/s23".parse::<RuleSet>(),
            Err(RuleError::InvalidCount { got: '9' })
        );
        assert!(matches!(
            "b3s23".parse::<RuleSet>(),
            Err(RuleError::ParseError(_))
        ));
        assert_eq!("b3/23".parse::<RuleSet>(), Err(RuleError::MissingSurvival));
    }
}
