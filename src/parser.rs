//! # Text forms
//!
//! [`FromStr`] implementations reading back what the `Display` impls write:
//!
//! - permutations in cycle form, `(0,4)(1,5)(2,6,3,7)`, or in one-line form,
//!   `4 5 6 7 0 1 3 2` / `4,5,6,7,0,1,3,2`;
//! - patterns as `[0,2](1,3), {0,2}`, where the adjacency part is optional.
//!
//! Whitespace between tokens is ignored.
//!
//! ```
//! use cycpatt::{pattern::InteractingCyclePattern, permutation::Permutation};
//!
//! let p: Permutation = "(0,4)(1,5)(2,6,3,7)".parse().unwrap();
//! assert_eq!(p, "4 5 6 7 0 1 3 2".parse().unwrap());
//!
//! let pattern: InteractingCyclePattern = "[0, 2] (1, 3)".parse().unwrap();
//! assert_eq!(pattern.to_string(), "[0,2](1,3), {}");
//! ```

use std::str::FromStr;

use thiserror::Error;

use crate::{
    pattern::{InteractingCyclePattern, PatternError, Slot},
    permutation::{Permutation, PermutationError},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected} at byte {at}")]
    Expected { expected: &'static str, at: usize },

    #[error("{token:?} is not a valid integer")]
    Integer { token: String },

    #[error(transparent)]
    Permutation(#[from] PermutationError),

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

struct Cursor<'s> {
    src: &'s str,
    pos: usize,
}

impl<'s> Cursor<'s> {
    fn new(src: &'s str) -> Self {
        Cursor { src, pos: 0 }
    }

    fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.rest().is_empty()
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_whitespace();
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: char, expected: &'static str) -> Result<(), ParseError> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(ParseError::Expected {
                expected,
                at: self.pos,
            })
        }
    }

    fn finish(&mut self) -> Result<(), ParseError> {
        if self.at_end() {
            Ok(())
        } else {
            Err(ParseError::Expected {
                expected: "end of input",
                at: self.pos,
            })
        }
    }

    fn integer(&mut self) -> Result<usize, ParseError> {
        self.skip_whitespace();
        let rest = self.rest();
        let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 {
            return Err(ParseError::Expected {
                expected: "an integer",
                at: self.pos,
            });
        }
        let token = &rest[..digits];
        self.pos += digits;
        token.parse().map_err(|_| ParseError::Integer {
            token: token.to_string(),
        })
    }

    /// A comma separated list of integers, up to and including `close`.
    /// The opening delimiter has already been consumed.
    fn list(&mut self, close: char, expected: &'static str) -> Result<Vec<usize>, ParseError> {
        let mut values = Vec::new();
        if self.eat(close) {
            return Ok(values);
        }
        loop {
            values.push(self.integer()?);
            if !self.eat(',') {
                self.expect(close, expected)?;
                return Ok(values);
            }
        }
    }
}

impl FromStr for Permutation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cursor = Cursor::new(s);

        if cursor.rest().trim_start().starts_with('(') {
            let mut cycles = Vec::new();
            while cursor.eat('(') {
                cycles.push(cursor.list(')', "',' or ')'")?);
            }
            cursor.finish()?;
            return Ok(Permutation::from_disjoint_cycles(&cycles)?);
        }

        let mut map = Vec::new();
        while !cursor.at_end() {
            map.push(cursor.integer()?);
            cursor.eat(',');
        }
        Ok(Permutation::from_map(map)?)
    }
}

impl FromStr for InteractingCyclePattern {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cursor = Cursor::new(s);

        let mut slots = Vec::new();
        loop {
            if cursor.eat('[') {
                slots.push(Slot::open(cursor.list(']', "',' or ']'")?));
            } else if cursor.eat('(') {
                slots.push(Slot::closed(cursor.list(')', "',' or ')'")?));
            } else {
                break;
            }
        }

        let mut adjacencies = Vec::new();
        if cursor.eat(',') {
            cursor.expect('{', "'{'")?;
            adjacencies = cursor.list('}', "',' or '}'")?;
        }
        cursor.finish()?;

        Ok(InteractingCyclePattern::new(slots, adjacencies)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permutation_forms() {
        let cyclic: Permutation = "(0,4)(1,5)(2,6,3,7)".parse().unwrap();
        let spaced: Permutation = "4 5 6 7 0 1 3 2".parse().unwrap();
        let commas: Permutation = " 4, 5,6,7,0,1,3,2 ".parse().unwrap();
        assert_eq!(cyclic, spaced);
        assert_eq!(spaced, commas);
        assert_eq!(cyclic.to_string(), "(0,4)(1,5)(2,6,3,7)");

        let rotated: Permutation = "( 3,7,2,6 ) (1,5)(4,0)".parse().unwrap();
        assert_eq!(rotated.to_string(), "(3,7,2,6)(1,5)(4,0)");
        assert_eq!(rotated, cyclic);

        let empty: Permutation = "".parse().unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn permutation_errors() {
        assert_eq!(
            "(0,1)(1)".parse::<Permutation>(),
            Err(ParseError::Permutation(PermutationError::Duplicate {
                value: 1
            }))
        );
        assert_eq!(
            "0 1 x".parse::<Permutation>(),
            Err(ParseError::Expected {
                expected: "an integer",
                at: 4
            })
        );
        assert_eq!(
            "(0,1".parse::<Permutation>(),
            Err(ParseError::Expected {
                expected: "',' or ')'",
                at: 4
            })
        );
        assert_eq!(
            "(0,1) 2".parse::<Permutation>(),
            Err(ParseError::Expected {
                expected: "end of input",
                at: 6
            })
        );
        assert!(matches!(
            "99999999999999999999999".parse::<Permutation>(),
            Err(ParseError::Integer { .. })
        ));
    }

    #[test]
    fn pattern_round_trip() {
        for text in [
            "[0,2][1,3], {}",
            "[0,2][1,3], {0,2}",
            "[0,2](1,3), {}",
            "(0)(1), {1}",
        ] {
            let pattern: InteractingCyclePattern = text.parse().unwrap();
            assert_eq!(pattern.to_string(), text);
        }

        let bare: InteractingCyclePattern = "[1,0]".parse().unwrap();
        assert_eq!(bare.to_string(), "[1,0], {}");
    }

    #[test]
    fn pattern_errors() {
        assert_eq!(
            "[0,2][1,3], {4}".parse::<InteractingCyclePattern>(),
            Err(ParseError::Pattern(PatternError::AdjacencyOutOfRange {
                position: 4,
                len: 4
            }))
        );
        assert_eq!(
            "[0,2], 1".parse::<InteractingCyclePattern>(),
            Err(ParseError::Expected {
                expected: "'{'",
                at: 7
            })
        );
        assert_eq!(
            "[0,2] x".parse::<InteractingCyclePattern>(),
            Err(ParseError::Expected {
                expected: "end of input",
                at: 6
            })
        );
        assert!(matches!(
            "[]".parse::<InteractingCyclePattern>(),
            Err(ParseError::Pattern(PatternError::EmptySlot { slot: 0 }))
        ));
    }
}
