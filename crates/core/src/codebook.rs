//! Code book generation.
//!
//! Walks a [`PrefixTree`] root-to-leaf, appending `0` for a left edge and `1`
//! for a right edge, and assigns the accumulated path to each leaf's symbol.
//! The walk uses an explicit stack; each stack frame owns its own path, so
//! nothing is shared between branches or between calls.

use crate::frequency::FrequencyTable;
use crate::tree::{Node, PrefixTree};
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A non-empty bit-string assigned to one symbol (`false` = 0, `true` = 1).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code(Vec<bool>);

impl Code {
    /// The bits of this code, first bit first.
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Codes produced by a tree walk are never empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if `self` is a prefix of `other` (including equality).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl Borrow<[bool]> for Code {
    fn borrow(&self) -> &[bool] {
        &self.0
    }
}

/// Error parsing a [`Code`] from its `'0'`/`'1'` text form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCodeError {
    #[error("a code has at least one bit")]
    Empty,

    #[error("invalid character {character:?} at position {position}: expected '0' or '1'")]
    InvalidCharacter { character: char, position: usize },
}

impl FromStr for Code {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = s
            .chars()
            .enumerate()
            .map(|(position, character)| match character {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(ParseCodeError::InvalidCharacter {
                    character,
                    position,
                }),
            })
            .collect::<Result<Vec<bool>, _>>()?;

        if bits.is_empty() {
            return Err(ParseCodeError::Empty);
        }
        Ok(Code(bits))
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Forward (symbol -> code) and reverse (code -> symbol) maps.
///
/// # Invariants
/// - The set of codes is prefix-free
/// - `reverse` is the exact inverse of `forward`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBook {
    forward: BTreeMap<u8, Code>,
    reverse: HashMap<Code, u8>,
    max_code_len: usize,
}

impl CodeBook {
    /// Derive the code book from a tree.
    pub fn from_tree(tree: &PrefixTree) -> Self {
        let mut forward = BTreeMap::new();
        let mut stack: Vec<(&Node, Vec<bool>)> = vec![(tree.root(), Vec::new())];

        while let Some((node, path)) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => {
                    log::trace!("symbol {:#04x} -> {}", symbol, Code(path.clone()));
                    forward.insert(*symbol, Code(path));
                }
                Node::Internal { left, right, .. } => {
                    if let Some(right) = right {
                        let mut right_path = path.clone();
                        right_path.push(true);
                        stack.push((right, right_path));
                    }
                    let mut left_path = path;
                    left_path.push(false);
                    stack.push((left, left_path));
                }
            }
        }

        let reverse: HashMap<Code, u8> = forward
            .iter()
            .map(|(&symbol, code)| (code.clone(), symbol))
            .collect();
        let max_code_len = forward.values().map(Code::len).max().unwrap_or(0);

        Self {
            forward,
            reverse,
            max_code_len,
        }
    }

    /// Build the tree for `table` and derive its code book.
    pub fn from_table(table: &FrequencyTable) -> Self {
        Self::from_tree(&PrefixTree::build(table))
    }

    /// Code assigned to `symbol`.
    pub fn code(&self, symbol: u8) -> Option<&Code> {
        self.forward.get(&symbol)
    }

    /// Symbol whose code is exactly `bits`.
    pub fn symbol(&self, bits: &[bool]) -> Option<u8> {
        self.reverse.get(bits).copied()
    }

    /// Iterate (symbol, code) pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.forward.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Length of the longest code.
    pub fn max_code_len(&self) -> usize {
        self.max_code_len
    }

    /// Expected bits per symbol when coding data distributed like `table`.
    pub fn average_code_len(&self, table: &FrequencyTable) -> f64 {
        if table.total() == 0 {
            return 0.0;
        }
        let bits: u128 = table
            .iter()
            .filter_map(|(symbol, count)| {
                self.code(symbol)
                    .map(|code| code.len() as u128 * count as u128)
            })
            .sum();
        bits as f64 / table.total() as f64
    }

    /// Check that no code is a prefix of another.
    ///
    /// In lexicographic order a code that prefixes any other code also
    /// prefixes its immediate successor, so adjacent pairs suffice.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&Code> = self.forward.values().collect();
        codes.sort();
        codes.windows(2).all(|pair| !pair[0].is_prefix_of(pair[1]))
    }
}
