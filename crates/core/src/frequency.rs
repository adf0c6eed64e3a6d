//! Symbol frequency analysis.
//!
//! A [`FrequencyTable`] counts byte occurrences and remembers the order in
//! which each byte was first observed. That order is the tie-break key for
//! tree construction, so it is preserved byte-for-byte in the container.

use crate::error::{ContainerError, Error, Result};

/// Occurrence counts for every byte value present in an input.
///
/// # Invariants
/// - Every entry has a count > 0
/// - Each symbol appears at most once
/// - `entries` is in first-observed order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    /// (symbol, count) pairs in first-observed order
    entries: Vec<(u8, u64)>,
    /// Position of each symbol within `entries`
    index: [Option<u16>; 256],
    /// Sum of all counts
    total: u64,
}

impl FrequencyTable {
    /// Count the symbols of `input`.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` if `input` has zero bytes.
    pub fn from_bytes(input: &[u8]) -> Result<Self> {
        if input.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut table = Self {
            entries: Vec::new(),
            index: [None; 256],
            total: 0,
        };

        for &byte in input {
            match table.index[byte as usize] {
                Some(pos) => table.entries[pos as usize].1 += 1,
                None => {
                    table.index[byte as usize] = Some(table.entries.len() as u16);
                    table.entries.push((byte, 1));
                }
            }
        }
        table.total = input.len() as u64;

        log::debug!(
            "counted {} bytes across {} distinct symbols",
            table.total,
            table.entries.len()
        );

        Ok(table)
    }

    /// Rebuild a table from stored (symbol, count) pairs, keeping their order.
    ///
    /// # Errors
    /// - `ContainerError::InvalidEntryCount` if `entries` is empty
    /// - `ContainerError::ZeroFrequency` for a zero count
    /// - `ContainerError::DuplicateSymbol` for a repeated symbol
    /// - `ContainerError::FrequencyOverflow` if the total exceeds `u64::MAX`
    pub fn from_entries(entries: Vec<(u8, u64)>) -> Result<Self> {
        // More than 256 entries necessarily repeats a symbol and is caught below
        if entries.is_empty() {
            return Err(ContainerError::InvalidEntryCount(0).into());
        }

        let mut index = [None; 256];
        let mut total = 0u64;

        for (pos, &(symbol, count)) in entries.iter().enumerate() {
            if count == 0 {
                return Err(ContainerError::ZeroFrequency(symbol).into());
            }
            if index[symbol as usize].is_some() {
                return Err(ContainerError::DuplicateSymbol(symbol).into());
            }
            index[symbol as usize] = Some(pos as u16);
            total = total
                .checked_add(count)
                .ok_or(ContainerError::FrequencyOverflow)?;
        }

        Ok(Self {
            entries,
            index,
            total,
        })
    }

    /// Count for `symbol`, or `None` if it never occurred.
    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.index[symbol as usize].map(|pos| self.entries[pos as usize].1)
    }

    /// Iterate (symbol, count) pairs in first-observed order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed table; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts (equals the input length).
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Shannon entropy in bits per symbol, a lower bound on the average code length.
    pub fn entropy(&self) -> f64 {
        let total = self.total as f64;
        self.entries
            .iter()
            .map(|&(_, count)| {
                let p = count as f64 / total;
                -p * p.log2()
            })
            .sum()
    }
}
