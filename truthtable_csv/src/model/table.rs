//! Installed truth table and its evaluation

use super::entry::{Entry, TruthTableRow};
use crate::variables::Variable;
use serde::Serialize;
use std::collections::HashMap;

/// Visible rows over a fixed set of input and output variables
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TruthTable {
    inputs: Vec<Variable>,
    outputs: Vec<Variable>,
    input_bits: usize,
    output_bits: usize,
    rows: Vec<TruthTableRow>,
}

impl TruthTable {
    pub fn new(inputs: Vec<Variable>, outputs: Vec<Variable>, rows: Vec<TruthTableRow>) -> Self {
        let input_bits = inputs.iter().map(|v| v.width).sum();
        let output_bits = outputs.iter().map(|v| v.width).sum();
        Self {
            inputs,
            outputs,
            input_bits,
            output_bits,
            rows,
        }
    }

    pub fn inputs(&self) -> &[Variable] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Variable] {
        &self.outputs
    }

    pub fn input_bits(&self) -> usize {
        self.input_bits
    }

    pub fn output_bits(&self) -> usize {
        self.output_bits
    }

    pub fn rows(&self) -> &[TruthTableRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of input combinations (2^input_bits)
    pub fn combination_count(&self) -> u64 {
        1u64 << self.input_bits
    }

    /// Output bit for one input combination; the first input column is the MSB
    ///
    /// The last row matching the combination wins. Combinations no row covers
    /// read as don't care.
    pub fn output(&self, input_index: u64, bit: usize) -> Entry {
        if bit >= self.output_bits {
            return Entry::DontCare;
        }
        self.rows
            .iter()
            .rev()
            .find(|row| self.matches(row, input_index))
            .and_then(|row| row.get(self.input_bits + bit).copied())
            .unwrap_or(Entry::DontCare)
    }

    /// One fully specified row per input combination
    pub fn expanded_rows(&self) -> Vec<TruthTableRow> {
        (0..self.combination_count())
            .map(|index| {
                let mut row = self.input_pattern(index);
                row.extend((0..self.output_bits).map(|bit| self.output(index, bit)));
                row
            })
            .collect()
    }

    fn input_pattern(&self, input_index: u64) -> TruthTableRow {
        (0..self.input_bits)
            .map(|position| Entry::from_bit(self.input_bit(input_index, position)))
            .collect()
    }

    fn input_bit(&self, input_index: u64, position: usize) -> bool {
        (input_index >> (self.input_bits - 1 - position)) & 1 == 1
    }

    fn matches(&self, row: &[Entry], input_index: u64) -> bool {
        row.iter()
            .take(self.input_bits)
            .enumerate()
            .all(|(position, entry)| match entry {
                Entry::DontCare => true,
                Entry::One => self.input_bit(input_index, position),
                Entry::Zero => !self.input_bit(input_index, position),
            })
    }
}

fn split_row(row: &[Entry], input_bits: usize) -> (&[Entry], &[Entry]) {
    row.split_at(input_bits.min(row.len()))
}

/// Input bits of one row as masks: `care` marks specified positions, `value` the ones
#[derive(Debug, Clone, Copy)]
struct InputMask {
    care: u64,
    value: u64,
}

impl InputMask {
    fn of(inputs: &[Entry]) -> Self {
        let mut mask = InputMask { care: 0, value: 0 };
        for (position, entry) in inputs.iter().enumerate() {
            let bit = 1u64 << position;
            match entry {
                Entry::Zero => mask.care |= bit,
                Entry::One => {
                    mask.care |= bit;
                    mask.value |= bit;
                }
                Entry::DontCare => {}
            }
        }
        mask
    }
}

/// Earliest row of a bucket and the earliest row whose outputs differ from it
struct Bucket<'a> {
    first: (usize, &'a [Entry]),
    differing: Option<(usize, &'a [Entry])>,
}

impl<'a> Bucket<'a> {
    fn add(&mut self, index: usize, outputs: &'a [Entry]) {
        if self.differing.is_none() && outputs != self.first.1 {
            self.differing = Some((index, outputs));
        }
    }

    /// Earliest row in the bucket with outputs other than `outputs`
    fn partner(&self, outputs: &[Entry]) -> Option<usize> {
        if self.first.1 != outputs {
            Some(self.first.0)
        } else {
            self.differing.map(|(index, _)| index)
        }
    }
}

/// First pair of rows (1-based) whose inputs overlap while their outputs differ
///
/// Pairs are ordered by their later row, then their earlier row. Rows are
/// grouped by which input positions they specify; two groups are compared by
/// hashing one side on the positions both specify, so the cost grows with
/// the row count times the number of distinct don't-care layouts squared.
pub fn find_conflict(rows: &[TruthTableRow], input_bits: usize) -> Option<(usize, usize)> {
    if input_bits > u64::BITS as usize {
        return find_conflict_pairwise(rows, input_bits);
    }

    let split: Vec<(InputMask, &[Entry])> = rows
        .iter()
        .map(|row| {
            let (inputs, outputs) = split_row(row, input_bits);
            (InputMask::of(inputs), outputs)
        })
        .collect();

    // Row indices per care mask, groups in order of first appearance
    let mut group_of: HashMap<u64, usize> = HashMap::new();
    let mut groups: Vec<(u64, Vec<usize>)> = Vec::new();
    for (index, (mask, _)) in split.iter().enumerate() {
        let group = *group_of.entry(mask.care).or_insert_with(|| {
            groups.push((mask.care, Vec::new()));
            groups.len() - 1
        });
        groups[group].1.push(index);
    }

    let mut conflict: Option<(usize, usize)> = None;
    for (a, (care_a, members_a)) in groups.iter().enumerate() {
        for (care_b, members_b) in &groups[a..] {
            let shared = care_a & care_b;

            let mut buckets: HashMap<u64, Bucket<'_>> = HashMap::new();
            for &index in members_a {
                let (mask, outputs) = split[index];
                buckets
                    .entry(mask.value & shared)
                    .and_modify(|bucket| bucket.add(index, outputs))
                    .or_insert(Bucket {
                        first: (index, outputs),
                        differing: None,
                    });
            }

            for &index in members_b {
                let (mask, outputs) = split[index];
                let partner = buckets
                    .get(&(mask.value & shared))
                    .and_then(|bucket| bucket.partner(outputs));
                if let Some(other) = partner {
                    let pair = (other.min(index), other.max(index));
                    if conflict.map_or(true, |current| (pair.1, pair.0) < (current.1, current.0)) {
                        conflict = Some(pair);
                    }
                }
            }
        }
    }

    conflict.map(|(first, second)| (first + 1, second + 1))
}

/// Direct comparison of every pair, for inputs too wide for a mask
fn find_conflict_pairwise(rows: &[TruthTableRow], input_bits: usize) -> Option<(usize, usize)> {
    rows.iter().enumerate().skip(1).find_map(|(second, row)| {
        let (inputs, outputs) = split_row(row, input_bits);
        rows[..second]
            .iter()
            .position(|earlier| {
                let (earlier_inputs, earlier_outputs) = split_row(earlier, input_bits);
                earlier_outputs != outputs
                    && earlier_inputs.iter().zip(inputs).all(|(a, b)| a.overlaps(b))
            })
            .map(|first| (first + 1, second + 1))
    })
}
