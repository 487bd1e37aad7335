//! Running state of one header scan
//!
//! Built fresh for every import attempt and consumed when the scan finishes,
//! so repeated or concurrent imports never share state.

use super::error::VariableSide;
use crate::variables::{CapacityError, Variable, VariableList};
use std::collections::HashMap;

/// Why an indexed bit column was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitViolation {
    /// Index out of range, or above a lower index already seen
    Order,
    /// Index already seen
    Duplicate,
}

/// Which bits of one `name:index` vector have appeared so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitPresenceTracker {
    name: String,
    side: VariableSide,
    seen: Vec<bool>,
    lowest_seen: usize,
}

impl BitPresenceTracker {
    /// Tracker for a vector whose first column declared its top bit
    pub fn new(name: impl Into<String>, top_index: usize, side: VariableSide) -> Self {
        let mut seen = vec![false; top_index + 1];
        seen[top_index] = true;
        Self {
            name: name.into(),
            side,
            seen,
            lowest_seen: top_index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn side(&self) -> VariableSide {
        self.side
    }

    pub fn width(&self) -> usize {
        self.seen.len()
    }

    pub fn is_seen(&self, index: usize) -> bool {
        self.seen.get(index).copied().unwrap_or(false)
    }

    /// Record a later column of the vector; indices must keep descending
    pub fn record(&mut self, index: usize) -> Result<(), BitViolation> {
        if index >= self.width() {
            return Err(BitViolation::Order);
        }
        if self.seen[index] {
            return Err(BitViolation::Duplicate);
        }
        if index > self.lowest_seen {
            return Err(BitViolation::Order);
        }
        self.seen[index] = true;
        self.lowest_seen = index;
        Ok(())
    }

    /// Lowest bit index with no column yet
    pub fn first_missing(&self) -> Option<usize> {
        self.seen.iter().position(|seen| !seen)
    }
}

/// Inputs, outputs and bit trackers accumulated while scanning a header
#[derive(Debug, Clone)]
pub struct InterpretationContext {
    pub inputs: VariableList,
    pub outputs: VariableList,
    trackers: Vec<BitPresenceTracker>,
    tracker_index: HashMap<String, usize>,
    separator_column: Option<usize>,
}

impl InterpretationContext {
    pub fn new(inputs: VariableList, outputs: VariableList) -> Self {
        Self {
            inputs,
            outputs,
            trackers: Vec::new(),
            tracker_index: HashMap::new(),
            separator_column: None,
        }
    }

    /// Side new variables are appended to
    pub fn active_side(&self) -> VariableSide {
        if self.separator_column.is_none() {
            VariableSide::Inputs
        } else {
            VariableSide::Outputs
        }
    }

    pub fn separator_column(&self) -> Option<usize> {
        self.separator_column
    }

    /// Record the separator marker; returns false if one was already seen
    pub fn mark_separator(&mut self, column_index: usize) -> bool {
        if self.separator_column.is_some() {
            return false;
        }
        self.separator_column = Some(column_index);
        true
    }

    /// Case-insensitive lookup across inputs and outputs
    pub fn is_duplicate(&self, name: &str) -> bool {
        crate::identifiers::is_duplicate(name, self.inputs.names().chain(self.outputs.names()))
    }

    pub fn add_variable(&mut self, var: Variable) -> Result<(), CapacityError> {
        match self.active_side() {
            VariableSide::Inputs => self.inputs.add(var),
            VariableSide::Outputs => self.outputs.add(var),
        }
    }

    pub fn active_capacity(&self) -> usize {
        match self.active_side() {
            VariableSide::Inputs => self.inputs.max_bits(),
            VariableSide::Outputs => self.outputs.max_bits(),
        }
    }

    pub fn tracker_mut(&mut self, name: &str) -> Option<&mut BitPresenceTracker> {
        let position = *self.tracker_index.get(&name.to_lowercase())?;
        self.trackers.get_mut(position)
    }

    pub fn start_tracker(&mut self, name: &str, top_index: usize) {
        let side = self.active_side();
        self.tracker_index
            .insert(name.to_lowercase(), self.trackers.len());
        self.trackers
            .push(BitPresenceTracker::new(name, top_index, side));
    }

    /// Trackers in the order their vectors were declared
    pub fn trackers(&self) -> &[BitPresenceTracker] {
        &self.trackers
    }
}
