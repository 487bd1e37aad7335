//! Variables and capacity-bounded variable lists

use serde::Serialize;
use std::fmt;

/// A named bit-vector; width 1 is a plain signal
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Variable {
    pub name: String,
    pub width: usize,
}

impl Variable {
    pub fn new(name: impl Into<String>, width: usize) -> Self {
        Self {
            name: name.into(),
            width,
        }
    }

    /// Bit names from most to least significant (`B[3]` .. `B[0]`, or `A`)
    pub fn bit_names(&self) -> Vec<String> {
        if self.width == 1 {
            vec![self.name.clone()]
        } else {
            (0..self.width)
                .rev()
                .map(|bit| format!("{}[{}]", self.name, bit))
                .collect()
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width == 1 {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}[{}..0]", self.name, self.width - 1)
        }
    }
}

/// Adding a variable would exceed the list's bit capacity
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("adding {requested} bit(s) to {current} would exceed the limit of {max_bits}")]
pub struct CapacityError {
    pub current: usize,
    pub requested: usize,
    pub max_bits: usize,
}

/// Ordered variables with a maximum total bit count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableList {
    vars: Vec<Variable>,
    max_bits: usize,
}

impl VariableList {
    pub fn new(max_bits: usize) -> Self {
        Self {
            vars: Vec::new(),
            max_bits,
        }
    }

    /// Input list sized to the compile-time input capacity
    pub fn inputs() -> Self {
        Self::new(crate::config::compile_time::table::MAX_INPUT_BITS)
    }

    /// Output list sized to the compile-time output capacity
    pub fn outputs() -> Self {
        Self::new(crate::config::compile_time::table::MAX_OUTPUT_BITS)
    }

    pub fn add(&mut self, var: Variable) -> Result<(), CapacityError> {
        let current = self.total_bits();
        if current.saturating_add(var.width) > self.max_bits {
            return Err(CapacityError {
                current,
                requested: var.width,
                max_bits: self.max_bits,
            });
        }
        self.vars.push(var);
        Ok(())
    }

    pub fn vars(&self) -> &[Variable] {
        &self.vars
    }

    pub fn max_bits(&self) -> usize {
        self.max_bits
    }

    pub fn total_bits(&self) -> usize {
        self.vars.iter().map(|v| v.width).sum()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.iter().map(|v| v.name.as_str())
    }

    pub fn bit_names(&self) -> Vec<String> {
        self.vars.iter().flat_map(Variable::bit_names).collect()
    }

    pub fn into_vars(self) -> Vec<Variable> {
        self.vars
    }
}
