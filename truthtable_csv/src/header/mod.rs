//! Header stage: the header row to input and output variable lists
//!
//! Each header column is a plain `NAME`, one bit `NAME:INDEX` of a vector, or
//! a ranged `NAME[HI..0]` / `NAME[N]` followed by blank filler columns. The
//! single column containing `|` divides inputs from outputs.

pub mod context;
pub mod error;
pub mod interpreter;
pub mod range;

pub use context::{BitPresenceTracker, BitViolation, InterpretationContext};
pub use error::{HeaderError, VariableSide};
pub use interpreter::{interpret_header, HeaderInterpreter, InterpretedHeader, SEPARATOR_MARKER};
pub use range::range_width;
