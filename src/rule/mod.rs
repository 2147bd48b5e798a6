//! The recurrence rule codec.
//!
//! This is the only module that knows the serialized `FREQ=...` grammar.
//! Everything else treats a rule as an opaque string: the store persists it
//! unmodified, and the editor round-trips it through `compile`/`decompile`.
//!
//! The grammar is defined over floating local time. `UNTIL` carries the
//! inclusive end-of-day of the civil termination date with a notational `Z`
//! suffix; no UTC conversion is performed on either side of the codec.

pub mod parser;
pub mod serializer;

pub use parser::{ParseError, decompile};
pub use serializer::{CompileError, compile};
