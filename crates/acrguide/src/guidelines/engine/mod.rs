//! Building blocks shared by every guideline evaluator.

mod cascade;
pub(crate) mod format;
mod lookup;
mod parse;

pub(crate) use cascade::{Cascade, Verdict};
pub(crate) use lookup::{lookup, Entry};
pub(crate) use parse::{parse_float, parse_int, Admissible};
