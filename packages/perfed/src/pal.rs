//! Platform abstraction layer for the clock and the filesystem.
//!
//! Each concern has a trait, a real implementation and a facade enum that production code
//! talks to. Test builds add a fake clock and a `mockall` generated filesystem so timings and
//! writes can be asserted exactly.

mod clock;
mod filesystem;

pub(crate) use clock::*;
pub(crate) use filesystem::*;
