// Filesystem abstraction for persisting timer results.
//
// Provides a mockable interface over the single filesystem operation the exporters need.

mod abstractions;
mod facade;
mod real;

pub(crate) use abstractions::*;
pub(crate) use facade::*;
pub(crate) use real::*;
