#[macro_use]
mod macros;

pub(in crate)
mod prelude;
