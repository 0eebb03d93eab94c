//! Drive generators to completion, awaiting whatever they yield.
//!
//! A generator written with [`#[generator]`][`generator`] (or by hand, with
//! [`GeneratorFn`] and [`make_yield!`]) suspends at each `yield_!` with a
//! [`Yieldable`]: a [`Promise`], a nested generator, a callback-style
//! [`Thunk`], or a sequence / keyed bag of those. [`drive`] turns each
//! yielded value into a [`Promise`], awaits it, and feeds the outcome back
//! into the generator, until the generator returns.
//!
//! ```rust
//! use ::co_gen::prelude::*;
//!
//! #[generator]
//! fn add (a: Promise, b: Promise)
//!   -> Result<Value, Error>
//! {
//!     let pair = yield_!(vec![Yieldable::from(a), Yieldable::from(b)])?;
//!     Ok((pair[0].as_i64().unwrap_or(0) + pair[1].as_i64().unwrap_or(0)).into())
//! }
//!
//! let sum = ::futures::executor::block_on(drive(
//!     add(Promise::resolved(40.into()), Promise::resolved(2.into())),
//!     Context::none(),
//!     vec![],
//! ));
//! assert_eq!(sum.unwrap(), 42);
//! ```

#![warn(
    future_incompatible,
    rust_2018_compatibility,
    missing_docs,
    clippy::cargo,
    clippy::pedantic,
)]
#![deny(
    unused_must_use,
)]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(feature = "nightly",
    feature(doc_cfg),
)]

extern crate self as co_gen;

#[path = "public_prelude.rs"]
pub
mod prelude;

mod public_macros;

#[macro_use]
mod utils;

pub use self::error::Error;
mod error;

pub use self::context::Context;
mod context;

pub use self::promise::Promise;
mod promise;

pub use self::generator::*;
mod generator;

pub use self::generator_fn::{Co, GeneratorFn};
pub
mod generator_fn;

pub use self::yieldable::*;
mod yieldable;

pub use self::thunk::{thunk_to_future, Callback, Thunk};
mod thunk;

pub use self::sequence::sequence_to_future;
mod sequence;

pub use self::bag::bag_to_future;
mod bag;

pub use self::coerce::{to_future, Coerced};
mod coerce;

pub use self::drive::{drive, wrap, Routine, Wrapped};
mod drive;

pub use ::serde_json::Value;

#[doc(hidden)] /** Not part of the public API */ pub
mod __ {
    pub use ::core;
}

pub use ::co_gen_proc_macros::generator;

#[cfg(test)]
mod tests;
