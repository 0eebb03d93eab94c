use_prelude!();

use crate::{
    bag::bag_to_future,
    drive::drive,
    sequence::sequence_to_future,
    thunk::thunk_to_future,
    yieldable::is_truthy,
};

/// Outcome of [`to_future`].
#[derive(Debug)]
pub
enum Coerced {
    /// The yieldable can be awaited through this promise.
    Future(Promise),
    /// The yieldable is a plain value which cannot be awaited; returned
    /// unchanged.
    Plain(Value),
}

/// Normalizes `yieldable` into a [`Promise`], bound to `ctx`.
///
/// Follows the classification of [`Yieldable::shape()`], in precedence order:
///
///  1. [`Shape::Falsy`]: returned unchanged;
///  2. [`Shape::Future`]: returned unchanged, as the very same promise;
///  3. [`Shape::Generator`] / [`Shape::Factory`]: [driven][`drive`] with
///     `ctx` (a factory gets no arguments);
///  4. [`Shape::Thunk`]: [adapted][`thunk_to_future`];
///  5. [`Shape::Sequence`]: [aggregated positionally][`sequence_to_future`];
///  6. [`Shape::Bag`]: [aggregated by key][`bag_to_future`];
///  7. [`Shape::Scalar`]: returned unchanged.
///
/// Only [future-like][`Shape::is_future_like`] shapes yield a
/// [`Coerced::Future`].
pub
fn to_future (yieldable: Yieldable, ctx: &'_ Context)
  -> Coerced
{
    match yieldable {
        | Yieldable::Future(promise) => Coerced::Future(promise),

        | Yieldable::Generator(handle) => {
            Coerced::Future(drive(handle, ctx.clone(), vec![]))
        },
        | Yieldable::Factory(factory) => {
            Coerced::Future(drive(factory, ctx.clone(), vec![]))
        },

        | Yieldable::Thunk(thunk) => Coerced::Future(thunk_to_future(thunk, ctx)),

        | Yieldable::Sequence(sequence) => {
            Coerced::Future(sequence_to_future(sequence, ctx))
        },
        | Yieldable::Bag(bag) => Coerced::Future(bag_to_future(bag, ctx)),

        | Yieldable::Value(value) if !is_truthy(&value) => Coerced::Plain(value),
        | Yieldable::Value(Value::Array(values)) => {
            Coerced::Future(sequence_to_future(
                values.into_iter().map(Yieldable::Value).collect(),
                ctx,
            ))
        },
        | Yieldable::Value(Value::Object(entries)) => {
            Coerced::Future(bag_to_future(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Yieldable::Value(value)))
                    .collect(),
                ctx,
            ))
        },
        | Yieldable::Value(value) => Coerced::Plain(value),
    }
}
