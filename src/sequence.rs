use_prelude!();

use ::futures::{
    future::TryFutureExt,
    stream::{FuturesUnordered, TryStreamExt},
};

use crate::coerce::{to_future, Coerced};

/// Awaits every element of `sequence` concurrently.
///
/// Every element is [coerced][`to_future`] right away, in index order, bound
/// to `ctx`. The promise fulfills with an array of the same length, each slot
/// holding its element's result (elements which are not future-like stand for
/// themselves), or rejects with whichever element rejects first, regardless of
/// its index or of the length of the sequence. Elements still in flight at
/// that point are dropped.
///
/// ```rust
/// use ::co_gen::{prelude::*, sequence_to_future};
/// use ::futures::executor::block_on;
///
/// let all = sequence_to_future(
///     vec![
///         Promise::resolved(1.into()).into(),
///         Value::from(2).into(),
///         Promise::resolved(3.into()).into(),
///     ],
///     &Context::none(),
/// );
/// assert_eq!(block_on(all).unwrap(), ::serde_json::json!([1, 2, 3]));
/// ```
pub
fn sequence_to_future (sequence: Vec<Yieldable>, ctx: &'_ Context)
  -> Promise
{
    ::tracing::debug!(len = sequence.len(), "awaiting sequence");
    let mut results = Vec::with_capacity(sequence.len());
    let mut pending = FuturesUnordered::new();
    for (index, element) in sequence.into_iter().enumerate() {
        match to_future(element, ctx) {
            | Coerced::Future(promise) => {
                results.push(Value::Null);
                pending.push(promise.map_ok(move |value| (index, value)));
            },
            | Coerced::Plain(value) => results.push(value),
        }
    }
    Promise::new(async move {
        // settlement order, not index order
        while let Some((index, value)) = pending.try_next().await? {
            results[index] = value;
        }
        Ok(Value::Array(results))
    })
}
