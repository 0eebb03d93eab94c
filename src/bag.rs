use_prelude!();

use ::futures::{
    future::TryFutureExt,
    stream::{FuturesUnordered, TryStreamExt},
};
use ::serde_json::Map;

use crate::coerce::{to_future, Coerced};

/// Awaits every entry of `bag` concurrently, keeping its keys.
///
/// Every entry is [coerced][`to_future`] right away, bound to `ctx`. Entries
/// which are not future-like are copied into the result as they are; the
/// other keys hold `null` until their promise fulfills. The promise fulfills
/// with the completed object once every entry has, or rejects with whichever
/// entry rejects first. Entries still in flight at that point are dropped.
///
/// ```rust
/// use ::co_gen::{prelude::*, bag_to_future};
/// use ::futures::executor::block_on;
/// use ::std::collections::BTreeMap;
///
/// let mut bag = BTreeMap::new();
/// bag.insert("a".to_owned(), Yieldable::from(Promise::resolved(1.into())));
/// bag.insert("b".to_owned(), Value::from(2).into());
/// assert_eq!(
///     block_on(bag_to_future(bag, &Context::none())).unwrap(),
///     ::serde_json::json!({ "a": 1, "b": 2 }),
/// );
/// ```
pub
fn bag_to_future (bag: BTreeMap<String, Yieldable>, ctx: &'_ Context)
  -> Promise
{
    ::tracing::debug!(keys = bag.len(), "awaiting keyed bag");
    let mut results = Map::new();
    let mut pending = FuturesUnordered::new();
    for (key, entry) in bag {
        match to_future(entry, ctx) {
            | Coerced::Future(promise) => {
                results.insert(key.clone(), Value::Null);
                pending.push(promise.map_ok(move |value| (key, value)));
            },
            | Coerced::Plain(value) => {
                results.insert(key, value);
            },
        }
    }
    Promise::new(async move {
        while let Some((key, value)) = pending.try_next().await? {
            results.insert(key, value);
        }
        Ok(Value::Object(results))
    })
}
