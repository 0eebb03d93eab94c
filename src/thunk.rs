//! Callback-style asynchronous operations.

use_prelude!();

use ::futures::channel::oneshot;

use crate::yieldable::is_truthy;

/// A callback-style operation: invoked once with the [`Context`] and a
/// completion [`Callback`], which it eventually calls.
pub
struct Thunk(
    Box<dyn FnOnce(&'_ Context, Callback) + Send>,
);

impl Thunk {
    /// Wraps `f`.
    pub
    fn new (f: impl FnOnce(&'_ Context, Callback) + Send + 'static)
      -> Self
    {
        Self(Box::new(f))
    }
}

impl ::core::fmt::Debug for Thunk {
    fn fmt (self: &'_ Thunk, f: &'_ mut ::core::fmt::Formatter<'_>)
      -> ::core::fmt::Result
    {
        f   .debug_struct("Thunk")
            .finish_non_exhaustive()
    }
}

/// The completion callback handed to a [`Thunk`].
///
/// Clones share the same destination: whichever clone is called first
/// settles the promise, every later call is ignored.
#[derive(Clone)]
pub
struct Callback {
    tx: Arc<Mutex<Option<oneshot::Sender<Result<Value, Error>>>>>,
}

impl Callback {
    /// Node-style completion.
    ///
    ///   - a truthy `err` rejects with it;
    ///   - otherwise, a single result fulfills with that result, several
    ///     results fulfill with an array of them, and none fulfills with
    ///     `null`.
    pub
    fn call (self: &'_ Self, err: Value, results: Vec<Value>)
    {
        if is_truthy(&err) {
            return self.settle(Err(Error::Rejected(err)));
        }
        let mut results = results;
        self.settle(Ok(match results.len() {
            | 0 => Value::Null,
            | 1 => results.swap_remove(0),
            | _ => Value::Array(results),
        }));
    }

    /// Fulfills with `value`.
    #[inline]
    pub
    fn resolve (self: &'_ Self, value: Value)
    {
        self.settle(Ok(value));
    }

    /// Rejects with `error`.
    #[inline]
    pub
    fn reject (self: &'_ Self, error: Error)
    {
        self.settle(Err(error));
    }

    /// Settles with `result`, unless already settled.
    pub
    fn settle (self: &'_ Self, result: Result<Value, Error>)
    {
        let tx = lock(&self.tx).take();
        match tx {
            | Some(tx) => {
                // the receiving side may have been dropped already
                let _ = tx.send(result);
            },
            | None => {
                ::tracing::trace!("ignoring repeated completion callback");
            },
        }
    }
}

impl ::core::fmt::Debug for Callback {
    fn fmt (self: &'_ Callback, f: &'_ mut ::core::fmt::Formatter<'_>)
      -> ::core::fmt::Result
    {
        f   .debug_struct("Callback")
            .field("settled", &lock(&self.tx).is_none())
            .finish()
    }
}

/// Adapts `thunk` into a [`Promise`].
///
/// The thunk is invoked right away, bound to `ctx`. The promise settles
/// according to the first call of its [`Callback`], and rejects with
/// [`Error::CallbackDropped`] if no clone of it is ever called.
///
/// ```rust
/// use ::co_gen::{prelude::*, thunk_to_future, Thunk};
/// use ::futures::executor::block_on;
///
/// let pair = thunk_to_future(
///     Thunk::new(|_, done| done.call(Value::Null, vec!["x".into(), "y".into()])),
///     &Context::none(),
/// );
/// assert_eq!(block_on(pair).unwrap(), ::serde_json::json!(["x", "y"]));
///
/// let failure = thunk_to_future(
///     Thunk::new(|_, done| done.call("err".into(), vec![])),
///     &Context::none(),
/// );
/// assert_eq!(block_on(failure).unwrap_err().rejection().unwrap(), "err");
/// ```
pub
fn thunk_to_future (thunk: Thunk, ctx: &'_ Context)
  -> Promise
{
    let (tx, rx) = oneshot::channel();
    let callback = Callback { tx: Arc::new(Mutex::new(Some(tx))) };
    (thunk.0)(ctx, callback);
    Promise::new(async move {
        match rx.await {
            | Ok(settled) => settled,
            | Err(oneshot::Canceled) => Err(Error::CallbackDropped),
        }
    })
}
