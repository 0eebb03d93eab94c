use_prelude!();

use ::futures::future::{self, BoxFuture, FutureExt};

/// A single-settle asynchronous result: fulfilled with a [`Value`] or
/// rejected with an [`Error`].
///
/// This is a boxed, type-erased [`Future`], so that heterogeneous operations
/// can be yielded, aggregated, and awaited alike.
///
/// ```rust
/// use ::co_gen::{Error, Promise, Value};
/// use ::futures::executor::block_on;
///
/// assert_eq!(block_on(Promise::resolved(42.into())).unwrap(), 42);
/// assert_eq!(
///     block_on(Promise::new(async { Ok(Value::from("hi")) })).unwrap(),
///     "hi",
/// );
/// assert!(matches!(
///     block_on(Promise::rejected(Value::from("boom").into())),
///     Err(Error::Rejected(v)) if v == "boom",
/// ));
/// ```
#[must_use = "promises do nothing unless polled"]
pub
struct Promise(
    BoxFuture<'static, Result<Value, Error>>,
);

impl Promise {
    /// Erases `future` into a `Promise`.
    pub
    fn new (
        future: impl Future<Output = Result<Value, Error>> + Send + 'static,
    ) -> Self
    {
        Self(future.boxed())
    }

    /// An already-fulfilled promise.
    pub
    fn resolved (value: Value)
      -> Self
    {
        Self::new(future::ready(Ok(value)))
    }

    /// An already-rejected promise.
    pub
    fn rejected (error: Error)
      -> Self
    {
        Self::new(future::ready(Err(error)))
    }

    /// Address of the erased future, stable for the promise's lifetime.
    #[cfg(test)]
    pub(in crate)
    fn addr (self: &'_ Self)
      -> *const ()
    {
        let erased: &(dyn Future<Output = Result<Value, Error>> + Send) = &*self.0;
        (erased as *const (dyn Future<Output = Result<Value, Error>> + Send))
            .cast()
    }
}

impl Future for Promise {
    type Output = Result<Value, Error>;

    #[inline]
    fn poll (mut self: Pin<&'_ mut Self>, cx: &'_ mut TaskContext<'_>)
      -> Poll<Result<Value, Error>>
    {
        self.0.as_mut().poll(cx)
    }
}

impl ::core::fmt::Debug for Promise {
    fn fmt (self: &'_ Promise, f: &'_ mut ::core::fmt::Formatter<'_>)
      -> ::core::fmt::Result
    {
        f   .debug_struct("Promise")
            .finish_non_exhaustive()
    }
}
