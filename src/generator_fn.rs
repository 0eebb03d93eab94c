//! Generators written as `async` bodies.

use_prelude!();

/// The slot shared between a [`GeneratorFn`] and its body's [`Co`]: the
/// body fills `yielded` and parks; the resumer takes it out, then fills
/// `resumed` before polling the body again.
#[derive(Default)]
struct Slot {
    yielded: Option<Yieldable>,
    resumed: Option<Result<Value, Error>>,
}

/// The yield handle given to a [`GeneratorFn`] body.
///
/// Each [`.yield_(…).await`][`Co::yield_`] is a suspension point: the body
/// hands the value out to whoever resumes it, and evaluates to the
/// [`Resume`] message it is eventually resumed with.
pub
struct Co {
    slot: Arc<Mutex<Slot>>,
}

impl Co {
    /// Suspends the body, yielding `value`.
    ///
    /// The returned `.await`-able evaluates to `Ok(value)` when resumed with
    /// [`Resume::Next`], and to `Err(error)` when resumed with
    /// [`Resume::Throw`], so that `?` propagates a thrown-in error while
    /// `match` lets the body recover from it.
    pub
    fn yield_ (self: &'_ Self, value: impl Into<Yieldable>)
      -> impl Future<Output = Result<Value, Error>> + Send + '_
    {
        let prev = lock(&self.slot).yielded.replace(value.into());
        debug_assert!(prev.is_none(), "slot was empty");
        return WaitForResume { co: self };

        /// "Dummy" `.await`-able:
        ///
        ///  1. The first time it is polled, nothing has been resumed yet;
        ///     which triggers a `Pending` yield interruption, so that the
        ///     outer thing polling it (`GeneratorFn::resume`) gets to extract
        ///     the value out of the slot.
        ///
        ///  2. The next time it is polled, the resumer has left its message
        ///     in the slot, which becomes the output of the `.await`.
        struct WaitForResume<'co> {
            co: &'co Co,
        }

        impl Future for WaitForResume<'_> {
            type Output = Result<Value, Error>;

            fn poll (self: Pin<&'_ mut Self>, _: &'_ mut TaskContext<'_>)
              -> Poll<Result<Value, Error>>
            {
                match lock(&self.co.slot).resumed.take() {
                    | Some(resumed) => Poll::Ready(resumed),
                    | None => Poll::Pending,
                }
            }
        }
    }
}

impl ::core::fmt::Debug for Co {
    fn fmt (self: &'_ Co, f: &'_ mut ::core::fmt::Formatter<'_>)
      -> ::core::fmt::Result
    {
        f   .debug_struct("Co")
            .finish_non_exhaustive()
    }
}

/// A generator whose body is an `async` block suspending on [`Co`].
///
/// ```rust
/// use ::co_gen::prelude::*;
///
/// let mut generator = GeneratorFn::new(|co| async move {
///     let x = co.yield_(Promise::resolved(1.into())).await?;
///     let y = match co.yield_(Promise::resolved(2.into())).await {
///         | Ok(y) => y,
///         | Err(_) => 0.into(),
///     };
///     Ok(vec![x, y].into())
/// });
///
/// let mut generator = Pin::new(&mut generator);
/// assert!(!generator.as_mut().next_with(Value::Null).is_done());
/// assert!(!generator.as_mut().next_with(1.into()).is_done());
/// match generator.as_mut().throw(Error::from(Value::from("nope"))) {
///     | GeneratorState::Returned(ret) => assert_eq!(ret.unwrap(), ::serde_json::json!([1, 0])),
///     | GeneratorState::Yielded(_) => unreachable!(),
/// }
/// ```
///
///   - Resuming a generator that has not started yet runs its body up to its
///     first suspension point: a [`Resume::Next`] value is discarded, whereas
///     a [`Resume::Throw`] completes it with that error without running the
///     body at all.
///
///   - Resuming a completed generator returns `Ok(Value::Null)` for
///     [`Resume::Next`] and the thrown error for [`Resume::Throw`].
///
///   - Should the body `.await` anything that suspends besides its own
///     [`Co::yield_`], the generator completes with [`Error::ForeignAwait`].
pub
struct GeneratorFn<F> {
    slot: Arc<Mutex<Slot>>,

    /// `None` once completed.
    future: Option<Pin<Box<F>>>,

    started: bool,
}

impl<F> GeneratorFn<F>
where
    F : Future<Output = Result<Value, Error>>,
{
    /// Instantiates the generator body; nothing runs until the first resume.
    pub
    fn new (factory: impl FnOnce(Co) -> F)
      -> Self
    {
        let slot = Arc::<Mutex<Slot>>::default();
        let future = factory(Co { slot: Arc::clone(&slot) });
        Self {
            slot,
            future: Some(Box::pin(future)),
            started: false,
        }
    }

    /// Same as [`GeneratorFn::new`], erased into a [`Handle`].
    pub
    fn boxed (factory: impl FnOnce(Co) -> F)
      -> Handle
    where
        F : Send + 'static,
    {
        Box::pin(Self::new(factory))
    }

    fn complete (self: &'_ mut Self, ret: Result<Value, Error>)
      -> GeneratorState<Yieldable, Result<Value, Error>>
    {
        self.future = None;
        *lock(&self.slot) = Slot::default();
        GeneratorState::Returned(ret)
    }
}

impl<F> Generator<Resume>
    for GeneratorFn<F>
where
    F : Future<Output = Result<Value, Error>>,
{
    type Yield = Yieldable;

    type Return = Result<Value, Error>;

    fn resume (
        self: Pin<&'_ mut Self>,
        resume_arg: Resume,
    ) -> GeneratorState<Yieldable, Result<Value, Error>>
    {
        let this = self.get_mut();
        if this.future.is_none() {
            return GeneratorState::Returned(match resume_arg {
                | Resume::Next(_) => Ok(Value::Null),
                | Resume::Throw(error) => Err(error),
            });
        }
        if ::core::mem::replace(&mut this.started, true) {
            lock(&this.slot).resumed = Some(resume_arg.into_result());
        } else if let Resume::Throw(error) = resume_arg {
            return this.complete(Err(error));
        }

        create_context!(cx);
        let poll =
            ::unwind_safe::with_state(&mut this.future)
                .try_eval(|future| match **future {
                    | Some(ref mut future) => future.as_mut().poll(&mut cx),
                    | None => Poll::Ready(Ok(Value::Null)),
                })
                .finally(|future| if ::std::thread::panicking() {
                    // never poll a body that panicked again
                    *future = None;
                })
        ;
        match poll {
            | Poll::Ready(ret) => this.complete(ret),
            | Poll::Pending => {
                let yielded = lock(&this.slot).yielded.take();
                match yielded {
                    | Some(yielded) => GeneratorState::Yielded(yielded),
                    | None => this.complete(Err(Error::ForeignAwait)),
                }
            },
        }
    }
}
