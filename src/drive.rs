//! The step driver.

use_prelude!();

use crate::coerce::{to_future, Coerced};

/// What [`drive`] runs: a generator instance, or a factory producing one.
pub
enum Routine {
    /// Drive this very instance.
    Generator(Handle),
    /// Instantiate with the context and arguments given to [`drive`] first.
    Factory(Factory),
}

impl From<Handle> for Routine {
    #[inline]
    fn from (handle: Handle)
      -> Self
    {
        Self::Generator(handle)
    }
}

impl From<Factory> for Routine {
    #[inline]
    fn from (factory: Factory)
      -> Self
    {
        Self::Factory(factory)
    }
}

impl From<Wrapped> for Routine {
    #[inline]
    fn from (wrapped: Wrapped)
      -> Self
    {
        Self::Factory(wrapped.factory)
    }
}

/// Steps a generator to completion, converging it into a single [`Promise`].
///
/// A [`Routine::Factory`] is first invoked with `ctx` and `args`; should it
/// produce a plain value rather than a generator, the promise fulfills with
/// that value unchanged.
///
/// The generator is then resumed, first with [`Resume::Next`]`(null)`, until
/// it returns:
///
///   - each yielded value is [coerced][`to_future`], bound to `ctx`, and
///     awaited; the generator is resumed with its outcome, as
///     [`Resume::Next`] if it fulfilled and as [`Resume::Throw`] if it
///     rejected. It is never resumed before that promise has settled.
///
///   - if a yielded value cannot be awaited, the promise rejects with
///     [`Error::InvalidYield`]. Unlike a rejection, that error is not thrown
///     into the generator: the generator cannot catch it, and is dropped
///     without being resumed again;
///
///   - the returned value settles the promise as is: `Ok` fulfills and `Err`
///     (a thrown-in error left uncaught, or one raised by the generator
///     itself) rejects.
///
/// Nothing runs until the promise is first polled.
///
/// ```rust
/// use ::co_gen::prelude::*;
/// use ::futures::executor::block_on;
///
/// let generator = GeneratorFn::boxed(|co| async move {
///     let answer = co.yield_(Promise::resolved(42.into())).await?;
///     Ok(answer)
/// });
/// assert_eq!(block_on(drive(generator, Context::none(), vec![])).unwrap(), 42);
///
/// let not_a_generator = Factory::new(|_, args: Vec<Value>| args[0].clone());
/// assert_eq!(
///     block_on(drive(not_a_generator, Context::none(), vec!["as is".into()])).unwrap(),
///     "as is",
/// );
/// ```
pub
fn drive (
    routine: impl Into<Routine>,
    ctx: Context,
    args: Vec<Value>,
) -> Promise
{
    let routine = routine.into();
    Promise::new(async move {
        let mut generator = match routine {
            | Routine::Generator(handle) => handle,
            | Routine::Factory(factory) => match factory.call(&ctx, args) {
                | Instance::Generator(handle) => handle,
                | Instance::Value(value) => {
                    ::tracing::debug!("factory produced a plain value; passing it through");
                    return Ok(value);
                },
            },
        };
        let mut resume_arg = Resume::Next(Value::Null);
        let mut step = 0_usize;
        loop {
            let yielded = match generator.as_mut().resume(resume_arg) {
                | GeneratorState::Returned(ret) => {
                    ::tracing::debug!(steps = step, ok = ret.is_ok(), "generator returned");
                    return ret;
                },
                | GeneratorState::Yielded(yielded) => yielded,
            };
            ::tracing::trace!(step, shape = ?yielded.shape(), "generator yielded");
            resume_arg = match to_future(yielded, &ctx) {
                | Coerced::Future(promise) => promise.await.into(),
                | Coerced::Plain(value) => {
                    let error = Error::invalid_yield(&value);
                    ::tracing::debug!(step, %error, "invalid yield");
                    return Err(error);
                },
            };
            step += 1;
        }
    })
}

/// Turns a [`Factory`] into a reusable callable: each [`.call()`][
/// `Wrapped::call`] [drives][`drive`] a fresh instance.
///
/// ```rust
/// use ::co_gen::prelude::*;
/// use ::futures::executor::block_on;
///
/// let double = wrap(Factory::new(|_, args: Vec<Value>| {
///     let n = args[0].as_i64().unwrap_or(0);
///     GeneratorFn::boxed(move |co| async move {
///         let n = co.yield_(Promise::resolved(n.into())).await?;
///         Ok((n.as_i64().unwrap_or(0) * 2).into())
///     })
/// }));
/// assert_eq!(block_on(double.call(Context::none(), vec![21.into()])).unwrap(), 42);
/// assert_eq!(block_on(double.call(Context::none(), vec![5.into()])).unwrap(), 10);
/// ```
pub
fn wrap (factory: Factory)
  -> Wrapped
{
    Wrapped { factory }
}

/// A [`Factory`] made directly callable; see [`wrap`].
#[derive(Debug, Clone)]
pub
struct Wrapped {
    factory: Factory,
}

impl Wrapped {
    /// Instantiates the wrapped factory with `ctx` and `args`, and drives it.
    #[inline]
    pub
    fn call (self: &'_ Self, ctx: Context, args: Vec<Value>)
      -> Promise
    {
        drive(self.factory.clone(), ctx, args)
    }

    /// The wrapped factory.
    #[inline]
    pub
    fn generator_factory (self: &'_ Self)
      -> &'_ Factory
    {
        &self.factory
    }
}

impl From<Wrapped> for Factory {
    #[inline]
    fn from (wrapped: Wrapped)
      -> Factory
    {
        wrapped.factory
    }
}
