//! `stable` rendition of a resumable generator, as driven by [`drive`][
//! `crate::drive`].

use_prelude!();

/// A suspended computation that can be resumed with a `ResumeArg`, until it
/// returns.
///
/// The generators [`drive`][`crate::drive`] understands are
/// `Generator<Resume, Yield = Yieldable, Return = Result<Value, Error>>`
/// (see [`Handle`]): each resumption is either a value or an error thrown
/// in at the suspension point.
///
/// Most generators are written with [`#[generator]`][`crate::generator`] or
/// [`GeneratorFn`][`crate::GeneratorFn`], but any state machine may implement
/// this trait directly:
///
/// ```rust
/// use ::co_gen::prelude::*;
///
/// /// Yields `ask` once, then returns whatever it was resumed with.
/// struct Echo { ask: Option<Value> }
///
/// impl Generator<Resume> for Echo {
///     type Yield = Yieldable;
///     type Return = Result<Value, Error>;
///
///     fn resume (mut self: Pin<&'_ mut Self>, arg: Resume)
///       -> GeneratorState<Yieldable, Result<Value, Error>>
///     {
///         match self.ask.take() {
///             | Some(ask) => GeneratorState::Yielded(Promise::resolved(ask).into()),
///             | None => GeneratorState::Returned(arg.into_result()),
///         }
///     }
/// }
///
/// let echo: Handle = Box::pin(Echo { ask: Some("hello".into()) });
/// let out = ::futures::executor::block_on(drive(echo, Context::none(), vec![]));
/// assert_eq!(out.unwrap(), "hello");
/// ```
pub
trait Generator<ResumeArg = ()> {
    /// The type of value this generator yields at each suspension point.
    type Yield;

    /// The type of value this generator returns once completed.
    type Return;

    /// Resumes the execution of this generator.
    ///
    /// This call will return back into the generator's last suspension point,
    /// handing it `resume_arg`, or start it if it hasn't been already. The
    /// generator then runs until it either yields or returns.
    ///
    /// Resuming a generator which has already [returned][
    /// `GeneratorState::Returned`] is implementation-defined.
    fn resume (
        self: Pin<&'_ mut Self>,
        resume_arg: ResumeArg,
    ) -> GeneratorState<Self::Yield, Self::Return>
    ;
}

/// Value obtained when [resuming][`Generator::resume`] a [`Generator`].
#[derive(
    Debug,
    Clone, Copy,
    PartialOrd, Ord,
    PartialEq, Eq,
    Hash
)]
pub
enum GeneratorState<Yield, Return = ()> {
    /// The [`Generator`] suspended with a value.
    Yielded(Yield),

    /// The [`Generator`] completed with a value.
    Returned(Return),
}

impl<Yield, Return> GeneratorState<Yield, Return> {
    /// Whether this is a [`Returned`][`GeneratorState::Returned`] state.
    #[inline]
    pub
    fn is_done (self: &'_ Self)
      -> bool
    {
        matches!(*self, Self::Returned(_))
    }
}

/// The message a suspended generator is resumed with.
#[derive(Debug, Clone)]
pub
enum Resume {
    /// Resume with a value: the pending `yield_!` evaluates to `Ok(value)`.
    Next(Value),

    /// Throw an error in: the pending `yield_!` evaluates to `Err(error)`.
    Throw(Error),
}

impl Resume {
    /// What the pending `yield_!` evaluates to.
    #[inline]
    pub
    fn into_result (self: Self)
      -> Result<Value, Error>
    {
        match self {
            | Self::Next(value) => Ok(value),
            | Self::Throw(error) => Err(error),
        }
    }
}

impl From<Result<Value, Error>> for Resume {
    #[inline]
    fn from (result: Result<Value, Error>)
      -> Resume
    {
        match result {
            | Ok(value) => Self::Next(value),
            | Err(error) => Self::Throw(error),
        }
    }
}

// # TRANSITIVE IMPLS
impl<ResumeArg, G : ?Sized>
    Generator<ResumeArg>
for
    Pin<&'_ mut G>
where
    G : Generator<ResumeArg>,
{
    transitive_impl_deferring_to!(|self| (*self).as_mut());
}

impl<ResumeArg, G : ?Sized>
    Generator<ResumeArg>
for
    Pin<Box<G>>
where
    G : Generator<ResumeArg>,
{
    transitive_impl_deferring_to!(|self| (*self).as_mut());
}

// where:
macro_rules! transitive_impl_deferring_to {(
    |$self:tt| $expr:expr $(,)?
) => (
    type Yield = G::Yield;
    type Return = G::Return;

    #[inline]
    fn resume (
        mut $self: Pin<&'_ mut Self>,
        arg: ResumeArg,
    ) -> GeneratorState<Self::Yield, Self::Return>
    {
        <G as Generator<ResumeArg>>::resume($expr, arg)
    }
)} use transitive_impl_deferring_to;

/// Extension trait with the two resume operations of a [`Handle`]-like
/// generator, and an `Unpin` convenience.
pub
trait GeneratorExt<ResumeArg>
:
    Generator<ResumeArg> +
{
    /// Same as [`.resume()`][`Generator::resume`], but with a `&mut Self`
    /// receiver, thanks to the `Unpin` bound.
    #[inline]
    fn resume_unpin (
        self: &'_ mut Self,
        resume_arg: ResumeArg,
    ) -> GeneratorState<Self::Yield, Self::Return>
    where
        Self : Unpin,
    {
        Pin::new(self).resume(resume_arg)
    }

    /// Resume-with-value: advances past the last suspension point.
    #[inline]
    fn next_with (
        self: Pin<&'_ mut Self>,
        value: Value,
    ) -> GeneratorState<Self::Yield, Self::Return>
    where
        ResumeArg : From<Resume>,
    {
        self.resume(Resume::Next(value).into())
    }

    /// Resume-with-error: throws `error` in at the last suspension point.
    #[inline]
    fn throw (
        self: Pin<&'_ mut Self>,
        error: Error,
    ) -> GeneratorState<Self::Yield, Self::Return>
    where
        ResumeArg : From<Resume>,
    {
        self.resume(Resume::Throw(error).into())
    }
}

impl<ResumeArg, G : ?Sized>
    GeneratorExt<ResumeArg>
for
    G
where
    G : Generator<ResumeArg>,
{}
