//! The closed set of shapes a driven generator may yield.

use_prelude!();

use crate::thunk::Thunk;

/// The generators [`drive`][`crate::drive`] steps through.
pub
type Handle = Pin<Box<
    dyn Generator<Resume, Yield = Yieldable, Return = Result<Value, Error>>
        + Send
>>;

/// What a [`Factory`] produced: a generator to drive, or a plain value to
/// settle with as-is.
pub
enum Instance {
    /// A generator to drive.
    Generator(Handle),
    /// Not a generator: passed through unchanged.
    Value(Value),
}

impl From<Handle> for Instance {
    #[inline]
    fn from (handle: Handle)
      -> Self
    {
        Self::Generator(handle)
    }
}

impl From<Value> for Instance {
    #[inline]
    fn from (value: Value)
      -> Self
    {
        Self::Value(value)
    }
}

/// A callable producing a fresh generator for a [`Context`] and arguments.
///
/// This is the caller-declared counterpart of a [`Handle`]: yielding a
/// `Factory` means "instantiate, then drive", whereas yielding a [`Handle`]
/// means "drive this very instance".
#[derive(Clone)]
pub
struct Factory(
    Arc<dyn Fn(&'_ Context, Vec<Value>) -> Instance + Send + Sync>,
);

impl Factory {
    /// Wraps `f`, which may return either a [`Handle`] or a plain [`Value`].
    pub
    fn new<R : Into<Instance>> (
        f: impl Fn(&'_ Context, Vec<Value>) -> R + Send + Sync + 'static,
    ) -> Self
    {
        Self(Arc::new(move |ctx: &Context, args| f(ctx, args).into()))
    }

    /// Invokes the factory.
    #[inline]
    pub
    fn call (self: &'_ Self, ctx: &'_ Context, args: Vec<Value>)
      -> Instance
    {
        (self.0)(ctx, args)
    }
}

impl ::core::fmt::Debug for Factory {
    fn fmt (self: &'_ Factory, f: &'_ mut ::core::fmt::Formatter<'_>)
      -> ::core::fmt::Result
    {
        f   .debug_struct("Factory")
            .finish_non_exhaustive()
    }
}

/// Anything a driven generator may `yield_!`.
///
/// [`From`] conversions exist for every payload, so that `yield_!(x)` accepts
/// a [`Promise`], a [`Handle`], a [`Factory`], a [`Thunk`], a
/// `Vec<Yieldable>`, a `BTreeMap<String, Yieldable>`, or a [`Value`].
pub
enum Yieldable {
    /// Awaited as is.
    Future(Promise),
    /// Driven to completion.
    Generator(Handle),
    /// Instantiated with no arguments, then driven to completion.
    Factory(Factory),
    /// Invoked with a completion callback.
    Thunk(Thunk),
    /// Every element is awaited concurrently; results keep their positions.
    Sequence(Vec<Yieldable>),
    /// Every entry is awaited concurrently; results keep their keys.
    Bag(BTreeMap<String, Yieldable>),
    /// A plain value.
    ///
    /// Arrays and objects are awaited like [`Yieldable::Sequence`] and
    /// [`Yieldable::Bag`]; any other value cannot be awaited.
    Value(Value),
}

/// The classification of a [`Yieldable`], in dispatch precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub
enum Shape {
    /// `null`, `false`, zero, or `""`.
    Falsy,
    /// A [`Promise`].
    Future,
    /// A [`Handle`].
    Generator,
    /// A [`Factory`].
    Factory,
    /// A [`Thunk`].
    Thunk,
    /// A sequence, or a [`Value::Array`].
    Sequence,
    /// A keyed bag, or a [`Value::Object`].
    Bag,
    /// Any other value.
    Scalar,
}

impl Shape {
    /// Whether coercing this shape produces a [`Promise`].
    #[inline]
    pub
    fn is_future_like (self: Self)
      -> bool
    {
        !matches!(self, Self::Falsy | Self::Scalar)
    }
}

impl Yieldable {
    /// Classifies `self` for [`to_future`][`crate::to_future`].
    pub
    fn shape (self: &'_ Self)
      -> Shape
    {
        match *self {
            | Self::Value(ref value) if !is_truthy(value) => Shape::Falsy,
            | Self::Future(_) => Shape::Future,
            | Self::Generator(_) => Shape::Generator,
            | Self::Factory(_) => Shape::Factory,
            | Self::Thunk(_) => Shape::Thunk,
            | Self::Sequence(_)
            | Self::Value(Value::Array(_))
            => Shape::Sequence,
            | Self::Bag(_)
            | Self::Value(Value::Object(_))
            => Shape::Bag,
            | Self::Value(_) => Shape::Scalar,
        }
    }

    /// Wraps an arbitrary future.
    pub
    fn future (
        future: impl Future<Output = Result<Value, Error>> + Send + 'static,
    ) -> Self
    {
        Self::Future(Promise::new(future))
    }
}

/// Truthiness of a plain value: `null`, `false`, zero and `""` are falsy,
/// everything else (empty arrays and objects included) is truthy.
pub
fn is_truthy (value: &'_ Value)
  -> bool
{
    match *value {
        | Value::Null => false,
        | Value::Bool(b) => b,
        | Value::Number(ref n) => n.as_f64().map_or(true, |n| n != 0.0),
        | Value::String(ref s) => !s.is_empty(),
        | Value::Array(_) | Value::Object(_) => true,
    }
}

impl ::core::fmt::Debug for Yieldable {
    fn fmt (self: &'_ Yieldable, f: &'_ mut ::core::fmt::Formatter<'_>)
      -> ::core::fmt::Result
    {
        match *self {
            | Self::Future(ref p) => f.debug_tuple("Future").field(p).finish(),
            | Self::Generator(_) => f.write_str("Generator(..)"),
            | Self::Factory(ref g) => f.debug_tuple("Factory").field(g).finish(),
            | Self::Thunk(ref t) => f.debug_tuple("Thunk").field(t).finish(),
            | Self::Sequence(ref s) => f.debug_tuple("Sequence").field(s).finish(),
            | Self::Bag(ref b) => f.debug_tuple("Bag").field(b).finish(),
            | Self::Value(ref v) => f.debug_tuple("Value").field(v).finish(),
        }
    }
}

macro_rules! from_impls {(
    $( $Variant:ident($T:ty) ),* $(,)?
) => (
    $(
        impl From<$T> for Yieldable {
            #[inline]
            fn from (it: $T)
              -> Yieldable
            {
                Self::$Variant(it)
            }
        }
    )*
)}

from_impls! {
    Future(Promise),
    Generator(Handle),
    Factory(Factory),
    Thunk(Thunk),
    Sequence(Vec<Yieldable>),
    Bag(BTreeMap<String, Yieldable>),
    Value(Value),
}

impl From<crate::Wrapped> for Yieldable {
    #[inline]
    fn from (wrapped: crate::Wrapped)
      -> Yieldable
    {
        Self::Factory(wrapped.into())
    }
}
