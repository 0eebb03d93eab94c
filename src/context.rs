use_prelude!();

use ::core::any::Any;

/// The receiver every factory and thunk is invoked with.
///
/// A `Context` is threaded unchanged from [`drive`][`crate::drive`] through
/// every nested generator, thunk and aggregation it spawns. It may be empty.
///
/// ```rust
/// use ::co_gen::Context;
///
/// struct Db { name: &'static str }
///
/// let ctx = Context::new(Db { name: "main" });
/// assert_eq!(ctx.get::<Db>().map(|db| db.name), Some("main"));
/// assert!(ctx.get::<u8>().is_none());
/// assert!(Context::none().is_none());
/// ```
#[derive(Clone, Default)]
pub
struct Context(
    Option<Arc<dyn Any + Send + Sync>>,
);

impl Context {
    /// The empty context.
    #[inline]
    pub
    fn none ()
      -> Self
    {
        Self(None)
    }

    /// A context holding `value`.
    pub
    fn new<T : Any + Send + Sync> (value: T)
      -> Self
    {
        Self(Some(Arc::new(value)))
    }

    /// A context sharing an already reference-counted `value`.
    pub
    fn from_arc (value: Arc<dyn Any + Send + Sync>)
      -> Self
    {
        Self(Some(value))
    }

    /// Borrows the held value as a `T`, if it is one.
    pub
    fn get<T : Any> (self: &'_ Self)
      -> Option<&'_ T>
    {
        self.0.as_deref()?.downcast_ref()
    }

    /// Whether this is the empty context.
    #[inline]
    pub
    fn is_none (self: &'_ Self)
      -> bool
    {
        self.0.is_none()
    }
}

impl ::core::fmt::Debug for Context {
    fn fmt (self: &'_ Context, f: &'_ mut ::core::fmt::Formatter<'_>)
      -> ::core::fmt::Result
    {
        f   .debug_tuple("Context")
            .field(&if self.is_none() { "none" } else { "some" })
            .finish()
    }
}
