//! The single error type flowing through generators and promises.

use_prelude!();

use ::thiserror::Error as ThisError;

/// Why a [`Promise`] rejected, or what was thrown into a generator.
///
/// Rejections travel verbatim: whatever a yielded promise rejects with is
/// what the generator observes at its `yield_!`, and what [`drive`][
/// `crate::drive`] rejects with if the generator lets it propagate.
#[non_exhaustive]
#[derive(Debug, Clone, ThisError)]
pub
enum Error {
    /// A rejection carrying an arbitrary value, such as the first argument of
    /// a [`Callback`][`crate::Callback`] call.
    #[error("rejected: {}", shown(.0))]
    Rejected(Value),

    /// A generator yielded something that cannot be awaited.
    #[error(
        "You may only yield a function, promise, generator, array, or object, \
        but the following object was passed: \"{shown}\""
    )]
    InvalidYield {
        /// Textual form of the offending value.
        shown: String,
    },

    /// A [`GeneratorFn`][`crate::GeneratorFn`] body suspended on something
    /// other than its own `yield_!` point.
    #[error("generator body awaited a future that was not its own yield point")]
    ForeignAwait,

    /// Every clone of a thunk's completion callback was dropped uncalled.
    #[error("completion callback dropped without being called")]
    CallbackDropped,

    /// Host error.
    #[error(transparent)]
    Other(Arc<dyn ::std::error::Error + Send + Sync>),
}

impl Error {
    /// Wraps a host error.
    pub
    fn other (err: impl ::std::error::Error + Send + Sync + 'static)
      -> Self
    {
        Self::Other(Arc::new(err))
    }

    pub(in crate)
    fn invalid_yield (value: &'_ Value)
      -> Self
    {
        Self::InvalidYield { shown: shown(value) }
    }

    /// The rejection value, when this is a [`Error::Rejected`].
    pub
    fn rejection (self: &'_ Self)
      -> Option<&'_ Value>
    {
        match *self {
            | Self::Rejected(ref value) => Some(value),
            | _ => None,
        }
    }
}

impl From<Value> for Error {
    #[inline]
    fn from (value: Value)
      -> Self
    {
        Self::Rejected(value)
    }
}

/// Strings render raw, everything else as JSON text.
pub(in crate)
fn shown (value: &'_ Value)
  -> String
{
    match *value {
        | Value::String(ref s) => s.clone(),
        | ref other => other.to_string(),
    }
}
