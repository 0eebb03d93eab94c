macro_rules! use_prelude {() => (
    #[allow(unused_imports)]
    use crate::utils::prelude::*;
)}

/// A generator body only ever suspends on its own yield point, which is woken
/// by the next `resume` rather than by a waker: a no-op one suffices.
macro_rules! create_context {(
    $cx:ident
) => (
    let mut $cx = ::core::task::Context::from_waker(
        ::futures::task::noop_waker_ref()
    );
)}
