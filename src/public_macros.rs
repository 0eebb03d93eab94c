/// Defines a local `yield_!` macro suspending on the given [`Co`][
/// `crate::Co`], for hand-written [`GeneratorFn`][`crate::GeneratorFn`]
/// bodies.
///
/// `yield_!(x)` is then sugar for `co.yield_(x).await`.
///
/// ```rust
/// use ::co_gen::prelude::*;
/// use ::futures::executor::block_on;
///
/// let generator = GeneratorFn::boxed(|co| async move {
///     make_yield!(co);
///     let a = yield_!(Promise::resolved(1.into()))?;
///     let b = yield_!(Promise::resolved(2.into()))?;
///     Ok(::serde_json::json!([a, b]))
/// });
/// assert_eq!(
///     block_on(drive(generator, Context::none(), vec![])).unwrap(),
///     ::serde_json::json!([1, 2]),
/// );
/// ```
#[macro_export]
macro_rules! make_yield {
    (
        @with_dollar![$dol:tt]
        $co:expr
    ) => (
        #[allow(unused_macros)]
        macro_rules! yield_ {(
            $dol value:expr
        ) => (
            $co.yield_($dol value).await
        )}
    );

    (
        $co:expr
    ) => (
        $crate::make_yield!(
            @with_dollar![$]
            $co
        )
    )
}
