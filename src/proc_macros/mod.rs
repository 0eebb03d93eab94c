//! Crate not intended for direct use.
//! Use https://docs.rs/co-gen instead.
// Templated by `cargo-generate` using https://github.com/danielhenrymantilla/proc-macro-template
#![allow(nonstandard_style, unused_imports)]

use ::core::{
    mem,
    ops::Not as _,
};
use ::proc_macro::{
    TokenStream,
};
use ::proc_macro2::{
    Span,
    TokenStream as TokenStream2,
    TokenTree as TT,
};
use ::quote::{
    format_ident,
    quote,
    quote_spanned,
    ToTokens,
};
use ::syn::{*,
    parse::{Parse, Parser, ParseStream},
    punctuated::Punctuated,
    Result, // Explicitly shadow it
    spanned::Spanned,
};

/// Turns a function whose body uses `yield_!` into one returning a fresh
/// `::co_gen::Handle`, ready to be driven.
///
/// The function must return `Result<Value, Error>` (the default when the
/// return type is omitted). Inside it, `yield_!(expr)` suspends with `expr`
/// (anything `Into<::co_gen::Yieldable>`) and evaluates to the
/// `Result<Value, Error>` it is resumed with.
///
/// Parameters are moved into the generator, so they must be `Send + 'static`.
#[proc_macro_attribute] pub
fn generator (
    attrs: TokenStream,
    input: TokenStream,
) -> TokenStream
{
    generator_impl(attrs.into(), input.into())
        .unwrap_or_else(|err| {
            let mut errors =
                err .into_iter()
                    .map(|err| Error::new(
                        err.span(),
                        format_args!("`#[co_gen::generator]`: {}", err),
                    ))
            ;
            let mut err = errors.next().unwrap();
            errors.for_each(|cur| err.combine(cur));
            err.to_compile_error()
        })
        .into()
}

/// ```rust,ignore
/// #[generator]
/// fn name<…> (pat0: Ty0, pat1: Ty1, …) -> Ret
/// {
///     body // using `yield_!`
/// }
/// ```
///
/// becomes:
///
/// ```rust,ignore
/// fn name<…> (__arg_0: Ty0, __arg_1: Ty1, …) -> ::co_gen::Handle
/// {
///     async fn __co_gen_body<…> (
///         __co__: ::co_gen::Co,
///         (pat0, pat1, …): (Ty0, Ty1, …),
///     ) -> Ret
///     {
///         macro_rules! yield_ {(
///             $value:expr
///         ) => (
///             __co__.yield_($value).await
///         )}
///
///         body
///     }
///
///     ::co_gen::GeneratorFn::boxed(move |__co__| {
///         __co_gen_body(__co__, (__arg_0, __arg_1, …))
///     })
/// }
/// ```
fn generator_impl (
    params: TokenStream2,
    input: TokenStream2,
) -> Result<TokenStream2>
{
    if let Some(tt) = params.into_iter().next() {
        return Err(Error::new_spanned(tt, "unexpected attribute argument"));
    }

    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = parse2(input)?;

    if let Some(receiver) =
        sig .inputs
            .iter()
            .find(|&fn_arg| matches!(*fn_arg, FnArg::Receiver(_)))
    {
        return Err(Error::new_spanned(
            receiver,
            "`self` receivers are not supported",
        ));
    }
    if let Some(asyncness) = sig.asyncness {
        return Err(Error::new_spanned(
            asyncness,
            "expected a non-`async` function: the body already is one",
        ));
    }

    let (pats, tys): (Vec<_>, Vec<_>) =
        sig .inputs
            .iter()
            .map(|fn_arg| match *fn_arg {
                | FnArg::Receiver(_) => unreachable!(),
                | FnArg::Typed(PatType { ref pat, ref ty, .. }) => (pat, ty),
            })
            .unzip()
    ;
    let arg_names: Vec<Ident> =
        (0 .. pats.len())
            .map(|i| format_ident!("__arg_{}", i))
            .collect()
    ;
    let ret: Type = match sig.output {
        | ReturnType::Type(_, ref ty) => (**ty).clone(),
        | ReturnType::Default => parse_quote!(
            ::core::result::Result<::co_gen::Value, ::co_gen::Error>
        ),
    };

    let Signature { ref ident, ref generics, .. } = sig;
    let where_clause = &generics.where_clause;

    Ok(quote!(
        #(#attrs)*
        #vis
        fn #ident #generics (
            #( #arg_names : #tys ),*
        ) -> ::co_gen::Handle
        #where_clause
        {
            async
            fn __co_gen_body #generics (
                __co__: ::co_gen::Co,
                ( #(#pats ,)* ): ( #(#tys ,)* ),
            ) -> #ret
            #where_clause
            {
                #[allow(unused_macros)]
                macro_rules! yield_ {(
                    $value:expr
                ) => (
                    __co__.yield_($value).await
                )}

                #block
            }

            ::co_gen::GeneratorFn::boxed(move |__co__| {
                __co_gen_body(__co__, ( #(#arg_names ,)* ))
            })
        }
    ))
}
