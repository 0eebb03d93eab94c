//! The crate prelude: reexport the most essential utilities so that blob
//! `use`-ing them should enable the most straight-forward usage.

pub use {
    ::core::{
        pin::Pin,
    },
    ::co_gen_proc_macros::{
        generator,
    },
    crate::{
        drive::{
            drive,
            wrap,
        },
        make_yield,
        Co,
        Context,
        Error,
        Factory,
        Generator,
        GeneratorExt as _,
        GeneratorFn,
        GeneratorState,
        Handle,
        Promise,
        Resume,
        Value,
        Yieldable,
    },
};
