pub(in crate)
use {
    ::core::{
        future::Future,
        pin::Pin,
        task::{
            Context as TaskContext,
            Poll,
        },
    },
    ::std::{
        collections::BTreeMap,
        sync::{
            Arc,
            Mutex,
            MutexGuard,
            PoisonError,
        },
    },
    ::serde_json::Value,
    crate::{
        context::Context,
        error::Error,
        generator::{
            Generator,
            GeneratorState,
            Resume,
        },
        promise::Promise,
        yieldable::{
            Factory,
            Handle,
            Instance,
            Shape,
            Yieldable,
        },
    },
};

/// Locks `mutex`, ignoring poisoning.
pub(in crate)
fn lock<T> (mutex: &'_ Mutex<T>)
  -> MutexGuard<'_, T>
{
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
