use core::marker::PhantomData;
use std::sync::Arc;

use crate::args::FromArgs;
use crate::error::ArgsError;
use crate::registry::MockEntry;
use crate::responder::{AnyBox, CallbackFn, StubBehavior};
use crate::type_tag::MockArg;

/// Builder for the behavior of a registered function-shaped signature returning `R`.
///
/// Every method replaces the previous setting of its kind: there is one output stub and one callback.
pub struct StubConfigurator<'m, R> {
    entry: &'m mut MockEntry,
    output: PhantomData<fn() -> R>,
}

impl<'m, R> StubConfigurator<'m, R>
where
    R: Send + Sync + 'static,
{
    pub(crate) fn new(entry: &'m mut MockEntry) -> Self {
        Self {
            entry,
            output: PhantomData,
        }
    }

    /// Respond with a clone of `value`.
    pub fn returns(self, value: impl Into<R>) -> Self
    where
        R: Clone,
    {
        let value: R = value.into();
        self.entry.stub =
            StubBehavior::FixedValue(Arc::new(move || Box::new(value.clone()) as AnyBox));
        self
    }

    /// Respond with the output of `func`, called once per forwarded call.
    pub fn returns_with<F>(self, func: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        self.entry.stub =
            StubBehavior::ComputedNoArgs(Arc::new(move || Box::new(func()) as AnyBox));
        self
    }

    /// Compute the response from the arguments of the forwarded call.
    ///
    /// ```rust
    /// # use sigmock::*;
    /// let mut mock = Mock::new();
    /// let call = CallDescriptor::function::<i32>("func_arg").arg::<i32>(Arg::any_of::<i32>());
    /// mock.register::<i32>(&call)
    ///     .unwrap()
    ///     .answers(|(k,): (i32,)| 25 + k);
    /// ```
    pub fn answers<A, F>(self, func: F) -> Self
    where
        A: FromArgs + 'static,
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        self.entry.stub = StubBehavior::ComputedFromArgs(Arc::new(
            move |args: &[Box<dyn MockArg>]| -> Result<AnyBox, ArgsError> {
                let args = A::from_args(args)?;
                Ok(Box::new(func(args)) as AnyBox)
            },
        ));
        self
    }

    /// Run `func` with the arguments of every forwarded call, before the output is produced.
    pub fn callback<A, F>(self, func: F) -> Self
    where
        A: FromArgs + 'static,
        F: Fn(A) + Send + Sync + 'static,
    {
        self.entry.callback = Some(callback_fn(func));
        self
    }
}

/// Builder for the behavior of a registered action-shaped signature.
pub struct ActionConfigurator<'m> {
    entry: &'m mut MockEntry,
}

impl<'m> ActionConfigurator<'m> {
    pub(crate) fn new(entry: &'m mut MockEntry) -> Self {
        Self { entry }
    }

    /// Run `func` with the arguments of every forwarded call. Replaces any previous callback.
    pub fn callback<A, F>(self, func: F) -> Self
    where
        A: FromArgs + 'static,
        F: Fn(A) + Send + Sync + 'static,
    {
        self.entry.callback = Some(callback_fn(func));
        self
    }
}

fn callback_fn<A, F>(func: F) -> CallbackFn
where
    A: FromArgs + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Arc::new(move |args: &[Box<dyn MockArg>]| -> Result<(), ArgsError> {
        func(A::from_args(args)?);
        Ok(())
    })
}
