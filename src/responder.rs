//! Stub behavior of a registered signature, and how a forwarded call resolves its output.

use std::any::Any;
use std::sync::Arc;

use crate::error::{ArgsError, MockError, MockResult};
use crate::signature::SignatureKey;
use crate::type_tag::MockArg;

pub(crate) type AnyBox = Box<dyn Any + Send + Sync + 'static>;

pub(crate) type ValueFn = Arc<dyn Fn() -> AnyBox + Send + Sync>;

pub(crate) type ArgsFn =
    Arc<dyn Fn(&[Box<dyn MockArg>]) -> Result<AnyBox, ArgsError> + Send + Sync>;

pub(crate) type CallbackFn =
    Arc<dyn Fn(&[Box<dyn MockArg>]) -> Result<(), ArgsError> + Send + Sync>;

/// The configured output of a signature. At most one is active, the last one set wins.
#[derive(Clone, Default)]
pub(crate) enum StubBehavior {
    #[default]
    None,
    FixedValue(ValueFn),
    ComputedNoArgs(ValueFn),
    ComputedFromArgs(ArgsFn),
}

/// The behavior of an entry, copied out of the registry so that user code runs without the lock held.
pub(crate) struct Responder {
    pub key: SignatureKey,
    pub stub: StubBehavior,
    pub callback: Option<CallbackFn>,
}

impl Responder {
    /// Resolve the output of a function-shaped call.
    ///
    /// The callback runs first, for its side effects. Then computed stubs win over
    /// the fixed value, which wins over `R::default()`.
    pub fn respond<R: Default + 'static>(&self, args: &[Box<dyn MockArg>]) -> MockResult<R> {
        self.run_callback(args)?;

        let output = match &self.stub {
            StubBehavior::ComputedFromArgs(func) => {
                func(args).map_err(|reason| self.args_error(reason))?
            }
            StubBehavior::ComputedNoArgs(func) => func(),
            StubBehavior::FixedValue(value) => value(),
            StubBehavior::None => return Ok(R::default()),
        };

        output
            .downcast::<R>()
            .map(|output| *output)
            .map_err(|_| MockError::ReturnTypeMismatch {
                key: self.key.clone(),
                expected: core::any::type_name::<R>(),
            })
    }

    /// Resolve an action-shaped call, which only has side effects.
    pub fn respond_action(&self, args: &[Box<dyn MockArg>]) -> MockResult<()> {
        self.run_callback(args)
    }

    fn run_callback(&self, args: &[Box<dyn MockArg>]) -> MockResult<()> {
        match &self.callback {
            Some(callback) => callback(args).map_err(|reason| self.args_error(reason)),
            None => Ok(()),
        }
    }

    fn args_error(&self, reason: ArgsError) -> MockError {
        MockError::AnswerArguments {
            key: self.key.clone(),
            reason,
        }
    }
}
