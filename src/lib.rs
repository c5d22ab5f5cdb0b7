//!
//! `sigmock` is a mocking engine for hand-written substitutes.
//!
//! A substitute is an ordinary type that owns a [Mock] and forwards each of its methods into it,
//! describing the call with a [CallDescriptor]. A test registers calls on the substitute, exercises it,
//! and then checks how often each call shape was made and with which arguments.
//!
//! Call shapes are identified by a [SignatureKey] derived from the method name, its generic type
//! arguments and its declared parameter types, never from argument values:
//!
//! ```rust
//! use sigmock::*;
//!
//! #[derive(Default)]
//! struct Calculator {
//!     mock: Mock,
//! }
//!
//! impl Calculator {
//!     fn add_call(rhs: ArgSlot) -> CallDescriptor {
//!         CallDescriptor::function::<i32>("add").arg::<i32>(rhs)
//!     }
//!
//!     fn add(&self, rhs: i32) -> i32 {
//!         self.mock.call(&Self::add_call(Arg::val(rhs)))
//!     }
//! }
//!
//! impl Substitute for Calculator {
//!     fn mock(&self) -> &Mock {
//!         &self.mock
//!     }
//!
//!     fn mock_mut(&mut self) -> &mut Mock {
//!         &mut self.mock
//!     }
//! }
//!
//! let mut calculator = Calculator::default();
//! let add_two = Calculator::add_call(Arg::val(2));
//! calculator.register::<i32>(&add_two).unwrap().answers(|(rhs,): (i32,)| 40 + rhs);
//!
//! assert_eq!(42, calculator.add(2));
//! calculator.check(&add_two, 1).unwrap();
//! ```
//!
//! # Argument expectations
//! Each registered argument slot becomes an expectation:
//! * [Arg::val] and [Arg::read] expect an equal value.
//! * [Arg::any_of] expects any value whose runtime type is-a `T`. Subtyping is declared with
//!   `#[mock_type(extends = Parent)]` on a `#[derive(MockType)]` type.
//!
//! # Outputs
//! A forwarded call first runs the registered callback, then responds with the computed stub,
//! or the fixed value, or `Default::default()`.
//!
//! Forwarding a call to a signature that was never registered is not an error; verifying it is.
//!

#![forbid(unsafe_code)]

extern crate self as sigmock;

mod args;
mod build;
mod descriptor;
mod error;
mod matcher;
mod mismatch;
mod recorder;
mod registry;
mod responder;
mod signature;
mod substitute;
mod type_tag;
mod verify;

pub use args::FromArgs;
pub use build::{ActionConfigurator, StubConfigurator};
pub use descriptor::{Arg, ArgSlot, CallDescriptor, NestedCall, Param};
pub use error::{ArgsError, InvalidRegistration, MockError, MockResult};
pub use mismatch::{Mismatch, MismatchKind};
pub use signature::SignatureKey;
pub use substitute::Substitute;
pub use type_tag::{MockArg, MockType, TypeTag};

///
/// Derive [MockType] for a struct or enum.
///
/// # Example
/// ```rust
/// use sigmock::*;
///
/// #[derive(MockType, Clone, PartialEq, Debug)]
/// struct Shape;
///
/// #[derive(MockType, Clone, PartialEq, Debug)]
/// #[mock_type(extends = Shape)]
/// struct Circle {
///     radius: u32,
/// }
/// ```
pub use sigmock_macros::MockType;

use mismatch::Report;
use registry::MockRegistry;

///
/// The mock engine owned by a substitute.
///
/// All state lives in one registry per instance. Registration needs exclusive access;
/// forwarding and verification work through a shared reference.
///
#[derive(Default)]
pub struct Mock {
    registry: spin::Mutex<MockRegistry>,
}

impl Mock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function-shaped call returning `R`.
    ///
    /// Any previous registration of the same signature, and its recorded calls, is discarded.
    pub fn register<R>(&mut self, call: &CallDescriptor) -> MockResult<StubConfigurator<'_, R>>
    where
        R: Send + Sync + 'static,
    {
        validate_call_shape(call)?;
        let registered = TypeTag::of::<R>();
        if registered != call.return_type() {
            return Err(invalid_return_type(call, registered));
        }

        let entry = self.registry.get_mut().register(call)?;
        Ok(StubConfigurator::new(entry))
    }

    /// Register an action-shaped call, i.e. one returning `()`.
    pub fn register_action(&mut self, call: &CallDescriptor) -> MockResult<ActionConfigurator<'_>> {
        validate_call_shape(call)?;
        if !call.is_action() {
            return Err(invalid_return_type(call, TypeTag::of::<()>()));
        }

        let entry = self.registry.get_mut().register(call)?;
        Ok(ActionConfigurator::new(entry))
    }

    pub fn is_registered(&self, call: &CallDescriptor) -> bool {
        self.registry.lock().contains(call.signature_key())
    }

    /// The number of distinct registered signatures.
    pub fn count_of_mocks(&self) -> usize {
        self.registry.lock().len()
    }

    /// The number of recorded calls to a registered signature.
    pub fn call_count(&self, call: &CallDescriptor) -> Option<usize> {
        self.registry
            .lock()
            .get(call.signature_key())
            .map(|entry| entry.recorder.count())
    }

    /// All registered signature keys, in key order.
    pub fn signatures(&self) -> Vec<SignatureKey> {
        self.registry.lock().keys().cloned().collect()
    }

    /// Forward a function-shaped call from a substitute method, panicking on failure.
    #[track_caller]
    pub fn call<R>(&self, call: &CallDescriptor) -> R
    where
        R: Default + 'static,
    {
        match self.try_call(call) {
            Ok(output) => output,
            Err(error) => panic!("{error}"),
        }
    }

    /// Forward a function-shaped call from a substitute method.
    ///
    /// Unregistered signatures are not recorded and respond with `R::default()`.
    pub fn try_call<R>(&self, call: &CallDescriptor) -> MockResult<R>
    where
        R: Default + 'static,
    {
        match self.intercept(call)? {
            Some((responder, args)) => responder.respond(&args),
            None => Ok(R::default()),
        }
    }

    /// Forward an action-shaped call from a substitute method, panicking on failure.
    #[track_caller]
    pub fn call_action(&self, call: &CallDescriptor) {
        if let Err(error) = self.try_call_action(call) {
            panic!("{error}");
        }
    }

    /// Forward an action-shaped call from a substitute method.
    pub fn try_call_action(&self, call: &CallDescriptor) -> MockResult<()> {
        match self.intercept(call)? {
            Some((responder, args)) => responder.respond_action(&args),
            None => Ok(()),
        }
    }

    /// Verify the number of calls to `call`'s signature, and their arguments.
    ///
    /// Arguments are checked against the expectations given at registration. The argument
    /// values in `call` only select the signature, and a nested call slot is an error.
    pub fn check(&self, call: &CallDescriptor, expected: usize) -> MockResult<()> {
        let result = verify::verify_calls(&self.registry.lock(), call, expected);
        if let Err(error) = &result {
            tracing::debug!(key = %call.signature_key(), %error, "verification failed");
        }
        result
    }

    /// Like [Mock::check], but panics with a report that includes a value diff.
    #[track_caller]
    pub fn assert_calls(&self, call: &CallDescriptor, expected: usize) {
        if let Err(error) = self.check(call, expected) {
            panic!("{}", Report(&error));
        }
    }

    fn intercept(
        &self,
        call: &CallDescriptor,
    ) -> MockResult<Option<(responder::Responder, Vec<Box<dyn MockArg>>)>> {
        let key = call.signature_key();

        if !self.registry.lock().contains(key) {
            tracing::trace!(%key, "ignoring call to unregistered signature");
            return Ok(None);
        }

        // argument reads are user code, so evaluate them without holding the lock
        let args = recorder::capture(call)?;
        let responder = self.registry.lock().record(key, &args);

        Ok(responder.map(|responder| (responder, args)))
    }
}

impl std::fmt::Debug for Mock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mock")
            .field("signatures", &self.signatures())
            .finish()
    }
}

fn validate_call_shape(call: &CallDescriptor) -> MockResult<()> {
    if call.is_call_shape() {
        Ok(())
    } else {
        Err(MockError::InvalidRegistration {
            call: call.signature_key().to_string(),
            reason: InvalidRegistration::NotACall(call.method().to_string()),
        })
    }
}

fn invalid_return_type(call: &CallDescriptor, registered: TypeTag) -> MockError {
    MockError::InvalidRegistration {
        call: call.signature_key().to_string(),
        reason: InvalidRegistration::ReturnType {
            registered: registered.name(),
            declared: call.return_type().name(),
        },
    }
}
