use crate::build::{ActionConfigurator, StubConfigurator};
use crate::descriptor::CallDescriptor;
use crate::error::MockResult;
use crate::signature::SignatureKey;
use crate::Mock;

///
/// A hand-written substitute that owns a [Mock].
///
/// Implementing the two accessors gives the substitute the whole registration and
/// verification API, so tests can talk to it directly:
///
/// ```rust
/// use sigmock::*;
///
/// #[derive(Default)]
/// struct Clock {
///     mock: Mock,
/// }
///
/// impl Clock {
///     fn now_call() -> CallDescriptor {
///         CallDescriptor::function::<u64>("now")
///     }
///
///     fn now(&self) -> u64 {
///         self.mock.call(&Self::now_call())
///     }
/// }
///
/// impl Substitute for Clock {
///     fn mock(&self) -> &Mock {
///         &self.mock
///     }
///
///     fn mock_mut(&mut self) -> &mut Mock {
///         &mut self.mock
///     }
/// }
///
/// let mut clock = Clock::default();
/// clock.register::<u64>(&Clock::now_call()).unwrap().returns(1_700_000_000_u64);
///
/// assert_eq!(1_700_000_000, clock.now());
/// clock.check(&Clock::now_call(), 1).unwrap();
/// ```
///
pub trait Substitute {
    fn mock(&self) -> &Mock;

    fn mock_mut(&mut self) -> &mut Mock;

    /// See [Mock::register].
    fn register<R>(&mut self, call: &CallDescriptor) -> MockResult<StubConfigurator<'_, R>>
    where
        R: Send + Sync + 'static,
    {
        self.mock_mut().register(call)
    }

    /// See [Mock::register_action].
    fn register_action(&mut self, call: &CallDescriptor) -> MockResult<ActionConfigurator<'_>> {
        self.mock_mut().register_action(call)
    }

    fn is_registered(&self, call: &CallDescriptor) -> bool {
        self.mock().is_registered(call)
    }

    fn count_of_mocks(&self) -> usize {
        self.mock().count_of_mocks()
    }

    fn call_count(&self, call: &CallDescriptor) -> Option<usize> {
        self.mock().call_count(call)
    }

    fn signatures(&self) -> Vec<SignatureKey> {
        self.mock().signatures()
    }

    /// See [Mock::check].
    fn check(&self, call: &CallDescriptor, expected: usize) -> MockResult<()> {
        self.mock().check(call, expected)
    }

    /// See [Mock::assert_calls].
    #[track_caller]
    fn assert_calls(&self, call: &CallDescriptor, expected: usize) {
        self.mock().assert_calls(call, expected)
    }
}

