use crate::descriptor::{ArgSlot, CallDescriptor};
use crate::error::{MockError, MockResult};
use crate::registry::MockRegistry;

/// Verify that `call`'s signature was called exactly `expected` times,
/// and that every recorded call satisfies the registered argument expectations.
///
/// Only the signature of `call` is used. Its argument values are not expectations,
/// but a nested call slot is still rejected. Verification only reads the registry.
pub(crate) fn verify_calls(
    registry: &MockRegistry,
    call: &CallDescriptor,
    expected: usize,
) -> MockResult<()> {
    let key = call.signature_key();

    for (index, param) in call.params().iter().enumerate() {
        if let ArgSlot::Call(nested) = &param.slot {
            return Err(MockError::UnsupportedArgumentShape {
                key: key.clone(),
                index,
                shape: format!("{}()", nested.name),
            });
        }
    }
    let entry = registry
        .get(key)
        .ok_or_else(|| MockError::UnregisteredSignature { key: key.clone() })?;

    let actual = entry.recorder.count();
    if actual != expected {
        return Err(MockError::CallCountMismatch {
            key: key.clone(),
            expected,
            actual,
        });
    }

    for (call_index, recorded) in entry.recorder.calls().iter().enumerate() {
        for (index, (expectation, actual)) in entry
            .expectations
            .iter()
            .zip(recorded.args())
            .enumerate()
        {
            if !expectation.matches(&**actual) {
                return Err(MockError::ArgumentMismatch {
                    key: key.clone(),
                    call: call_index,
                    index,
                    mismatch: expectation.mismatch(&**actual),
                });
            }
        }
    }

    Ok(())
}
