use crate::descriptor::{ArgSlot, CallDescriptor};
use crate::error::{MockError, MockResult};
use crate::type_tag::MockArg;

/// The argument values of one forwarded call.
pub(crate) struct RecordedCall(Vec<Box<dyn MockArg>>);

impl RecordedCall {
    pub fn args(&self) -> &[Box<dyn MockArg>] {
        &self.0
    }
}

/// Append-only log of the calls forwarded to one signature.
///
/// The call count is the length of the log, so counting and recording cannot drift apart.
#[derive(Default)]
pub(crate) struct CallRecorder {
    calls: Vec<RecordedCall>,
}

impl CallRecorder {
    pub fn record(&mut self, args: &[Box<dyn MockArg>]) {
        self.calls.push(RecordedCall(args.to_vec()));
    }

    pub fn count(&self) -> usize {
        self.calls.len()
    }

    pub fn calls(&self) -> &[RecordedCall] {
        &self.calls
    }
}

/// Evaluate the slots of a forwarded call into runtime values.
///
/// Wildcards and nested calls are not values, so they cannot be recorded.
pub(crate) fn capture(call: &CallDescriptor) -> MockResult<Vec<Box<dyn MockArg>>> {
    call.params()
        .iter()
        .enumerate()
        .map(|(index, param)| match &param.slot {
            ArgSlot::Value(value) => Ok(value.clone()),
            ArgSlot::Read(read) => Ok(read()),
            slot @ (ArgSlot::AnyOf(_) | ArgSlot::Call(_)) => {
                Err(MockError::UnsupportedArgumentShape {
                    key: call.signature_key().clone(),
                    index,
                    shape: format!("{slot:?}"),
                })
            }
        })
        .collect()
}
