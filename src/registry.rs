use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::descriptor::CallDescriptor;
use crate::error::MockResult;
use crate::matcher::ArgumentExpectation;
use crate::recorder::CallRecorder;
use crate::responder::{CallbackFn, Responder, StubBehavior};
use crate::signature::SignatureKey;
use crate::type_tag::MockArg;

/// All state for one registered signature, during its [MockRegistry]'s lifetime.
pub(crate) struct MockEntry {
    pub expectations: Vec<ArgumentExpectation>,
    pub recorder: CallRecorder,
    pub stub: StubBehavior,
    pub callback: Option<CallbackFn>,
}

impl MockEntry {
    fn new(expectations: Vec<ArgumentExpectation>) -> Self {
        Self {
            expectations,
            recorder: CallRecorder::default(),
            stub: StubBehavior::None,
            callback: None,
        }
    }
}

/// Per-mock map from signature key to entry.
#[derive(Default)]
pub(crate) struct MockRegistry {
    entries: BTreeMap<SignatureKey, MockEntry>,
}

impl MockRegistry {
    /// Create a fresh entry for `call`, replacing any previous entry and its history.
    ///
    /// Expectations are classified before anything is replaced.
    pub fn register(&mut self, call: &CallDescriptor) -> MockResult<&mut MockEntry> {
        let key = call.signature_key();
        let expectations = call
            .params()
            .iter()
            .enumerate()
            .map(|(index, param)| ArgumentExpectation::from_param(key, index, param))
            .collect::<MockResult<Vec<_>>>()?;

        let arity = expectations.len();
        let entry = MockEntry::new(expectations);

        match self.entries.entry(key.clone()) {
            Entry::Occupied(mut occupied) => {
                let previous = occupied.insert(entry);
                tracing::debug!(
                    %key,
                    dropped_calls = previous.recorder.count(),
                    "re-registered signature"
                );
                Ok(occupied.into_mut())
            }
            Entry::Vacant(vacant) => {
                tracing::debug!(%key, arity, "registered signature");
                Ok(vacant.insert(entry))
            }
        }
    }

    pub fn get(&self, key: &SignatureKey) -> Option<&MockEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &SignatureKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &SignatureKey> {
        self.entries.keys()
    }

    /// Record a forwarded call and take a snapshot of the entry's behavior.
    ///
    /// Returns `None` when the signature is not registered.
    pub fn record(&mut self, key: &SignatureKey, args: &[Box<dyn MockArg>]) -> Option<Responder> {
        let entry = self.entries.get_mut(key)?;
        entry.recorder.record(args);

        tracing::trace!(%key, count = entry.recorder.count(), "recorded call");

        Some(Responder {
            key: key.clone(),
            stub: entry.stub.clone(),
            callback: entry.callback.clone(),
        })
    }
}
