use crate::mismatch::Mismatch;
use crate::signature::SignatureKey;

pub type MockResult<T> = Result<T, MockError>;

/// Everything that can go wrong when registering, forwarding or verifying a call.
#[derive(Clone, Debug, thiserror::Error)]
pub enum MockError {
    #[error("{call}: cannot register, {reason}")]
    InvalidRegistration {
        call: String,
        reason: InvalidRegistration,
    },
    #[error("{key}: argument {index} has unsupported shape {shape}")]
    UnsupportedArgumentShape {
        key: SignatureKey,
        index: usize,
        shape: String,
    },
    #[error("{key}: signature was never registered")]
    UnregisteredSignature { key: SignatureKey },
    #[error("{key}: expected {expected}, actual {actual}")]
    CallCountMismatch {
        key: SignatureKey,
        expected: usize,
        actual: usize,
    },
    #[error("{key}: argument {index} expected {}, actual {}", .mismatch.expected, .mismatch.actual)]
    ArgumentMismatch {
        key: SignatureKey,
        /// Position of the offending call among the recorded calls
        call: usize,
        index: usize,
        mismatch: Mismatch,
    },
    #[error("{key}: cannot pass recorded arguments to the stub, {reason}")]
    AnswerArguments {
        key: SignatureKey,
        reason: ArgsError,
    },
    #[error("{key}: stored output is not a {expected}")]
    ReturnTypeMismatch {
        key: SignatureKey,
        expected: &'static str,
    },
}

/// Why a descriptor does not describe a registrable call.
#[derive(Clone, Debug, thiserror::Error)]
pub enum InvalidRegistration {
    #[error("`{0}` is not a method name")]
    NotACall(String),
    #[error("registered as returning {registered}, but the call returns {declared}")]
    ReturnType {
        registered: &'static str,
        declared: &'static str,
    },
}

/// Why recorded arguments could not be converted into the argument tuple of a stub.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ArgsError {
    #[error("expected {expected} arguments, got {actual}")]
    Arity { expected: usize, actual: usize },
    #[error("argument {index} is {actual}, not {expected}")]
    Downcast {
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },
}
