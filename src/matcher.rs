use crate::descriptor::{ArgSlot, Param};
use crate::error::{MockError, MockResult};
use crate::mismatch::{Mismatch, MismatchKind};
use crate::signature::SignatureKey;
use crate::type_tag::{MockArg, TypeTag};

/// What a registered signature expects in one parameter slot.
pub(crate) enum ArgumentExpectation {
    /// Equal to `value`, with a runtime type assignable to `declared`.
    ExactValue {
        declared: TypeTag,
        value: Box<dyn MockArg>,
    },
    /// Anything with a runtime type assignable to the tag.
    TypeWildcard(TypeTag),
}

impl ArgumentExpectation {
    /// Classify a registration-time slot. Reads are resolved right away.
    pub fn from_param(key: &SignatureKey, index: usize, param: &Param) -> MockResult<Self> {
        match &param.slot {
            ArgSlot::Value(value) => Ok(Self::ExactValue {
                declared: param.declared,
                value: value.clone(),
            }),
            ArgSlot::Read(read) => Ok(Self::ExactValue {
                declared: param.declared,
                value: read(),
            }),
            ArgSlot::AnyOf(expected) => Ok(Self::TypeWildcard(*expected)),
            ArgSlot::Call(nested) => Err(MockError::UnsupportedArgumentShape {
                key: key.clone(),
                index,
                shape: format!("{}()", nested.name),
            }),
        }
    }

    pub fn matches(&self, actual: &dyn MockArg) -> bool {
        match self {
            Self::ExactValue { declared, value } => {
                actual.runtime_type().is_assignable_to(declared) && value.eq_arg(actual)
            }
            Self::TypeWildcard(expected) => actual.runtime_type().is_assignable_to(expected),
        }
    }

    /// Human readable form, used in mismatch messages.
    pub fn render(&self) -> String {
        match self {
            Self::ExactValue { value, .. } => format!("{value:?}"),
            Self::TypeWildcard(expected) => format!("[{}]AnyOf()", expected.name()),
        }
    }

    pub fn mismatch(&self, actual: &dyn MockArg) -> Mismatch {
        Mismatch {
            kind: match self {
                Self::ExactValue { .. } => MismatchKind::Eq,
                Self::TypeWildcard(_) => MismatchKind::Wildcard,
            },
            expected: self.render(),
            actual: format!("{actual:?}"),
        }
    }
}
