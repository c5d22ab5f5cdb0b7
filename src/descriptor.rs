use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::signature::SignatureKey;
use crate::type_tag::{MockArg, MockType, TypeTag};

/// One argument slot of a [CallDescriptor].
#[derive(Clone)]
pub enum ArgSlot {
    /// A concrete value.
    Value(Box<dyn MockArg>),
    /// A read of some variable, resolved to its current value whenever the descriptor is evaluated.
    Read(Arc<dyn Fn() -> Box<dyn MockArg> + Send + Sync>),
    /// A wildcard accepting any value assignable to the given type.
    AnyOf(TypeTag),
    /// An argument produced by a nested call to some helper.
    Call(NestedCall),
}

impl std::fmt::Debug for ArgSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{value:?}"),
            Self::Read(_) => write!(f, "<read>"),
            Self::AnyOf(tag) => write!(f, "[{}]AnyOf()", tag.name()),
            Self::Call(nested) => write!(f, "{}()", nested.name),
        }
    }
}

/// A nested call appearing as an argument.
#[derive(Clone, Debug)]
pub struct NestedCall {
    pub name: String,
    pub return_type: TypeTag,
}

///
/// Factory for [ArgSlot]s.
///
/// ```rust
/// use sigmock::*;
///
/// let call = CallDescriptor::function::<i32>("lookup")
///     .arg::<String>(Arg::any_of::<String>())
///     .arg::<i32>(Arg::val(42));
/// ```
///
pub struct Arg;

impl Arg {
    /// An exact value.
    pub fn val(value: impl MockArg) -> ArgSlot {
        ArgSlot::Value(Box::new(value))
    }

    /// A value read through `read` each time the descriptor is evaluated.
    pub fn read<T, F>(read: F) -> ArgSlot
    where
        T: MockArg,
        F: Fn() -> T + Send + Sync + 'static,
    {
        ArgSlot::Read(Arc::new(move || Box::new(read()) as Box<dyn MockArg>))
    }

    /// The wildcard matcher: accepts any value whose runtime type is-a `T`.
    ///
    /// Only meaningful when registering; a wildcard is not a concrete runtime value.
    pub fn any_of<T: ?Sized + 'static>() -> ArgSlot
    where
        T: MockType,
    {
        ArgSlot::AnyOf(T::type_tag())
    }

    /// An argument produced by calling the helper `name`, which returns `R`.
    pub fn call<R: ?Sized + 'static>(name: impl Into<String>) -> ArgSlot {
        ArgSlot::Call(NestedCall {
            name: name.into(),
            return_type: TypeTag::of::<R>(),
        })
    }
}

/// A declared parameter together with the argument passed to it.
#[derive(Clone, Debug)]
pub struct Param {
    pub declared: TypeTag,
    pub slot: ArgSlot,
}

///
/// Symbolic description of one call: method name, generic type arguments,
/// declared parameter types and the argument in each parameter slot.
///
/// A substitute builds the same descriptor when registering and when forwarding
/// a real call, so both derive the same [SignatureKey].
///
/// ```rust
/// use sigmock::*;
///
/// fn func<T: 'static>() -> CallDescriptor {
///     CallDescriptor::function::<i32>("func").generic::<T>()
/// }
///
/// assert_eq!(func::<String>().signature_key().as_str(), "i32 func<String>()");
/// ```
///
#[derive(Clone, Debug)]
pub struct CallDescriptor {
    method: String,
    return_type: TypeTag,
    generics: Vec<TypeTag>,
    params: Vec<Param>,
    key: OnceCell<SignatureKey>,
}

impl CallDescriptor {
    /// Describe a call to a method returning `R`.
    pub fn function<R: ?Sized + 'static>(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            return_type: TypeTag::of::<R>(),
            generics: vec![],
            params: vec![],
            key: OnceCell::new(),
        }
    }

    /// Describe a call to a method returning nothing.
    pub fn action(method: impl Into<String>) -> Self {
        Self::function::<()>(method)
    }

    /// Append a generic type argument.
    pub fn generic<T: ?Sized + 'static>(mut self) -> Self {
        self.generics.push(TypeTag::of::<T>());
        self.key = OnceCell::new();
        self
    }

    /// Append a parameter declared as `P`, receiving `slot`.
    pub fn arg<P: ?Sized + 'static>(self, slot: ArgSlot) -> Self {
        self.param(TypeTag::of::<P>(), slot)
    }

    /// Append a parameter with an explicit declared type.
    pub fn param(mut self, declared: TypeTag, slot: ArgSlot) -> Self {
        self.params.push(Param { declared, slot });
        self.key = OnceCell::new();
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn return_type(&self) -> TypeTag {
        self.return_type
    }

    pub fn generics(&self) -> &[TypeTag] {
        &self.generics
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Whether this describes an action, i.e. a call returning `()`.
    pub fn is_action(&self) -> bool {
        self.return_type.is_unit()
    }

    /// Whether the method name is a Rust identifier: not a keyword, raw identifiers allowed.
    pub fn is_call_shape(&self) -> bool {
        syn::parse_str::<syn::Ident>(&self.method).is_ok()
    }

    /// The signature key of this call, derived once and then cached.
    pub fn signature_key(&self) -> &SignatureKey {
        self.key.get_or_init(|| SignatureKey::derive(self))
    }
}
