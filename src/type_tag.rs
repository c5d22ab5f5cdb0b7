use core::any::{Any, TypeId};
use core::fmt::{self, Debug, Display};

use crate::signature::short_type_name;

/// A runtime description of a Rust type, used by signature keys and argument matching.
///
/// A tag may link to a supertype. Rust has no inheritance, so the link is declared
/// explicitly, usually through `#[mock_type(extends = Parent)]`. A value whose runtime tag
/// links (transitively) to `Parent` is assignable to `Parent`.
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
    supertype: Option<fn() -> TypeTag>,
}

impl TypeTag {
    /// The tag of `T`, without any supertype.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
            supertype: None,
        }
    }

    /// Declare that this type is-a `supertype`.
    pub fn extends(self, supertype: fn() -> TypeTag) -> Self {
        Self {
            supertype: Some(supertype),
            ..self
        }
    }

    /// The [TypeId] of the described type.
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// The full path of the type, as reported by [core::any::type_name].
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The type name with all module paths stripped.
    pub fn short_name(&self) -> String {
        short_type_name(self.name)
    }

    /// The declared supertype, if any.
    pub fn supertype(&self) -> Option<TypeTag> {
        self.supertype.map(|supertype| supertype())
    }

    pub fn is_unit(&self) -> bool {
        self.id == TypeId::of::<()>()
    }

    /// Whether a value of this type is-a `target`: the types are equal, or `target`
    /// is found by walking the supertype chain.
    pub fn is_assignable_to(&self, target: &TypeTag) -> bool {
        let mut visited: Vec<TypeId> = vec![];
        let mut current = Some(*self);

        while let Some(tag) = current {
            if tag.id == target.id {
                return true;
            }
            // cyclic `extends` declarations
            if visited.contains(&tag.id) {
                return false;
            }
            visited.push(tag.id);
            current = tag.supertype();
        }

        false
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({})", self.name)
    }
}

impl Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

///
/// A type that can describe itself with a [TypeTag].
///
/// Implemented for the std primitives and common containers. User types derive it:
///
/// ```rust
/// use sigmock::*;
///
/// #[derive(MockType, Clone, PartialEq, Debug)]
/// struct Parent;
///
/// #[derive(MockType, Clone, PartialEq, Debug)]
/// #[mock_type(extends = Parent)]
/// struct Child;
///
/// assert!(Child::type_tag().is_assignable_to(&Parent::type_tag()));
/// ```
///
pub trait MockType: 'static {
    fn type_tag() -> TypeTag;
}

///
/// A runtime argument value, as captured by the engine.
///
/// This is the object-safe view of a [MockType] value. It is implemented for every
/// `MockType + Clone + PartialEq + Debug + Send + Sync` type and there is no need
/// to implement it by hand.
///
pub trait MockArg: Any + Debug + Send + Sync {
    /// The tag of the concrete type of this value.
    fn runtime_type(&self) -> TypeTag;

    fn as_any(&self) -> &dyn Any;

    /// Equality with another argument. Values of different concrete types are never equal.
    fn eq_arg(&self, other: &dyn MockArg) -> bool;

    fn clone_arg(&self) -> Box<dyn MockArg>;
}

impl<T> MockArg for T
where
    T: MockType + Clone + PartialEq + Debug + Send + Sync,
{
    fn runtime_type(&self) -> TypeTag {
        T::type_tag()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_arg(&self, other: &dyn MockArg) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .map_or(false, |other| self == other)
    }

    fn clone_arg(&self) -> Box<dyn MockArg> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn MockArg> {
    fn clone(&self) -> Self {
        (**self).clone_arg()
    }
}

macro_rules! plain_mock_types {
    ($($t:ty),+ $(,)?) => {
        $(
            impl MockType for $t {
                fn type_tag() -> TypeTag {
                    TypeTag::of::<Self>()
                }
            }
        )+
    };
}

plain_mock_types!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &'static str,
);

impl<T: MockType> MockType for Option<T> {
    fn type_tag() -> TypeTag {
        TypeTag::of::<Self>()
    }
}

impl<T: MockType> MockType for Vec<T> {
    fn type_tag() -> TypeTag {
        TypeTag::of::<Self>()
    }
}

impl<T: MockType> MockType for Box<T> {
    fn type_tag() -> TypeTag {
        TypeTag::of::<Self>()
    }
}
