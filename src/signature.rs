use core::cmp::Ordering;
use core::fmt::{self, Debug, Display};
use core::hash::{Hash, Hasher};

use crate::descriptor::{ArgSlot, CallDescriptor};
use crate::type_tag::TypeTag;

///
/// Canonical identity of a call shape: `<return> <method><generics>(<params>)`.
///
/// The key depends on the method name and the types involved, never on argument values,
/// so a registration and every later forwarded call with the same shape map to the same key.
///
/// Keys display with module paths stripped, but compare by full type paths:
/// `f(a::Thing)` and `f(b::Thing)` are different keys that both display as `() f(Thing)`.
///
#[derive(Clone)]
pub struct SignatureKey {
    display: String,
    identity: String,
}

impl SignatureKey {
    pub(crate) fn derive(call: &CallDescriptor) -> Self {
        Self {
            display: render(call, TypeTag::short_name),
            identity: render(call, |tag| tag.name().to_string()),
        }
    }

    /// The key with module paths stripped.
    pub fn as_str(&self) -> &str {
        &self.display
    }
}

fn render(call: &CallDescriptor, type_name: impl Fn(&TypeTag) -> String) -> String {
    let mut key = String::new();

    key.push_str(&type_name(&call.return_type()));
    key.push(' ');
    key.push_str(call.method());

    if !call.generics().is_empty() {
        key.push('<');
        push_separated(&mut key, call.generics().iter().map(&type_name));
        key.push('>');
    }

    key.push('(');
    push_separated(
        &mut key,
        call.params().iter().map(|param| match &param.slot {
            // a helper call contributes what it returns
            ArgSlot::Call(nested) => type_name(&nested.return_type),
            ArgSlot::Value(_) | ArgSlot::Read(_) | ArgSlot::AnyOf(_) => type_name(&param.declared),
        }),
    );
    key.push(')');

    key
}

impl PartialEq for SignatureKey {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for SignatureKey {}

impl PartialOrd for SignatureKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SignatureKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity.cmp(&other.identity)
    }
}

impl Hash for SignatureKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

impl AsRef<str> for SignatureKey {
    fn as_ref(&self) -> &str {
        &self.display
    }
}

impl Debug for SignatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SignatureKey").field(&self.display).finish()
    }
}

impl Display for SignatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

fn push_separated(out: &mut String, items: impl Iterator<Item = String>) {
    for (index, item) in items.enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        out.push_str(&item);
    }
}

///
/// Strip every module path from a type name produced by [core::any::type_name].
///
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`, and paths nested
/// in tuples, references, arrays and generic arguments are stripped as well.
///
pub(crate) fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;

    for (index, c) in full.char_indices() {
        if is_delimiter(c) {
            push_last_segment(&mut out, &full[segment_start..index]);
            out.push(c);
            segment_start = index + c.len_utf8();
        }
    }
    push_last_segment(&mut out, &full[segment_start..]);

    out
}

fn is_delimiter(c: char) -> bool {
    matches!(c, '<' | '>' | '(' | ')' | '[' | ']' | ',' | ';' | ' ' | '&' | '*' | '+')
}

fn push_last_segment(out: &mut String, segment: &str) {
    out.push_str(segment.rsplit("::").next().unwrap_or(segment));
}
