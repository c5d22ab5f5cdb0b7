//! The sigmock procedural macros.

#![forbid(unsafe_code)]

mod mock_type;

extern crate proc_macro;

///
/// Derive `sigmock::MockType`, the runtime type description used by argument matching.
/// Re-exported by `sigmock`, it is documented there.
///
/// # Attributes
/// * `#[mock_type(extends = Parent)]`: the type is-a `Parent` when matched against wildcards.
/// * `#[mock_type(prefix = ::path::to::sigmock)]`: path to the sigmock crate, `::sigmock` by default.
///
#[proc_macro_derive(MockType, attributes(mock_type))]
pub fn derive_mock_type(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);

    let output = match mock_type::generate(input) {
        Ok(stream) => stream,
        Err(err) => err.to_compile_error(),
    };

    proc_macro::TokenStream::from(output)
}
