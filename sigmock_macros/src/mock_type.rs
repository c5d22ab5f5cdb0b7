use quote::quote;

/// Merged `#[mock_type(..)]` attributes of one type
pub struct Attr {
    /// sigmock's prefix, e.g. `::sigmock`
    pub prefix: syn::Path,
    /// The declared supertype, if any
    pub extends: Option<syn::Path>,
}

impl Attr {
    fn from_attributes(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut prefix: Option<syn::Path> = None;
        let mut extends: Option<syn::Path> = None;

        for attr in attrs {
            if !attr.path().is_ident("mock_type") {
                continue;
            }

            let args: AttrArgs = attr.parse_args()?;
            if let Some(supertype) = args.extends {
                if extends.is_some() {
                    return Err(syn::Error::new_spanned(
                        supertype,
                        "A type can only extend one supertype",
                    ));
                }
                extends = Some(supertype);
            }
            if let Some(path) = args.prefix {
                prefix = Some(path);
            }
        }

        Ok(Self {
            prefix: prefix.unwrap_or_else(|| syn::parse_quote! { ::sigmock }),
            extends,
        })
    }
}

/// The arguments of a single `#[mock_type(..)]` attribute
struct AttrArgs {
    prefix: Option<syn::Path>,
    extends: Option<syn::Path>,
}

impl syn::parse::Parse for AttrArgs {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut prefix: Option<syn::Path> = None;
        let mut extends: Option<syn::Path> = None;

        while !input.is_empty() {
            let keyword: syn::Ident = input.parse()?;
            let _: syn::token::Eq = input.parse()?;
            match keyword.to_string().as_str() {
                "prefix" => {
                    prefix = Some(input.parse()?);
                }
                "extends" => {
                    if extends.is_some() {
                        return Err(syn::Error::new(
                            keyword.span(),
                            "A type can only extend one supertype",
                        ));
                    }
                    extends = Some(input.parse()?);
                }
                _ => return Err(syn::Error::new(keyword.span(), "Unrecognized keyword")),
            };

            if input.peek(syn::token::Comma) {
                let _: syn::token::Comma = input.parse()?;
            } else {
                break;
            }
        }

        if !input.is_empty() {
            return Err(input.error("Unexpected tokens after mock_type arguments"));
        }

        Ok(Self { prefix, extends })
    }
}

pub fn generate(input: syn::DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    if let syn::Data::Union(data) = &input.data {
        return Err(syn::Error::new(
            data.union_token.span,
            "MockType cannot be derived for unions",
        ));
    }

    let attr = Attr::from_attributes(&input.attrs)?;
    let prefix = &attr.prefix;
    let ident = &input.ident;

    // TypeId requires 'static
    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(syn::parse_quote! { 'static });
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let type_tag = match &attr.extends {
        Some(supertype) => quote! {
            #prefix::TypeTag::of::<Self>().extends(<#supertype as #prefix::MockType>::type_tag)
        },
        None => quote! {
            #prefix::TypeTag::of::<Self>()
        },
    };

    Ok(quote! {
        impl #impl_generics #prefix::MockType for #ident #ty_generics #where_clause {
            fn type_tag() -> #prefix::TypeTag {
                #type_tag
            }
        }
    })
}
