use proc_macro::TokenStream;
use proc_macro2::Span;
use proc_macro_crate::{FoundCrate, crate_name};
use quote::{format_ident, quote, quote_spanned};
use syn::spanned::Spanned;
use syn::{
    Attribute, Data, DeriveInput, Expr, ExprLit, Fields, FnArg, ImplItem, ItemImpl, Lit, Meta,
    Path, ReturnType, Type, parse_macro_input,
};

/// Derive macro that makes a struct renderable by [`Renderer`].
///
/// Fields carrying `#[render]` are emitted with default formatting; fields
/// carrying `#[render(with = "<id>")]` delegate to the plugin registered
/// under `<id>`. Unmarked fields are ignored. The container attribute
/// `#[render(methods)]` declares that a `#[render_methods]` impl block
/// supplies the method table.
///
/// [`Renderer`]: ../renderme/struct.Renderer.html
#[proc_macro_derive(Renderable, attributes(render))]
pub fn derive_renderable(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);

    expand_renderable(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Attribute macro for inherent impl blocks whose methods carry `#[render]`.
///
/// Marked methods must take `&self` and nothing else. Methods returning no
/// value are recorded but filtered out at render time.
#[proc_macro_attribute]
pub fn render_methods(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(
            Span::call_site(),
            "#[render_methods] takes no arguments; hint: mark individual methods with #[render]",
        )
        .into_compile_error()
        .into();
    }

    let input = parse_macro_input!(item as ItemImpl);

    expand_render_methods(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_renderable(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let runtime = runtime_crate_path()?;
    let name = &input.ident;

    if !input.generics.params.is_empty() || input.generics.where_clause.is_some() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "generic types are not supported by Renderable; hint: derive on a concrete type",
        ));
    }

    let has_methods = parse_container_attrs(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    input,
                    "tuple structs are not supported by Renderable; hint: use named fields",
                ));
            }
            Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    input,
                    "unit structs are not supported by Renderable; hint: use named fields",
                ));
            }
        },
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span(),
                "enums are not supported by Renderable; hint: derive on a struct with named fields",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span(),
                "unions are not supported by Renderable; hint: derive on a struct with named fields",
            ));
        }
    };

    let mut helper_fns = Vec::new();
    let mut spec_entries = Vec::new();

    for field in fields {
        let Some(marker) = parse_field_marker(&field.attrs)? else {
            continue;
        };

        let ident = field.ident.as_ref().expect("named field");
        let ty = &field.ty;
        let name_lit = ident.to_string();
        let label = type_label_expr(ty, &runtime);

        let display_fn = format_ident!("__render_display_{}", ident);
        let value_fn = format_ident!("__render_value_{}", ident);
        let span = ty.span();

        // Spanned so a field without Display points at the field type.
        helper_fns.push(quote_spanned! {span=>
            fn #display_fn(
                target: &#name,
            ) -> ::core::result::Result<::std::string::String, ::core::fmt::Error> {
                use ::core::fmt::Write as _;
                let mut out = ::std::string::String::new();
                ::core::write!(out, "{}", target.#ident)?;
                ::core::result::Result::Ok(out)
            }
        });
        helper_fns.push(quote! {
            fn #value_fn(target: &#name) -> &dyn ::core::any::Any {
                &target.#ident
            }
        });

        let plugin = match marker.plugin {
            Some(id) => quote!(::core::option::Option::Some(#id)),
            None => quote!(::core::option::Option::None),
        };

        spec_entries.push(quote! {
            #runtime::FieldSpec {
                name: #name_lit,
                label: #label,
                plugin: #plugin,
                display: #display_fn,
                value: #value_fn,
            }
        });
    }

    let method_specs = if has_methods {
        quote! {
            fn method_specs() -> &'static [#runtime::MethodSpec] {
                Self::__render_method_specs()
            }
        }
    } else {
        quote!()
    };

    Ok(quote! {
        impl #runtime::Renderable for #name {
            fn field_specs() -> &'static [#runtime::FieldSpec<Self>] {
                #(#helper_fns)*

                static FIELDS: &[#runtime::FieldSpec<#name>] = &[#(#spec_entries),*];
                FIELDS
            }

            #method_specs
        }
    })
}

fn expand_render_methods(mut input: ItemImpl) -> syn::Result<proc_macro2::TokenStream> {
    let runtime = runtime_crate_path()?;

    if let Some((_, trait_path, _)) = &input.trait_ {
        return Err(syn::Error::new_spanned(
            trait_path,
            "#[render_methods] applies to inherent impl blocks; hint: remove the trait",
        ));
    }
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "generic impl blocks are not supported by #[render_methods]",
        ));
    }

    let mut spec_entries = Vec::new();

    for item in &mut input.items {
        let ImplItem::Fn(method) = item else {
            continue;
        };

        let mut marked = false;
        method.attrs.retain(|attr| {
            if attr.path().is_ident("render") {
                marked = true;
                false
            } else {
                true
            }
        });
        if !marked {
            continue;
        }

        let sig = &method.sig;
        if sig.asyncness.is_some() {
            return Err(syn::Error::new_spanned(
                sig,
                "render methods cannot be async; hint: render() is fully synchronous",
            ));
        }
        if !sig.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &sig.generics,
                "render methods cannot be generic",
            ));
        }
        match sig.inputs.first() {
            Some(FnArg::Receiver(receiver))
                if receiver.reference.is_some() && receiver.mutability.is_none() => {}
            _ => {
                return Err(syn::Error::new_spanned(
                    sig,
                    "render methods must take `&self`; hint: rendering never mutates the target",
                ));
            }
        }
        if sig.inputs.len() > 1 {
            return Err(syn::Error::new_spanned(
                sig,
                "render methods take no arguments beyond `&self`",
            ));
        }

        let name_lit = sig.ident.to_string();
        let returns = match &sig.output {
            ReturnType::Default => quote!(::core::option::Option::None),
            ReturnType::Type(_, ty) if is_unit(ty) => quote!(::core::option::Option::None),
            ReturnType::Type(_, ty) => {
                let label = type_label_expr(ty, &runtime);
                quote!(::core::option::Option::Some(#label))
            }
        };

        spec_entries.push(quote! {
            #runtime::MethodSpec {
                name: #name_lit,
                returns: #returns,
            }
        });
    }

    let self_ty = &input.self_ty;

    Ok(quote! {
        #input

        impl #self_ty {
            #[doc(hidden)]
            pub fn __render_method_specs() -> &'static [#runtime::MethodSpec] {
                static METHODS: &[#runtime::MethodSpec] = &[#(#spec_entries),*];
                METHODS
            }
        }
    })
}

struct FieldMarker {
    plugin: Option<String>,
}

/// Returns the marker for a field, or `None` when the field is unmarked.
fn parse_field_marker(attrs: &[Attribute]) -> syn::Result<Option<FieldMarker>> {
    let mut marker = None;

    for attr in attrs {
        if !attr.path().is_ident("render") {
            continue;
        }
        if marker.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                "duplicate #[render] attribute on field",
            ));
        }

        let mut plugin = None;
        match &attr.meta {
            Meta::Path(_) => {}
            Meta::List(_) => {
                for meta in parse_meta_list(attr)? {
                    match meta {
                        Meta::NameValue(meta) if meta.path.is_ident("with") => {
                            let id = parse_string_expr(&meta.value, meta.span())?;
                            // An empty identifier means default formatting.
                            if !id.is_empty() {
                                plugin = Some(id);
                            }
                        }
                        other => {
                            return Err(syn::Error::new_spanned(
                                other,
                                "unsupported #[render(...)] attribute on field; hint: only `with = \"...\"` is accepted",
                            ));
                        }
                    }
                }
            }
            Meta::NameValue(meta) => {
                return Err(syn::Error::new_spanned(
                    meta,
                    "unsupported #[render] form; hint: use #[render] or #[render(with = \"...\")]",
                ));
            }
        }

        marker = Some(FieldMarker { plugin });
    }

    Ok(marker)
}

/// Parses container-level `#[render(...)]` attrs; returns whether a
/// `#[render_methods]` impl block supplies the method table.
fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut has_methods = false;

    for attr in attrs {
        if !attr.path().is_ident("render") {
            continue;
        }
        if matches!(&attr.meta, Meta::Path(_)) {
            return Err(syn::Error::new_spanned(
                attr,
                "container #[render] requires arguments; hint: use #[render(methods)]",
            ));
        }

        for meta in parse_meta_list(attr)? {
            match meta {
                Meta::Path(path) if path.is_ident("methods") => {
                    has_methods = true;
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "unsupported #[render(...)] attribute on container; hint: only `methods` is accepted",
                    ));
                }
            }
        }
    }

    Ok(has_methods)
}

/// Builds a `TypeLabel` expression: the bare token for Rust's scalar
/// primitives, the fully-qualified runtime name for everything else.
fn type_label_expr(ty: &Type, runtime: &Path) -> proc_macro2::TokenStream {
    match primitive_token(ty) {
        Some(token) => quote!(#runtime::TypeLabel::Primitive(#token)),
        None => quote!(#runtime::TypeLabel::Named(::core::any::type_name::<#ty>)),
    }
}

fn primitive_token(ty: &Type) -> Option<&'static str> {
    const PRIMITIVES: &[&str] = &[
        "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
        "f32", "f64", "bool", "char",
    ];

    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() || path.path.leading_colon.is_some() || path.path.segments.len() != 1 {
        return None;
    }

    let segment = &path.path.segments[0];
    if !segment.arguments.is_empty() {
        return None;
    }

    PRIMITIVES
        .iter()
        .find(|token| segment.ident == **token)
        .copied()
}

fn is_unit(ty: &Type) -> bool {
    matches!(ty, Type::Tuple(tuple) if tuple.elems.is_empty())
}

fn parse_meta_list(attr: &Attribute) -> syn::Result<Vec<Meta>> {
    let metas = attr
        .parse_args_with(syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated)?;
    Ok(metas.into_iter().collect())
}

fn parse_string_expr(expr: &Expr, span: Span) -> syn::Result<String> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(value),
            ..
        }) => Ok(value.value()),
        _ => Err(syn::Error::new(
            span,
            "expected string literal; hint: wrap the value in quotes",
        )),
    }
}

fn runtime_crate_path() -> syn::Result<Path> {
    match crate_name("renderme") {
        // Integration tests, examples, and doctests of the runtime crate all
        // link it under its external name.
        Ok(FoundCrate::Itself) => Ok(syn::parse_quote!(::renderme)),
        Ok(FoundCrate::Name(name)) => {
            let ident = syn::Ident::new(&name.replace('-', "_"), Span::call_site());
            Ok(syn::parse_quote!(::#ident))
        }
        Err(_) => Err(syn::Error::new(
            Span::call_site(),
            "could not resolve the `renderme` runtime crate; hint: add `renderme` to [dependencies]",
        )),
    }
}
