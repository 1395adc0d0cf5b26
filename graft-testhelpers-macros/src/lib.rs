//! Proc macros for `graft-testhelpers`.

use unsynn::*;

keyword! {
    KFn = "fn";
}

unsynn! {
    // attributes, visibility and qualifiers before `fn`
    struct Preamble {
        tokens: Any<Cons<Except<KFn>, TokenTree>>,
    }

    // generics, arguments, return type and where clause
    struct Signature {
        tokens: Any<Cons<Except<BraceGroup>, TokenTree>>,
    }

    struct TestFn {
        preamble: Preamble,
        _fn: KFn,
        name: Ident,
        signature: Signature,
        body: BraceGroup,
    }
}

impl quote::ToTokens for Preamble {
    fn to_tokens(&self, tokens: &mut unsynn::TokenStream) {
        self.tokens.to_tokens(tokens)
    }
}

impl quote::ToTokens for Signature {
    fn to_tokens(&self, tokens: &mut unsynn::TokenStream) {
        self.tokens.to_tokens(tokens)
    }
}

/// Marks a test that runs with graft's tracing subscriber installed and
/// inside a span named after the test.
///
/// ```ignore
/// use graft_testhelpers::test;
///
/// #[test]
/// fn copies_nested_rows() {
///     // `GRAFT_LOG=graft=trace` shows every merge dispatch
/// }
/// ```
#[proc_macro_attribute]
pub fn test(
    _attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let item = TokenStream::from(item);
    let mut tokens = item.to_token_iter();
    let test_fn = match tokens.parse::<TestFn>() {
        Ok(test_fn) => test_fn,
        Err(err) => {
            let message = format!("#[graft_testhelpers::test] expects a function: {err}");
            return quote::quote! { ::core::compile_error!(#message); }.into();
        }
    };

    let TestFn {
        preamble,
        _fn,
        name,
        signature,
        body,
    } = test_fn;
    let body = body.0.stream();
    let test_name = name.to_string();

    quote::quote! {
        #[::core::prelude::rust_2024::test]
        #preamble fn #name #signature {
            ::graft_testhelpers::setup();
            let _span = ::graft_testhelpers::enter_test_span(#test_name);

            #body
        }
    }
    .into()
}
