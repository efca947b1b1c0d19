//! Proc macros for free-style: `style!` inline style declarations.
//!
//! This crate is not meant to be used directly — enable the `macros` feature on `free-style`.

use proc_macro::TokenStream;

mod style_macro;

/// Build a `free_style::Style` from CSS-like declarations.
///
/// # Syntax
///
/// ```ignore
/// let style = style! {
///     background-color: #1a1a2e;
///     padding: 10;
///     margin: 0 auto;
///     font-family: "Helvetica Neue", sans-serif;
///     "&:hover" {
///         color: red;
///     }
///     "@media (min-width: 500px)" {
///         padding: 20;
///     }
/// };
/// ```
///
/// A lone number becomes a numeric value (`10` → `10px` for most
/// properties). Anything else is joined into one string value. Quoted keys
/// followed by a block become nested selectors or at-rules. Function values
/// such as `url(...)` must be written as string literals, and so must `em`
/// units (`1em` does not lex as a Rust literal).
#[proc_macro]
pub fn style(input: TokenStream) -> TokenStream {
    style_macro::style_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
