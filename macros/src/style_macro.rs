//! style! macro: parse CSS-like declarations at compile time and generate `Style` builder code.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::{braced, Error, Ident, LitFloat, LitInt, LitStr, Result, Token};

// ---------------------------------------------------------------------------
// AST types
// ---------------------------------------------------------------------------

/// A single parsed value token.
#[derive(Debug, Clone)]
pub(crate) enum CssValue {
    /// A bare or hyphenated identifier like `red`, `space-between`.
    Ident(String, Span),
    /// A unitless number.
    Number(f64, Span),
    /// A number with a unit or `%`, kept as text (`10px`, `50%`).
    Dimension(String, Span),
    /// A `#` hex color, including the `#`.
    Hash(String, Span),
    /// A quoted string literal, emitted without quotes.
    Str(String, Span),
    /// A `,` separator.
    Comma(Span),
}

impl CssValue {
    fn span(&self) -> Span {
        match self {
            CssValue::Ident(_, s)
            | CssValue::Number(_, s)
            | CssValue::Dimension(_, s)
            | CssValue::Hash(_, s)
            | CssValue::Str(_, s)
            | CssValue::Comma(s) => *s,
        }
    }

    fn text(&self) -> String {
        match self {
            CssValue::Ident(s, _)
            | CssValue::Dimension(s, _)
            | CssValue::Hash(s, _)
            | CssValue::Str(s, _) => s.clone(),
            CssValue::Number(n, _) => format!("{n}"),
            CssValue::Comma(_) => ",".into(),
        }
    }
}

/// `property-name: value1 value2;`
#[derive(Debug, Clone)]
pub(crate) struct CssDeclaration {
    pub name: String,
    pub name_span: Span,
    pub values: Vec<CssValue>,
}

/// One entry of a style block.
#[derive(Debug, Clone)]
pub(crate) enum CssItem {
    Declaration(CssDeclaration),
    /// `"selector" { ... }`
    Block { selector: String, items: Vec<CssItem> },
}

/// The top-level input to the style! macro.
#[derive(Debug)]
struct StyleInput {
    items: Vec<CssItem>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Parse for StyleInput {
    fn parse(input: ParseStream) -> Result<Self> {
        Ok(StyleInput {
            items: parse_items(input)?,
        })
    }
}

fn parse_items(input: ParseStream) -> Result<Vec<CssItem>> {
    let mut items = Vec::new();
    while !input.is_empty() {
        if input.peek(LitStr) {
            let selector: LitStr = input.parse()?;
            let content;
            braced!(content in input);
            items.push(CssItem::Block {
                selector: selector.value(),
                items: parse_items(&content)?,
            });
        } else {
            items.push(CssItem::Declaration(parse_declaration(input)?));
        }
    }
    Ok(items)
}

/// Parse a single declaration: `property-name: values;`
pub(crate) fn parse_declaration(input: ParseStream) -> Result<CssDeclaration> {
    let name_span = input.span();
    let mut name = String::new();

    // Vendor prefixes and custom properties start with `-`.
    while input.peek(Token![-]) {
        input.parse::<Token![-]>()?;
        name.push('-');
    }
    name.push_str(&parse_hyphenated(input)?);

    input.parse::<Token![:]>()?;

    let mut values = Vec::new();
    while !input.peek(Token![;]) {
        if input.is_empty() {
            return Err(Error::new(name_span, format!("property `{name}` is missing `;`")));
        }
        values.push(parse_css_value(input)?);
    }
    input.parse::<Token![;]>()?;

    if values.is_empty() {
        return Err(Error::new(name_span, format!("property `{name}` has no value")));
    }

    Ok(CssDeclaration {
        name,
        name_span,
        values,
    })
}

/// Parse `ident(-ident)*` into one string.
fn parse_hyphenated(input: ParseStream) -> Result<String> {
    let first = input.call(Ident::parse_any)?;
    let mut out = first.to_string();
    while input.peek(Token![-]) && input.peek2(Ident::peek_any) {
        input.parse::<Token![-]>()?;
        let next = input.call(Ident::parse_any)?;
        out.push('-');
        out.push_str(&next.to_string());
    }
    Ok(out)
}

/// Parse a single value token.
pub(crate) fn parse_css_value(input: ParseStream) -> Result<CssValue> {
    if input.peek(Token![,]) {
        let comma = input.parse::<Token![,]>()?;
        return Ok(CssValue::Comma(comma.span));
    }

    // Hex color: `#` followed by an ident (`fff`) or a literal (`1a1a2e`, `000`).
    if input.peek(Token![#]) {
        let hash_token = input.parse::<Token![#]>()?;
        let span = hash_token.span;
        let hex = if input.peek(Ident::peek_any) {
            input.call(Ident::parse_any)?.to_string()
        } else if input.peek(LitInt) {
            input.parse::<LitInt>()?.to_string()
        } else if input.peek(LitFloat) {
            input.parse::<LitFloat>()?.to_string()
        } else {
            return Err(input.error("expected hex color value after `#`"));
        };
        return Ok(CssValue::Hash(format!("#{hex}"), span));
    }

    if input.peek(LitStr) {
        let lit: LitStr = input.parse()?;
        return Ok(CssValue::Str(lit.value(), lit.span()));
    }

    if input.peek(LitFloat) || input.peek(LitInt) {
        return parse_number(input, false);
    }

    if input.peek(Token![-]) {
        let neg = input.parse::<Token![-]>()?;
        if input.peek(LitFloat) || input.peek(LitInt) {
            return parse_number(input, true);
        }
        return Err(Error::new(neg.span, "expected a number after `-`"));
    }

    if input.peek(Ident::peek_any) {
        let span = input.span();
        let ident = parse_hyphenated(input)?;
        if input.peek(syn::token::Paren) {
            return Err(Error::new(
                span,
                format!("use a string literal for function values like `{ident}(...)`"),
            ));
        }
        return Ok(CssValue::Ident(ident, span));
    }

    Err(input.error("unexpected token in CSS value"))
}

fn parse_number(input: ParseStream, negative: bool) -> Result<CssValue> {
    let sign = if negative { "-" } else { "" };
    let (digits, suffix, span) = if input.peek(LitFloat) {
        let lit: LitFloat = input.parse()?;
        (lit.base10_digits().to_owned(), lit.suffix().to_owned(), lit.span())
    } else {
        let lit: LitInt = input.parse()?;
        (lit.base10_digits().to_owned(), lit.suffix().to_owned(), lit.span())
    };

    if !suffix.is_empty() {
        return Ok(CssValue::Dimension(format!("{sign}{digits}{suffix}"), span));
    }
    if input.peek(Token![%]) {
        input.parse::<Token![%]>()?;
        return Ok(CssValue::Dimension(format!("{sign}{digits}%"), span));
    }

    let value: f64 = digits
        .parse()
        .map_err(|_| Error::new(span, "invalid number"))?;
    Ok(CssValue::Number(if negative { -value } else { value }, span))
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

/// Join value tokens into CSS text: spaces between tokens, commas attached
/// to the token before them.
fn join_values(values: &[CssValue]) -> String {
    let mut out = String::new();
    for value in values {
        match value {
            CssValue::Comma(_) => out.push(','),
            other => {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(&other.text());
            }
        }
    }
    out
}

/// Generate the builder call for a single declaration.
fn generate_declaration(decl: &CssDeclaration) -> Result<TokenStream> {
    if let Some(first @ CssValue::Comma(_)) = decl.values.first() {
        return Err(Error::new(
            first.span(),
            format!("value of `{}` starts with `,`", decl.name),
        ));
    }
    let name = LitStr::new(&decl.name, decl.name_span);
    match decl.values.as_slice() {
        [CssValue::Number(n, _)] => Ok(quote! { .set(#name, #n) }),
        values => {
            let text = join_values(values);
            Ok(quote! { .set(#name, #text) })
        }
    }
}

fn generate_items(items: &[CssItem]) -> Result<TokenStream> {
    let mut calls = Vec::with_capacity(items.len());
    for item in items {
        match item {
            CssItem::Declaration(decl) => calls.push(generate_declaration(decl)?),
            CssItem::Block { selector, items } => {
                let inner = generate_items(items)?;
                calls.push(quote! { .nest(#selector, #inner) });
            }
        }
    }
    Ok(quote! { ::free_style::Style::new() #(#calls)* })
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Entry point: generate code for the entire style! macro.
pub(crate) fn style_impl(input: TokenStream) -> Result<TokenStream> {
    let parsed: StyleInput = syn::parse2(input)?;
    let style = generate_items(&parsed.items)?;
    Ok(quote! { { #style } })
}

// ===========================================================================
// Tests
// ===========================================================================
