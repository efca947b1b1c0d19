//! Style sheet helpers: register a set of named styles at once.

use indexmap::IndexMap;

use super::Registry;
use crate::error::StyleError;
use crate::style::Style;

/// Register each named style (and optional global CSS) into `registry`.
///
/// The name becomes the style's display name unless it already has one, so
/// debug identifiers read like `button_f1k3`. Returns name → class name in
/// sheet order. Every node is built before any is added: on error the
/// registry is left untouched.
pub fn register_style_sheet<'a, I>(
    registry: &mut Registry,
    sheet: I,
    css: Option<&Style>,
) -> Result<IndexMap<String, String>, StyleError>
where
    I: IntoIterator<Item = (&'a str, &'a Style)>,
{
    let mut nodes = Vec::new();
    for (name, style) in sheet {
        let node = if style.display_name().is_some() {
            registry.create_style(style)?
        } else {
            registry.create_style(&style.clone().with_display_name(name))?
        };
        nodes.push((name, node));
    }
    let css = css.map(|css| registry.create_css(css)).transpose()?;

    let mut classes = IndexMap::with_capacity(nodes.len());
    for (name, node) in nodes {
        let node = registry.add(node);
        classes.insert(name.to_owned(), node.identifier().unwrap_or_default().to_owned());
    }
    if let Some(css) = css {
        registry.add(css);
    }
    Ok(classes)
}

/// Join class names with a space, skipping empty ones.
pub fn join<I, S>(classes: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    classes
        .into_iter()
        .filter(|class| !class.as_ref().is_empty())
        .fold(String::new(), |mut out, class| {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(class.as_ref());
            out
        })
}
