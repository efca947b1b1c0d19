//! Style nodes: one registered style, keyframes block, or raw rule.
//!
//! A node is built once from style input and never changes afterwards. Its
//! key is the hash of a kind-tagged template (the CSS rendered with `&` in
//! place of the generated class name), so the key does not depend on the
//! debug name or on the class name derived from it.

use crate::error::StyleError;
use crate::hash::{HashFn, StyleKey};
use crate::style::Style;

/// Placeholder selector used when rendering the hash template.
const PLACEHOLDER: &str = "&";

/// What a node was registered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A class-scoped style; has an identifier.
    Style,
    /// An `@keyframes` block; has an identifier.
    Keyframes,
    /// A raw or global rule; no identifier.
    Rule,
}

impl NodeKind {
    fn tag(self) -> char {
        match self {
            NodeKind::Style => 's',
            NodeKind::Keyframes => 'k',
            NodeKind::Rule => 'r',
        }
    }
}

/// One registered unit of CSS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleNode {
    key: StyleKey,
    kind: NodeKind,
    identifier: Option<String>,
    debug_name: Option<String>,
    rules: Vec<String>,
    css_text: String,
}

impl StyleNode {
    /// Build a class-scoped style node.
    ///
    /// Nested selector keys replace `&` with the generated class selector, or
    /// are appended as descendants when they contain no `&`. Nested keys
    /// starting with `@` wrap the parent's rules in that at-rule.
    pub fn style(style: &Style, hash: HashFn, debug: bool) -> Result<Self, StyleError> {
        let template = render_block(PLACEHOLDER, style)?;
        let key = key_for(NodeKind::Style, &template.concat(), hash);
        let debug_name = debug_name(style, debug);
        let identifier = identifier(&key, debug_name.as_deref());
        let rules = render_block(&format!(".{identifier}"), style)?;
        Ok(Self::new(key, NodeKind::Style, Some(identifier), debug_name, rules))
    }

    /// Build an `@keyframes` node. Every top-level entry must be a frame
    /// block (`from`, `to`, `50%`, ...) holding plain declarations.
    pub fn keyframes(frames: &Style, hash: HashFn, debug: bool) -> Result<Self, StyleError> {
        if let Some(property) = frames.first_declaration() {
            return Err(StyleError::InvalidKeyframes {
                property: property.into(),
            });
        }
        let mut body = String::new();
        for (selector, frame) in frames.nested() {
            if selector.is_empty() {
                return Err(StyleError::EmptyProperty);
            }
            if let Some((nested, _)) = frame.nested().next() {
                return Err(StyleError::InvalidKeyframes {
                    property: format!("{selector} {nested}"),
                });
            }
            body.push_str(&format!("{selector}{{{}}}", frame.declarations()?));
        }

        let key = key_for(
            NodeKind::Keyframes,
            &format!("@keyframes {PLACEHOLDER}{{{body}}}"),
            hash,
        );
        let debug_name = debug_name(frames, debug);
        let identifier = identifier(&key, debug_name.as_deref());
        let rules = vec![format!("@keyframes {identifier}{{{body}}}")];
        Ok(Self::new(key, NodeKind::Keyframes, Some(identifier), debug_name, rules))
    }

    /// Build a raw rule under a verbatim selector.
    ///
    /// At-rule selectors (`@font-face`, `@media print`) wrap the declarations
    /// and nested rules in one block. An empty selector registers global CSS:
    /// every declaration must then sit under a nested selector key.
    pub fn rule(selector: &str, style: &Style, hash: HashFn) -> Result<Self, StyleError> {
        let selector = selector.trim();
        let rules = if selector.starts_with('@') {
            let mut body = style.declarations()?;
            let inner = render_nested("", style)?.concat();
            if !body.is_empty() && !inner.is_empty() {
                body.push(';');
            }
            body.push_str(&inner);
            vec![format!("{selector}{{{body}}}")]
        } else {
            render_block(selector, style)?
        };
        let key = key_for(NodeKind::Rule, &rules.concat(), hash);
        Ok(Self::new(key, NodeKind::Rule, None, None, rules))
    }

    fn new(
        key: StyleKey,
        kind: NodeKind,
        identifier: Option<String>,
        debug_name: Option<String>,
        rules: Vec<String>,
    ) -> Self {
        let css_text = rules.concat();
        Self {
            key,
            kind,
            identifier,
            debug_name,
            rules,
            css_text,
        }
    }

    /// The content hash.
    pub fn key(&self) -> &StyleKey {
        &self.key
    }

    /// What this node was registered as.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Generated class or keyframes name. `None` for raw rules.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Debug name baked into the identifier, if debug mode was on.
    pub fn debug_name(&self) -> Option<&str> {
        self.debug_name.as_deref()
    }

    /// Individual CSS rules, in output order.
    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    /// All rules concatenated.
    pub fn css_text(&self) -> &str {
        &self.css_text
    }
}

fn key_for(kind: NodeKind, template: &str, hash: HashFn) -> StyleKey {
    let mut feed = String::with_capacity(template.len() + 1);
    feed.push(kind.tag());
    feed.push_str(template);
    StyleKey::new(hash(&feed))
}

fn identifier(key: &StyleKey, debug_name: Option<&str>) -> String {
    match debug_name {
        Some(name) => format!("{name}_f{key}"),
        None => format!("f{key}"),
    }
}

/// Sanitized display name when debug mode is on.
///
/// The result is a valid CSS identifier start: names beginning with a digit,
/// or with `-` and a digit, get a `_` prefix.
fn debug_name(style: &Style, debug: bool) -> Option<String> {
    if !debug {
        return None;
    }
    let mut name: String = style
        .display_name()?
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let mut chars = name.chars();
    let needs_prefix = match (chars.next(), chars.next()) {
        (Some(first), _) if first.is_ascii_digit() => true,
        (Some('-'), Some(second)) => second.is_ascii_digit(),
        _ => false,
    };
    if needs_prefix {
        name.insert(0, '_');
    }
    (!name.is_empty()).then_some(name)
}

/// Substitute a nested key against its parent selector.
fn interpolate(selector: &str, parent: &str) -> String {
    if selector.contains('&') {
        selector.replace('&', parent)
    } else if parent.is_empty() {
        selector.to_owned()
    } else {
        format!("{parent} {selector}")
    }
}

/// Render `selector{declarations}` followed by every nested block.
fn render_block(selector: &str, style: &Style) -> Result<Vec<String>, StyleError> {
    let mut rules = Vec::new();
    let declarations = style.declarations()?;
    if !declarations.is_empty() {
        if selector.is_empty() {
            return Err(StyleError::MissingSelector {
                property: style.first_declaration().unwrap_or_default().into(),
            });
        }
        rules.push(format!("{selector}{{{declarations}}}"));
    }
    rules.extend(render_nested(selector, style)?);
    Ok(rules)
}

fn render_nested(selector: &str, style: &Style) -> Result<Vec<String>, StyleError> {
    let mut rules = Vec::new();
    for (key, nested) in style.nested() {
        if key.is_empty() {
            return Err(StyleError::EmptyProperty);
        }
        if key.starts_with('@') {
            let inner = render_block(selector, nested)?;
            if !inner.is_empty() {
                rules.push(format!("{key}{{{}}}", inner.concat()));
            }
        } else {
            rules.extend(render_block(&interpolate(key, selector), nested)?);
        }
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::string_hash;
    use pretty_assertions::assert_eq;

    fn style_node(style: &Style) -> StyleNode {
        StyleNode::style(style, string_hash, false).unwrap()
    }

    #[test]
    fn simple_style() {
        let node = style_node(&Style::new().set("backgroundColor", "red"));
        let id = node.identifier().unwrap();
        assert!(id.starts_with('f'));
        assert_eq!(id, format!("f{}", node.key()));
        assert_eq!(node.css_text(), format!(".{id}{{background-color:red}}"));
        assert_eq!(node.kind(), NodeKind::Style);
    }

    #[test]
    fn key_ignores_declaration_order() {
        let a = style_node(&Style::new().set("color", "red").set("fontSize", 10));
        let b = style_node(&Style::new().set("fontSize", 10).set("color", "red"));
        assert_eq!(a.key(), b.key());
        assert_eq!(a.css_text(), b.css_text());
    }

    #[test]
    fn nested_selectors() {
        let node = style_node(
            &Style::new()
                .set("color", "red")
                .nest("&:hover", Style::new().set("color", "blue"))
                .nest("span", Style::new().set("fontWeight", 700)),
        );
        let id = node.identifier().unwrap();
        assert_eq!(
            node.rules(),
            &[
                format!(".{id}{{color:red}}"),
                format!(".{id}:hover{{color:blue}}"),
                format!(".{id} span{{font-weight:700}}"),
            ]
        );
    }

    #[test]
    fn media_query_wraps_parent() {
        let node = style_node(
            &Style::new()
                .set("width", 100)
                .nest("@media (min-width: 500px)", Style::new().set("width", 200)),
        );
        let id = node.identifier().unwrap();
        assert_eq!(
            node.css_text(),
            format!(".{id}{{width:100px}}@media (min-width: 500px){{.{id}{{width:200px}}}}")
        );
    }

    #[test]
    fn empty_style_registers() {
        let a = style_node(&Style::new());
        let b = style_node(&Style::new());
        assert_eq!(a.key(), b.key());
        assert_eq!(a.css_text(), "");
        assert!(a.rules().is_empty());
    }

    #[test]
    fn debug_name_changes_identifier_not_key() {
        let plain = StyleNode::style(&Style::new().set("color", "red"), string_hash, true).unwrap();
        let named = StyleNode::style(
            &Style::new().set("color", "red").with_display_name("my button"),
            string_hash,
            true,
        )
        .unwrap();
        assert_eq!(plain.key(), named.key());
        assert_eq!(named.identifier().unwrap(), format!("my_button_f{}", named.key()));
        assert_eq!(named.debug_name(), Some("my_button"));
    }

    #[test]
    fn debug_name_never_starts_identifier_with_digit() {
        let named = |name: &str| {
            StyleNode::style(
                &Style::new().set("color", "red").with_display_name(name),
                string_hash,
                true,
            )
            .unwrap()
        };
        let node = named("2col");
        assert_eq!(node.debug_name(), Some("_2col"));
        assert_eq!(node.identifier().unwrap(), format!("_2col_f{}", node.key()));
        assert_eq!(named("-1x").debug_name(), Some("_-1x"));
        assert_eq!(named("-webkit").debug_name(), Some("-webkit"));
        assert_eq!(named("col2").debug_name(), Some("col2"));
    }

    #[test]
    fn display_name_ignored_without_debug() {
        let node = StyleNode::style(
            &Style::new().set("color", "red").with_display_name("button"),
            string_hash,
            false,
        )
        .unwrap();
        assert_eq!(node.identifier().unwrap(), format!("f{}", node.key()));
        assert_eq!(node.debug_name(), None);
    }

    #[test]
    fn keyframes() {
        let frames = Style::new()
            .nest("from", Style::new().set("opacity", 0))
            .nest("to", Style::new().set("opacity", 1));
        let node = StyleNode::keyframes(&frames, string_hash, false).unwrap();
        let name = node.identifier().unwrap();
        assert_eq!(
            node.css_text(),
            format!("@keyframes {name}{{from{{opacity:0}}to{{opacity:1}}}}")
        );
        assert_eq!(node.kind(), NodeKind::Keyframes);
    }

    #[test]
    fn keyframes_reject_top_level_declarations() {
        let frames = Style::new().set("opacity", 0);
        let err = StyleNode::keyframes(&frames, string_hash, false).unwrap_err();
        assert_eq!(err, StyleError::InvalidKeyframes { property: "opacity".into() });
    }

    #[test]
    fn keyframes_reject_nested_frames() {
        let frames = Style::new().nest("from", Style::new().nest("&:hover", Style::new()));
        assert!(StyleNode::keyframes(&frames, string_hash, false).is_err());
    }

    #[test]
    fn keyframes_reject_blank_frame_key() {
        let frames = Style::new().nest("  ", Style::new().set("opacity", 0));
        assert_eq!(
            StyleNode::keyframes(&frames, string_hash, false).unwrap_err(),
            StyleError::EmptyProperty
        );
    }

    #[test]
    fn kinds_do_not_collide() {
        let style = style_node(&Style::new());
        let css = StyleNode::rule("", &Style::new(), string_hash).unwrap();
        assert_ne!(style.key(), css.key());
    }

    #[test]
    fn global_css() {
        let node = StyleNode::rule(
            "",
            &Style::new().nest("body", Style::new().set("margin", 0)),
            string_hash,
        )
        .unwrap();
        assert_eq!(node.css_text(), "body{margin:0}");
        assert_eq!(node.identifier(), None);
        assert_eq!(node.kind(), NodeKind::Rule);
    }

    #[test]
    fn global_css_requires_selector() {
        let err = StyleNode::rule("", &Style::new().set("margin", 0), string_hash).unwrap_err();
        assert_eq!(err, StyleError::MissingSelector { property: "margin".into() });
    }

    #[test]
    fn selector_rule_with_nesting() {
        let node = StyleNode::rule(
            "a",
            &Style::new()
                .set("color", "red")
                .nest("&:hover", Style::new().set("color", "blue")),
            string_hash,
        )
        .unwrap();
        assert_eq!(node.css_text(), "a{color:red}a:hover{color:blue}");
    }

    #[test]
    fn font_face_rule() {
        let node = StyleNode::rule(
            "@font-face",
            &Style::new().set("fontFamily", "Bitter").set("src", "url(bitter.woff)"),
            string_hash,
        )
        .unwrap();
        assert_eq!(node.css_text(), "@font-face{font-family:Bitter;src:url(bitter.woff)}");
    }

    #[test]
    fn media_rule_with_selectors() {
        let node = StyleNode::rule(
            "@media print",
            &Style::new().nest("body", Style::new().set("color", "black")),
            string_hash,
        )
        .unwrap();
        assert_eq!(node.css_text(), "@media print{body{color:black}}");
    }

    #[test]
    fn empty_nested_key_errors() {
        let style = Style::new().nest(" ", Style::new().set("color", "red"));
        assert_eq!(
            StyleNode::style(&style, string_hash, false).unwrap_err(),
            StyleError::EmptyProperty
        );
    }

    #[test]
    fn css_text_is_deterministic() {
        let style = Style::new()
            .set("color", "red")
            .nest("&:focus", Style::new().set("outline", "none"));
        assert_eq!(style_node(&style), style_node(&style));
    }
}
