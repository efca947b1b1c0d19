//! Property formatting: names → kebab-case, values → CSS text.

use super::StyleValue;
use crate::error::StyleError;

/// Properties that take bare numbers (no implied `px`).
const UNITLESS: &[&str] = &[
    "animation-iteration-count",
    "box-flex",
    "box-flex-group",
    "column-count",
    "counter-increment",
    "counter-reset",
    "flex",
    "flex-grow",
    "flex-positive",
    "flex-shrink",
    "flex-negative",
    "font-weight",
    "line-clamp",
    "line-height",
    "opacity",
    "order",
    "orphans",
    "tab-size",
    "widows",
    "z-index",
    "zoom",
    // SVG
    "fill-opacity",
    "stroke-dashoffset",
    "stroke-opacity",
    "stroke-width",
];

const VENDOR_PREFIXES: &[&str] = &["-webkit-", "-moz-", "-ms-", "-o-"];

/// Convert a camelCase property name to kebab-case.
///
/// `backgroundColor` → `background-color`, `msTransform` → `-ms-transform`.
/// Names that are already kebab-case pass through unchanged.
pub fn hyphenate(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    if out.starts_with("ms-") {
        out.insert(0, '-');
    }
    out
}

/// Whether a numeric value for this (hyphenated) property is emitted bare.
pub fn is_unitless(name: &str) -> bool {
    // Custom properties carry no implied unit.
    if name.starts_with("--") {
        return true;
    }
    let base = VENDOR_PREFIXES
        .iter()
        .find_map(|prefix| name.strip_prefix(prefix))
        .unwrap_or(name);
    UNITLESS.contains(&base)
}

/// Format a number for a property: `10` → `10px`, `0` → `0`, unitless → bare.
pub fn format_number(name: &str, value: f64) -> Result<String, StyleError> {
    if !value.is_finite() {
        return Err(StyleError::InvalidValue {
            property: name.into(),
            message: format!("expected a finite number, got {value}"),
        });
    }
    if value == 0.0 {
        return Ok("0".into());
    }
    if is_unitless(name) {
        Ok(format!("{value}"))
    } else {
        Ok(format!("{value}px"))
    }
}

/// Append `name:value` pairs for one declaration. Lists expand to one pair
/// per element.
pub(crate) fn push_declaration(
    out: &mut Vec<String>,
    name: &str,
    value: &StyleValue,
) -> Result<(), StyleError> {
    match value {
        StyleValue::Str(s) => out.push(format!("{name}:{s}")),
        StyleValue::Number(n) => out.push(format!("{name}:{}", format_number(name, *n)?)),
        StyleValue::List(values) => {
            for item in values {
                match item {
                    StyleValue::Str(_) | StyleValue::Number(_) => {
                        push_declaration(out, name, item)?;
                    }
                    other => {
                        return Err(StyleError::InvalidValue {
                            property: name.into(),
                            message: format!(
                                "fallback lists hold strings or numbers, got: {other:?}"
                            ),
                        })
                    }
                }
            }
        }
        StyleValue::Nested(_) => {
            return Err(StyleError::InvalidValue {
                property: name.into(),
                message: "nested block used as a declaration value".into(),
            })
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hyphenate_camel_case() {
        assert_eq!(hyphenate("backgroundColor"), "background-color");
        assert_eq!(hyphenate("borderTopLeftRadius"), "border-top-left-radius");
    }

    #[test]
    fn hyphenate_ms_prefix() {
        assert_eq!(hyphenate("msTransform"), "-ms-transform");
        assert_eq!(hyphenate("WebkitTransition"), "-webkit-transition");
    }

    #[test]
    fn hyphenate_passthrough() {
        assert_eq!(hyphenate("background-color"), "background-color");
        assert_eq!(hyphenate("--main-color"), "--main-color");
    }

    #[test]
    fn unitless_properties() {
        assert!(is_unitless("opacity"));
        assert!(is_unitless("-webkit-flex-grow"));
        assert!(is_unitless("--gap"));
        assert!(!is_unitless("font-size"));
        assert!(!is_unitless("margin"));
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number("font-size", 10.0).unwrap(), "10px");
        assert_eq!(format_number("padding", 1.5).unwrap(), "1.5px");
        assert_eq!(format_number("margin", 0.0).unwrap(), "0");
        assert_eq!(format_number("opacity", 0.5).unwrap(), "0.5");
        assert_eq!(format_number("z-index", 10.0).unwrap(), "10");
    }

    #[test]
    fn non_finite_number_errors() {
        let err = format_number("width", f64::NAN).unwrap_err();
        assert!(matches!(err, StyleError::InvalidValue { property, .. } if property == "width"));
        assert!(format_number("width", f64::INFINITY).is_err());
    }

    #[test]
    fn nested_list_errors() {
        let mut out = Vec::new();
        let value = StyleValue::List(vec![StyleValue::List(vec![])]);
        assert!(push_declaration(&mut out, "display", &value).is_err());
    }

    #[test]
    fn list_mixes_strings_and_numbers() {
        let mut out = Vec::new();
        let value = StyleValue::List(vec!["auto".into(), 10.into()]);
        push_declaration(&mut out, "width", &value).unwrap();
        assert_eq!(out, vec!["width:auto", "width:10px"]);
    }
}
