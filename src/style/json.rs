//! Building [`Style`] values from JSON objects.
//!
//! Accepts the object shape used by CSS-in-JS callers:
//!
//! ```json
//! { "backgroundColor": "red", "padding": 10, "&:hover": { "color": "blue" } }
//! ```
//!
//! `null` entries are skipped and `$displayName` sets the debug name.
//! Booleans, non-finite numbers, and objects inside fallback lists are
//! rejected.

use serde_json::Value;

use super::{Style, StyleValue};
use crate::error::StyleError;

const DISPLAY_NAME: &str = "$displayName";

impl Style {
    /// Convert a JSON object into a style.
    pub fn from_json(value: &Value) -> Result<Self, StyleError> {
        match value {
            Value::Object(_) => object_to_style(value),
            other => Err(StyleError::InvalidValue {
                property: "<root>".into(),
                message: format!("expected an object, got: {other}"),
            }),
        }
    }
}

impl TryFrom<&Value> for Style {
    type Error = StyleError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Style::from_json(value)
    }
}

fn object_to_style(value: &Value) -> Result<Style, StyleError> {
    let mut style = Style::new();
    let Value::Object(map) = value else {
        return Ok(style);
    };

    for (key, value) in map {
        if key == DISPLAY_NAME {
            match value {
                Value::String(name) => style = style.with_display_name(name.clone()),
                Value::Null => {}
                other => {
                    return Err(StyleError::InvalidValue {
                        property: key.clone(),
                        message: format!("expected a string, got: {other}"),
                    })
                }
            }
            continue;
        }
        if let Some(value) = json_to_value(key, value)? {
            style.insert(key.clone(), value);
        }
    }
    Ok(style)
}

fn json_to_value(key: &str, value: &Value) -> Result<Option<StyleValue>, StyleError> {
    let converted = match value {
        Value::Null => return Ok(None),
        Value::String(s) => StyleValue::Str(s.clone()),
        Value::Number(n) => StyleValue::Number(number(key, n)?),
        Value::Array(items) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Null => {}
                    Value::String(s) => values.push(StyleValue::Str(s.clone())),
                    Value::Number(n) => values.push(StyleValue::Number(number(key, n)?)),
                    other => {
                        return Err(StyleError::InvalidValue {
                            property: key.into(),
                            message: format!("fallback lists hold strings or numbers, got: {other}"),
                        })
                    }
                }
            }
            StyleValue::List(values)
        }
        Value::Object(_) => StyleValue::Nested(object_to_style(value)?),
        Value::Bool(b) => {
            return Err(StyleError::InvalidValue {
                property: key.into(),
                message: format!("unsupported boolean value: {b}"),
            })
        }
    };
    Ok(Some(converted))
}

fn number(key: &str, n: &serde_json::Number) -> Result<f64, StyleError> {
    n.as_f64().ok_or_else(|| StyleError::InvalidValue {
        property: key.into(),
        message: format!("number out of range: {n}"),
    })
}
