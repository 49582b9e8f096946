use serde_json::{Map, Value};

use crate::error::{ROOT_ELEMENT_NOT_PRESENT, TemplateError, TemplateResult, WRONG_RESOURCE_TYPE};
use crate::interface::{AttributeMapping, AttributeValue, KeyStyle, SubMapping};

/// `JsonExtractor` unwraps a resource payload from its root key.
///
/// Resource payloads arrive as `{"<ROOT>": { ... }}`; extraction parses the
/// text and returns whatever sits under the root key, which may be any JSON
/// value.
///
/// # Example
///
/// ```
/// use restemplate::{JsonExtractor, KeyStyle};
/// use serde_json::json;
///
/// let extractor = JsonExtractor::new(KeyStyle::Text);
/// let vm = extractor.extract(r#"{"VM": {"NAME": "test"}}"#, "VM").unwrap();
/// assert_eq!(vm, json!({"NAME": "test"}));
///
/// let err = extractor.extract(r#"{"HOST": {}}"#, "VM").unwrap_err();
/// assert_eq!(err.to_string(), "Error parsing JSON: Wrong resource type");
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct JsonExtractor {
    key_style: KeyStyle,
}

impl JsonExtractor {
    pub const fn new(key_style: KeyStyle) -> Self {
        Self { key_style }
    }

    pub const fn key_style(&self) -> KeyStyle {
        self.key_style
    }

    /// Parses `json_text` and returns the value stored under `root_key`.
    ///
    /// # Errors
    /// - `TemplateError::MalformedInput` if the text is not valid JSON. The
    ///   message is the parser diagnostic.
    /// - `TemplateError::MissingRootKey` if the document is not an object or
    ///   has no `root_key` entry.
    pub fn extract(&self, json_text: &str, root_key: &str) -> TemplateResult<Value> {
        let document: Value = serde_json::from_str(json_text).map_err(|e| {
            tracing::debug!(root_key, key_style = ?self.key_style, error = %e, "malformed JSON payload");
            TemplateError::malformed(&e)
        })?;

        let found = match document {
            Value::Object(mut object) => object.remove(root_key),
            Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::Array(_) => None,
        };

        found.ok_or_else(|| {
            tracing::debug!(root_key, key_style = ?self.key_style, "root key not present");
            TemplateError::MissingRootKey {
                message: self.missing_root_message().to_string(),
            }
        })
    }

    /// Extracts `root_key` and converts the result into an attribute mapping
    /// ready for serialization.
    ///
    /// # Errors
    /// Any error from [`JsonExtractor::extract`] or
    /// [`AttributeMapping::from_json`].
    pub fn extract_attributes(
        &self,
        json_text: &str,
        root_key: &str,
    ) -> TemplateResult<AttributeMapping> {
        let value = self.extract(json_text, root_key)?;
        AttributeMapping::from_json(&value)
    }

    const fn missing_root_message(self) -> &'static str {
        match self.key_style {
            KeyStyle::Text => WRONG_RESOURCE_TYPE,
            KeyStyle::Symbolic => ROOT_ELEMENT_NOT_PRESENT,
        }
    }
}

/// Extracts `root_key` from `json_text` using the given key style.
pub fn extract(json_text: &str, root_key: &str, key_style: KeyStyle) -> TemplateResult<Value> {
    JsonExtractor::new(key_style).extract(json_text, root_key)
}

pub fn parse_json(json_text: &str, root_key: &str) -> TemplateResult<Value> {
    extract(json_text, root_key, KeyStyle::Text)
}

pub fn parse_json_sym(json_text: &str, root_key: &str) -> TemplateResult<Value> {
    extract(json_text, root_key, KeyStyle::Symbolic)
}

/// Renders `attrs` as pretty-printed JSON, keeping insertion order.
///
/// # Errors
/// `TemplateError::Serialize` if the encoder fails.
pub fn to_json(attrs: &AttributeMapping) -> TemplateResult<String> {
    let object: Map<String, Value> = attrs
        .iter()
        .map(|(key, value)| (key.clone(), Value::from(value)))
        .collect();

    serde_json::to_string_pretty(&Value::Object(object)).map_err(|e| {
        tracing::debug!(error = %e, "failed to encode attributes as JSON");
        TemplateError::Serialize {
            message: e.to_string(),
        }
    })
}

impl From<&AttributeValue> for Value {
    fn from(value: &AttributeValue) -> Self {
        match value {
            AttributeValue::Empty => Self::Null,
            AttributeValue::Scalar(scalar) => Self::String(scalar.clone()),
            AttributeValue::ScalarList(items) => {
                Self::Array(items.iter().cloned().map(Self::String).collect())
            }
            AttributeValue::SubMapping(sub) => sub_mapping_to_json(sub),
            AttributeValue::SubMappingList(subs) => {
                Self::Array(subs.iter().map(sub_mapping_to_json).collect())
            }
        }
    }
}

fn sub_mapping_to_json(sub: &SubMapping) -> Value {
    Value::Object(
        sub.iter()
            .map(|(key, value)| (key.clone(), value.clone().map_or(Value::Null, Value::String)))
            .collect(),
    )
}

impl TryFrom<&Value> for AttributeMapping {
    type Error = TemplateError;

    fn try_from(json: &Value) -> TemplateResult<Self> {
        let Value::Object(object) = json else {
            return Err(TemplateError::UnsupportedValue {
                key: String::new(),
                found: format!("expected an object, found {}", json_kind(json)),
            });
        };

        let mut attrs = Self::new();
        for (key, value) in object {
            attrs.insert(key, attribute_from_json(key, value)?);
        }
        Ok(attrs)
    }
}

fn attribute_from_json(key: &str, value: &Value) -> TemplateResult<AttributeValue> {
    let attribute = match value {
        Value::Null => AttributeValue::Empty,
        Value::String(s) => AttributeValue::Scalar(s.clone()),
        Value::Bool(_) | Value::Number(_) => AttributeValue::Scalar(value.to_string()),
        Value::Object(object) => AttributeValue::SubMapping(sub_mapping_from_json(object)),
        Value::Array(items) if items.is_empty() => AttributeValue::Empty,
        Value::Array(items) => {
            let has_object = items.iter().any(Value::is_object);

            if has_object && items.iter().all(|i| i.is_object() || is_blank(i)) {
                AttributeValue::SubMappingList(
                    items
                        .iter()
                        .map(|i| i.as_object().map(sub_mapping_from_json).unwrap_or_default())
                        .collect(),
                )
            } else if !has_object && items.iter().all(|i| !i.is_array() || is_blank(i)) {
                AttributeValue::ScalarList(items.iter().map(scalar_text).collect())
            } else {
                tracing::debug!(key, "unsupported array shape");
                return Err(TemplateError::UnsupportedValue {
                    key: key.to_string(),
                    found: "array mixing objects with scalars or arrays".to_string(),
                });
            }
        }
    };
    Ok(attribute)
}

/// `null` and `[]` list elements carry nothing and are dropped on render.
fn is_blank(value: &Value) -> bool {
    value.is_null() || value.as_array().is_some_and(Vec::is_empty)
}

fn sub_mapping_from_json(object: &Map<String, Value>) -> SubMapping {
    object
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Value::Null | Value::Bool(false) => None,
                Value::String(s) => Some(s.clone()),
                Value::Bool(true) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
                    Some(value.to_string())
                }
            };
            (key.clone(), value)
        })
        .collect()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        // Only blank elements get here.
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
