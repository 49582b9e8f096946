use indexmap::IndexMap;

/// Nested key/value block. A `None` value is rendered as a bare `KEY=`.
pub type SubMapping = IndexMap<String, Option<String>>;

/// A single attribute value.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AttributeValue {
    /// Nothing to render. The attribute is skipped entirely.
    #[default]
    Empty,
    Scalar(String),
    /// Multi-valued attribute, rendered as one line per item.
    ScalarList(Vec<String>),
    SubMapping(SubMapping),
    /// One `KEY=[...]` block per element.
    SubMappingList(Vec<SubMapping>),
}

impl AttributeValue {
    /// Whether this value is nil or zero-length. Empty values never reach the
    /// rendered template.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Scalar(value) => value.is_empty(),
            Self::ScalarList(items) => items.is_empty(),
            Self::SubMapping(sub) => sub.is_empty(),
            Self::SubMappingList(subs) => subs.is_empty(),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(items: Vec<String>) -> Self {
        Self::ScalarList(items)
    }
}

impl From<Vec<&str>> for AttributeValue {
    fn from(items: Vec<&str>) -> Self {
        Self::ScalarList(items.into_iter().map(str::to_string).collect())
    }
}

impl From<SubMapping> for AttributeValue {
    fn from(sub: SubMapping) -> Self {
        Self::SubMapping(sub)
    }
}

impl From<Vec<SubMapping>> for AttributeValue {
    fn from(subs: Vec<SubMapping>) -> Self {
        Self::SubMappingList(subs)
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// Ordered attribute mapping. Iteration follows insertion order, which is
/// also the line order of the rendered template.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributeMapping {
    data: IndexMap<String, AttributeValue>,
}

impl AttributeMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an attribute. Replacing an existing key keeps its original
    /// position.
    pub fn insert<K: AsRef<str>, V: Into<AttributeValue>>(
        &mut self,
        key: K,
        value: V,
    ) -> &mut Self {
        self.data.insert(key.as_ref().to_string(), value.into());
        self
    }

    pub fn get<K: AsRef<str>>(&self, key: K) -> Option<&AttributeValue> {
        self.data.get(key.as_ref())
    }

    pub fn contains<K: AsRef<str>>(&self, key: K) -> bool {
        self.data.contains_key(key.as_ref())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, AttributeValue> {
        self.data.iter()
    }

    /// Builds an attribute mapping from a JSON object.
    ///
    /// Scalars other than strings are coerced to their JSON text, `null`
    /// becomes [`AttributeValue::Empty`], and objects become sub-mappings.
    /// Inside a sub-mapping, `null` and `false` become absent values.
    ///
    /// # Errors
    /// `TemplateError::UnsupportedValue` if `json` is not an object, or if an
    /// attribute holds an array mixing objects with scalars or non-empty
    /// nested arrays.
    pub fn from_json(json: &serde_json::Value) -> crate::TemplateResult<Self> {
        Self::try_from(json)
    }
}

impl<K: AsRef<str>, V: Into<AttributeValue>> FromIterator<(K, V)> for AttributeMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

impl<'a> IntoIterator for &'a AttributeMapping {
    type Item = (&'a String, &'a AttributeValue);
    type IntoIter = indexmap::map::Iter<'a, String, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Layout of nested `KEY=[...]` blocks.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    /// Line break after `[` and two-space indentation.
    #[default]
    Pretty,
    /// No line break after `[` and single-space indentation.
    Compact,
}

impl Layout {
    pub const fn line_break(self) -> &'static str {
        match self {
            Self::Pretty => "\n",
            Self::Compact => "",
        }
    }

    pub const fn indent(self) -> &'static str {
        match self {
            Self::Pretty => "  ",
            Self::Compact => " ",
        }
    }
}

impl From<bool> for Layout {
    fn from(indent: bool) -> Self {
        if indent { Self::Pretty } else { Self::Compact }
    }
}

/// How object keys are addressed after JSON extraction.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum KeyStyle {
    /// Keys are plain text.
    #[default]
    Text,
    /// Keys are treated as atomic symbols. The extracted data is the same, but
    /// a missing root key reports a different message.
    Symbolic,
}

impl From<bool> for KeyStyle {
    fn from(symbolic: bool) -> Self {
        if symbolic { Self::Symbolic } else { Self::Text }
    }
}

/// `ToTemplate` is implemented by anything that can be rendered as a resource
/// template.
pub trait ToTemplate {
    /// Renders `self` using the given block layout.
    fn to_template(&self, layout: Layout) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reinsert_keeps_position() {
        let mut attrs = AttributeMapping::new();
        attrs.insert("a", "1").insert("b", "2").insert("a", "3");

        let keys: Vec<&str> = attrs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["a", "b"], "replaced key should keep its slot");
        assert_eq!(
            attrs.get("a"),
            Some(&AttributeValue::Scalar("3".into())),
            "replaced key should hold the new value"
        );
    }

    #[test]
    fn emptiness_covers_every_variant() {
        assert!(AttributeValue::Empty.is_empty(), "Empty");
        assert!(AttributeValue::from("").is_empty(), "empty scalar");
        assert!(AttributeValue::ScalarList(vec![]).is_empty(), "empty list");
        assert!(
            AttributeValue::SubMapping(SubMapping::new()).is_empty(),
            "empty sub-mapping"
        );
        assert!(
            AttributeValue::SubMappingList(vec![]).is_empty(),
            "empty sub-mapping list"
        );

        assert!(!AttributeValue::from("x").is_empty(), "non-empty scalar");
        // A list of empty items is not itself empty; its items are skipped one by one.
        assert!(
            !AttributeValue::from(vec![""]).is_empty(),
            "list holding an empty item"
        );
    }

    #[test]
    fn option_none_becomes_empty() {
        assert_eq!(
            AttributeValue::from(None::<&str>),
            AttributeValue::Empty,
            "None should map to Empty"
        );
        assert_eq!(
            AttributeValue::from(Some("v")),
            AttributeValue::Scalar("v".into()),
            "Some should map to its inner value"
        );
    }

    #[test]
    fn layout_and_key_style_from_flags() {
        assert_eq!(Layout::from(true), Layout::Pretty, "indent flag set");
        assert_eq!(Layout::from(false), Layout::Compact, "indent flag unset");
        assert_eq!(Layout::Compact.line_break(), "", "compact line break");
        assert_eq!(Layout::Compact.indent(), " ", "compact indent");
        assert_eq!(KeyStyle::from(true), KeyStyle::Symbolic, "symbolic flag set");
        assert_eq!(KeyStyle::default(), KeyStyle::Text, "default key style");
    }
}
