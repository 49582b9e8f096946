use crate::interface::{AttributeMapping, AttributeValue, Layout, SubMapping, ToTemplate};

/// `TemplateSerializer` renders an [`AttributeMapping`] into the resource
/// template format.
///
/// Each attribute becomes one or more records, emitted in insertion order and
/// separated by a single newline:
///
/// * a scalar becomes `KEY="value"`,
/// * a list of scalars becomes one `KEY="item"` line per non-empty item,
/// * a sub-mapping becomes a `KEY=[ ... ]` block,
/// * a list of sub-mappings becomes one block per non-empty element.
///
/// Keys are upper-cased, values are written as given. Empty attributes leave
/// no trace in the output.
///
/// # Example
///
/// ```
/// use restemplate::{AttributeMapping, Layout, SubMapping, TemplateSerializer};
///
/// let mut disk = SubMapping::new();
/// disk.insert("size".to_string(), Some("10".to_string()));
///
/// let mut attrs = AttributeMapping::new();
/// attrs.insert("name", "foo").insert("memory", "").insert("disk", disk);
///
/// let rendered = TemplateSerializer::new(Layout::Pretty).serialize(&attrs);
/// assert_eq!(rendered, "NAME=\"foo\"\nDISK=[\n  SIZE=\"10\"\n]");
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct TemplateSerializer {
    layout: Layout,
}

impl TemplateSerializer {
    pub const fn new(layout: Layout) -> Self {
        Self { layout }
    }

    pub const fn layout(&self) -> Layout {
        self.layout
    }

    /// Renders `attrs` as template text. The result is a pure function of the
    /// mapping contents and their order.
    pub fn serialize(&self, attrs: &AttributeMapping) -> String {
        let mut records: Vec<String> = Vec::with_capacity(attrs.len());

        for (key, value) in attrs {
            if value.is_empty() {
                tracing::trace!(key = %key, "skipping empty attribute");
                continue;
            }

            let key = key.to_uppercase();
            match value {
                AttributeValue::Empty => {}
                AttributeValue::Scalar(scalar) => records.push(scalar_line(&key, scalar)),
                AttributeValue::ScalarList(items) => records.extend(
                    items
                        .iter()
                        .filter(|item| !item.is_empty())
                        .map(|item| scalar_line(&key, item)),
                ),
                AttributeValue::SubMapping(sub) => records.push(self.block(&key, sub)),
                AttributeValue::SubMappingList(subs) => records.extend(
                    subs.iter()
                        .filter(|sub| !sub.is_empty())
                        .map(|sub| self.block(&key, sub)),
                ),
            }
        }

        records.join("\n")
    }

    fn block(self, key: &str, sub: &SubMapping) -> String {
        let indent = self.layout.indent();

        let entries: Vec<String> = sub
            .iter()
            .map(|(sub_key, sub_value)| {
                let mut entry = format!("{}{}=", indent, sub_key.to_uppercase());
                // A missing sub-value keeps the key with no assignment.
                if let Some(sub_value) = sub_value {
                    entry.push('"');
                    entry.push_str(sub_value);
                    entry.push('"');
                }
                entry
            })
            .collect();

        format!(
            "{}=[{}{}\n]",
            key,
            self.layout.line_break(),
            entries.join(",\n")
        )
    }
}

fn scalar_line(key: &str, value: &str) -> String {
    format!("{}=\"{}\"", key, value)
}

impl ToTemplate for AttributeMapping {
    fn to_template(&self, layout: Layout) -> String {
        TemplateSerializer::new(layout).serialize(self)
    }
}

/// Renders `attrs` as template text; `indent` selects the pretty layout.
pub fn template_to_str(attrs: &AttributeMapping, indent: bool) -> String {
    attrs.to_template(Layout::from(indent))
}
