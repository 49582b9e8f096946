mod error;
mod interface;
mod json;
mod template;

// Public exports.
pub use error::{
    ROOT_ELEMENT_NOT_PRESENT, TemplateError, TemplateErrorKind, TemplateResult,
    WRONG_RESOURCE_TYPE,
};
pub use interface::{AttributeMapping, AttributeValue, KeyStyle, Layout, SubMapping, ToTemplate};
pub use json::{JsonExtractor, extract, parse_json, parse_json_sym, to_json};
pub use template::{TemplateSerializer, template_to_str};
