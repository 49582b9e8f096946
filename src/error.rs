pub type TemplateResult<T> = std::result::Result<T, TemplateError>;

/// Message returned when a JSON document lacks the requested root key.
pub const WRONG_RESOURCE_TYPE: &str = "Error parsing JSON: Wrong resource type";

/// Message returned by the symbolic-key path when the root key is absent.
pub const ROOT_ELEMENT_NOT_PRESENT: &str = "Error parsing JSON: root element not present";

/// Category of a [`TemplateError`], for branching without matching on
/// message text.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TemplateErrorKind {
    MalformedInput,
    MissingRootKey,
    UnsupportedValue,
    Serialize,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TemplateError {
    /// The input could not be parsed as JSON. The message is the parser
    /// diagnostic, untouched.
    MalformedInput {
        message: String,
    },
    /// The JSON parsed, but the root key was missing or the document was not
    /// an object.
    MissingRootKey {
        message: String,
    },
    /// A JSON value has a shape that has no attribute representation.
    UnsupportedValue {
        key: String,
        found: String,
    },
    Serialize {
        message: String,
    },
}

impl TemplateError {
    pub const fn kind(&self) -> TemplateErrorKind {
        match self {
            Self::MalformedInput { .. } => TemplateErrorKind::MalformedInput,
            Self::MissingRootKey { .. } => TemplateErrorKind::MissingRootKey,
            Self::UnsupportedValue { .. } => TemplateErrorKind::UnsupportedValue,
            Self::Serialize { .. } => TemplateErrorKind::Serialize,
        }
    }

    /// The human readable message carried by this error.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub(crate) fn malformed(error: &serde_json::Error) -> Self {
        Self::MalformedInput {
            message: error.to_string(),
        }
    }
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedInput { message } | Self::MissingRootKey { message } => {
                write!(f, "{}", message)
            }
            Self::UnsupportedValue { key, found } => {
                write!(f, "Unsupported value for attribute '{}': {}", key, found)
            }
            Self::Serialize { message } => {
                write!(f, "Error generating JSON: {}", message)
            }
        }
    }
}

impl std::error::Error for TemplateError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_root_key_displays_literal_message() {
        let error = TemplateError::MissingRootKey {
            message: WRONG_RESOURCE_TYPE.to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Error parsing JSON: Wrong resource type",
            "display must be the bare literal"
        );
        assert_eq!(
            error.kind(),
            TemplateErrorKind::MissingRootKey,
            "kind should follow the variant"
        );
    }

    #[test]
    fn malformed_input_passes_parser_message_through() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let expected = parse_error.to_string();

        let error = TemplateError::malformed(&parse_error);
        assert_eq!(
            error.message(),
            expected,
            "parser diagnostic should pass through untouched"
        );
        assert_eq!(
            error.kind(),
            TemplateErrorKind::MalformedInput,
            "kind should follow the variant"
        );
    }

    #[test]
    fn unsupported_value_names_the_key() {
        let error = TemplateError::UnsupportedValue {
            key: "disk".to_string(),
            found: "array mixing objects and scalars".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Unsupported value for attribute 'disk': array mixing objects and scalars",
            "message should name the attribute"
        );
    }
}
