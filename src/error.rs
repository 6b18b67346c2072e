//! Structured conversion errors.

use core::fmt;

/// Structured error for conversion operations.
///
/// Contract violations (`EMPTY_INPUT`, `MISSING_SECTION`, `CONTEXT_KIND`)
/// and malformed numeric data (`ATTR_NUMERIC`, `CSS_NUMERIC`) terminate a
/// conversion; there is no partial-result path. Absent classes, unmatched
/// rules, and unknown tags are not errors — they fall back to defaults.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConvertError {
    /// Stable machine-readable code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: Box<str>,
    /// Optional markup tag context.
    pub tag: Option<Box<str>>,
    /// Optional attribute-name context.
    pub attribute: Option<Box<str>>,
    /// Optional stylesheet property context.
    pub property: Option<Box<str>>,
}

impl ConvertError {
    pub(crate) fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into().into_boxed_str(),
            tag: None,
            attribute: None,
            property: None,
        }
    }

    pub(crate) fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into().into_boxed_str());
        self
    }

    pub(crate) fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into().into_boxed_str());
        self
    }

    pub(crate) fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into().into_boxed_str());
        self
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(tag) = self.tag.as_deref() {
            write!(f, " [tag={}]", tag)?;
        }
        if let Some(attribute) = self.attribute.as_deref() {
            write!(f, " [attribute={}]", attribute)?;
        }
        if let Some(property) = self.property.as_deref() {
            write!(f, " [property={}]", property)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConvertError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_code_and_context() {
        let err = ConvertError::new("ATTR_NUMERIC", "bad value")
            .with_tag("table")
            .with_attribute("data-padding");
        let rendered = err.to_string();
        assert!(rendered.starts_with("ATTR_NUMERIC: bad value"));
        assert!(rendered.contains("[tag=table]"));
        assert!(rendered.contains("[attribute=data-padding]"));
    }
}
