use std::fmt;

/// Dotted path addressing nested form data, e.g. `"personal.fullName"`.
/// Fields are scalar, list or file valued at the leaf; array indices are not
/// part of the addressing model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        self.segments.as_slice()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn parse(input: &str) -> Result<Self, FieldPathParseError> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(FieldPathParseError::new("empty path"));
        }

        let mut segments = Vec::new();
        for (idx, segment) in raw.split('.').enumerate() {
            if segment.is_empty() {
                return Err(FieldPathParseError::new(format!(
                    "empty segment at position {idx}"
                )));
            }
            segments.push(segment.to_string());
        }
        Ok(Self { segments })
    }

    /// Parse a schema-supplied field name. Schema validity is the caller's
    /// precondition, so a malformed name degrades to a single root key
    /// instead of failing the whole form.
    pub fn parse_lossy(input: &str) -> Self {
        Self::parse(input).unwrap_or_else(|_| Self {
            segments: vec![input.to_string()],
        })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segments.join(".").as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPathParseError {
    message: String,
}

impl FieldPathParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldPathParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message.as_str())
    }
}

impl std::error::Error for FieldPathParseError {}
