use std::fmt;

/// The kind of file a transfer uploads. Each kind maps to its own Bot API method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    /// Generic file (PDF, ZIP, DOCX, ...), delivered as-is.
    Document,
    /// Image, delivered (and recompressed) as a photo.
    Photo,
}

impl PayloadKind {
    /// Capitalized label used in user-facing result text.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Document => "Document",
            Self::Photo => "Photo",
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document => f.write_str("document"),
            Self::Photo => f.write_str("photo"),
        }
    }
}
