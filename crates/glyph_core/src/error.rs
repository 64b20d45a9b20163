//! Error types for the Scanner.
//!
//! # Error Categories
//!
//! | Category | Variants | Meaning |
//! |----------|----------|---------|
//! | Scanning | `InvalidUtf8` | The input byte stream is not valid UTF-8 |
//!
//! A base-language parse error is not a [`ScanError`] — it is surfaced by
//! the external parser collaborator and carried by
//! [`crate::TranslateError::Parse`] instead, since the parser (not the
//! Scanner) is what detects it (§7). The Rewriter cannot fail: every
//! invariant it relies on is guaranteed by a well-formed parse, so there is
//! no `RewriteError` type here.
//!
//! [`ScanError`] carries a [`glyph_base::Span`] so a driver can point at the
//! offending source location without re-deriving it.

use glyph_base::Span;
use std::fmt;

/// Errors that can occur while scanning dialect source text (§7).
#[derive(Debug, Clone)]
pub enum ScanErrorKind {
    /// The input byte stream is not valid UTF-8. Fatal for the file.
    InvalidUtf8,
}

/// A Scanner error, annotated with the byte span where it was detected.
#[derive(Debug, Clone)]
pub struct ScanError {
    pub kind: ScanErrorKind,
    pub span: Span,
}

impl ScanError {
    pub fn invalid_utf8(at: usize) -> Self {
        Self {
            kind: ScanErrorKind::InvalidUtf8,
            span: Span::new(at, at),
        }
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ScanErrorKind::InvalidUtf8 => {
                write!(f, "malformed UTF-8 at byte offset {}", self.span.start)
            }
        }
    }
}

impl std::error::Error for ScanError {}

/// Result type for scanning operations.
pub type ScanResult<T> = Result<T, ScanError>;
