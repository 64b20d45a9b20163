#![cfg_attr(docsrs, feature(doc_cfg))]

//! # glyph-core
//!
//! Source-to-source translation pipeline for a Chinese-glyph-based dialect
//! of a base language (the glyph dialect substitutes single Unicode
//! codepoints for reserved words, built-in identifiers, and importable
//! packages).
//!
//! ## Architecture
//!
//! 1. **Scanner** ([`scanner`]) — reads dialect source text codepoint by
//!    codepoint, classifies glyphs against [`glyph_table`], and emits a
//!    base-language token stream. ASCII runs are tokenized by ordinary
//!    lexical rules.
//! 2. **Parser** — an external collaborator, characterized by the
//!    [`ast::ParserApi`] trait. [`reference`] supplies a small, honestly
//!    incomplete implementation sufficient to exercise the pipeline
//!    end to end.
//! 3. **Rewriter** ([`rewriter`]) — walks the parsed tree, prefixing every
//!    user-chosen binding (and every reference that resolves to one) to
//!    guarantee it cannot collide with a base-language reserved word or
//!    built-in, and synthesizes missing imports for package glyphs the
//!    Scanner saw.
//! 4. **Formatter** — an external collaborator, characterized by the
//!    [`ast::FormatterApi`] trait, with the same [`reference`] counterpart.
//!
//! [`translate`] drives all four stages for the common case of "dialect
//! source text in, base-language source text out".
//!
//! ## Feature Flags
//!
//! - `dynamic-glyphs` — enables [`glyph_table`]'s runtime glyph-table
//!   loader, for tooling that needs to inspect or fuzz the table without
//!   rebuilding.

pub mod ast;
pub mod error;
pub mod reference;
pub mod rewriter;
pub mod scanner;
pub mod scope;
pub mod token;

pub use ast::{File, FormatterApi, ParserApi};
pub use error::{ScanError, ScanErrorKind, ScanResult};
pub use reference::{ReferenceFormatter, ReferenceParser};
pub use scanner::{scan, ScanOptions, ScanOutput};
pub use scope::ScopeStack;
pub use token::{Keyword, Token, TokenType};

use glyph_table::GlyphSet;

/// A translation error: either the Scanner or the external parser rejected
/// the input. The Rewriter itself cannot fail (§7: no invariant a
/// well-formed parse can violate survives the tree walk).
#[derive(Debug)]
pub enum TranslateError<P: std::fmt::Display> {
    Scan(ScanError),
    Parse(P),
}

impl<P: std::fmt::Display> std::fmt::Display for TranslateError<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslateError::Scan(e) => write!(f, "{}", e),
            TranslateError::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl<P: std::fmt::Display + std::fmt::Debug> std::error::Error for TranslateError<P> {}

/// Runs the full Scanner → Parser → Rewriter → Formatter pipeline over one
/// file of dialect source text, given a parser/formatter pair implementing
/// the external collaborator traits (§6).
///
/// ```
/// use glyph_core::{translate, ReferenceParser, ReferenceFormatter};
/// use glyph_table::GlyphSet;
///
/// let glyphs = GlyphSet::all();
/// let out = translate(
///     "package main\nfunc main(){var n = 50}\n",
///     &glyphs,
///     &ReferenceParser,
///     &ReferenceFormatter,
/// )
/// .unwrap();
/// assert!(out.contains("_n"));
/// ```
pub fn translate<P: ParserApi, F: FormatterApi>(
    source: &str,
    glyphs: &GlyphSet,
    parser: &P,
    formatter: &F,
) -> Result<String, TranslateError<P::Error>> {
    let options = ScanOptions::new(glyphs);
    let scanned = scan(source, &options).map_err(TranslateError::Scan)?;
    let mut file = parser
        .parse(&scanned.tokens, source)
        .map_err(TranslateError::Parse)?;
    rewriter::rewrite(&mut file, glyphs, &scanned.packages_referenced);
    Ok(formatter.format(&file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_runs_the_full_pipeline() {
        let glyphs = GlyphSet::all();
        let out = translate(
            "package main\nfunc main(){var n = 50}\n",
            &glyphs,
            &ReferenceParser,
            &ReferenceFormatter,
        )
        .unwrap();
        assert!(out.contains("_n = 50"));
    }

    #[test]
    fn translate_surfaces_parse_errors() {
        let glyphs = GlyphSet::all();
        let result = translate("not a valid file at all {{{", &glyphs, &ReferenceParser, &ReferenceFormatter);
        assert!(result.is_err());
    }
}
