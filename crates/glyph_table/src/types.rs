//! Glyph classification types.
//!
//! These are the value types the generated lookup table (see
//! [`crate::lookup`]) and the optional runtime loader (see
//! [`crate::runtime`]) both produce. They carry no behavior of their own —
//! the Scanner and Rewriter interpret them.

use serde::{Deserialize, Serialize};

/// The four glyph classes named in the glyph table's data model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlyphKind {
    /// Stands in for a base-language reserved word (`if`, `func`, `for`, ...).
    Keyword,
    /// Stands in for a built-in identifier, a user-chosen name, or a
    /// constant. See [`GlyphEntry::scoped`] and [`GlyphEntry::word`] for how
    /// to tell the sub-cases apart.
    Identifier,
    /// Stands in for an importable base-language package.
    Package,
    /// Reserved for a future release. Carries no semantics today.
    Tentative,
}

/// The canonical local alias and import path of a package glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageInfo {
    /// The import path, e.g. `"math/big"`.
    pub path: &'static str,
    /// The local name bound to the package, e.g. `"big"`.
    ///
    /// Distinct from `path` whenever the path's final segment isn't itself
    /// a legal identifier equal to the package's declared name (`math/big`'s
    /// package clause is `package big`, not `package math/big`).
    pub alias: &'static str,
}

/// A single glyph table entry: everything the Scanner and Rewriter need to
/// know about one recognized codepoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphEntry {
    pub kind: GlyphKind,
    /// The base-language spelling this glyph maps to. Empty for the
    /// "user-meaning" identifier glyphs that carry no fixed spelling of
    /// their own (the scanner falls back to the glyph's own codepoint).
    pub word: &'static str,
    /// If true, the scanner greedily absorbs trailing ASCII decimal digits
    /// to form a sized type name (`int` + `8` -> `int8`).
    pub suffixable: bool,
    /// If true, this glyph names a base-language predeclared identifier
    /// that user code may shadow in an inner scope.
    pub scoped: bool,
    /// If true, `word` is a reserved word or predeclared name of the base
    /// language; the rewriter must keep user bindings from colliding with it.
    pub reserved_in_base: bool,
    /// Present only for `kind == Package`.
    pub package: Option<PackageInfo>,
}

impl GlyphEntry {
    /// `true` for the unscoped identifier glyphs (`true`, `false`, `nil`,
    /// `iota`): these never participate in shadowing and are never prefixed.
    pub fn is_unscoped_constant(&self) -> bool {
        self.kind == GlyphKind::Identifier && self.reserved_in_base && !self.scoped
    }

    /// `true` for identifier glyphs with no fixed base-language spelling —
    /// the scanner emits the glyph's own codepoint as the identifier text,
    /// and the rewriter treats the result as an ordinary user name.
    pub fn is_user_meaning(&self) -> bool {
        self.kind == GlyphKind::Identifier && self.word.is_empty()
    }
}
