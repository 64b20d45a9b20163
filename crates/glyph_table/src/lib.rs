#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! Glyph classification types and compile-time glyph table lookup.
//!
//! This crate owns the one piece of data the rest of the toolchain treats as
//! authoritative: the mapping from a recognized non-ASCII codepoint to its
//! glyph class, base-language spelling, and the flags (`suffixable`,
//! `scoped`, `reserved_in_base`) the Scanner and Rewriter key their decisions
//! on.
//!
//! # Core Types
//!
//! The [`types`] module defines the glyph table's value types:
//!
//! - [`GlyphKind`] — the four glyph classes (Keyword, Identifier, Package, Tentative)
//! - [`GlyphEntry`] — one table row
//! - [`PackageInfo`] — a package glyph's import path and canonical local alias
//!
//! # Architecture
//!
//! The table supports two modes of operation:
//!
//! 1. **Compile-time** (default): `build.rs` generates Rust match arms from
//!    `assets/glyphs.json` at build time, giving [`lookup`] and
//!    [`sized_type_name`] zero runtime parsing overhead.
//! 2. **Runtime** (feature `dynamic-glyphs`): the [`runtime`] module loads
//!    and parses the same JSON at runtime, trading compile-time validation
//!    for faster edit-compile cycles while iterating on the table itself.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `dynamic-glyphs` | Enable runtime JSON glyph table loading via the [`runtime`] module |
//!
//! # Example
//!
//! ```
//! use glyph_table::{lookup, GlyphKind};
//!
//! let entry = lookup('功').expect("功 is a recognized glyph");
//! assert_eq!(entry.kind, GlyphKind::Keyword);
//! assert_eq!(entry.word, "func");
//! ```

/// Glyph classification type definitions.
pub mod types;
pub use types::*;

include!(concat!(env!("OUT_DIR"), "/glyph_table_gen.rs"));

/// An explicit set of enabled glyphs, used to gate experimental or
/// not-yet-stable glyphs without touching the Scanner.
///
/// Defaults to every glyph in [`ALL_GLYPHS`] enabled; the Scanner's
/// `ScanOptions` (see `glyph_core`) carries one of these per scan.
#[derive(Debug, Clone)]
pub struct GlyphSet {
    disabled: std::collections::HashSet<char>,
}

impl GlyphSet {
    /// A set with every recognized glyph enabled.
    pub fn all() -> Self {
        Self {
            disabled: std::collections::HashSet::new(),
        }
    }

    /// Disables a single glyph codepoint. Scanning treats a disabled glyph
    /// as an ordinary, unrecognized identifier-letter codepoint.
    pub fn disable(&mut self, ch: char) -> &mut Self {
        self.disabled.insert(ch);
        self
    }

    /// Looks up `ch`, returning `None` if the glyph is disabled in this set
    /// even though it is present in the underlying table.
    pub fn lookup(&self, ch: char) -> Option<GlyphEntry> {
        if self.disabled.contains(&ch) {
            return None;
        }
        lookup(ch)
    }
}

impl Default for GlyphSet {
    fn default() -> Self {
        Self::all()
    }
}

/// Runtime JSON-based glyph table loading (requires `dynamic-glyphs` feature).
///
/// This module provides dynamic glyph table loading as an alternative to
/// compile-time code generation, for tooling that wants to inspect or
/// validate `assets/glyphs.json` without a full rebuild.
#[cfg(feature = "dynamic-glyphs")]
#[cfg_attr(docsrs, doc(cfg(feature = "dynamic-glyphs")))]
pub mod runtime;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_keyword_glyph() {
        let entry = lookup('功').unwrap();
        assert_eq!(entry.kind, GlyphKind::Keyword);
        assert_eq!(entry.word, "func");
        assert!(entry.reserved_in_base);
    }

    #[test]
    fn lookup_finds_scoped_identifier_glyph() {
        let entry = lookup('度').unwrap();
        assert_eq!(entry.kind, GlyphKind::Identifier);
        assert_eq!(entry.word, "len");
        assert!(entry.scoped);
        assert!(!entry.suffixable);
    }

    #[test]
    fn lookup_finds_suffixable_glyph() {
        let entry = lookup('整').unwrap();
        assert_eq!(entry.word, "int");
        assert!(entry.suffixable);
        assert!(entry.scoped);
    }

    #[test]
    fn lookup_finds_package_glyph_with_split_path_and_alias() {
        let entry = lookup('大').unwrap();
        assert_eq!(entry.kind, GlyphKind::Package);
        let pkg = entry.package.unwrap();
        assert_eq!(pkg.path, "math/big");
        assert_eq!(pkg.alias, "big");
    }

    #[test]
    fn lookup_returns_none_for_unrecognized_codepoint() {
        assert!(lookup('漢').is_none());
    }

    #[test]
    fn sized_type_name_resolves_known_suffixes() {
        assert_eq!(sized_type_name("int", "8"), Some("int8"));
        assert_eq!(sized_type_name("float", "64"), Some("float64"));
        assert_eq!(sized_type_name("complex", "128"), Some("complex128"));
    }

    #[test]
    fn sized_type_name_rejects_unknown_suffix() {
        assert_eq!(sized_type_name("int", "7"), None);
        assert_eq!(sized_type_name("float", "8"), None);
    }

    #[test]
    fn glyph_set_can_disable_a_glyph() {
        let mut set = GlyphSet::all();
        assert!(set.lookup('度').is_some());
        set.disable('度');
        assert!(set.lookup('度').is_none());
        // disabling one glyph does not affect others
        assert!(set.lookup('功').is_some());
    }
}
