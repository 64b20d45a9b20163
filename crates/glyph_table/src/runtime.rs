//! Runtime glyph table loading for development builds and tooling.
//!
//! This module provides dynamic JSON-based glyph table loading as an
//! alternative to compile-time code generation. Enable with the
//! `dynamic-glyphs` feature.
//!
//! # Architecture
//!
//! The runtime table trades compile-time validation for faster iteration
//! while editing `assets/glyphs.json`: instead of regenerating Rust match
//! arms at build time, this module embeds the same JSON and parses it once
//! at runtime when [`GlyphIndex::new`] is called.
//!
//! # When to Use
//!
//! - **Editing the glyph table**: use `dynamic-glyphs` to check a change to
//!   `glyphs.json` without waiting for `build.rs` to regenerate and the
//!   crate to recompile.
//! - **Production**: disable this feature; the generated [`crate::lookup`]
//!   is the one the Scanner actually uses.
//!
//! # JSON Format
//!
//! The glyph table file must contain a top-level `glyphs` array and a
//! `suffixes` array, matching the schema `build.rs` consumes.
//!
//! # Example
//!
//! ```
//! use glyph_table::runtime::GlyphIndex;
//!
//! let index = GlyphIndex::new();
//! assert!(index.entry('功').is_some());
//! ```
//!
//! # Type Disambiguation
//!
//! This module defines its own [`GlyphRecord`] for JSON deserialization,
//! distinct from [`crate::types::GlyphEntry`], which the compile-time
//! generated lookup returns.

use rand::seq::SliceRandom;
use serde::Deserialize;
use std::collections::HashMap;

const GLYPHS_JSON: &str = include_str!("../assets/glyphs.json");

/// Deserialized glyph table data from `glyphs.json`.
#[derive(Deserialize, Debug)]
pub struct GlyphTableData {
    /// Every glyph record in table order.
    pub glyphs: Vec<GlyphRecord>,
    /// Suffix whitelists for suffixable glyphs.
    pub suffixes: Vec<SuffixRecord>,
}

/// A single glyph record as it appears in `glyphs.json`.
#[derive(Deserialize, Debug, Clone)]
pub struct GlyphRecord {
    /// The single-codepoint glyph, as a one-character string.
    pub char: String,
    /// One of `"Keyword"`, `"Identifier"`, `"Package"`, `"Tentative"`.
    pub kind: String,
    /// The base-language spelling, or the empty string for user-meaning glyphs.
    pub word: String,
    /// Whether the scanner absorbs trailing ASCII digits after this glyph.
    #[serde(default)]
    pub suffixable: bool,
    /// Whether `word` names a base-language predeclared identifier.
    #[serde(default)]
    pub scoped: bool,
    /// Whether `word` is reserved in the base language.
    #[serde(rename = "reservedInBase", default)]
    pub reserved_in_base: bool,
    /// Import path and canonical alias, present only for `Package` glyphs.
    #[serde(default)]
    pub package: Option<PackageRecord>,
}

/// A package glyph's import path and canonical local alias.
#[derive(Deserialize, Debug, Clone)]
pub struct PackageRecord {
    /// The import path, e.g. `"math/big"`.
    pub path: String,
    /// The local alias the rewriter binds the import to, e.g. `"big"`.
    pub alias: String,
}

/// A suffix whitelist entry for one suffixable glyph's base spelling.
#[derive(Deserialize, Debug, Clone)]
pub struct SuffixRecord {
    /// The base spelling, e.g. `"int"`.
    pub base: String,
    /// Every digit run that combines with `base` to form a valid sized
    /// type name, e.g. `["8", "16", "32", "64"]`.
    pub variants: Vec<String>,
}

/// Index over a runtime-parsed glyph table, for tooling that wants to
/// inspect or validate `glyphs.json` without a full rebuild.
pub struct GlyphIndex {
    data: GlyphTableData,
}

impl GlyphIndex {
    /// Loads and parses the glyph table from the embedded JSON file.
    pub fn new() -> Self {
        let data: GlyphTableData =
            serde_json::from_str(GLYPHS_JSON).expect("Failed to parse glyphs.json");
        Self { data }
    }

    /// Looks up a single glyph record by its codepoint.
    pub fn entry(&self, ch: char) -> Option<&GlyphRecord> {
        self.data
            .glyphs
            .iter()
            .find(|g| g.char.chars().next() == Some(ch))
    }

    /// Returns every glyph record of the given kind (case-sensitive: one of
    /// `"Keyword"`, `"Identifier"`, `"Package"`, `"Tentative"`).
    pub fn glyphs_of_kind(&self, kind: &str) -> Vec<&GlyphRecord> {
        self.data.glyphs.iter().filter(|g| g.kind == kind).collect()
    }

    /// Returns every glyph record whose `reserved_in_base` flag is set.
    pub fn reserved_glyphs(&self) -> Vec<&GlyphRecord> {
        self.data.glyphs.iter().filter(|g| g.reserved_in_base).collect()
    }

    /// Returns the suffix whitelist for a given base spelling, if any.
    pub fn suffixes_for(&self, base: &str) -> Option<&[String]> {
        self.data
            .suffixes
            .iter()
            .find(|s| s.base == base)
            .map(|s| s.variants.as_slice())
    }

    /// Cross-checks this runtime-parsed table against the compile-time
    /// generated [`crate::ALL_GLYPHS`], returning the codepoints present in
    /// one but not the other. An empty result means the JSON asset and the
    /// last build are in sync.
    pub fn diff_against_generated(&self) -> Vec<char> {
        let generated: std::collections::HashSet<char> = crate::ALL_GLYPHS.iter().copied().collect();
        let runtime: std::collections::HashSet<char> = self
            .data
            .glyphs
            .iter()
            .filter_map(|g| g.char.chars().next())
            .collect();
        generated.symmetric_difference(&runtime).copied().collect()
    }

    /// Selects a random glyph record from the whole table, for fuzz-testing
    /// the Scanner against arbitrary glyph combinations.
    ///
    /// Returns `None` only if the table is empty.
    pub fn random_glyph(&self, rng: &mut impl rand::Rng) -> Option<&GlyphRecord> {
        self.data.glyphs.choose(rng)
    }

    /// Selects a random tentative glyph, useful for asserting the Scanner
    /// treats unreleased glyphs as inert pass-through codepoints.
    pub fn random_tentative_glyph(&self, rng: &mut impl rand::Rng) -> Option<&GlyphRecord> {
        self.glyphs_of_kind("Tentative").choose(rng).copied()
    }
}

impl Default for GlyphIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_embedded_json() {
        let index = GlyphIndex::new();
        assert!(!index.glyphs_of_kind("Keyword").is_empty());
        assert!(!index.glyphs_of_kind("Package").is_empty());
    }

    #[test]
    fn entry_finds_known_glyph() {
        let index = GlyphIndex::new();
        let record = index.entry('功').expect("功 should be in glyphs.json");
        assert_eq!(record.word, "func");
        assert_eq!(record.kind, "Keyword");
    }

    #[test]
    fn suffixes_for_known_base() {
        let index = GlyphIndex::new();
        let variants = index.suffixes_for("int").expect("int has suffixes");
        assert!(variants.iter().any(|v| v == "64"));
    }

    #[test]
    fn diff_against_generated_is_empty_when_in_sync() {
        let index = GlyphIndex::new();
        assert!(index.diff_against_generated().is_empty());
    }
}
