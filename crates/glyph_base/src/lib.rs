#![cfg_attr(docsrs, feature(doc_cfg))]

//! # glyph-base
//!
//! Pure structural atoms shared by the glyph dialect toolchain.
//!
//! This crate provides the foundational types used by both the glyph table
//! and the scanner/rewriter pipeline:
//!
//! - [`Arena`] — Bump allocation for stable AST references
//! - [`Interner`]/[`Symbol`] — String interning for O(1) equality
//! - [`Span`] — Source location tracking
//! - [`SpannedError`]/[`Result`] — Errors with source positions
//!
//! # Design Principles
//!
//! This crate has **no knowledge of glyphs or I/O**. It provides only
//! generic, reusable infrastructure that higher-level crates build upon.
//!
//! # Example
//!
//! ```
//! use glyph_base::{Arena, Interner, Span};
//!
//! let arena: Arena<&str> = Arena::new();
//! let mut interner = Interner::new();
//!
//! let hello = interner.intern("hello");
//! let span = Span::new(0, 5);
//!
//! let allocated = arena.alloc("hello");
//! assert_eq!(*allocated, "hello");
//! ```

pub mod arena;
pub mod intern;
pub mod span;
pub mod error;

pub use arena::Arena;
pub use intern::{Interner, Symbol, SymbolEq};
pub use span::Span;
pub use error::{SpannedError, Result};
