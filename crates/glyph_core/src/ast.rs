//! A minimal base-language syntax tree, and the collaborator interfaces the
//! Rewriter needs from a real parser and formatter (§6).
//!
//! The real base-language parser, type checker, and formatter are external
//! collaborators per §6 — out of scope for this crate, characterized only
//! by the [`ParserApi`]/[`FormatterApi`] traits below. [`crate::reference`]
//! supplies a small, honestly-scoped implementation of both traits, covering
//! exactly the declaration, statement, and expression forms named in §8's
//! scenarios, so the Scanner → Rewriter pipeline can be exercised and tested
//! end to end without a production-grade frontend. It is not a claim of
//! full base-language grammar coverage.

use glyph_base::Span;

/// An identifier occurrence: a name plus its source location. The
/// Rewriter mutates `name` in place (prefixing it, or leaving it alone)
/// once it has resolved the occurrence against the scope chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentNode {
    pub name: String,
    pub span: Span,
}

impl IdentNode {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// A parsed import: `alias "path"`. `alias` is `None` when the user wrote
/// a bare `import "path"` with no explicit local name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    pub alias: Option<String>,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Ident(IdentNode),
    /// An integer, float, or string literal; the Rewriter never touches these.
    Literal(String),
    /// `base.field` — a selector expression. Only `field` may need
    /// prefixing, and only when it resolves to a local declaration in this
    /// translation unit (§4.3.1); cross-package selectors never prefix.
    Selector { base: Box<Expr>, field: IdentNode },
    Call { func: Box<Expr>, args: Vec<Expr> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub names: Vec<IdentNode>,
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseClause {
    /// Empty for a `default:` clause.
    pub values: Vec<Expr>,
    pub body: Vec<Stmt>,
    pub falls_through: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForRangeStmt {
    pub key: Option<IdentNode>,
    pub range_expr: Expr,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchStmt {
    pub tag: Expr,
    pub cases: Vec<CaseClause>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Var(VarDecl),
    Expr(Expr),
    ForRange(ForRangeStmt),
    Switch(SwitchStmt),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: IdentNode,
    pub params: Vec<IdentNode>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    Var(VarDecl),
    Func(FuncDecl),
}

/// A whole parsed file: one package clause, an import block, and a sequence
/// of top-level declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub package_name: String,
    pub imports: Vec<ImportSpec>,
    pub decls: Vec<Decl>,
}

/// The interface the Rewriter requires of a base-language parser (§6):
/// node-in/text-out is not enough on its own, since the Rewriter needs to
/// walk and mutate identifier spellings — this trait is the traversal
/// surface a real frontend would expose instead.
pub trait ParserApi {
    type Error: std::fmt::Display;

    /// Parses a scanned token stream (plus the original source, for
    /// diagnostics) into a syntax tree.
    fn parse(&self, tokens: &[crate::token::Token], source: &str) -> Result<File, Self::Error>;
}

/// The interface the Rewriter requires of a base-language formatter (§6):
/// node-in, text-out.
pub trait FormatterApi {
    fn format(&self, file: &File) -> String;
}
