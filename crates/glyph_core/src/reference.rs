//! A minimal, honestly-scoped base-language parser and formatter.
//!
//! The real base-language parser and formatter are external collaborators
//! (§6): this module is not a substitute for one. It implements
//! [`ParserApi`]/[`FormatterApi`] just far enough to parse and print the
//! declaration, statement, and expression forms named in §8's concrete
//! scenarios — package clauses, single and grouped imports, function
//! declarations, `var` declarations, `for ... range`, `switch`/`case`/
//! `fallthrough`/`default`, selector expressions, and calls — so the
//! Scanner → Rewriter pipeline can be driven and tested end to end without
//! pulling in (or fabricating) a production Go frontend.

use crate::ast::{
    Block, CaseClause, Decl, Expr, File, FormatterApi, ForRangeStmt, FuncDecl, IdentNode,
    ImportSpec, ParserApi, Stmt, SwitchStmt, VarDecl,
};
use crate::token::{Keyword, Token, TokenType};
use std::fmt;

/// A parse failure from [`ReferenceParser`]. Carries enough context to
/// report through [`crate::TranslateError::Parse`].
#[derive(Debug, Clone)]
pub struct ReferenceParseError {
    pub message: String,
}

impl fmt::Display for ReferenceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// The reference parser (see module docs for exactly what it covers).
#[derive(Debug, Default)]
pub struct ReferenceParser;

impl ParserApi for ReferenceParser {
    type Error = ReferenceParseError;

    fn parse(&self, tokens: &[Token], _source: &str) -> Result<File, Self::Error> {
        Cursor::new(tokens).parse_file()
    }
}

struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

type PResult<T> = Result<T, ReferenceParseError>;

impl<'a> Cursor<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn bump(&mut self) -> Token {
        let tok = self.tokens[self.pos.min(self.tokens.len() - 1)].clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    fn at_eof(&self) -> bool {
        self.peek().kind == TokenType::Eof
    }

    fn at_keyword(&self, kw: Keyword) -> bool {
        self.peek().is_keyword(kw)
    }

    fn at_punct(&self, text: &str) -> bool {
        self.peek().kind == TokenType::Punct && self.peek().text == text
    }

    fn expect_keyword(&mut self, kw: Keyword) -> PResult<Token> {
        if self.at_keyword(kw) {
            Ok(self.bump())
        } else {
            Err(self.unexpected(&format!("keyword '{}'", kw.as_str())))
        }
    }

    fn expect_punct(&mut self, text: &str) -> PResult<Token> {
        if self.at_punct(text) {
            Ok(self.bump())
        } else {
            Err(self.unexpected(&format!("'{}'", text)))
        }
    }

    fn expect_ident(&mut self) -> PResult<IdentNode> {
        let tok = self.peek().clone();
        if tok.is_ident() {
            self.bump();
            Ok(IdentNode::new(tok.text, tok.span))
        } else {
            Err(self.unexpected("an identifier"))
        }
    }

    fn unexpected(&self, wanted: &str) -> ReferenceParseError {
        ReferenceParseError {
            message: format!(
                "expected {} at {}..{}, found '{}'",
                wanted, self.peek().span.start, self.peek().span.end, self.peek().text
            ),
        }
    }

    fn parse_file(&mut self) -> PResult<File> {
        self.expect_keyword(Keyword::Package)?;
        let package_name = self.expect_ident()?.name;

        let mut imports = Vec::new();
        while self.at_keyword(Keyword::Import) {
            imports.extend(self.parse_import_decl()?);
        }

        let mut decls = Vec::new();
        while !self.at_eof() {
            decls.push(self.parse_decl()?);
        }

        Ok(File {
            package_name,
            imports,
            decls,
        })
    }

    fn parse_import_decl(&mut self) -> PResult<Vec<ImportSpec>> {
        self.expect_keyword(Keyword::Import)?;
        if self.at_punct("(") {
            self.bump();
            let mut specs = Vec::new();
            while !self.at_punct(")") {
                specs.push(self.parse_import_spec()?);
            }
            self.expect_punct(")")?;
            Ok(specs)
        } else {
            Ok(vec![self.parse_import_spec()?])
        }
    }

    fn parse_import_spec(&mut self) -> PResult<ImportSpec> {
        let alias = if self.peek().is_ident() {
            Some(self.bump().text)
        } else {
            None
        };
        let path_tok = self.peek().clone();
        if path_tok.kind != TokenType::StringLiteral {
            return Err(self.unexpected("an import path string"));
        }
        self.bump();
        let path = unquote(&path_tok.text);
        Ok(ImportSpec { alias, path })
    }

    fn parse_decl(&mut self) -> PResult<Decl> {
        if self.at_keyword(Keyword::Func) {
            Ok(Decl::Func(self.parse_func_decl()?))
        } else if self.at_keyword(Keyword::Var) {
            Ok(Decl::Var(self.parse_var_decl()?))
        } else {
            Err(self.unexpected("a top-level declaration"))
        }
    }

    fn parse_func_decl(&mut self) -> PResult<FuncDecl> {
        self.expect_keyword(Keyword::Func)?;
        let name = self.expect_ident()?;
        self.expect_punct("(")?;
        let mut params = Vec::new();
        while !self.at_punct(")") {
            let param_name = self.expect_ident()?;
            // An optional type token follows a parameter name; we don't
            // need the type for rewriting identifiers, only the name.
            if !self.at_punct(")") && !self.at_punct(",") {
                self.bump();
            }
            params.push(param_name);
            if self.at_punct(",") {
                self.bump();
            }
        }
        self.expect_punct(")")?;
        let body = self.parse_block()?;
        Ok(FuncDecl { name, params, body })
    }

    fn parse_var_decl(&mut self) -> PResult<VarDecl> {
        self.expect_keyword(Keyword::Var)?;
        let mut names = vec![self.expect_ident()?];
        while self.at_punct(",") {
            self.bump();
            names.push(self.expect_ident()?);
        }
        let value = if self.at_punct("=") {
            self.bump();
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(VarDecl { names, value })
    }

    /// Consumes any run of statement-separator `;` tokens. This toy grammar
    /// does not perform automatic semicolon insertion; it simply tolerates
    /// `;` wherever one statement ends and another begins.
    fn skip_semicolons(&mut self) {
        while self.at_punct(";") {
            self.bump();
        }
    }

    fn parse_block(&mut self) -> PResult<Block> {
        self.expect_punct("{")?;
        let mut stmts = Vec::new();
        self.skip_semicolons();
        while !self.at_punct("}") {
            stmts.push(self.parse_stmt()?);
            self.skip_semicolons();
        }
        self.expect_punct("}")?;
        Ok(Block { stmts })
    }

    fn parse_stmt(&mut self) -> PResult<Stmt> {
        if self.at_keyword(Keyword::Var) {
            Ok(Stmt::Var(self.parse_var_decl()?))
        } else if self.at_keyword(Keyword::For) {
            Ok(Stmt::ForRange(self.parse_for_range()?))
        } else if self.at_keyword(Keyword::Switch) {
            Ok(Stmt::Switch(self.parse_switch()?))
        } else {
            Ok(Stmt::Expr(self.parse_expr()?))
        }
    }

    fn parse_for_range(&mut self) -> PResult<ForRangeStmt> {
        self.expect_keyword(Keyword::For)?;
        let key = if self.peek().is_ident() {
            let name = self.expect_ident()?;
            self.expect_punct(":")?;
            self.expect_punct("=")?;
            Some(name)
        } else {
            None
        };
        self.expect_keyword(Keyword::Range)?;
        let range_expr = self.parse_expr()?;
        let body = self.parse_block()?;
        Ok(ForRangeStmt {
            key,
            range_expr,
            body,
        })
    }

    fn parse_switch(&mut self) -> PResult<SwitchStmt> {
        self.expect_keyword(Keyword::Switch)?;
        let tag = self.parse_expr()?;
        self.expect_punct("{")?;
        let mut cases = Vec::new();
        while self.at_keyword(Keyword::Case) || self.at_keyword(Keyword::Default) {
            cases.push(self.parse_case_clause()?);
        }
        self.expect_punct("}")?;
        Ok(SwitchStmt { tag, cases })
    }

    fn parse_case_clause(&mut self) -> PResult<CaseClause> {
        let values = if self.at_keyword(Keyword::Default) {
            self.bump();
            Vec::new()
        } else {
            self.expect_keyword(Keyword::Case)?;
            let mut values = vec![self.parse_expr()?];
            while self.at_punct(",") {
                self.bump();
                values.push(self.parse_expr()?);
            }
            values
        };
        self.expect_punct(":")?;
        let mut body = Vec::new();
        let mut falls_through = false;
        self.skip_semicolons();
        while !self.at_keyword(Keyword::Case)
            && !self.at_keyword(Keyword::Default)
            && !self.at_punct("}")
        {
            if self.at_keyword(Keyword::Fallthrough) {
                self.bump();
                falls_through = true;
                self.skip_semicolons();
                continue;
            }
            body.push(self.parse_stmt()?);
            self.skip_semicolons();
        }
        Ok(CaseClause {
            values,
            body,
            falls_through,
        })
    }

    fn parse_expr(&mut self) -> PResult<Expr> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.at_punct(".") {
                self.bump();
                let field = self.expect_ident()?;
                expr = Expr::Selector {
                    base: Box::new(expr),
                    field,
                };
            } else if self.at_punct("(") {
                self.bump();
                let mut args = Vec::new();
                while !self.at_punct(")") {
                    args.push(self.parse_expr()?);
                    if self.at_punct(",") {
                        self.bump();
                    }
                }
                self.expect_punct(")")?;
                expr = Expr::Call {
                    func: Box::new(expr),
                    args,
                };
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> PResult<Expr> {
        if self.at_punct("-") {
            self.bump();
            let tok = self.peek().clone();
            return match tok.kind {
                TokenType::IntLiteral | TokenType::FloatLiteral => {
                    self.bump();
                    Ok(Expr::Literal(format!("-{}", tok.text)))
                }
                _ => Err(self.unexpected("a numeric literal after unary '-'")),
            };
        }
        let tok = self.peek().clone();
        match tok.kind {
            TokenType::Ident => {
                self.bump();
                Ok(Expr::Ident(IdentNode::new(tok.text, tok.span)))
            }
            TokenType::IntLiteral | TokenType::FloatLiteral | TokenType::StringLiteral => {
                self.bump();
                Ok(Expr::Literal(tok.text))
            }
            _ => Err(self.unexpected("an expression")),
        }
    }
}

fn unquote(s: &str) -> String {
    s.trim_start_matches('"').trim_end_matches('"').to_string()
}

/// The reference pretty-printer paired with [`ReferenceParser`].
#[derive(Debug, Default)]
pub struct ReferenceFormatter;

impl FormatterApi for ReferenceFormatter {
    fn format(&self, file: &File) -> String {
        let mut out = String::new();
        out.push_str(&format!("package {}\n\n", file.package_name));

        if !file.imports.is_empty() {
            if file.imports.len() == 1 {
                out.push_str(&format!("import {}\n\n", format_import(&file.imports[0])));
            } else {
                out.push_str("import (\n");
                for spec in &file.imports {
                    out.push_str(&format!("\t{}\n", format_import(spec)));
                }
                out.push_str(")\n\n");
            }
        }

        for decl in &file.decls {
            match decl {
                Decl::Var(v) => out.push_str(&format_var_decl(v, 0)),
                Decl::Func(f) => out.push_str(&format_func_decl(f)),
            }
            out.push('\n');
        }
        out
    }
}

fn format_import(spec: &ImportSpec) -> String {
    match &spec.alias {
        Some(alias) => format!("{} \"{}\"", alias, spec.path),
        None => format!("\"{}\"", spec.path),
    }
}

fn format_var_decl(v: &VarDecl, indent: usize) -> String {
    let pad = "\t".repeat(indent);
    let names = v
        .names
        .iter()
        .map(|n| n.name.clone())
        .collect::<Vec<_>>()
        .join(", ");
    match &v.value {
        Some(expr) => format!("{}var {} = {}\n", pad, names, format_expr(expr)),
        None => format!("{}var {}\n", pad, names),
    }
}

fn format_func_decl(f: &FuncDecl) -> String {
    let params = f
        .params
        .iter()
        .map(|p| p.name.clone())
        .collect::<Vec<_>>()
        .join(", ");
    let mut out = format!("func {}({}) {{\n", f.name.name, params);
    out.push_str(&format_block(&f.body, 1));
    out.push_str("}\n");
    out
}

fn format_block(block: &Block, indent: usize) -> String {
    let mut out = String::new();
    for stmt in &block.stmts {
        out.push_str(&format_stmt(stmt, indent));
    }
    out
}

fn format_stmt(stmt: &Stmt, indent: usize) -> String {
    let pad = "\t".repeat(indent);
    match stmt {
        Stmt::Var(v) => format_var_decl(v, indent),
        Stmt::Expr(e) => format!("{}{}\n", pad, format_expr(e)),
        Stmt::ForRange(f) => {
            let mut out = match &f.key {
                Some(key) => format!("{}for {} := range {} {{\n", pad, key.name, format_expr(&f.range_expr)),
                None => format!("{}for range {} {{\n", pad, format_expr(&f.range_expr)),
            };
            out.push_str(&format_block(&f.body, indent + 1));
            out.push_str(&format!("{}}}\n", pad));
            out
        }
        Stmt::Switch(s) => {
            let mut out = format!("{}switch {} {{\n", pad, format_expr(&s.tag));
            for case in &s.cases {
                if case.values.is_empty() {
                    out.push_str(&format!("{}default:\n", pad));
                } else {
                    let values = case
                        .values
                        .iter()
                        .map(format_expr)
                        .collect::<Vec<_>>()
                        .join(", ");
                    out.push_str(&format!("{}case {}:\n", pad, values));
                }
                for body_stmt in &case.body {
                    out.push_str(&format_stmt(body_stmt, indent + 1));
                }
                if case.falls_through {
                    out.push_str(&format!("{}\tfallthrough\n", pad));
                }
            }
            out.push_str(&format!("{}}}\n", pad));
            out
        }
    }
}

fn format_expr(expr: &Expr) -> String {
    match expr {
        Expr::Ident(i) => i.name.clone(),
        Expr::Literal(text) => text.clone(),
        Expr::Selector { base, field } => format!("{}.{}", format_expr(base), field.name),
        Expr::Call { func, args } => {
            let args = args.iter().map(format_expr).collect::<Vec<_>>().join(", ");
            format!("{}({})", format_expr(func), args)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{scan, ScanOptions};
    use glyph_table::GlyphSet;

    fn parse_source(source: &str) -> File {
        let glyphs = GlyphSet::all();
        let opts = ScanOptions::new(&glyphs);
        let out = scan(source, &opts).unwrap();
        ReferenceParser.parse(&out.tokens, source).unwrap()
    }

    #[test]
    fn parses_package_and_func() {
        let file = parse_source("package main\nfunc main(){}\n");
        assert_eq!(file.package_name, "main");
        assert_eq!(file.decls.len(), 1);
    }

    #[test]
    fn parses_single_import() {
        let file = parse_source("package main\nimport \"fmt\"\nfunc main(){fmt.Printf(\"hi\")}\n");
        assert_eq!(file.imports.len(), 1);
        assert_eq!(file.imports[0].path, "fmt");
        assert_eq!(file.imports[0].alias, None);
    }

    #[test]
    fn parses_for_range_and_switch() {
        let file = parse_source(
            "package main\nfunc main(){for i := range a {}\nswitch a {case 1:\ncase 2:\nfallthrough\ndefault:\n}}\n",
        );
        assert_eq!(file.decls.len(), 1);
    }

    #[test]
    fn round_trips_through_formatter() {
        let file = parse_source("package main\nfunc main(){}\n");
        let formatter = ReferenceFormatter;
        let printed = formatter.format(&file);
        assert!(printed.contains("package main"));
        assert!(printed.contains("func main()"));
    }
}
