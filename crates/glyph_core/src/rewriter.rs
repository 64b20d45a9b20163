//! The Rewriter (§4.3): identifier prefixing and import synthesis over a
//! parsed syntax tree.
//!
//! The Scanner cannot tell a user's own name from a built-in's spelling —
//! both arrive as the same identifier text. The Rewriter resolves that
//! ambiguity by walking the tree with a [`ScopeStack`], deciding at each
//! binding and each reference whether the name is a user name (always
//! prefixed) or a built-in's spelling shadowed by no user binding (left
//! alone), then adds whatever imports the package glyphs the Scanner saw
//! require.

use crate::ast::{
    Block, CaseClause, Decl, Expr, File, ForRangeStmt, FuncDecl, IdentNode, ImportSpec, Stmt,
    SwitchStmt, VarDecl,
};
use crate::scope::{BindingKind, ScopeStack};
use glyph_table::{GlyphEntry, GlyphSet, PackageInfo};

/// The reserved marker prepended to every user-chosen binding (§4.3.1).
const PREFIX: &str = "_";

/// Rewrites `file` in place: prefixes every user binding (and every
/// reference resolving to one), leaves unscoped and unshadowed scoped
/// built-ins alone, and synthesizes imports for `packages_referenced`
/// (§4.3.2).
///
/// `glyphs` tells the Rewriter which backing names are scoped built-ins at
/// all — a name is only a *candidate* for the "built-in unless shadowed"
/// treatment if some enabled glyph actually maps to it.
pub fn rewrite(file: &mut File, glyphs: &GlyphSet, packages_referenced: &[PackageInfo]) {
    let scoped_builtins = scoped_builtin_names(glyphs);
    let mut scopes = ScopeStack::new();

    for decl in &mut file.decls {
        rewrite_decl(decl, &mut scopes, &scoped_builtins);
    }

    synthesize_imports(file, packages_referenced);
}

/// The set of backing names any enabled scoped-predeclared glyph maps to
/// (`len`, `make`, ...). Anything not in this set is never treated as a
/// built-in candidate, regardless of spelling.
fn scoped_builtin_names(glyphs: &GlyphSet) -> std::collections::HashSet<&'static str> {
    glyph_table::ALL_GLYPHS
        .iter()
        .filter_map(|&ch| glyphs.lookup(ch))
        .filter(|entry: &GlyphEntry| entry.scoped && !entry.word.is_empty())
        .map(|entry| entry.word)
        .collect()
}

fn rewrite_decl(decl: &mut Decl, scopes: &mut ScopeStack, builtins: &std::collections::HashSet<&'static str>) {
    match decl {
        Decl::Var(v) => rewrite_var_decl(v, scopes, builtins),
        Decl::Func(f) => rewrite_func_decl(f, scopes, builtins),
    }
}

fn rewrite_func_decl(f: &mut FuncDecl, scopes: &mut ScopeStack, builtins: &std::collections::HashSet<&'static str>) {
    // The function's own name is a user binding in the enclosing (package)
    // scope, not inside the body it introduces.
    bind_and_prefix(&mut f.name, scopes);
    scopes.push_scope();
    for param in &mut f.params {
        bind_and_prefix(param, scopes);
    }
    rewrite_block(&mut f.body, scopes, builtins);
    scopes.pop_scope();
}

fn rewrite_var_decl(v: &mut VarDecl, scopes: &mut ScopeStack, builtins: &std::collections::HashSet<&'static str>) {
    if let Some(expr) = &mut v.value {
        rewrite_expr(expr, scopes, builtins);
    }
    for name in &mut v.names {
        bind_and_prefix(name, scopes);
    }
}

fn rewrite_block(block: &mut Block, scopes: &mut ScopeStack, builtins: &std::collections::HashSet<&'static str>) {
    for stmt in &mut block.stmts {
        rewrite_stmt(stmt, scopes, builtins);
    }
}

fn rewrite_stmt(stmt: &mut Stmt, scopes: &mut ScopeStack, builtins: &std::collections::HashSet<&'static str>) {
    match stmt {
        Stmt::Var(v) => rewrite_var_decl(v, scopes, builtins),
        Stmt::Expr(e) => rewrite_expr(e, scopes, builtins),
        Stmt::ForRange(f) => rewrite_for_range(f, scopes, builtins),
        Stmt::Switch(s) => rewrite_switch(s, scopes, builtins),
    }
}

fn rewrite_for_range(f: &mut ForRangeStmt, scopes: &mut ScopeStack, builtins: &std::collections::HashSet<&'static str>) {
    rewrite_expr(&mut f.range_expr, scopes, builtins);
    scopes.push_scope();
    if let Some(key) = &mut f.key {
        bind_and_prefix(key, scopes);
    }
    rewrite_block(&mut f.body, scopes, builtins);
    scopes.pop_scope();
}

fn rewrite_switch(s: &mut SwitchStmt, scopes: &mut ScopeStack, builtins: &std::collections::HashSet<&'static str>) {
    rewrite_expr(&mut s.tag, scopes, builtins);
    scopes.push_scope();
    for case in &mut s.cases {
        rewrite_case_clause(case, scopes, builtins);
    }
    scopes.pop_scope();
}

fn rewrite_case_clause(case: &mut CaseClause, scopes: &mut ScopeStack, builtins: &std::collections::HashSet<&'static str>) {
    for value in &mut case.values {
        rewrite_expr(value, scopes, builtins);
    }
    for stmt in &mut case.body {
        rewrite_stmt(stmt, scopes, builtins);
    }
}

fn rewrite_expr(expr: &mut Expr, scopes: &mut ScopeStack, builtins: &std::collections::HashSet<&'static str>) {
    match expr {
        Expr::Ident(ident) => rewrite_reference(ident, scopes, builtins),
        Expr::Literal(_) => {}
        Expr::Selector { base, field } => {
            rewrite_expr(base, scopes, builtins);
            // Only a local selector base resolves to a binding this
            // Rewriter tracks; a cross-package `pkg.Name` has `base` as a
            // bare package alias, which is never bound in the scope chain,
            // so `field` is correctly left unprefixed (§4.3.1).
            if let Expr::Ident(base_ident) = base.as_ref() {
                if scopes.resolve(&base_ident.name).is_some() {
                    rewrite_reference(field, scopes, builtins);
                }
            }
        }
        Expr::Call { func, args } => {
            rewrite_expr(func, scopes, builtins);
            for arg in args {
                rewrite_expr(arg, scopes, builtins);
            }
        }
    }
}

/// Binds `ident` as a user name in the innermost scope, then prefixes it.
/// Every declaration site is a user binding by construction (§4.3.1): the
/// Scanner never emits a *declaration* token for a built-in.
fn bind_and_prefix(ident: &mut IdentNode, scopes: &mut ScopeStack) {
    if ident.name == "_" {
        return;
    }
    scopes.bind(&ident.name, BindingKind::UserBinding);
    prefix(ident);
}

/// Resolves an identifier *occurrence* (not a declaration) against the
/// scope chain and decides whether to prefix it.
fn rewrite_reference(ident: &mut IdentNode, scopes: &mut ScopeStack, builtins: &std::collections::HashSet<&'static str>) {
    if ident.name == "_" {
        return;
    }
    if scopes.resolve(&ident.name).is_some() {
        // Bound somewhere in the chain: either a user binding (always
        // prefixed) or — this Rewriter never records anything else — a
        // user binding shadowing a scoped built-in, which is also
        // prefixed. Either way the action is the same.
        prefix(ident);
        return;
    }
    if builtins.contains(ident.name.as_str()) {
        // A scoped built-in's spelling, unshadowed anywhere visible: left
        // alone (§4.3.1's central rule).
        return;
    }
    // Not a scoped built-in and not bound: either an unscoped built-in
    // (`true`, `nil`, ...) or an ordinary free-standing reference (a
    // top-level function name, a package alias) that this minimal
    // collaborator doesn't pre-bind. Neither gets prefixed.
}

fn prefix(ident: &mut IdentNode) {
    if !ident.name.starts_with(PREFIX) {
        ident.name = format!("{}{}", PREFIX, ident.name);
    }
}

/// Adds whatever imports `packages_referenced` needs per the three-case
/// rule in §4.3.2, grouping with any imports already present.
fn synthesize_imports(file: &mut File, packages_referenced: &[PackageInfo]) {
    for pkg in packages_referenced {
        let already_satisfied = file
            .imports
            .iter()
            .any(|spec| spec.path == pkg.path && effective_alias(spec) == pkg.alias);
        if already_satisfied {
            continue;
        }
        let has_same_path_different_alias = file.imports.iter().any(|spec| spec.path == pkg.path);
        if has_same_path_different_alias {
            log::debug!(
                "package '{}' already imported under a different alias; adding a second import as '{}'",
                pkg.path,
                pkg.alias
            );
        } else {
            log::debug!("synthesizing import '{}' \"{}\"", pkg.alias, pkg.path);
        }
        file.imports.push(ImportSpec {
            alias: Some(pkg.alias.to_string()),
            path: pkg.path.to_string(),
        });
    }
}

fn effective_alias(spec: &ImportSpec) -> &str {
    match &spec.alias {
        Some(alias) => alias,
        None => default_alias(&spec.path),
    }
}

/// The base-language default import alias for a path with no explicit
/// alias: its final path segment.
fn default_alias(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{FormatterApi, ParserApi};
    use crate::reference::{ReferenceFormatter, ReferenceParser};
    use crate::scanner::{scan, ScanOptions};

    fn run(source: &str) -> (File, Vec<PackageInfo>) {
        let glyphs = GlyphSet::all();
        let opts = ScanOptions::new(&glyphs);
        let out = scan(source, &opts).unwrap();
        let mut file = ReferenceParser.parse(&out.tokens, source).unwrap();
        rewrite(&mut file, &glyphs, &out.packages_referenced);
        (file, out.packages_referenced)
    }

    #[test]
    fn ordinary_var_binding_is_prefixed_at_declaration_and_use() {
        let (file, _) = run("package main\nfunc main(){var n = 50\nn}\n");
        let Decl::Func(f) = &file.decls[0] else { panic!() };
        let Stmt::Var(v) = &f.body.stmts[0] else { panic!() };
        assert_eq!(v.names[0].name, "_n");
        let Stmt::Expr(Expr::Ident(used)) = &f.body.stmts[1] else { panic!() };
        assert_eq!(used.name, "_n");
    }

    #[test]
    fn unshadowed_scoped_builtin_is_left_alone() {
        let (file, _) = run("package main\nfunc main(){len(x)}\n");
        let Decl::Func(f) = &file.decls[0] else { panic!() };
        let Stmt::Expr(Expr::Call { func, .. }) = &f.body.stmts[0] else { panic!() };
        let Expr::Ident(callee) = func.as_ref() else { panic!() };
        assert_eq!(callee.name, "len");
    }

    #[test]
    fn scoped_builtin_shadowed_by_user_binding_is_prefixed() {
        let (file, _) = run("package main\nfunc main(){var len = 3\nlen}\n");
        let Decl::Func(f) = &file.decls[0] else { panic!() };
        let Stmt::Var(v) = &f.body.stmts[0] else { panic!() };
        assert_eq!(v.names[0].name, "_len");
        let Stmt::Expr(Expr::Ident(used)) = &f.body.stmts[1] else { panic!() };
        assert_eq!(used.name, "_len");
    }

    #[test]
    fn for_range_key_and_range_expr_are_both_prefixed() {
        let (file, _) = run("package main\nfunc main(){var a = 1\nfor i := range a {}}\n");
        let Decl::Func(f) = &file.decls[0] else { panic!() };
        let Stmt::ForRange(fr) = &f.body.stmts[1] else { panic!() };
        assert_eq!(fr.key.as_ref().unwrap().name, "_i");
        let Expr::Ident(range_ident) = &fr.range_expr else { panic!() };
        assert_eq!(range_ident.name, "_a");
    }

    #[test]
    fn switch_tag_is_prefixed_when_it_is_a_user_binding() {
        let (file, _) = run(
            "package main\nfunc main(){var a = 1\nswitch a {case 1:\nfallthrough\ndefault:\n}}\n",
        );
        let Decl::Func(f) = &file.decls[0] else { panic!() };
        let Stmt::Switch(s) = &f.body.stmts[1] else { panic!() };
        let Expr::Ident(tag) = &s.tag else { panic!() };
        assert_eq!(tag.name, "_a");
        assert!(s.cases[0].falls_through);
    }

    #[test]
    fn synthesizes_missing_import_for_package_glyph() {
        let (file, packages) = run("package main\nfunc main(){数.Abs(-7)}\n");
        assert_eq!(packages[0].alias, "math");
        assert!(file
            .imports
            .iter()
            .any(|spec| spec.path == "math" && spec.alias.as_deref() == Some("math")));
    }

    #[test]
    fn adds_second_import_when_existing_alias_differs() {
        let mut file = File {
            package_name: "main".to_string(),
            imports: vec![ImportSpec {
                alias: Some("f".to_string()),
                path: "fmt".to_string(),
            }],
            decls: vec![],
        };
        let pkg = PackageInfo {
            path: "fmt",
            alias: "fmt",
        };
        synthesize_imports(&mut file, &[pkg]);
        assert_eq!(file.imports.len(), 2);
    }

    #[test]
    fn does_nothing_when_same_path_and_alias_already_imported() {
        let mut file = File {
            package_name: "main".to_string(),
            imports: vec![ImportSpec {
                alias: None,
                path: "fmt".to_string(),
            }],
            decls: vec![],
        };
        let pkg = PackageInfo {
            path: "fmt",
            alias: "fmt",
        };
        synthesize_imports(&mut file, &[pkg]);
        assert_eq!(file.imports.len(), 1);
    }

    #[test]
    fn synthesized_import_alias_is_never_prefixed() {
        let (file, _) = run("package main\nfunc main(){数.Abs(-7)}\n");
        let synthesized = file.imports.iter().find(|i| i.path == "math").unwrap();
        assert_eq!(synthesized.alias.as_deref(), Some("math"));
    }

    #[test]
    fn cross_package_selector_field_is_never_prefixed() {
        let (file, _) = run("package main\nimport \"fmt\"\nfunc main(){fmt.Printf(\"hi\")}\n");
        let Decl::Func(f) = &file.decls[0] else { panic!() };
        let Stmt::Expr(Expr::Call { func, .. }) = &f.body.stmts[0] else { panic!() };
        let Expr::Selector { field, .. } = func.as_ref() else { panic!() };
        assert_eq!(field.name, "Printf");
    }

    #[test]
    fn blank_identifier_is_never_prefixed() {
        let (file, _) = run("package main\nfunc main(){var _ = 1}\n");
        let Decl::Func(f) = &file.decls[0] else { panic!() };
        let Stmt::Var(v) = &f.body.stmts[0] else { panic!() };
        assert_eq!(v.names[0].name, "_");
    }
}
