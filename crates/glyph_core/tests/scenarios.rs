//! End-to-end coverage of the six concrete scanning/rewriting scenarios:
//! function declaration with a selector call, ordinary `var` bindings
//! alongside glyph-spelled ones, for-range, switch/case/fallthrough/default,
//! package-glyph import synthesis, and shadowing a scoped built-in.

use glyph_core::{translate, ReferenceFormatter, ReferenceParser};
use glyph_table::GlyphSet;

fn translate_ok(source: &str) -> String {
    let glyphs = GlyphSet::all();
    translate(source, &glyphs, &ReferenceParser, &ReferenceFormatter)
        .unwrap_or_else(|e| panic!("translate failed for {:?}: {}", source, e))
}

#[test]
fn function_declaration_with_selector_call() {
    let out = translate_ok("package main\nimport \"fmt\"\n功main(){fmt.Printf(\"Hi!\\n\")}\n");
    assert!(out.contains("func _main()"), "{out}");
    assert!(out.contains("fmt.Printf(\"Hi!\\n\")"), "{out}");
}

#[test]
fn ordinary_and_glyph_var_bindings_are_all_prefixed() {
    let out = translate_ok("package main\nfunc main(){var n = 50\n变p=70\n变string=170}\n");
    assert!(out.contains("var _n = 50"), "{out}");
    assert!(out.contains("var _p = 70"), "{out}");
    assert!(out.contains("var _string = 170"), "{out}");
}

#[test]
fn for_range_prefixes_loop_variable_and_ranged_expression() {
    let out = translate_ok("package main\nfunc main(){var a = 1\n为i:=围a{}}\n");
    assert!(out.contains("for _i := range _a"), "{out}");
}

#[test]
fn switch_case_fallthrough_default_prefixes_the_tag() {
    let out = translate_ok("package main\nfunc main(){var a = 1\n择a{事1:事2:掉别:}}\n");
    assert!(out.contains("switch _a"), "{out}");
    assert!(out.contains("case 1:"), "{out}");
    assert!(out.contains("case 2:"), "{out}");
    assert!(out.contains("fallthrough"), "{out}");
    assert!(out.contains("default:"), "{out}");
}

#[test]
fn package_glyph_synthesizes_missing_import() {
    let out = translate_ok("package main\nfunc main(){数.Abs(-7.89)}\n");
    assert!(out.contains("import math \"math\""), "{out}");
    assert!(out.contains("math.Abs(-7.89)"), "{out}");
}

#[test]
fn user_binding_shadows_scoped_builtin_glyph_in_same_scope() {
    let out = translate_ok("package main\nfunc main(){var len = 3\n度}\n");
    assert!(out.contains("var _len = 3"), "{out}");
    assert!(out.contains("_len\n") || out.trim_end().ends_with("_len"), "{out}");
}

#[test]
fn source_with_no_glyphs_round_trips_unchanged_in_spirit() {
    let out = translate_ok("package main\nfunc main(){var n = 1\nn}\n");
    assert!(out.contains("package main"));
    assert!(out.contains("var _n = 1"));
}

#[test]
fn idempotent_up_to_formatting_when_rewriting_already_rewritten_output() {
    let once = translate_ok("package main\nfunc main(){var n = 50\n变p=70}\n");
    let twice = translate_ok(&once);
    assert_eq!(once, twice, "re-translating already-rewritten output should be a fixed point");
}

#[test]
fn multiple_package_glyph_uses_synthesize_exactly_one_import() {
    let out = translate_ok("package main\nfunc main(){数.Abs(-1)\n数.Sqrt(4)}\n");
    assert_eq!(out.matches("import math \"math\"").count(), 1, "{out}");
}
