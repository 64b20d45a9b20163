use serde::Deserialize;
use std::collections::HashSet;
use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

// ═══════════════════════════════════════════════════════════════════
// JSON schema for the glyph table
// ═══════════════════════════════════════════════════════════════════

#[derive(Deserialize)]
struct GlyphTableData {
    glyphs: Vec<GlyphRecord>,
    suffixes: Vec<SuffixRecord>,
}

#[derive(Deserialize)]
struct GlyphRecord {
    char: String,
    kind: String,
    word: String,
    suffixable: bool,
    scoped: bool,
    #[serde(rename = "reservedInBase")]
    reserved_in_base: bool,
    package: Option<PackageRecord>,
    #[serde(default)]
    #[allow(dead_code)]
    note: Option<String>,
}

#[derive(Deserialize)]
struct PackageRecord {
    path: String,
    alias: String,
}

#[derive(Deserialize)]
struct SuffixRecord {
    base: String,
    variants: Vec<String>,
}

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let json_path = Path::new(&manifest_dir).join("assets/glyphs.json");

    println!("cargo:rerun-if-changed=assets/glyphs.json");

    let json_content = fs::read_to_string(&json_path)
        .unwrap_or_else(|_| panic!("Failed to read {}", json_path.display()));

    let data: GlyphTableData = serde_json::from_str(&json_content)
        .unwrap_or_else(|e| panic!("Failed to parse glyphs.json: {}", e));

    validate(&data);

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("glyph_table_gen.rs");
    let mut file = fs::File::create(&dest_path).unwrap();

    generate_lookup(&mut file, &data.glyphs);
    generate_sized_type_name(&mut file, &data.suffixes);
    generate_all_glyphs(&mut file, &data.glyphs);
}

/// Every invariant from the glyph table's data model must hold before we
/// generate a single match arm; a malformed entry here is a build-time bug,
/// not a runtime one.
fn validate(data: &GlyphTableData) {
    let mut seen_chars: HashSet<char> = HashSet::new();
    let mut seen_aliases: HashSet<&str> = HashSet::new();

    for g in &data.glyphs {
        let mut chars = g.char.chars();
        let ch = chars
            .next()
            .unwrap_or_else(|| panic!("glyph record has an empty char field"));
        if chars.next().is_some() {
            panic!("glyph record '{}' is not a single codepoint", g.char);
        }
        if !seen_chars.insert(ch) {
            panic!("duplicate glyph table entry for codepoint {:?}", ch);
        }

        match g.kind.as_str() {
            "Keyword" | "Identifier" | "Package" | "Tentative" => {}
            other => panic!("unknown glyph kind '{}' for {:?}", other, ch),
        }

        if g.suffixable && !(g.kind == "Identifier" && g.scoped) {
            panic!(
                "glyph {:?} is suffixable but not both Identifier and scoped",
                ch
            );
        }

        if (g.kind == "Keyword" || g.kind == "Package") && g.word.is_empty() {
            panic!("glyph {:?} of kind {} has an empty word", ch, g.kind);
        }

        if g.kind == "Package" {
            let pkg = g
                .package
                .as_ref()
                .unwrap_or_else(|| panic!("package glyph {:?} has no package info", ch));
            if !seen_aliases.insert(pkg.alias.as_str()) {
                panic!("duplicate package alias '{}'", pkg.alias);
            }
        } else if g.package.is_some() {
            panic!("non-package glyph {:?} carries package info", ch);
        }
    }
}

fn glyph_kind_expr(kind: &str) -> &'static str {
    match kind {
        "Keyword" => "crate::types::GlyphKind::Keyword",
        "Identifier" => "crate::types::GlyphKind::Identifier",
        "Package" => "crate::types::GlyphKind::Package",
        "Tentative" => "crate::types::GlyphKind::Tentative",
        other => panic!("unknown glyph kind '{}'", other),
    }
}

fn entry_expr(g: &GlyphRecord) -> String {
    let package_expr = match &g.package {
        Some(p) => format!(
            "Some(crate::types::PackageInfo {{ path: \"{}\", alias: \"{}\" }})",
            p.path, p.alias
        ),
        None => "None".to_string(),
    };
    format!(
        "crate::types::GlyphEntry {{ kind: {}, word: \"{}\", suffixable: {}, scoped: {}, reserved_in_base: {}, package: {} }}",
        glyph_kind_expr(&g.kind),
        g.word,
        g.suffixable,
        g.scoped,
        g.reserved_in_base,
        package_expr,
    )
}

fn generate_lookup(file: &mut fs::File, glyphs: &[GlyphRecord]) {
    writeln!(
        file,
        "/// Classifies a single codepoint, returning its glyph entry if recognized."
    )
    .unwrap();
    writeln!(
        file,
        "pub fn lookup(ch: char) -> Option<crate::types::GlyphEntry> {{"
    )
    .unwrap();
    writeln!(file, "    match ch {{").unwrap();
    for g in glyphs {
        let ch = g.char.chars().next().unwrap();
        writeln!(file, "        '{}' => Some({}),", ch, entry_expr(g)).unwrap();
    }
    writeln!(file, "        _ => None,").unwrap();
    writeln!(file, "    }}").unwrap();
    writeln!(file, "}}\n").unwrap();
}

fn generate_sized_type_name(file: &mut fs::File, suffixes: &[SuffixRecord]) {
    writeln!(
        file,
        "/// Resolves a suffixable glyph's base spelling plus a run of ASCII"
    )
    .unwrap();
    writeln!(
        file,
        "/// decimal digits to a sized type name, per the suffix whitelist."
    )
    .unwrap();
    writeln!(
        file,
        "pub fn sized_type_name(base: &str, digits: &str) -> Option<&'static str> {{"
    )
    .unwrap();
    writeln!(file, "    match (base, digits) {{").unwrap();
    for s in suffixes {
        for digits in &s.variants {
            let name = format!("{}{}", s.base, digits);
            writeln!(
                file,
                "        (\"{}\", \"{}\") => Some(\"{}\"),",
                s.base, digits, name
            )
            .unwrap();
        }
    }
    writeln!(file, "        _ => None,").unwrap();
    writeln!(file, "    }}").unwrap();
    writeln!(file, "}}\n").unwrap();
}

fn generate_all_glyphs(file: &mut fs::File, glyphs: &[GlyphRecord]) {
    writeln!(
        file,
        "/// Every recognized codepoint, for driver-level introspection and the"
    )
    .unwrap();
    writeln!(file, "/// `dynamic-glyphs` runtime loader's consistency checks.").unwrap();
    writeln!(file, "pub static ALL_GLYPHS: &[char] = &[").unwrap();
    for g in glyphs {
        let ch = g.char.chars().next().unwrap();
        writeln!(file, "    '{}',", ch).unwrap();
    }
    writeln!(file, "];").unwrap();
}
