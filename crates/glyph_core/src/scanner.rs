//! The glyph-aware lexical scanner (§4.2).
//!
//! Consumes UTF-8 dialect source text and produces a token stream compatible
//! with a base-language parser. ASCII runs are tokenized by ordinary
//! base-language lexical rules (identifiers, numeric and string literals,
//! punctuation, comments); non-ASCII codepoints are classified against the
//! [`glyph_table`] and handled per the rules in §4.2.
//!
//! The Scanner does not decide whether an emitted identifier's spelling is a
//! user name or a built-in — that is the Rewriter's job, informed by the
//! scope chain (§4.3.1). The Scanner's one side effect beyond the token
//! stream is recording which packages were referenced via a package glyph,
//! so the Rewriter can synthesize imports without re-deriving package
//! identity from bare identifier spellings (§4.3.2).

use crate::error::{ScanError, ScanResult};
use crate::token::{Keyword, Token, TokenType};
use glyph_base::Span;
use glyph_table::{GlyphKind, GlyphSet, PackageInfo};
use std::str::CharIndices;

/// Options controlling a single scan (§6 Input: "a set of enabled glyphs").
#[derive(Clone)]
pub struct ScanOptions<'a> {
    pub glyphs: &'a GlyphSet,
}

impl<'a> ScanOptions<'a> {
    pub fn new(glyphs: &'a GlyphSet) -> Self {
        Self { glyphs }
    }
}

/// Everything a scan of one file produces: the token stream, plus the set
/// of packages referenced via package glyphs, in first-use order.
#[derive(Debug, Default)]
pub struct ScanOutput {
    pub tokens: Vec<Token>,
    pub packages_referenced: Vec<PackageInfo>,
}

/// Scans `source` into a [`ScanOutput`], or fails with a [`ScanError`] on
/// malformed UTF-8 (the only fatal Scanner error per §7).
///
/// Rust's `&str` already guarantees valid UTF-8, so in practice this
/// function only reports [`crate::error::ScanErrorKind::InvalidUtf8`] when a
/// caller feeds through a lossily-converted byte stream; callers that read
/// from an untrusted byte source should validate with
/// `std::str::from_utf8` first and map the error's byte offset through.
pub fn scan(source: &str, options: &ScanOptions) -> ScanResult<ScanOutput> {
    let mut scanner = Scanner::new(source, options.glyphs);
    scanner.run()?;
    Ok(ScanOutput {
        tokens: scanner.tokens,
        packages_referenced: scanner.packages_referenced,
    })
}

struct Scanner<'a> {
    source: &'a str,
    chars: std::iter::Peekable<CharIndices<'a>>,
    glyphs: &'a GlyphSet,
    tokens: Vec<Token>,
    packages_referenced: Vec<PackageInfo>,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str, glyphs: &'a GlyphSet) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            glyphs,
            tokens: Vec::new(),
            packages_referenced: Vec::new(),
        }
    }

    fn run(&mut self) -> ScanResult<()> {
        while let Some(&(pos, ch)) = self.chars.peek() {
            if ch.is_whitespace() {
                self.chars.next();
                continue;
            }
            if ch == '/' && self.peek_second() == Some('/') {
                self.skip_line_comment();
                continue;
            }
            if ch == '/' && self.peek_second() == Some('*') {
                self.skip_block_comment();
                continue;
            }
            if ch == '"' {
                self.scan_string_literal();
                continue;
            }
            if ch == '\'' {
                self.scan_rune_literal();
                continue;
            }
            if ch.is_ascii_digit() {
                self.scan_number();
                continue;
            }
            if ch.is_ascii() {
                if is_ascii_ident_start(ch) {
                    self.scan_ascii_ident();
                } else {
                    self.scan_punct(pos);
                }
                continue;
            }
            self.scan_glyph(pos, ch);
        }
        let eof_at = self.source.len();
        self.tokens
            .push(Token::new(TokenType::Eof, "", Span::new(eof_at, eof_at)));
        Ok(())
    }

    fn peek_second(&self) -> Option<char> {
        let mut iter = self.chars.clone();
        iter.next();
        iter.peek().map(|&(_, c)| c)
    }

    fn skip_line_comment(&mut self) {
        while let Some(&(_, c)) = self.chars.peek() {
            if c == '\n' {
                break;
            }
            self.chars.next();
        }
    }

    fn skip_block_comment(&mut self) {
        self.chars.next(); // '/'
        self.chars.next(); // '*'
        let mut prev = '\0';
        while let Some((_, c)) = self.chars.next() {
            if prev == '*' && c == '/' {
                return;
            }
            prev = c;
        }
    }

    fn scan_string_literal(&mut self) {
        let (start, _) = self.chars.next().unwrap(); // opening quote
        let mut escaped = false;
        let mut end = start + 1;
        while let Some(&(pos, c)) = self.chars.peek() {
            self.chars.next();
            end = pos + c.len_utf8();
            if escaped {
                escaped = false;
                continue;
            }
            match c {
                '\\' => escaped = true,
                '"' => break,
                _ => {}
            }
        }
        let text = self.source[start..end].to_string();
        self.tokens
            .push(Token::new(TokenType::StringLiteral, text, Span::new(start, end)));
    }

    fn scan_rune_literal(&mut self) {
        let (start, _) = self.chars.next().unwrap(); // opening quote
        let mut escaped = false;
        let mut end = start + 1;
        while let Some(&(pos, c)) = self.chars.peek() {
            self.chars.next();
            end = pos + c.len_utf8();
            if escaped {
                escaped = false;
                continue;
            }
            match c {
                '\\' => escaped = true,
                '\'' => break,
                _ => {}
            }
        }
        let text = self.source[start..end].to_string();
        self.tokens
            .push(Token::new(TokenType::StringLiteral, text, Span::new(start, end)));
    }

    fn scan_number(&mut self) {
        let (start, _) = *self.chars.peek().unwrap();
        let mut end = start;
        let mut is_float = false;
        while let Some(&(pos, c)) = self.chars.peek() {
            if c.is_ascii_digit() {
                self.chars.next();
                end = pos + 1;
            } else if c == '.' && !is_float {
                is_float = true;
                self.chars.next();
                end = pos + 1;
            } else {
                break;
            }
        }
        let text = self.source[start..end].to_string();
        let kind = if is_float {
            TokenType::FloatLiteral
        } else {
            TokenType::IntLiteral
        };
        self.tokens.push(Token::new(kind, text, Span::new(start, end)));
    }

    /// Scans a maximal run of ASCII identifier characters. This also backs
    /// the digit lookahead for suffixable glyphs (§4.2): callers that need
    /// just the digits, not a full identifier token, use
    /// [`Scanner::peek_ascii_digits`] instead.
    fn scan_ascii_ident(&mut self) {
        let (start, _) = *self.chars.peek().unwrap();
        let mut end = start;
        while let Some(&(pos, c)) = self.chars.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.chars.next();
                end = pos + c.len_utf8();
            } else {
                break;
            }
        }
        let text = &self.source[start..end];
        let kind = match Keyword::from_str(text) {
            Some(kw) => TokenType::Keyword(kw),
            None => TokenType::Ident,
        };
        self.tokens
            .push(Token::new(kind, text.to_string(), Span::new(start, end)));
    }

    /// Looks ahead over a run of ASCII decimal digits without consuming
    /// them unless the caller commits via [`Scanner::consume_ascii_digits`].
    fn peek_ascii_digits(&self) -> String {
        let mut iter = self.chars.clone();
        let mut digits = String::new();
        while let Some((_, c)) = iter.next() {
            if c.is_ascii_digit() {
                digits.push(c);
            } else {
                break;
            }
        }
        digits
    }

    fn consume_ascii_digits(&mut self, n: usize) {
        for _ in 0..n {
            self.chars.next();
        }
    }

    fn scan_punct(&mut self, start: usize) {
        let (_, c) = self.chars.next().unwrap();
        let end = start + c.len_utf8();
        self.tokens
            .push(Token::new(TokenType::Punct, c.to_string(), Span::new(start, end)));
    }

    /// Classifies one non-ASCII codepoint per §4.2's per-codepoint rule.
    fn scan_glyph(&mut self, start: usize, ch: char) {
        self.chars.next();
        let end = start + ch.len_utf8();

        let Some(entry) = self.glyphs.lookup(ch) else {
            log::trace!("codepoint {:?} at {} is not a recognized glyph; passthrough", ch, start);
            self.scan_unrecognized_letter(start, ch);
            return;
        };

        log::trace!("glyph {:?} at {} classified as {:?}", ch, start, entry.kind);

        match entry.kind {
            GlyphKind::Keyword => {
                let kw = Keyword::from_str(entry.word)
                    .unwrap_or_else(|| panic!("glyph table keyword '{}' is not a known Keyword", entry.word));
                self.tokens.push(Token::new(
                    TokenType::Keyword(kw),
                    entry.word,
                    Span::new(start, end),
                ));
            }
            GlyphKind::Identifier if entry.suffixable => {
                self.scan_suffixable_glyph(start, end, entry.word);
            }
            GlyphKind::Identifier => {
                let text = if entry.word.is_empty() {
                    ch.to_string()
                } else {
                    entry.word.to_string()
                };
                self.tokens
                    .push(Token::new(TokenType::Ident, text, Span::new(start, end)));
            }
            GlyphKind::Package => {
                let pkg = entry
                    .package
                    .unwrap_or_else(|| panic!("package glyph '{}' has no package info", ch));
                self.packages_referenced.push(pkg);
                self.tokens.push(Token::new(
                    TokenType::Ident,
                    pkg.alias.to_string(),
                    Span::new(start, end),
                ));
            }
            GlyphKind::Tentative => {
                log::trace!("tentative glyph {:?} is inert; passthrough as identifier text", ch);
                self.scan_unrecognized_letter(start, ch);
            }
        }
    }

    /// Absorbs a trailing ASCII digit run after a suffixable glyph (§4.2).
    /// Degrades to emitting just the base spelling, with a warning
    /// diagnostic, if the digits don't form a whitelisted sized type (§7).
    fn scan_suffixable_glyph(&mut self, start: usize, mut end: usize, base: &'static str) {
        let digits = self.peek_ascii_digits();
        if digits.is_empty() {
            self.tokens
                .push(Token::new(TokenType::Ident, base.to_string(), Span::new(start, end)));
            return;
        }
        match glyph_table::sized_type_name(base, &digits) {
            Some(sized) => {
                self.consume_ascii_digits(digits.len());
                end += digits.len();
                log::debug!("suffixable glyph resolved to '{}' at {}..{}", sized, start, end);
                self.tokens
                    .push(Token::new(TokenType::Ident, sized, Span::new(start, end)));
            }
            None => {
                log::warn!(
                    "suffix '{}' after '{}' at {} is not a recognized sized type; degrading",
                    digits,
                    base,
                    end
                );
                self.tokens
                    .push(Token::new(TokenType::Ident, base.to_string(), Span::new(start, end)));
            }
        }
    }

    /// A non-ASCII codepoint with no glyph table entry, or an inert
    /// tentative glyph: both pass through as an ordinary identifier-letter,
    /// per §4.2's "no entry" and "tentative" rules.
    fn scan_unrecognized_letter(&mut self, start: usize, ch: char) {
        let end = start + ch.len_utf8();
        self.tokens
            .push(Token::new(TokenType::Ident, ch.to_string(), Span::new(start, end)));
    }
}

fn is_ascii_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph_table::GlyphSet;

    fn scan_str(source: &str) -> ScanOutput {
        let glyphs = GlyphSet::all();
        let opts = ScanOptions::new(&glyphs);
        scan(source, &opts).expect("scan should succeed")
    }

    #[test]
    fn ascii_keyword_and_ident_pass_through() {
        let out = scan_str("func main");
        assert!(out.tokens[0].is_keyword(Keyword::Func));
        assert!(out.tokens[1].is_ident());
        assert_eq!(out.tokens[1].text, "main");
    }

    #[test]
    fn keyword_glyph_emits_keyword_token() {
        let out = scan_str("功");
        assert!(out.tokens[0].is_keyword(Keyword::Func));
        assert_eq!(out.tokens[0].text, "func");
    }

    #[test]
    fn unscoped_constant_glyph_emits_its_word() {
        let out = scan_str("真");
        assert_eq!(out.tokens[0].text, "true");
        assert!(out.tokens[0].is_ident());
    }

    #[test]
    fn user_meaning_glyph_emits_its_own_codepoint() {
        let out = scan_str("让");
        assert_eq!(out.tokens[0].text, "让");
    }

    #[test]
    fn suffixable_glyph_with_valid_suffix_combines() {
        let out = scan_str("整32");
        assert_eq!(out.tokens[0].text, "int32");
    }

    #[test]
    fn suffixable_glyph_with_no_digits_emits_base() {
        let out = scan_str("整");
        assert_eq!(out.tokens[0].text, "int");
    }

    #[test]
    fn suffixable_glyph_with_unknown_suffix_degrades() {
        let out = scan_str("整7");
        assert_eq!(out.tokens[0].text, "int");
        assert_eq!(out.tokens[1].kind, TokenType::IntLiteral);
        assert_eq!(out.tokens[1].text, "7");
    }

    #[test]
    fn package_glyph_records_package_and_emits_alias() {
        let out = scan_str("数");
        assert_eq!(out.tokens[0].text, "math");
        assert_eq!(out.packages_referenced.len(), 1);
        assert_eq!(out.packages_referenced[0].alias, "math");
        assert_eq!(out.packages_referenced[0].path, "math");
    }

    #[test]
    fn package_glyph_with_split_path_and_alias() {
        let out = scan_str("大");
        assert_eq!(out.tokens[0].text, "big");
        assert_eq!(out.packages_referenced[0].path, "math/big");
    }

    #[test]
    fn tentative_glyph_is_inert_passthrough() {
        let out = scan_str("这");
        assert_eq!(out.tokens[0].text, "这");
        assert!(out.tokens[0].is_ident());
    }

    #[test]
    fn disabled_glyph_falls_back_to_passthrough() {
        let mut glyphs = GlyphSet::all();
        glyphs.disable('功');
        let opts = ScanOptions::new(&glyphs);
        let out = scan("功", &opts).unwrap();
        assert_eq!(out.tokens[0].text, "功");
        assert!(out.tokens[0].is_ident());
    }

    #[test]
    fn string_literal_is_scanned_whole() {
        let out = scan_str("\"Hi!\\n\"");
        assert_eq!(out.tokens[0].kind, TokenType::StringLiteral);
        assert_eq!(out.tokens[0].text, "\"Hi!\\n\"");
    }

    #[test]
    fn comments_are_skipped() {
        let out = scan_str("// hello\nfunc");
        assert!(out.tokens[0].is_keyword(Keyword::Func));
    }

    #[test]
    fn block_comment_is_skipped() {
        let out = scan_str("/* hello\nworld */func");
        assert!(out.tokens[0].is_keyword(Keyword::Func));
    }

    #[test]
    fn always_ends_with_eof() {
        let out = scan_str("func");
        assert_eq!(out.tokens.last().unwrap().kind, TokenType::Eof);
    }
}
