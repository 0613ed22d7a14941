//! Keyword, string and comment highlighting
//!
//! The text is split into plain, string and comment regions in a single
//! left-to-right scan, then keywords are located inside each region. Because
//! keywords never cross a region boundary, the markup is always well nested.

use std::ops::Range;

use super::language::LanguageTag;

/// Highlight category of a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Keyword,
    String,
    Comment,
}

impl SpanKind {
    /// Class attribute used in markup output
    pub fn class_name(self) -> &'static str {
        match self {
            SpanKind::Keyword => "keyword",
            SpanKind::String => "string",
            SpanKind::Comment => "comment",
        }
    }

    fn open_tag(self) -> String {
        format!("<span class=\"{}\">", self.class_name())
    }
}

const CLOSE_TAG: &str = "</span>";

/// Highlighter settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightOptions {
    /// Also mark keywords that sit inside strings and comments
    pub keywords_in_literals: bool,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            keywords_in_literals: true,
        }
    }
}

const JAVASCRIPT_KEYWORDS: &[&str] = &[
    "function", "const", "let", "var", "if", "else", "for", "while", "return", "class", "import",
    "export",
];

const TYPESCRIPT_KEYWORDS: &[&str] = &[
    "function", "const", "let", "var", "if", "else", "for", "while", "return", "class", "import",
    "export", "interface", "type", "enum", "implements",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "def", "if", "elif", "else", "for", "while", "return", "class", "import", "from", "try",
    "except",
];

const JAVA_KEYWORDS: &[&str] = &[
    "public", "private", "protected", "class", "interface", "if", "else", "for", "while",
    "return", "import",
];

const CPP_KEYWORDS: &[&str] = &[
    "#include", "int", "void", "char", "float", "double", "if", "else", "for", "while", "return",
    "class",
];

const C_KEYWORDS: &[&str] = &[
    "#include", "#define", "int", "void", "char", "float", "double", "struct", "if", "else",
    "for", "while", "return",
];

const RUST_KEYWORDS: &[&str] = &[
    "fn", "let", "mut", "pub", "struct", "enum", "impl", "trait", "use", "mod", "match", "if",
    "else", "for", "while", "loop", "return",
];

const GO_KEYWORDS: &[&str] = &[
    "func", "package", "import", "var", "const", "type", "struct", "interface", "if", "else",
    "for", "range", "return", "go", "defer",
];

/// Keyword list for a language, empty when it has none
pub fn keywords(language: LanguageTag) -> &'static [&'static str] {
    match language {
        LanguageTag::JavaScript => JAVASCRIPT_KEYWORDS,
        LanguageTag::TypeScript => TYPESCRIPT_KEYWORDS,
        LanguageTag::Python => PYTHON_KEYWORDS,
        LanguageTag::Java => JAVA_KEYWORDS,
        LanguageTag::Cpp => CPP_KEYWORDS,
        LanguageTag::C => C_KEYWORDS,
        LanguageTag::Rust => RUST_KEYWORDS,
        LanguageTag::Go => GO_KEYWORDS,
        _ => &[],
    }
}

/// A contiguous run of the source, optionally a string or comment
#[derive(Debug, Clone, PartialEq, Eq)]
struct Region {
    kind: Option<SpanKind>,
    range: Range<usize>,
    keywords: Vec<Range<usize>>,
}

/// A styled piece of highlighted text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    /// Enclosing string or comment span, if any
    pub region: Option<SpanKind>,
    pub keyword: bool,
}

/// Result of highlighting one text
#[derive(Debug, Clone)]
pub struct Highlighted<'a> {
    source: &'a str,
    regions: Vec<Region>,
}

impl<'a> Highlighted<'a> {
    /// Flattened runs covering the whole source, in order
    pub fn segments(&self) -> Vec<Segment<'a>> {
        let mut segments = Vec::new();
        for region in &self.regions {
            let mut pos = region.range.start;
            for kw in &region.keywords {
                if pos < kw.start {
                    segments.push(Segment {
                        text: &self.source[pos..kw.start],
                        region: region.kind,
                        keyword: false,
                    });
                }
                segments.push(Segment {
                    text: &self.source[kw.clone()],
                    region: region.kind,
                    keyword: true,
                });
                pos = kw.end;
            }
            if pos < region.range.end {
                segments.push(Segment {
                    text: &self.source[pos..region.range.end],
                    region: region.kind,
                    keyword: false,
                });
            }
        }
        segments
    }

    /// Render as a span-marked string. The source text is not escaped.
    pub fn to_markup(&self) -> String {
        let mut out = String::with_capacity(self.source.len() + self.regions.len() * 32);
        for region in &self.regions {
            if let Some(kind) = region.kind {
                out.push_str(&kind.open_tag());
            }
            let mut pos = region.range.start;
            for kw in &region.keywords {
                out.push_str(&self.source[pos..kw.start]);
                out.push_str(&SpanKind::Keyword.open_tag());
                out.push_str(&self.source[kw.clone()]);
                out.push_str(CLOSE_TAG);
                pos = kw.end;
            }
            out.push_str(&self.source[pos..region.range.end]);
            if region.kind.is_some() {
                out.push_str(CLOSE_TAG);
            }
        }
        out
    }
}

/// Highlight with default options
#[cfg(test)]
pub fn highlight(content: &str, language: LanguageTag) -> Highlighted<'_> {
    highlight_with(content, language, HighlightOptions::default())
}

/// Highlight `content` as `language`
pub fn highlight_with(
    content: &str,
    language: LanguageTag,
    options: HighlightOptions,
) -> Highlighted<'_> {
    let mut regions = scan_regions(content);
    let words = keywords(language);

    if !words.is_empty() {
        for region in &mut regions {
            if region.kind.is_none() || options.keywords_in_literals {
                region.keywords = scan_keywords(content, region.range.clone(), words);
            }
        }
    }

    Highlighted {
        source: content,
        regions,
    }
}

/// Split the text into plain, string and comment regions
fn scan_regions(source: &str) -> Vec<Region> {
    let bytes = source.as_bytes();
    let mut regions = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let found = match bytes[i] {
            b'"' | b'\'' => scan_string(bytes, i).map(|end| (SpanKind::String, end)),
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                Some((SpanKind::Comment, line_end(bytes, i)))
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                block_comment_end(bytes, i).map(|end| (SpanKind::Comment, end))
            }
            b'#' => Some((SpanKind::Comment, line_end(bytes, i))),
            _ => None,
        };

        match found {
            Some((kind, end)) => {
                push_plain(&mut regions, plain_start..i);
                regions.push(Region {
                    kind: Some(kind),
                    range: i..end,
                    keywords: Vec::new(),
                });
                i = end;
                plain_start = end;
            }
            None => i += 1,
        }
    }

    push_plain(&mut regions, plain_start..bytes.len());
    regions
}

fn push_plain(regions: &mut Vec<Region>, range: Range<usize>) {
    if !range.is_empty() {
        regions.push(Region {
            kind: None,
            range,
            keywords: Vec::new(),
        });
    }
}

/// End (exclusive) of the quoted literal opening at `start`, if it is closed.
/// A backslash escapes any character except a line break.
fn scan_string(bytes: &[u8], start: usize) -> Option<usize> {
    let quote = bytes[start];
    let mut j = start + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => match bytes.get(j + 1) {
                Some(b'\n' | b'\r') | None => return None,
                Some(_) => j += 2,
            },
            b if b == quote => return Some(j + 1),
            _ => j += 1,
        }
    }
    None
}

/// Position of the next newline, or end of text
fn line_end(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |offset| start + offset)
}

/// End (exclusive) of the block comment opening at `start`, if it is closed
fn block_comment_end(bytes: &[u8], start: usize) -> Option<usize> {
    bytes[start + 2..]
        .windows(2)
        .position(|w| w == b"*/")
        .map(|offset| start + 2 + offset + 2)
}

fn is_ident(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Whole-word keyword occurrences inside `range`, first listed keyword wins
fn scan_keywords(source: &str, range: Range<usize>, words: &[&str]) -> Vec<Range<usize>> {
    let mut found = Vec::new();
    let mut i = range.start;

    while i < range.end {
        let at_boundary = !source[..i].chars().next_back().is_some_and(is_ident);
        if at_boundary {
            if let Some(word) = words
                .iter()
                .find(|word| keyword_at(source, i, range.end, word))
            {
                found.push(i..i + word.len());
                i += word.len();
                continue;
            }
        }

        let Some(ch) = source[i..].chars().next() else {
            break;
        };
        if is_ident(ch) {
            let run: usize = source[i..range.end]
                .chars()
                .take_while(|c| is_ident(*c))
                .map(char::len_utf8)
                .sum();
            i += run;
        } else {
            i += ch.len_utf8();
        }
    }

    found
}

fn keyword_at(source: &str, start: usize, limit: usize, word: &str) -> bool {
    let end = start + word.len();
    end <= limit
        && source.get(start..end) == Some(word)
        && !source[end..].chars().next().is_some_and(is_ident)
}
