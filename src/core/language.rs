//! Language tags and best-effort language detection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display language of a file record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    JavaScript,
    TypeScript,
    Python,
    Java,
    Cpp,
    C,
    CSharp,
    Php,
    Ruby,
    Go,
    Rust,
    Html,
    Css,
    Sql,
    Json,
    Xml,
    Yaml,
    Markdown,
    Bash,
    PowerShell,
    #[default]
    PlainText,
}

impl LanguageTag {
    /// Every tag, in display order
    pub fn all() -> &'static [LanguageTag] {
        use LanguageTag::*;
        &[
            JavaScript, TypeScript, Python, Java, Cpp, C, CSharp, Php, Ruby, Go, Rust, Html,
            Css, Sql, Json, Xml, Yaml, Markdown, Bash, PowerShell, PlainText,
        ]
    }

    /// Lowercase tag as persisted
    pub fn as_str(self) -> &'static str {
        match self {
            LanguageTag::JavaScript => "javascript",
            LanguageTag::TypeScript => "typescript",
            LanguageTag::Python => "python",
            LanguageTag::Java => "java",
            LanguageTag::Cpp => "cpp",
            LanguageTag::C => "c",
            LanguageTag::CSharp => "csharp",
            LanguageTag::Php => "php",
            LanguageTag::Ruby => "ruby",
            LanguageTag::Go => "go",
            LanguageTag::Rust => "rust",
            LanguageTag::Html => "html",
            LanguageTag::Css => "css",
            LanguageTag::Sql => "sql",
            LanguageTag::Json => "json",
            LanguageTag::Xml => "xml",
            LanguageTag::Yaml => "yaml",
            LanguageTag::Markdown => "markdown",
            LanguageTag::Bash => "bash",
            LanguageTag::PowerShell => "powershell",
            LanguageTag::PlainText => "plaintext",
        }
    }

    /// Human-readable name for headers and the sidebar
    pub fn display_name(self) -> &'static str {
        match self {
            LanguageTag::JavaScript => "JavaScript",
            LanguageTag::TypeScript => "TypeScript",
            LanguageTag::Python => "Python",
            LanguageTag::Java => "Java",
            LanguageTag::Cpp => "C++",
            LanguageTag::C => "C",
            LanguageTag::CSharp => "C#",
            LanguageTag::Php => "PHP",
            LanguageTag::Ruby => "Ruby",
            LanguageTag::Go => "Go",
            LanguageTag::Rust => "Rust",
            LanguageTag::Html => "HTML",
            LanguageTag::Css => "CSS",
            LanguageTag::Sql => "SQL",
            LanguageTag::Json => "JSON",
            LanguageTag::Xml => "XML",
            LanguageTag::Yaml => "YAML",
            LanguageTag::Markdown => "Markdown",
            LanguageTag::Bash => "Bash",
            LanguageTag::PowerShell => "PowerShell",
            LanguageTag::PlainText => "Plain Text",
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown tag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language tag: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for LanguageTag {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LanguageTag::all()
            .iter()
            .copied()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

/// Extensions offered by the upload picker
pub const UPLOAD_EXTENSIONS: &[&str] = &[
    "js", "jsx", "ts", "tsx", "py", "java", "cpp", "c", "cs", "php", "rb", "go", "rs", "html",
    "css", "sql", "json", "xml", "yaml", "yml", "md", "sh", "ps1", "txt",
];

/// Look up a lowercased extension in the fixed extension table
fn language_for_extension(ext: &str) -> Option<LanguageTag> {
    let tag = match ext {
        "js" | "jsx" => LanguageTag::JavaScript,
        "ts" | "tsx" => LanguageTag::TypeScript,
        "py" => LanguageTag::Python,
        "java" => LanguageTag::Java,
        "cpp" => LanguageTag::Cpp,
        "c" => LanguageTag::C,
        "cs" => LanguageTag::CSharp,
        "php" => LanguageTag::Php,
        "rb" => LanguageTag::Ruby,
        "go" => LanguageTag::Go,
        "rs" => LanguageTag::Rust,
        "html" => LanguageTag::Html,
        "css" => LanguageTag::Css,
        "sql" => LanguageTag::Sql,
        "json" => LanguageTag::Json,
        "xml" => LanguageTag::Xml,
        "yaml" | "yml" => LanguageTag::Yaml,
        "md" => LanguageTag::Markdown,
        "sh" => LanguageTag::Bash,
        "ps1" => LanguageTag::PowerShell,
        _ => return None,
    };
    Some(tag)
}

/// Content heuristics, tried in order. Order matters: the tests overlap.
const HEURISTICS: &[(fn(&str) -> bool, LanguageTag)] = &[
    (|c| c.contains("function") && c.contains('{'), LanguageTag::JavaScript),
    (|c| c.contains("def ") && c.contains(':'), LanguageTag::Python),
    (|c| c.contains("public class"), LanguageTag::Java),
    (|c| c.contains("#include"), LanguageTag::Cpp),
    (|c| c.contains("<?php"), LanguageTag::Php),
    (|c| c.contains("<html") || c.contains("<!DOCTYPE"), LanguageTag::Html),
    (|c| c.contains("SELECT") || c.contains("FROM"), LanguageTag::Sql),
];

/// Lowercased text after the last `.` of a filename
pub fn extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
}

/// Infer a language from a filename, falling back to content heuristics
pub fn classify(content: &str, filename: &str) -> LanguageTag {
    if let Some(tag) = extension(filename).as_deref().and_then(language_for_extension) {
        return tag;
    }

    HEURISTICS
        .iter()
        .find(|(matches, _)| matches(content))
        .map(|(_, tag)| *tag)
        .unwrap_or(LanguageTag::PlainText)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_wins_over_content() {
        assert_eq!(classify("#include <stdio.h>", "a.py"), LanguageTag::Python);
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert_eq!(classify("", "Main.JAVA"), LanguageTag::Java);
        assert_eq!(classify("", "notes.Yml"), LanguageTag::Yaml);
    }

    #[test]
    fn test_last_dot_decides() {
        assert_eq!(classify("", "archive.tar.rs"), LanguageTag::Rust);
        assert_eq!(classify("", "component.test.tsx"), LanguageTag::TypeScript);
    }

    #[test]
    fn test_unknown_extension_falls_back() {
        assert_eq!(classify("xyz123", "a.unknownext"), LanguageTag::PlainText);
        assert_eq!(classify("", "README"), LanguageTag::PlainText);
    }

    #[test]
    fn test_name_without_dot_has_no_extension() {
        assert_eq!(extension("go"), None);
        assert_eq!(classify("", "go"), LanguageTag::PlainText);
    }

    #[test]
    fn test_heuristic_priority() {
        // Matches javascript, python-ish and cpp tests; javascript is declared first.
        let content = "#include <x>\nfunction f() { def g: }";
        assert_eq!(classify(content, "snippet"), LanguageTag::JavaScript);

        assert_eq!(classify("def main():\n    pass", "x"), LanguageTag::Python);
        assert_eq!(classify("public class Foo {}", "x"), LanguageTag::Java);
        assert_eq!(classify("#include <stdio.h>", "x"), LanguageTag::Cpp);
        assert_eq!(classify("<?php echo 1;", "x"), LanguageTag::Php);
        assert_eq!(classify("<!DOCTYPE html>", "x"), LanguageTag::Html);
        assert_eq!(classify("SELECT * FROM t", "x"), LanguageTag::Sql);
    }

    #[test]
    fn test_binary_input_does_not_fail() {
        let content = String::from_utf8_lossy(&[0xff, 0x00, 0xfe, 0x7f]).to_string();
        assert_eq!(classify(&content, "blob.bin"), LanguageTag::PlainText);
    }

    #[test]
    fn test_tag_roundtrip_through_str() {
        for tag in LanguageTag::all() {
            assert_eq!(tag.as_str().parse::<LanguageTag>(), Ok(*tag));
        }
        assert!("cobol".parse::<LanguageTag>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_tag() {
        let json = serde_json::to_string(&LanguageTag::PowerShell).unwrap();
        assert_eq!(json, "\"powershell\"");
        let tag: LanguageTag = serde_json::from_str("\"csharp\"").unwrap();
        assert_eq!(tag, LanguageTag::CSharp);
    }
}
