use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::style::{Styler, Tone};

pub const DEFAULT_KEYWORDS: &[&str] = &[
    "error", "fail", "critical", "warning",
    "unauthorized", "denied", "sudo", "permission",
    "crash", "restart", "start", "stop", "reload",
    "timeout", "unreachable", "connection",
    "disk", "cpu", "memory", "swap", "space",
    "not found", "exception", "terminated", "directory",
];

/// Ordered, never-empty set of case-insensitive substrings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keywords {
    words: Vec<String>,
    // lowercased copies used for matching
    folded: Vec<String>,
}

impl Default for Keywords {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect())
    }
}

impl Keywords {
    fn new(words: Vec<String>) -> Self {
        let folded = words.iter().map(|w| w.to_lowercase()).collect();
        Self { words, folded }
    }

    /// Build from a comma-separated list. Blank pieces are dropped; falls back
    /// to the defaults when nothing usable is left.
    pub fn from_arg(arg: Option<&str>) -> Self {
        let words: Vec<String> = arg
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(String::from)
            .collect();
        if words.is_empty() {
            Self::default()
        } else {
            Self::new(words)
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.words
    }

    pub fn matches(&self, line: &str) -> bool {
        let line = line.to_lowercase();
        self.folded.iter().any(|k| line.contains(k.as_str()))
    }
}

impl fmt::Display for Keywords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.words.join(", "))
    }
}

/// Marks every keyword occurrence in a line for console display.
pub struct Highlighter {
    re: Regex,
}

impl Highlighter {
    pub fn new(keywords: &Keywords) -> anyhow::Result<Self> {
        let alternation = keywords
            .as_slice()
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let re = RegexBuilder::new(&format!("({alternation})"))
            .case_insensitive(true)
            .build()?;
        Ok(Self { re })
    }

    pub fn highlight(&self, text: &str, styler: &dyn Styler) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for m in self.re.find_iter(text) {
            out.push_str(&text[last..m.start()]);
            out.push_str(&styler.paint(m.as_str(), Tone::Match));
            last = m.end();
        }
        out.push_str(&text[last..]);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::PlainStyler;

    /// Brackets every painted span so tests can see what was marked.
    struct Brackets;

    impl Styler for Brackets {
        fn paint(&self, text: &str, _tone: Tone) -> String {
            format!("[{text}]")
        }
    }

    fn kw(list: &str) -> Keywords {
        Keywords::from_arg(Some(list))
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let k = kw("error,not found");
        assert!(k.matches("Disk ERROR on sda"));
        assert!(k.matches("file Not Found"));
        assert!(!k.matches("all good"));
    }

    #[test]
    fn empty_override_falls_back_to_defaults() {
        assert_eq!(Keywords::from_arg(Some(" , ,")), Keywords::default());
        assert_eq!(Keywords::from_arg(None), Keywords::default());
        assert!(!Keywords::default().as_slice().is_empty());
    }

    #[test]
    fn display_joins_with_comma() {
        assert_eq!(kw("a, b ,c").to_string(), "a, b, c");
    }

    #[test]
    fn highlights_every_occurrence_in_source_order() {
        let h = Highlighter::new(&kw("error,disk")).unwrap();
        assert_eq!(
            h.highlight("Disk error, another ERROR", &Brackets),
            "[Disk] [error], another [ERROR]"
        );
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let h = Highlighter::new(&kw("a.b,(x)")).unwrap();
        assert_eq!(h.highlight("aXb a.b (x)", &Brackets), "aXb [a.b] [(x)]");
    }

    #[test]
    fn plain_styler_leaves_text_untouched() {
        let h = Highlighter::new(&Keywords::default()).unwrap();
        let line = "Service Control Manager: service terminated unexpectedly";
        assert_eq!(h.highlight(line, &PlainStyler), line);
    }
}
