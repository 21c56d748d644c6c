//! Extraction rules of the command line mini-language.
//!
//! A line looks like `/keyword ['Title'] [HH:MM-HH:MM] [#tag ...]`. The four
//! rules below run independently against the same raw line, so everything
//! after the keyword may appear in any order.
use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

const KEYWORD_RE: &str = r"^/(\w+)";
// Opening and closing quotes are not required to be the same character.
const TITLE_RE: &str = r#"['"]([^'"]*)['"]"#;
const TIME_RANGE_RE: &str = r"(\d{2}:\d{2}-\d{2}:\d{2})";
const TAG_RE: &str = r"#(\w+)";

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).unwrap())
}

/// The word right after a leading `/`, or `None` if the line is not a command.
pub fn keyword(line: &str) -> Option<&str> {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    compiled(&REGEX, KEYWORD_RE)
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

fn title_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    compiled(&REGEX, TITLE_RE)
}

fn tag_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    compiled(&REGEX, TAG_RE)
}

/// Contents of the first quoted run.
pub fn title(line: &str) -> Option<&str> {
    title_regex()
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Byte span of the first quoted run, quotes included.
pub fn title_span(line: &str) -> Option<Range<usize>> {
    title_regex().find(line).map(|m| m.range())
}

/// First `HH:MM-HH:MM` occurrence, unvalidated.
pub fn time_range(line: &str) -> Option<&str> {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    compiled(&REGEX, TIME_RANGE_RE)
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Every `#word`, in order of appearance, duplicates included.
pub fn tags(line: &str) -> Vec<String> {
    tag_regex()
        .captures_iter(line)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Like [`tags`], but skips `#word`s written inside the quoted title.
pub fn tags_outside_title(line: &str) -> Vec<String> {
    let Some(span) = title_span(line) else {
        return tags(line);
    };
    tag_regex()
        .find_iter(line)
        .filter(|m| !span.contains(&m.start()))
        .map(|m| m.as_str()[1..].to_string())
        .collect()
}
