// src/extractors/section.rs

use std::path::PathBuf;

// --- Constants ---
/// Two-character prefix that marks a heading line in the changelog.
pub const HEADING_MARKER: &str = "##";

// --- Data Structures ---
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSection {
    pub version: String,             // The marker that was searched for, e.g. "1.2.0"
    pub heading: Option<String>,     // Full text of the matched heading line, if any
    pub content: String,             // Trimmed section body
    pub source_path: Option<PathBuf>, // Changelog the lines came from (set by the caller)
}

impl ExtractedSection {
    /// True when no heading matched or the matched section had no content.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Attaches the path of the changelog the section was read from.
    pub fn with_source<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.source_path = Some(path.into());
        self
    }
}

/// Returns true if `line` starts a new changelog section.
pub fn is_heading(line: &str) -> bool {
    line.starts_with(HEADING_MARKER)
}

/// Extracts the body of the section whose heading contains `version_marker`.
///
/// Lines are scanned once, in order. The first heading containing the marker
/// opens the section; the next heading that does *not* contain it closes it.
/// Matching is plain substring containment, so `"1.2"` also matches a
/// `## 1.2.0` heading. When nothing matches the result is an empty string.
pub fn extract_section<I, S>(lines: I, version_marker: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut inside_section = false;
    let mut accumulator = String::new();

    for line in lines {
        let line = line.as_ref();

        if is_heading(line) {
            if line.contains(version_marker) {
                inside_section = true;
            } else if inside_section {
                break; // Next heading after our section
            }
        } else if inside_section {
            accumulator.push_str(line);
            accumulator.push('\n');
        }
    }

    accumulator.trim().to_string()
}

/// First heading line containing `version_marker`, i.e. the one that opens
/// the section [`extract_section`] returns.
pub fn find_heading<'a, S: AsRef<str>>(lines: &'a [S], version_marker: &str) -> Option<&'a str> {
    lines
        .iter()
        .map(|line| <S as AsRef<str>>::as_ref(line))
        .find(|line| is_heading(line) && line.contains(version_marker))
}

// --- Main Extractor Structure ---
/// Stateless extractor. Holds no fields, so one value can be shared freely
/// across threads and calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct SectionExtractor;

impl SectionExtractor {
    pub fn new() -> Self { Self }

    /// Extracts the section for `version_marker`, keeping the matched heading.
    pub fn extract<S: AsRef<str>>(&self, lines: &[S], version_marker: &str) -> ExtractedSection {
        ExtractedSection {
            version: version_marker.to_string(),
            heading: find_heading(lines, version_marker).map(str::to_string),
            content: extract_section(lines, version_marker),
            source_path: None,
        }
    }
}
