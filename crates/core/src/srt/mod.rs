//! This module is responsible for SRT parsing and serialization.
//! It exposes the caption model plus helpers to read and write caption blocks
//! while passing timestamps through untouched.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::trace;

/// Represents a single subtitle cue (number, time range, text lines).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    pub number: u32,
    pub start_time: String,
    pub end_time: String,
    pub lines: Vec<String>,
    /// Text as first observed, kept for before/after comparison.
    pub original_text: String,
}

impl Caption {
    /// Build a caption whose original text is its current text.
    pub fn new(number: u32, start_time: &str, end_time: &str, lines: Vec<String>) -> Self {
        let original_text = lines.join("\n");
        Self {
            number,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            lines,
            original_text,
        }
    }

    /// Build a new caption from this one carrying `text` as its lines.
    /// Number, timing and original text are copied.
    pub fn with_text(&self, text: &str) -> Self {
        let lines = if text.is_empty() {
            Vec::new()
        } else {
            text.split('\n').map(str::to_string).collect()
        };
        Self {
            number: self.number,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            lines,
            original_text: self.original_text.clone(),
        }
    }

    /// Display lines joined by line breaks.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// True when there is nothing left to display.
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }
}

/// Parse SRT text into a list of captions.
/// Blocks are separated by blank lines. Text is only collected once a caption
/// number has been seen, and anything that does not fit is skipped.
pub fn parse(input: &str) -> Vec<Caption> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut captions = Vec::new();
    let mut number: Option<u32> = None;
    let mut start = String::new();
    let mut end = String::new();
    let mut text: Vec<String> = Vec::new();

    for raw in input.lines() {
        let line = raw.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            if let Some(n) = number {
                if !text.is_empty() {
                    captions.push(Caption::new(n, &start, &end, std::mem::take(&mut text)));
                    number = None;
                }
            }
            continue;
        }
        if text.is_empty() && is_number(line) {
            // Zero or overflowing digits do not open a caption.
            number = line.parse().ok().filter(|&n| n > 0);
            continue;
        }
        if number.is_none() {
            continue;
        }
        // Once text has started, arrows are dialogue.
        if text.is_empty() {
            if let Some((from, to)) = parse_times(line) {
                start = from;
                end = to;
                continue;
            }
        }
        text.push(line.to_string());
    }
    if let Some(n) = number {
        if !text.is_empty() {
            captions.push(Caption::new(n, &start, &end, text));
        }
    }
    captions
}

/// Format captions back to text.
/// The way this works is by writing each caption sequentially with blank
/// lines, renumbering from 1.
pub fn format(captions: &[Caption]) -> String {
    let mut out = String::new();
    for (i, caption) in captions.iter().enumerate() {
        out.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            i + 1,
            caption.start_time,
            caption.end_time,
            caption.text()
        ));
    }
    out
}

/// Decode subtitle bytes as UTF-8, falling back to Latin-1.
pub fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Read and parse an SRT file from disk.
pub fn read_file(path: &Path) -> Result<Vec<Caption>> {
    trace!("read_file path={}", path.display());
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(parse(&decode(&bytes)))
}

/// Split a time line like `00:00:01,000 --> 00:00:02,000` at the first arrow.
fn parse_times(line: &str) -> Option<(String, String)> {
    let (start, rest) = line.split_once("-->")?;
    let end = rest.split("-->").next().unwrap_or_default();
    Some((start.trim().to_string(), end.trim().to_string()))
}

fn is_number(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_srt() {
        let input = "1\n00:00:00,000 --> 00:00:01,000\nHello\n\n";
        let captions = parse(input);
        assert_eq!(captions.len(), 1);
        assert_eq!(captions[0].lines, vec!["Hello".to_string()]);
        assert_eq!(format(&captions), input);
    }

    #[test]
    fn parses_multiline_blocks_and_flushes_trailing_block() {
        let input = "1\r\n00:00:01,000 --> 00:00:03,000\r\nSHELDON: Hi.\r\nLEONARD: Hey.\r\n\r\n\
                     2\n00:00:04,000 --> 00:00:05,000\n(applause)";
        let captions = parse(input);
        assert_eq!(captions.len(), 2);
        assert_eq!(captions[0].number, 1);
        assert_eq!(captions[0].start_time, "00:00:01,000");
        assert_eq!(captions[0].end_time, "00:00:03,000");
        assert_eq!(captions[0].text(), "SHELDON: Hi.\nLEONARD: Hey.");
        assert_eq!(captions[0].original_text, captions[0].text());
        assert_eq!(captions[1].number, 2);
        assert_eq!(captions[1].lines, vec!["(applause)".to_string()]);
    }

    #[test]
    fn skips_stray_blank_lines_and_text_without_number() {
        let input = "\n\nstray text\n\n\n7\n00:00:01,000 --> 00:00:02,000\nkept\n\n\n";
        let captions = parse(input);
        assert_eq!(captions.len(), 1);
        assert_eq!(captions[0].number, 7);
        assert_eq!(captions[0].text(), "kept");
    }

    #[test]
    fn numeric_text_line_stays_text_once_text_started() {
        let input = "1\n00:00:01,000 --> 00:00:02,000\nCount:\n42\n\n";
        let captions = parse(input);
        assert_eq!(captions[0].lines, vec!["Count:".to_string(), "42".to_string()]);
    }

    #[test]
    fn extra_arrow_text_is_discarded() {
        let input = "1\n00:00:01,000 --> 00:00:02,000 --> junk\nHi\n";
        let captions = parse(input);
        assert_eq!(captions[0].end_time, "00:00:02,000");
    }

    #[test]
    fn byte_order_mark_does_not_hide_first_caption() {
        let input = "\u{feff}1\n00:00:01,000 --> 00:00:02,000\nHi\n\n\
                     2\n00:00:03,000 --> 00:00:04,000\nBye\n\n";
        let captions = parse(input);
        assert_eq!(captions.len(), 2);
        assert_eq!(captions[0].number, 1);
        assert_eq!(captions[0].text(), "Hi");
        assert_eq!(captions[1].text(), "Bye");
        let decoded = decode("\u{feff}1\n00:00:01,000 --> 00:00:02,000\nHi\n".as_bytes());
        assert_eq!(parse(&decoded)[0].number, 1);
    }

    #[test]
    fn arrow_inside_dialogue_stays_text() {
        let captions = parse("1\n00:00:01,000 --> 00:00:02,000\nGo --> there\n\n");
        assert_eq!(captions.len(), 1);
        assert_eq!(captions[0].start_time, "00:00:01,000");
        assert_eq!(captions[0].end_time, "00:00:02,000");
        assert_eq!(captions[0].lines, vec!["Go --> there".to_string()]);

        let captions = parse("1\n00:00:01,000 --> 00:00:02,000\nWait.\nA --> B\n\n");
        assert_eq!(captions[0].text(), "Wait.\nA --> B");
        assert_eq!(captions[0].end_time, "00:00:02,000");
    }

    #[test]
    fn bare_number_before_any_text_reopens_block() {
        let captions = parse("1\n00:00:01,000 --> 00:00:02,000\n42\nforty-two\n\n");
        assert_eq!(captions.len(), 1);
        assert_eq!(captions[0].number, 42);
        assert_eq!(captions[0].lines, vec!["forty-two".to_string()]);
    }

    #[test]
    fn format_renumbers_from_one() {
        let captions = vec![
            Caption::new(4, "a", "b", vec!["x".into()]),
            Caption::new(9, "c", "d", vec!["y".into(), "z".into()]),
        ];
        assert_eq!(format(&captions), "1\na --> b\nx\n\n2\nc --> d\ny\nz\n\n");
    }

    #[test]
    fn with_text_builds_new_value() {
        let caption = Caption::new(3, "a", "b", vec!["SHELDON: hi".into()]);
        let cleaned = caption.with_text("hi");
        assert_eq!(cleaned.lines, vec!["hi".to_string()]);
        assert_eq!(cleaned.original_text, "SHELDON: hi");
        assert_eq!(caption.text(), "SHELDON: hi");
        assert!(caption.with_text("").lines.is_empty());
        assert!(caption.with_text("").is_blank());
    }

    #[test]
    fn decodes_latin1_fallback() {
        assert_eq!(decode("Olá".as_bytes()), "Olá");
        assert_eq!(decode(&[b'O', b'l', 0xE1]), "Olá");
    }
}
