//! Tolerant SRT cue parser.
//!
//! Real-world transcript files carry BOM markers, stray blank lines, broken
//! cue blocks and styling suffixes on timing lines. The parser walks the file
//! block by block and silently drops whatever does not form a complete cue,
//! so one bad block never takes down the rest of the transcript.

use regex::Regex;

use super::timecode::parse_timecode;
use super::Cue;

/// Parse SRT content into cues, skipping malformed blocks.
///
/// A block is kept only if it has an integer index line, a timing line whose
/// start matches `HH:MM:SS,mmm --> HH:MM:SS,mmm` (trailing styling directives
/// are ignored), and zero or more text lines up to the next blank line. Text
/// lines are joined with single spaces and internal runs of whitespace are
/// collapsed.
pub fn parse_srt(content: &str) -> Vec<Cue> {
    let timing_line = Regex::new(
        r"^(\d{2}:\d{2}:\d{2},\d{3})\s*-->\s*(\d{2}:\d{2}:\d{2},\d{3})",
    )
    .unwrap();

    let content = content.trim_start_matches('\u{feff}');
    let lines: Vec<&str> = content.lines().collect();
    let mut cues = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        // Skip blank separator lines between blocks.
        while i < lines.len() && lines[i].trim().is_empty() {
            i += 1;
        }
        if i >= lines.len() {
            break;
        }

        let index_line = lines[i].trim();
        i += 1;
        let index: i64 = match index_line.parse() {
            Ok(index) => index,
            Err(_) => continue,
        };
        if i >= lines.len() {
            break;
        }

        let timing = lines[i].trim();
        i += 1;
        let captures = match timing_line.captures(timing) {
            Some(captures) => captures,
            None => continue,
        };
        let (start_ms, end_ms) = match (parse_timecode(&captures[1]), parse_timecode(&captures[2])) {
            (Some(start_ms), Some(end_ms)) => (start_ms, end_ms),
            _ => continue,
        };

        let mut text_lines = Vec::new();
        while i < lines.len() && !lines[i].trim().is_empty() {
            text_lines.push(lines[i]);
            i += 1;
        }
        let text = text_lines
            .join(" ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        cues.push(Cue {
            index,
            start_ms,
            end_ms,
            text,
        });
    }

    cues
}
