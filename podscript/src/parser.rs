//! Tagged-script parser
//!
//! The generation provider is asked to format episode scripts as one tagged
//! line per segment:
//!
//! ```text
//! [NARRAÇÃO|00:00-00:30] Texto da introdução...
//! [MÚSICA|00:00-10:00] Estilo: ambiente suave
//! [EFEITOS|00:15-00:17] Som de páginas virando
//! ```
//!
//! Parsing is best-effort: the provider is not guaranteed to honor the format
//! on every line, so anything that does not match is silently skipped and the
//! parser never fails.

use crate::models::{Segment, SegmentKind};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// One segment per line: `[TYPE|MM:SS-MM:SS] content`
    static ref SEGMENT_LINE: Regex = Regex::new(
        r"(?i)^\[(NARRAÇÃO|MÚSICA|EFEITOS)\|(\d{2}:\d{2})-(\d{2}:\d{2})\]\s*(.*)$"
    )
    .expect("segment line pattern is valid");
}

/// Parses a `MM:SS` timestamp into seconds
///
/// Returns `None` for anything that is not two colon-separated numbers.
pub fn parse_timestamp(value: &str) -> Option<u32> {
    let (minutes, seconds) = value.split_once(':')?;
    let minutes: u32 = minutes.parse().ok()?;
    let seconds: u32 = seconds.parse().ok()?;
    Some(minutes * 60 + seconds)
}

/// Parses a provider script into ordered, typed segments
///
/// Segments are returned in line order with sequential ids starting at
/// `segment_0`. Durations are computed as `end - start`; no monotonicity or
/// overlap validation is performed.
pub fn parse_script(script: &str) -> Vec<Segment> {
    let mut segments = Vec::new();

    for line in script.lines() {
        let Some(captures) = SEGMENT_LINE.captures(line.trim_end()) else {
            continue;
        };

        let Some(kind) = SegmentKind::from_tag(&captures[1]) else {
            continue;
        };
        let (Some(start), Some(end)) =
            (parse_timestamp(&captures[2]), parse_timestamp(&captures[3]))
        else {
            continue;
        };

        segments.push(Segment {
            id: Segment::id_for(segments.len() as u64),
            kind,
            start_time: start,
            duration: end.saturating_sub(start),
            content: captures[4].trim().to_string(),
        });
    }

    segments
}
