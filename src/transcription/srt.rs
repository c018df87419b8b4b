//! SubRip (`.srt`) cues.

use anyhow::{anyhow, bail, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    static ref TIMING: Regex = Regex::new(
        r"^(\d{2,}):(\d{2}):(\d{2})[,.](\d{3})\s*-->\s*(\d{2,}):(\d{2}):(\d{2})[,.](\d{3})"
    )
    .expect("valid SRT timing pattern");
}

/// Millisecond offset formatted as `HH:MM:SS,mmm`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(pub u64);

impl Timestamp {
    fn from_parts(h: &str, m: &str, s: &str, ms: &str) -> Result<Self> {
        let (h, m, s, ms): (u64, u64, u64, u64) = (h.parse()?, m.parse()?, s.parse()?, ms.parse()?);
        if m >= 60 || s >= 60 {
            bail!("timestamp component out of range");
        }
        h.checked_mul(3600)
            .and_then(|secs| secs.checked_add(m * 60 + s))
            .and_then(|secs| secs.checked_mul(1000))
            .and_then(|millis| millis.checked_add(ms))
            .map(Self)
            .ok_or_else(|| anyhow!("timestamp out of range"))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.0 % 1000;
        let total_secs = self.0 / 1000;
        write!(
            f,
            "{:02}:{:02}:{:02},{:03}",
            total_secs / 3600,
            (total_secs / 60) % 60,
            total_secs % 60,
            ms
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleCue {
    pub index: u32,
    pub start: Timestamp,
    pub end: Timestamp,
    pub text: String,
}

/// Parse SRT text. Blank-line separated blocks; a block needs an index line,
/// a timing line and at least one text line.
pub fn parse_srt(input: &str) -> Result<Vec<SubtitleCue>> {
    let normalized = input.replace("\r\n", "\n");
    let mut cues = Vec::new();

    for block in normalized.split("\n\n").map(str::trim).filter(|b| !b.is_empty()) {
        let mut lines = block.lines();
        let index_line = lines.next().unwrap_or_default().trim();
        let index: u32 = index_line
            .parse()
            .map_err(|_| anyhow!("expected cue number, found {:?}", index_line))?;

        let timing_line = lines
            .next()
            .ok_or_else(|| anyhow!("cue {} has no timing line", index))?;
        let caps = TIMING
            .captures(timing_line.trim())
            .ok_or_else(|| anyhow!("cue {} has malformed timing {:?}", index, timing_line))?;
        let start = Timestamp::from_parts(&caps[1], &caps[2], &caps[3], &caps[4])?;
        let end = Timestamp::from_parts(&caps[5], &caps[6], &caps[7], &caps[8])?;
        if end < start {
            bail!("cue {} ends before it starts", index);
        }

        let text = lines.collect::<Vec<_>>().join("\n");
        if text.trim().is_empty() {
            bail!("cue {} has no text", index);
        }
        cues.push(SubtitleCue { index, start, end, text });
    }

    if cues.is_empty() {
        bail!("no subtitle cues found");
    }
    Ok(cues)
}

pub fn render_srt(cues: &[SubtitleCue]) -> String {
    cues.iter()
        .map(|cue| format!("{}\n{} --> {}\n{}\n", cue.index, cue.start, cue.end, cue.text))
        .collect::<Vec<_>>()
        .join("\n")
}
