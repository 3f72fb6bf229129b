//! Preference model for picking an English subtitle track.
//! Works on ffprobe JSON output and prefers the least polluted full track.

use anyhow::Result;
use serde::Deserialize;
use tracing::{debug, trace};

/// Language tags accepted as English.
const ENGLISH_TAGS: &[&str] = &[
    "en", "eng", "english", "en-us", "en_us", "enus", "en-gb", "en_gb", "engb",
];

/// Represents a subtitle stream returned by ffprobe.
/// This type holds the absolute index plus optional tags and dispositions.
#[derive(Debug, Deserialize)]
pub struct Stream {
    pub index: u32,
    #[serde(default)]
    pub tags: Tags,
    #[serde(default)]
    pub disposition: Disposition,
}

/// Captures the language and title tags for a stream.
/// ffprobe may omit these fields, so they are optional.
#[derive(Debug, Default, Deserialize)]
pub struct Tags {
    pub language: Option<String>,
    pub title: Option<String>,
}

/// Disposition flags ffprobe reports as 0/1 integers.
#[derive(Debug, Default, Deserialize)]
pub struct Disposition {
    #[serde(default)]
    pub forced: u8,
    #[serde(default)]
    pub hearing_impaired: u8,
}

/// How much non-dialogue content a track is expected to carry.
/// Ordered from cleanest to most polluted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TrackKind {
    Normal,
    HearingImpaired,
    ClosedCaptions,
}

#[derive(Deserialize)]
struct Probe {
    #[serde(default)]
    streams: Vec<Stream>,
}

/// Parse ffprobe JSON and return the index of the preferred English track.
pub fn pick_from_probe_json(json: &str) -> Result<Option<u32>> {
    let probe: Probe = serde_json::from_str(json)?;
    trace!("pick_from_probe_json streams={}", probe.streams.len());
    Ok(best_english_stream(&probe.streams))
}

/// Decide which English subtitle stream to extract.
/// The way this works is by classifying every full English stream and
/// keeping the first one of the cleanest kind.
pub fn best_english_stream(streams: &[Stream]) -> Option<u32> {
    let mut best: Option<(u32, TrackKind)> = None;
    for stream in streams {
        let Some(kind) = classify(stream) else {
            continue;
        };
        debug!("stream {} classified as {:?}", stream.index, kind);
        match best {
            Some((_, best_kind)) if kind >= best_kind => {}
            _ => best = Some((stream.index, kind)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Classify a stream, or `None` when it is not a full English track.
pub fn classify(stream: &Stream) -> Option<TrackKind> {
    let english = stream
        .tags
        .language
        .as_deref()
        .map(|l| ENGLISH_TAGS.contains(&l.trim().to_lowercase().as_str()))
        .unwrap_or(false);
    if !english || stream.disposition.forced == 1 {
        return None;
    }
    let title = stream.tags.title.as_deref().unwrap_or("").to_lowercase();
    if title.contains("forced") {
        return None;
    }
    let mut kind = TrackKind::Normal;
    if title.contains("cc") || title.contains("caption") {
        kind = TrackKind::ClosedCaptions;
    }
    if ["sdh", "hi", "hearing", "impaired"]
        .iter()
        .any(|tag| title.contains(tag))
    {
        kind = TrackKind::HearingImpaired;
    }
    if kind == TrackKind::Normal && stream.disposition.hearing_impaired == 1 {
        kind = TrackKind::HearingImpaired;
    }
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(index: u32, lang: &str, title: Option<&str>) -> Stream {
        Stream {
            index,
            tags: Tags {
                language: Some(lang.to_string()),
                title: title.map(str::to_string),
            },
            disposition: Disposition::default(),
        }
    }

    #[test]
    fn prefers_plain_stream_over_cc() {
        let streams = vec![
            stream(2, "eng", Some("English CC")),
            stream(3, "eng", Some("English")),
        ];
        assert_eq!(best_english_stream(&streams), Some(3));
    }

    #[test]
    fn prefers_sdh_over_cc() {
        let streams = vec![
            stream(2, "eng", Some("Closed Captions")),
            stream(4, "en-US", Some("SDH")),
        ];
        assert_eq!(best_english_stream(&streams), Some(4));
    }

    #[test]
    fn hi_title_wins_over_cc_title() {
        assert_eq!(
            classify(&stream(1, "eng", Some("CC SDH"))),
            Some(TrackKind::HearingImpaired)
        );
    }

    #[test]
    fn hearing_impaired_disposition_marks_untitled_stream() {
        let mut s = stream(5, "eng", None);
        s.disposition.hearing_impaired = 1;
        assert_eq!(classify(&s), Some(TrackKind::HearingImpaired));
    }

    #[test]
    fn skips_forced_and_foreign_streams() {
        let mut forced = stream(2, "eng", None);
        forced.disposition.forced = 1;
        let streams = vec![
            forced,
            stream(3, "eng", Some("Forced")),
            stream(4, "por", None),
        ];
        assert_eq!(best_english_stream(&streams), None);
    }

    #[test]
    fn first_stream_wins_ties() {
        let streams = vec![stream(2, "eng", None), stream(3, "english", None)];
        assert_eq!(best_english_stream(&streams), Some(2));
    }

    #[test]
    fn reads_ffprobe_json() {
        let json = r#"{
            "programs": [],
            "streams": [
                {"index": 2, "tags": {"language": "eng", "title": "English [CC]"},
                 "disposition": {"default": 1, "forced": 0, "hearing_impaired": 0}},
                {"index": 3, "tags": {"language": "eng"},
                 "disposition": {"default": 0, "forced": 0, "hearing_impaired": 0}},
                {"index": 4}
            ]
        }"#;
        assert_eq!(pick_from_probe_json(json).unwrap(), Some(3));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(pick_from_probe_json("not json").is_err());
    }
}
