use crate::schema::base::{DurationError, SpeakerId, Timestamp};
use crate::util::duration::TimeSpan;
use crate::validate::{Context, Schema};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TranscriptSegment {
    pub speaker: SpeakerId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub content: String,
}

impl TimeSpan for TranscriptSegment {
    fn start_time(&self) -> &Timestamp {
        &self.start_time
    }

    fn end_time(&self) -> &Timestamp {
        &self.end_time
    }
}

impl Schema for TranscriptSegment {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let speaker = cx.field(map, "speaker");
        let start_time = cx.field(map, "start_time");
        let end_time = cx.field(map, "end_time");
        let content = cx.field(map, "content");
        Some(Self {
            speaker: speaker?,
            start_time: start_time?,
            end_time: end_time?,
            content: content?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SpeakerMapEntry {
    pub speaker_id: SpeakerId,
    pub speaker_name: String,
}

impl Schema for SpeakerMapEntry {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let speaker_id = cx.field(map, "speaker_id");
        let speaker_name = cx.field(map, "speaker_name");
        Some(Self {
            speaker_id: speaker_id?,
            speaker_name: speaker_name?,
        })
    }
}

/// Talk-time totals. Durations are `HH:MM:SS` strings, not seconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TalkTime {
    pub duration: Timestamp,
    pub speakers: BTreeMap<String, Timestamp>,
    pub idle: Timestamp,
    pub overlap: Timestamp,
}

impl Schema for TalkTime {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let duration = cx.field(map, "duration");
        let speakers = cx.field(map, "speakers");
        let idle = cx.field(map, "idle");
        let overlap = cx.field(map, "overlap");
        Some(Self {
            duration: duration?,
            speakers: speakers?,
            idle: idle?,
            overlap: overlap?,
        })
    }
}

impl TalkTime {
    /// Aggregates talk time from diarized segments, treating the recording
    /// as starting at 00:00:00 and ending at the latest segment end.
    ///
    /// A speaker's time is the union of their own intervals, so a speaker
    /// never double counts. `overlap` is the time two or more speakers talk
    /// at once and `idle` the time nobody does. Zero-length and inverted
    /// segments contribute nothing.
    pub fn derive(segments: &[TranscriptSegment]) -> Result<Self, DurationError> {
        let spans: Vec<(&str, u32, u32)> = segments
            .iter()
            .map(|s| (s.speaker.as_str(), s.start_time.seconds(), s.end_time.seconds()))
            .filter(|(_, start, end)| end > start)
            .collect();

        let duration = segments
            .iter()
            .map(|s| s.end_time.seconds().max(s.start_time.seconds()))
            .max()
            .unwrap_or(0);

        let mut per_speaker: BTreeMap<&str, Vec<(u32, u32)>> = BTreeMap::new();
        for (speaker, start, end) in &spans {
            per_speaker.entry(*speaker).or_default().push((*start, *end));
        }

        let mut speakers = BTreeMap::new();
        let mut merged_all = Vec::new();
        for (speaker, intervals) in per_speaker {
            let merged = merge(intervals);
            let spoken = merged.iter().map(|(s, e)| e - s).sum();
            speakers.insert(speaker.to_owned(), Timestamp::from_seconds(spoken)?);
            merged_all.extend(merged);
        }

        let speaking: u32 = merge(merged_all.clone()).iter().map(|(s, e)| e - s).sum();

        Ok(Self {
            duration: Timestamp::from_seconds(duration)?,
            speakers,
            idle: Timestamp::from_seconds(duration.saturating_sub(speaking))?,
            overlap: Timestamp::from_seconds(overlapped(&merged_all))?,
        })
    }
}

/// Union of half-open intervals as disjoint, sorted intervals.
fn merge(mut intervals: Vec<(u32, u32)>) -> Vec<(u32, u32)> {
    intervals.sort_unstable();
    let mut out: Vec<(u32, u32)> = Vec::with_capacity(intervals.len());
    for (start, end) in intervals {
        match out.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => out.push((start, end)),
        }
    }
    out
}

/// Time during which at least two intervals are open. Each speaker's
/// intervals must already be merged so a speaker never overlaps themselves.
fn overlapped(intervals: &[(u32, u32)]) -> u32 {
    let mut events: Vec<(u32, i32)> = intervals
        .iter()
        .flat_map(|(s, e)| [(*s, 1), (*e, -1)])
        .collect();
    // Closings sort before openings at the same instant.
    events.sort_unstable();

    let mut open = 0;
    let mut last = 0;
    let mut total = 0;
    for (at, delta) in events {
        if open >= 2 {
            total += at - last;
        }
        open += delta;
        last = at;
    }
    total
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Transcript {
    pub segments: Vec<TranscriptSegment>,
    pub speaker_map: Vec<SpeakerMapEntry>,
    pub talk_time: TalkTime,
}

impl Transcript {
    pub fn speaker_name(&self, id: &SpeakerId) -> Option<&str> {
        self.speaker_map
            .iter()
            .find(|entry| &entry.speaker_id == id)
            .map(|entry| entry.speaker_name.as_str())
    }
}

impl Schema for Transcript {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let segments = cx.field(map, "segments");
        let speaker_map = cx.field(map, "speaker_map");
        let talk_time = cx.field(map, "talk_time");
        Some(Self {
            segments: segments?,
            speaker_map: speaker_map?,
            talk_time: talk_time?,
        })
    }
}

/// Diarized dialogue before talk-time aggregation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RawTranscript {
    pub segments: Vec<TranscriptSegment>,
    pub speaker_map: Vec<SpeakerMapEntry>,
}

impl Schema for RawTranscript {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let segments = cx.field(map, "segments");
        let speaker_map = cx.field(map, "speaker_map");
        Some(Self {
            segments: segments?,
            speaker_map: speaker_map?,
        })
    }
}

/// The analysis engine's transcription response, `{ "transcript": {..} }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TranscriptResponse {
    pub transcript: RawTranscript,
}

impl TranscriptResponse {
    pub fn into_transcript(self) -> Result<Transcript, DurationError> {
        let talk_time = TalkTime::derive(&self.transcript.segments)?;
        Ok(Transcript {
            segments: self.transcript.segments,
            speaker_map: self.transcript.speaker_map,
            talk_time,
        })
    }
}

impl Schema for TranscriptResponse {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let transcript = cx.field(map, "transcript")?;
        Some(Self { transcript })
    }
}
