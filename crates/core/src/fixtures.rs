//! A complete, valid evaluation that tests mutate one field at a time.

use serde_json::{json, Value};

fn verdict(score: f64, reason: &str) -> Value {
    json!({
        "strengths": ["Keeps the conversation going", "Willing to take risks"],
        "limitations": ["Limited range under pressure"],
        "score": score,
        "confidence_level": "medium",
        "reason": reason,
    })
}

fn measure(name: &str, user: f64, target: f64, unit: &str) -> Value {
    json!({
        "name": name,
        "user_score": {"value": user, "unit": unit},
        "target_score": {"value": target, "unit": unit},
    })
}

fn extend(mut base: Value, extra: Value) -> Value {
    if let (Value::Object(base), Value::Object(extra)) = (&mut base, extra) {
        base.extend(extra);
    }
    base
}

pub(crate) fn fluency() -> Value {
    json!({
        "type": "fluency",
        "segments": [
            {
                "timestamp": "00:00:14",
                "content": "I was... going to the, uh, store",
                "suggestion": ["I was going to the store."],
                "explanation": "A long pause breaks the sentence before the destination.",
                "tags": ["Long Pause"],
            },
            {
                "timestamp": "00:00:21",
                "content": "um, like, you know, it was um closed",
                "suggestion": ["It was closed.", "Unfortunately, it was closed."],
                "explanation": "Several fillers cluster around a simple statement.",
                "tags": ["Filler Cluster", "Long Pause"],
            },
        ],
        "metrics": {
            "speech_rate": extend(
                measure("Speech Rate", 96.0, 130.0, "WPM"),
                json!({"interpretation": "functional"}),
            ),
            "average_pause_duration": extend(
                measure("Average Pause Duration", 1.4, 0.8, "seconds"),
                json!({"threshold_exceeded": true}),
            ),
            "fillers_per_100_words": extend(
                measure("Fillers per 100 Words", 7.5, 3.0, "per 100 words"),
                json!({
                    "level": "moderate",
                    "breakdown": [
                        {"filler": "um", "count": 6},
                        {"filler": "like", "count": 3},
                    ],
                }),
            ),
            "hesitation_rate": measure("Hesitation Rate", 12.0, 5.0, "%"),
        },
        "score": verdict(68.0, "You keep talking but pauses interrupt longer ideas."),
    })
}

pub(crate) fn grammar() -> Value {
    json!({
        "type": "grammar",
        "segments": [
            {
                "timestamp": "00:00:05",
                "content": "Yesterday I buy a new phone",
                "suggestion": ["Yesterday I bought a new phone."],
                "explanation": "Past time needs the past simple.",
                "tags": ["Verb Tense"],
            },
            {
                "timestamp": "00:00:16",
                "content": "She don't like it",
                "suggestion": ["She doesn't like it."],
                "explanation": "Third person singular takes 'doesn't'.",
                "tags": ["Subject-Verb Agreement"],
            },
            {
                "timestamp": "00:00:38",
                "content": "I am agree with you",
                "suggestion": ["I agree with you."],
                "explanation": "'Agree' is a verb and needs no auxiliary.",
                "tags": ["Mixed Errors"],
            },
        ],
        "metrics": {
            "errors_per_100_words": extend(
                measure("Errors per 100 Words", 6.2, 3.0, "per 100 words"),
                json!({"interpretation": "noticeable errors"}),
            ),
            "self_correction_rate": measure("Self-Correction Rate", 15.0, 40.0, "%"),
            "syntactic_complexity": extend(
                measure("Syntactic Complexity", 45.0, 65.0, "score"),
                json!({"interpretation": "simple structures"}),
            ),
            "error_impact": {
                "name": "Error Impact",
                "dominant_error_type": "verb tense",
                "impact_level": "occasionally impairs meaning",
                "example_errors": [
                    {
                        "error_type": "verb tense",
                        "incorrect": "buy",
                        "correct": "bought",
                        "context": "Yesterday I buy a new phone",
                    },
                ],
            },
        },
        "score": verdict(72.0, "Your sentences are mostly accurate; past tense slips recur."),
    })
}

pub(crate) fn vocabulary() -> Value {
    json!({
        "type": "vocabulary",
        "segments": [
            {
                "timestamp": "00:00:19",
                "content": "I made a big mistake in my homework",
                "suggestion": ["I made a serious mistake in my homework."],
                "explanation": "'Serious mistake' is the natural collocation.",
                "tags": ["Inaccurate Collocation"],
            },
        ],
        "metrics": {
            "lexical_diversity": extend(
                measure("Lexical Diversity", 0.42, 0.55, "ratio"),
                json!({"unique_words_count": 84, "total_words_count": 200}),
            ),
            "lexical_distribution": {
                "name": "Lexical Distribution",
                "average_lexical_level": 2.3,
                "interpretation": "adequate for general topics",
                "cefr_breakdown": {
                    "A1": {"percentage": 40, "words": ["go", "big", "like"]},
                    "A2": {"percentage": 25, "words": ["store", "phone"]},
                    "B1": {"percentage": 15, "words": ["homework", "closed"]},
                    "B2": {"percentage": 12, "words": ["unfortunately"]},
                    "C1": {"percentage": 6, "words": ["nuance"]},
                    "C2": {"percentage": 2, "words": ["ubiquitous"]},
                },
            },
            "lexical_sophistication": extend(
                measure("Lexical Sophistication", 20.0, 35.0, "%"),
                json!({"interpretation": "sufficient for general topics"}),
            ),
            "lexical_precision": extend(
                measure("Lexical Precision", 2.5, 1.0, "per 100 words"),
                json!({
                    "precision_level": "generally accurate with minor lapses",
                    "error_examples": [
                        {"error_type": "collocation", "incorrect": "big mistake", "correct": "serious mistake"},
                    ],
                }),
            ),
        },
        "score": verdict(65.0, "Everyday words are secure; precise choices are still forming."),
    })
}

pub(crate) fn pronunciation() -> Value {
    json!({
        "type": "pronunciation",
        "segments": [
            {
                "timestamp": "00:00:08",
                "content": "I tink so",
                "suggestion": ["I think so."],
                "explanation": "/θ/ is replaced by /t/.",
                "tags": ["Segmental Error (Consonant)"],
            },
        ],
        "metrics": {
            "segmental_accuracy": extend(
                measure("Segmental Accuracy", 78.0, 90.0, "score"),
                json!({
                    "error_rate": 8.5,
                    "problematic_phonemes": [
                        {"phoneme": "/r/", "accuracy": 70, "examples": ["very", "right"]},
                        {"phoneme": "/θ/", "accuracy": 55, "examples": ["think", "three"]},
                    ],
                }),
            ),
            "word_stress_accuracy": measure("Word Stress Errors", 3.0, 1.5, "per 100 words"),
            "intonation_control": {
                "name": "Intonation Control",
                "deviation_level": "medium",
                "meaning_variation": "functional",
                "sentence_stress_error_rate": 4.0,
            },
            "intelligibility": {
                "name": "Intelligibility",
                "listener_strain": "minimal",
                "overall_impact": "generally intelligible",
            },
        },
        "score": verdict(70.0, "You are understood with little effort; /θ/ needs work."),
    })
}

pub(crate) fn clarity() -> Value {
    json!({
        "type": "clarity",
        "segments": [
            {
                "timestamp": "00:00:40",
                "content": "I like it. It was closed. My phone is new.",
                "suggestion": ["I like my new phone, but the store was closed."],
                "explanation": "Ideas are listed without connectors.",
                "tags": ["Missing Connector", "Abrupt Transition"],
            },
        ],
        "metrics": {
            "cohesive_devices": extend(
                measure("Cohesive Devices", 2.0, 4.0, "per 100 words"),
                json!({"variety_level": "functional", "misuse_rate": 10.0}),
            ),
            "discourse_organization": extend(
                measure("Discourse Markers", 3.0, 5.0, "count"),
                json!({"structural_clarity": "linear/basic"}),
            ),
            "thematic_continuity": {
                "name": "Thematic Continuity",
                "topic_drift_count": 1,
                "recovery_rate": 100,
            },
        },
        "score": verdict(75.0, "Your ideas stay on topic but are linked only loosely."),
    })
}

pub(crate) fn transcript() -> Value {
    json!({
        "segments": [
            {"speaker": "SPEAKER_00", "start_time": "00:00:00", "end_time": "00:00:12", "content": "What did you do yesterday?"},
            {"speaker": "SPEAKER_01", "start_time": "00:00:13", "end_time": "00:00:33", "content": "Yesterday I buy a new phone."},
            {"speaker": "SPEAKER_00", "start_time": "00:00:34", "end_time": "00:00:45", "content": "Nice, do you like it?"},
        ],
        "speaker_map": [
            {"speaker_id": "SPEAKER_00", "speaker_name": "Teacher"},
            {"speaker_id": "SPEAKER_01", "speaker_name": "Student"},
        ],
        "talk_time": {
            "duration": "00:00:45",
            "speakers": {"SPEAKER_00": "00:00:23", "SPEAKER_01": "00:00:20"},
            "idle": "00:00:02",
            "overlap": "00:00:00",
        },
    })
}

pub(crate) fn analysis() -> Value {
    json!({
        "topic_segments": [
            {"topic": "Weekend shopping", "start_time": "00:00:00", "end_time": "00:00:33"},
            {"topic": "Opinions on the phone", "start_time": "00:00:34", "end_time": "00:00:45"},
        ],
        "safety_flags": {
            "profanity_detected": false,
            "flagged_words": [],
            "flagged_categories": [],
        },
        "overall_sentiment": [
            {"speaker_id": "SPEAKER_00", "average_sentiment": "positive", "dominant_emotion": "encouraging", "sentiment_score": 0.6},
            {"speaker_id": "SPEAKER_01", "average_sentiment": "neutral", "dominant_emotion": "focused"},
        ],
        "emotion_timeline": [
            {"speaker": "SPEAKER_00", "emotion": "encouraging", "timestamp": "00:00:02", "intensity": "moderate", "confidence": 0.8},
            {"speaker": "SPEAKER_01", "emotion": "nervous", "timestamp": "00:00:15", "intensity": "low"},
        ],
    })
}

pub(crate) fn summary() -> Value {
    json!({
        "type": "summary",
        "dimension_scores": {
            "fluency": 68,
            "grammar": 72,
            "vocabulary": 65,
            "pronunciation": 70,
            "clarity": 75,
        },
        "score": {
            "strengths": ["Willing to take risks", "Generally intelligible", "Stays on topic"],
            "limitations": ["Past tense accuracy", "Long pauses", "Limited connectors"],
            "score": 70,
            "confidence_level": "high",
            "reason": "You communicate everyday ideas clearly enough to be understood.",
        },
        "action_plan": [
            "Retell your day in the past simple for five minutes",
            "Shadow a short podcast clip to reduce pauses",
            "Learn three new linking words each week",
            "Practise /θ/ with minimal pairs",
        ],
    })
}

pub(crate) fn evaluation_data() -> Value {
    json!({
        "transcript": transcript(),
        "interactive_analysis": analysis(),
        "reports": {
            "cefr": {
                "summary": summary(),
                "grammar": grammar(),
                "vocabulary": vocabulary(),
                "fluency": fluency(),
                "pronunciation": pronunciation(),
                "clarity": clarity(),
            },
        },
    })
}

pub(crate) fn completed_payload() -> Value {
    json!({
        "recording_id": "r1",
        "correlation_id": "c1",
        "status": "completed",
        "data": evaluation_data(),
        "processing_time_ms": 120,
    })
}

pub(crate) fn failed_payload() -> Value {
    json!({
        "recording_id": "r1",
        "correlation_id": "c1",
        "status": "failed",
        "error": "transcription timed out",
        "processing_time_ms": 4500,
    })
}
