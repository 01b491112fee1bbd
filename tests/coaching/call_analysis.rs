use callcoach::analysis::CallAnalyzer;
use callcoach::report::{CallReportBuilder, FeedbackKind, ScoredTurn};
use callcoach::rubric::{Grade, RubricScorer};
use callcoach::transcript::{
    ExtractedTurn, JsonTranscriptFile, NearestPrecedingExtractor, Speaker, SpeechSegment,
    Transcriber, Transcript, TurnExtractor,
};
use tempfile::TempDir;

const CALL_JSON: &str = r#"{
    "duration": 42.0,
    "segments": [
        {"start": 0.0, "end": 4.0, "text": "  I think the price is too high for this area. "},
        {"start": 4.5, "end": 12.0, "text": "Perfect, I can appreciate that. Besides the price, is there any other reason you wouldn't move forward? Does that make sense?"},
        {"start": 12.5, "end": 15.0, "text": "No, it's mostly the price."},
        {"start": 15.5, "end": 18.0, "text": "We can talk numbers."}
    ]
}"#;

fn seg(start: f64, speaker: Speaker, text: &str) -> SpeechSegment {
    SpeechSegment::new(start, start + 2.0, text).with_speaker(speaker)
}

#[test]
fn turns_pair_with_latest_preceding_client_segment() {
    let transcript = Transcript::new(vec![
        seg(0.0, Speaker::Client, "c0"),
        seg(5.0, Speaker::Agent, "a5"),
        seg(10.0, Speaker::Client, "c10"),
        seg(15.0, Speaker::Agent, "a15"),
    ]);

    let turns = NearestPrecedingExtractor.extract(&transcript);

    assert_eq!(
        turns,
        vec![
            ExtractedTurn {
                agent_text: "a5".into(),
                counterpart_text: "c0".into(),
                agent_start: 5.0,
            },
            ExtractedTurn {
                agent_text: "a15".into(),
                counterpart_text: "c10".into(),
                agent_start: 15.0,
            },
        ]
    );
}

#[test]
fn agent_speaking_first_has_empty_counterpart() {
    let transcript = Transcript::new(vec![
        seg(0.0, Speaker::Agent, "Hello, this is Sam."),
        seg(3.0, Speaker::Client, "Hi."),
    ]);
    let turns = NearestPrecedingExtractor.extract(&transcript);
    assert_eq!(turns.len(), 1);
    assert!(turns[0].counterpart_text.is_empty());
}

#[tokio::test]
async fn unlabelled_call_is_identified_scored_and_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("call.json");
    std::fs::write(&path, CALL_JSON).unwrap();

    let mut transcript = JsonTranscriptFile.transcribe(&path).await.unwrap();
    assert!((transcript.duration - 42.0).abs() < f64::EPSILON);
    assert_eq!(transcript.language, "en");
    assert_eq!(
        transcript.segments[0].text,
        "I think the price is too high for this area."
    );

    let analyzer = CallAnalyzer::with_defaults().unwrap();
    analyzer.identify_speakers(&mut transcript);
    assert_eq!(transcript.agent_turns().count(), 2);
    assert_eq!(transcript.client_turns().count(), 2);

    let report = analyzer.analyze(transcript).unwrap();

    assert_eq!(report.turns.len(), 2);
    assert_eq!(report.turns[0].score.total(), 8);
    assert_eq!(report.turns[1].score.total(), 1);
    assert_eq!(report.turns[1].turn.counterpart_text, "No, it's mostly the price.");
    assert_eq!(report.totals.total, 9);
    assert_eq!(report.totals.max, 22);
    assert_eq!(report.totals.grade, Grade::F);

    assert_eq!(report.timestamped_feedback.len(), 1);
    assert!(
        report
            .timestamped_feedback
            .iter()
            .all(|item| item.kind == FeedbackKind::Improvement && item.turn_number == 2)
    );
    assert_eq!(report.missed_opportunities.len(), 2);
    assert!(
        report.missed_opportunities[0]
            .context
            .contains("No, it's mostly the price.")
    );

    let text = report.render_text();
    assert!(text.contains("CALL COACHING REPORT"));
    assert!(text.contains("Overall Score: 9/22"));
}

#[test]
fn transcript_without_agent_speech_yields_no_report() {
    let transcript = Transcript::new(vec![seg(0.0, Speaker::Client, "Hello?")]);
    let analyzer = CallAnalyzer::with_defaults().unwrap();
    assert!(analyzer.analyze(transcript).is_none());
}

#[test]
fn missed_opportunities_keep_turn_order_and_cap() {
    let scorer = RubricScorer::builtin().unwrap();
    let turns: Vec<ScoredTurn> = (0..4)
        .map(|i| {
            let start = f64::from(i) * 10.0;
            let turn = ExtractedTurn {
                agent_text: "Okay.".into(),
                counterpart_text: format!("objection {i}"),
                agent_start: start,
            };
            let score = scorer.score(&turn.agent_text, Some(&turn.counterpart_text));
            ScoredTurn { turn, score }
        })
        .collect();

    let report = CallReportBuilder::new(3, 50)
        .build(Transcript::new(Vec::new()), turns)
        .unwrap();

    assert_eq!(report.missed_opportunities.len(), 3);
    let stamps: Vec<f64> = report
        .missed_opportunities
        .iter()
        .map(|missed| missed.timestamp)
        .collect();
    assert_eq!(stamps, vec![0.0, 0.0, 10.0]);
}

#[test]
fn report_serializes_to_json() {
    let mut transcript = Transcript::from_json_str(CALL_JSON).unwrap();
    let analyzer = CallAnalyzer::with_defaults().unwrap();
    analyzer.identify_speakers(&mut transcript);
    let report = analyzer.analyze(transcript).unwrap();

    let value: serde_json::Value = serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();
    assert_eq!(value["totals"]["grade"], "F");
    assert_eq!(value["turns"][0]["agent_start"], 4.5);
    assert_eq!(value["transcript"]["segments"][1]["speaker"], "agent");
}
