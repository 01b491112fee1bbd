use callcoach::error::RubricError;
use callcoach::rubric::{RubricScorer, RubricVocabulary, Technique};
use tempfile::TempDir;

const FULL_CFR_TURN: &str = "Perfect, I can appreciate that. Besides the price, is there any other reason you wouldn't move forward? I know how you feel. Does that make sense?";

const FEEL_FELT_FOUND_TURN: &str = "Perfect! I can appreciate that. Besides the price, is there any other reason you wouldn't move forward? I know how you feel, other clients felt the same but found it worked out. Does that make sense?";
const NO_MARKERS: &str = "The house has three bedrooms.";

fn scorer() -> RubricScorer {
    RubricScorer::builtin().unwrap()
}

#[test]
fn full_cfr_turn_scores_every_dimension() {
    let score = scorer().score(FULL_CFR_TURN, Some("It's too expensive."));

    assert_eq!(score.acknowledge_affirm(), 3);
    assert_eq!(score.isolate(), 3);
    assert_eq!(score.handle(), 2);
    assert_eq!(score.close(), 1);
    assert_eq!(score.total(), 9);
    assert_eq!(score.max_score(), 11);
    assert_eq!(score.techniques_detected(), &[Technique::FeelFeltFound]);
    assert!(score.rapport_breakers().is_empty());
}

#[test]
fn feel_felt_found_turn_outscores_plain_statement() {
    let scorer = scorer();
    let coached = scorer.score(FEEL_FELT_FOUND_TURN, Some("It's too expensive."));
    let plain = scorer.score(NO_MARKERS, Some("It's too expensive."));

    assert_eq!(coached.acknowledge_affirm(), 3);
    assert_eq!(coached.isolate(), 3);
    assert_eq!(coached.handle(), 2);
    assert_eq!(coached.close(), 1);
    assert_eq!(coached.total(), 9);
    assert_eq!(coached.techniques_detected(), &[Technique::FeelFeltFound]);

    assert_eq!(plain.total(), 1);
    assert!(coached.total() > plain.total());
}

#[test]
fn scoring_the_same_turn_twice_is_identical() {
    let scorer = scorer();
    let first = scorer.score(FEEL_FELT_FOUND_TURN, Some("I need to think about it."));
    let second = scorer.score(FEEL_FELT_FOUND_TURN, Some("I need to think about it."));
    assert_eq!(first, second);
}

#[test]
fn context_does_not_change_the_score() {
    let with = scorer().score(FULL_CFR_TURN, Some("I need to think about it."));
    let without = scorer().score(FULL_CFR_TURN, None);
    assert_eq!(with, without);
}

#[test]
fn rapport_breakers_are_reported_without_reducing_the_total() {
    let score = scorer().score(
        "I understand, but you said you liked it. Actually, you're wrong.",
        None,
    );

    assert_eq!(score.rapport_breakers().len(), 4);
    assert_eq!(score.total(), 1);
    assert!(
        score
            .feedback()
            .iter()
            .any(|line| line.contains("Rapport breakers detected: -4 points"))
    );
}

#[test]
fn qualified_understand_is_an_acknowledgement_not_a_breaker() {
    let score = scorer().score("I understand your concern about the roof.", None);
    assert!(score.rapport_breakers().is_empty());
    assert_eq!(score.acknowledge_affirm(), 2);
}

#[test]
fn handle_caps_at_three_when_techniques_stack() {
    let score = scorer().score(
        "Has there ever been a time you felt rushed? What I hear you saying is timing matters. Other buyers felt the same, and they found it paid off.",
        None,
    );
    assert_eq!(score.handle(), 3);
    assert!(score.uses_technique(Technique::FeelFeltFound));
    assert!(score.uses_technique(Technique::HasThereEverBeen));
    assert!(score.uses_technique(Technique::LevelShift));
}

#[test]
fn external_vocabulary_replaces_the_builtin_one() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rubric.toml");
    std::fs::write(
        &path,
        r#"
acknowledgements = ["copy that"]
isolation_patterns = ["anything else"]
closing_patterns = ["shall we"]

[handling]
feel_felt_found = "others felt"
has_there_ever_been = "ever regretted"
level_shift_phrases = ["sounds like"]

[[rapport_breakers]]
pattern = '\bobviously\b'
message = "Said 'obviously'"

[[magic_phrases]]
key = "picture"
name = "Picture This"
pattern = "picture this now"
"#,
    )
    .unwrap();

    let vocabulary = RubricVocabulary::load(&path).unwrap();
    let scorer = RubricScorer::new(&vocabulary).unwrap();
    let score = scorer.score("Copy that. Anything else? Obviously, shall we?", None);

    assert_eq!(score.acknowledge_affirm(), 2);
    assert_eq!(score.isolate(), 2);
    assert_eq!(score.close(), 1);
    assert_eq!(score.rapport_breakers(), &["Said 'obviously'".to_string()]);

    let builtin = RubricScorer::builtin().unwrap().score("Copy that.", None);
    assert_eq!(builtin.acknowledge_affirm(), 0);
}

#[test]
fn invalid_pattern_fails_construction() {
    let mut vocabulary = RubricVocabulary::builtin().unwrap();
    vocabulary.closing_patterns.push("(unclosed".into());

    let Err(err) = RubricScorer::new(&vocabulary) else {
        panic!("expected construction to fail");
    };
    assert!(matches!(
        err,
        RubricError::InvalidPattern { ref field, .. } if field == "closing_patterns"
    ));
}

#[test]
fn conversation_feedback_summarizes_every_turn() {
    let turns = vec![
        (FULL_CFR_TURN.to_string(), "It's too expensive.".to_string()),
        (
            "Perfect, absolutely. Out of curiosity, what specifically makes you hesitate? Why don't we look at it Saturday?".to_string(),
            "I want to wait.".to_string(),
        ),
    ];
    let result = scorer().score_conversation(&turns);

    assert_eq!(result.turns.len(), 2);
    let totals = result.totals().unwrap();
    assert_eq!(totals.turns, 2);
    assert_eq!(totals.max, 22);
    assert!(result.overall_feedback[0].starts_with("Overall Score:"));
    assert!(
        result
            .overall_feedback
            .iter()
            .any(|line| line.contains("Excellent at acknowledging and affirming"))
    );
}

#[test]
fn empty_conversation_has_sentinel_feedback() {
    let result = scorer().score_conversation(&[]);
    assert!(result.turns.is_empty());
    assert!(result.totals().is_none());
    assert_eq!(result.overall_feedback, vec!["No turns scored yet".to_string()]);
}
