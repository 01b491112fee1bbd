use callcoach::coaching::{CooperationModel, Directive, INITIAL_COOPERATION, MAX_COOPERATION};
use callcoach::persona::{Difficulty, PersonaDefinition, resolve_persona};
use callcoach::roleplay::{OPENING_LINE, RoleplaySession, ScriptedReplyGenerator, TrainingMode};
use callcoach::rubric::RubricScorer;
use std::path::Path;
use std::sync::Arc;

const STRONG: &str = "Perfect! I can appreciate that. Besides the price, is there any other reason you wouldn't move forward? I know how you feel. Does that make sense?";
const WEAK: &str = "Okay.";

fn investor() -> PersonaDefinition {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("personas");
    resolve_persona(&dir, "investor").unwrap()
}

fn session(mode: TrainingMode) -> RoleplaySession {
    RoleplaySession::new(
        investor(),
        Difficulty::Medium,
        mode,
        Arc::new(RubricScorer::builtin().unwrap()),
        Box::new(ScriptedReplyGenerator),
    )
}

#[test]
fn cooperation_clamps_at_both_ends() {
    let mut model = CooperationModel::new();
    assert_eq!(model.level(), INITIAL_COOPERATION);

    assert_eq!(model.adjust(11), 7);
    assert_eq!(model.adjust(11), 9);
    assert_eq!(model.adjust(11), MAX_COOPERATION);

    for expected in [8, 6, 4, 2] {
        assert_eq!(model.adjust(0), expected);
    }
    assert_eq!(model.adjust(4), 1);
    assert_eq!(model.adjust(0), 0);
    assert_eq!(model.directive(), Directive::Resistant);
}

#[test]
fn band_boundaries_resolve_upward() {
    let mut model = CooperationModel::new();
    assert_eq!(model.adjust(8), 7);
    model.reset();
    assert_eq!(model.adjust(5), 6);
    model.reset();
    assert_eq!(model.adjust(3), 4);
    model.reset();
    assert_eq!(model.adjust(2), 3);
}

#[test]
fn directive_banding() {
    assert_eq!(Directive::from_cooperation(3), Directive::Resistant);
    assert_eq!(Directive::from_cooperation(4), Directive::Cautious);
    assert_eq!(Directive::from_cooperation(6), Directive::Cautious);
    assert_eq!(Directive::from_cooperation(7), Directive::Cooperative);
}

#[tokio::test]
async fn opening_line_is_not_scored() {
    let mut session = session(TrainingMode::Scoring);
    let outcome = session.respond(OPENING_LINE).await.unwrap();

    assert!(outcome.score.is_none());
    assert_eq!(outcome.cooperation, INITIAL_COOPERATION);
    assert_eq!(outcome.directive, Directive::Cautious);
    assert_eq!(outcome.objection.as_deref(), Some("price"));
    assert_eq!(outcome.reply, "That's too expensive for what it is.");
    assert!(session.summary().is_none());
}

#[tokio::test]
async fn strong_turn_wins_cooperation_and_weak_turn_loses_it() {
    let mut session = session(TrainingMode::Scoring);
    session.respond(OPENING_LINE).await.unwrap();

    let strong = session.respond(STRONG).await.unwrap();
    assert_eq!(strong.score.as_ref().map(|score| score.total()), Some(9));
    assert_eq!(strong.cooperation, 7);
    assert_eq!(strong.directive, Directive::Cooperative);
    assert!(strong.objection.is_none());
    assert_eq!(strong.reply, "That makes sense. What would the next step be?");
    assert!(!strong.feedback.is_empty());
    assert!(strong.suggestions.is_empty());

    let weak = session.respond(WEAK).await.unwrap();
    assert_eq!(weak.cooperation, 5);
    assert_eq!(weak.objection.as_deref(), Some("timing"));

    let summary = session.summary().unwrap();
    assert_eq!(summary.session.totals.turns, 2);
    assert_eq!(summary.session.totals.total, 10);
    assert_eq!(summary.final_cooperation, 5);
    assert_eq!(summary.objections_raised, vec!["price", "timing"]);
    assert_eq!(session.exchanges().len(), 3);
}

#[tokio::test]
async fn practice_mode_adds_suggestions() {
    let mut session = session(TrainingMode::Practice);
    session.respond(OPENING_LINE).await.unwrap();
    let outcome = session.respond(WEAK).await.unwrap();

    assert!(outcome.score.is_some());
    assert_eq!(outcome.suggestions.len(), 4);
}

#[tokio::test]
async fn challenge_mode_holds_feedback_until_the_end() {
    let mut session = session(TrainingMode::Challenge);
    session.respond(OPENING_LINE).await.unwrap();
    let outcome = session.respond(STRONG).await.unwrap();

    assert!(outcome.score.is_none());
    assert!(outcome.feedback.is_empty());
    assert!(outcome.suggestions.is_empty());
    assert_eq!(outcome.cooperation, 7);
    assert_eq!(session.summary().unwrap().session.totals.total, 9);
}

#[tokio::test]
async fn reset_restores_a_fresh_session() {
    let mut session = session(TrainingMode::Scoring);
    session.respond(OPENING_LINE).await.unwrap();
    session.respond(STRONG).await.unwrap();

    session.reset();

    assert_eq!(session.cooperation(), INITIAL_COOPERATION);
    assert!(session.summary().is_none());
    assert!(session.exchanges().is_empty());
    let outcome = session.respond(STRONG).await.unwrap();
    assert!(outcome.score.is_none());
    assert_eq!(outcome.objection.as_deref(), Some("price"));
}

#[test]
fn system_prompt_tracks_cooperation() {
    let mut session = session(TrainingMode::Scoring);
    let prompt = session.system_prompt().unwrap();
    assert!(prompt.contains("Skeptical Rental Investor"));
    assert!(prompt.contains("Current cooperation level: 5/10"));
    assert!(prompt.contains(Directive::Cautious.instruction()));
    assert!(prompt.contains("our closing attorney"));
}
