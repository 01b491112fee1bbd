use super::types::TurnScore;

/// Drills shown after a practice turn, one per weak dimension.
pub fn practice_suggestions(score: &TurnScore) -> Vec<String> {
    let mut suggestions = Vec::new();
    if score.acknowledge_affirm() < 2 {
        suggestions.push(
            "Try starting with: 'Perfect!', 'I can appreciate that', or 'That makes sense'".into(),
        );
    }
    if score.isolate() < 2 {
        suggestions.push(
            "Ask isolation question: 'Besides that, is there any other reason you wouldn't...?'"
                .into(),
        );
    }
    if score.handle() < 2 {
        suggestions.push(
            "Use Feel-Felt-Found: 'I know how you feel... my clients felt the same... but what they found...'"
                .into(),
        );
    }
    if score.close() == 0 {
        suggestions.push("Add a close: 'Does that make sense?', 'Which works better for you?'".into());
    }
    suggestions
}
