use super::types::{SubScores, Technique, TurnScore};
use super::vocabulary::RubricVocabulary;
use crate::error::RubricError;
use regex::{Regex, RegexBuilder};
use tracing::debug;

/// Two or more consecutive ALL-CAPS words, matched on the original casing. A
/// word may carry one apostrophe ("DON'T").
const EMBEDDED_COMMAND_PATTERN: &str =
    r"\b[A-Z]{2,}(?:'[A-Z]+)?(?:\s+[A-Z]{2,}(?:'[A-Z]+)?)+\b";

struct BreakerMatcher {
    regex: Regex,
    unless_followed_by: Option<String>,
    message: String,
}

impl BreakerMatcher {
    fn fires(&self, lower: &str) -> bool {
        self.regex.find_iter(lower).any(|found| {
            self.unless_followed_by
                .as_deref()
                .is_none_or(|qualifier| !lower[found.end()..].starts_with(qualifier))
        })
    }
}

struct MagicPhraseMatcher {
    name: String,
    cues: Vec<Regex>,
}

/// Deterministic CFR scorer.
///
/// Built once from a validated [`RubricVocabulary`]; scoring never fails and
/// holds no mutable state, so one scorer can be shared across sessions.
pub struct RubricScorer {
    acknowledgements: Vec<String>,
    isolation: Vec<Regex>,
    closing: Vec<Regex>,
    feel_felt_found: Regex,
    has_there_ever_been: Regex,
    level_shift_phrases: Vec<String>,
    embedded_command: Regex,
    rapport_breakers: Vec<BreakerMatcher>,
    magic_phrases: Vec<MagicPhraseMatcher>,
}

impl RubricScorer {
    pub fn new(vocabulary: &RubricVocabulary) -> Result<Self, RubricError> {
        vocabulary.validate()?;

        let isolation = compile_all("isolation_patterns", &vocabulary.isolation_patterns)?;
        let closing = compile_all("closing_patterns", &vocabulary.closing_patterns)?;
        let feel_felt_found = compile(
            "handling.feel_felt_found",
            &vocabulary.handling.feel_felt_found,
        )?;
        let has_there_ever_been = compile(
            "handling.has_there_ever_been",
            &vocabulary.handling.has_there_ever_been,
        )?;
        let embedded_command =
            Regex::new(EMBEDDED_COMMAND_PATTERN).map_err(|source| RubricError::InvalidPattern {
                field: "embedded_command".into(),
                pattern: EMBEDDED_COMMAND_PATTERN.into(),
                source,
            })?;

        let mut rapport_breakers = Vec::with_capacity(vocabulary.rapport_breakers.len());
        for rule in &vocabulary.rapport_breakers {
            rapport_breakers.push(BreakerMatcher {
                regex: compile("rapport_breakers.pattern", &rule.pattern)?,
                unless_followed_by: rule.unless_followed_by.as_deref().map(str::to_lowercase),
                message: rule.message.clone(),
            });
        }

        let mut magic_phrases = Vec::with_capacity(vocabulary.magic_phrases.len());
        for template in &vocabulary.magic_phrases {
            let cues = template
                .keywords()
                .iter()
                .map(|keyword| {
                    compile(
                        "magic_phrases.keywords",
                        &format!(r"\b{}\b", regex::escape(keyword)),
                    )
                })
                .collect::<Result<Vec<_>, _>>()?;
            magic_phrases.push(MagicPhraseMatcher {
                name: template.name.clone(),
                cues,
            });
        }

        Ok(Self {
            acknowledgements: lowercase_all(&vocabulary.acknowledgements),
            isolation,
            closing,
            feel_felt_found,
            has_there_ever_been,
            level_shift_phrases: lowercase_all(&vocabulary.handling.level_shift_phrases),
            embedded_command,
            rapport_breakers,
            magic_phrases,
        })
    }

    /// Scorer over the vocabulary shipped with the crate.
    pub fn builtin() -> Result<Self, RubricError> {
        Self::new(&RubricVocabulary::builtin()?)
    }

    /// Score one agent utterance.
    ///
    /// `context` is the counterpart's preceding utterance. The baseline rubric
    /// accepts it but does not vary the result by it.
    ///
    /// Rapport breakers are reported with a penalty note in the feedback, but
    /// they never reduce the sub-scores or the total.
    pub fn score(&self, utterance: &str, _context: Option<&str>) -> TurnScore {
        let lower = utterance.to_lowercase();
        let mut feedback = Vec::new();

        let acknowledge_affirm = self.score_acknowledge_affirm(&lower, &mut feedback);
        let isolate = self.score_isolate(&lower, &mut feedback);
        let (handle, techniques) = self.score_handle(&lower, utterance, &mut feedback);
        let close = self.score_close(&lower, &mut feedback);

        let magic_phrases = self.detect_magic_phrases(&lower);
        let rapport_breakers = self.detect_rapport_breakers(&lower);
        if !rapport_breakers.is_empty() {
            feedback.push(format!(
                "⚠️ Rapport breakers detected: -{} points",
                rapport_breakers.len()
            ));
        }

        let score = TurnScore::from_sub_scores(SubScores {
            acknowledge_affirm,
            isolate,
            handle,
            close,
        })
        .with_magic_phrases(magic_phrases)
        .with_techniques(techniques)
        .with_rapport_breakers(rapport_breakers)
        .with_feedback(feedback);

        debug!(
            total = score.total(),
            breakers = score.rapport_breakers().len(),
            "rubric.turn_scored"
        );
        score
    }

    fn score_acknowledge_affirm(&self, lower: &str, feedback: &mut Vec<String>) -> u8 {
        let found: Vec<&str> = self
            .acknowledgements
            .iter()
            .filter(|term| lower.contains(term.as_str()))
            .map(String::as_str)
            .collect();

        match found.as_slice() {
            [] => {
                feedback.push(
                    "⚠️ Missing acknowledgement - start with 'Perfect', 'I can appreciate that', etc."
                        .into(),
                );
                0
            }
            [only] => {
                feedback.push(format!("✓ Good acknowledgement: used '{only}'"));
                2
            }
            [first, second, ..] => {
                feedback.push(format!(
                    "✓ Excellent acknowledgement: used '{first}' and '{second}'"
                ));
                3
            }
        }
    }

    fn score_isolate(&self, lower: &str, feedback: &mut Vec<String>) -> u8 {
        match count_matches(&self.isolation, lower) {
            0 => {
                feedback.push(
                    "⚠️ Missing isolation - ask 'Besides that, is there any other reason you wouldn't...?'"
                        .into(),
                );
                0
            }
            1 => {
                feedback.push("✓ Good isolation: asked clarifying question".into());
                2
            }
            _ => {
                feedback.push("✓ Excellent isolation: asked multiple clarifying questions".into());
                3
            }
        }
    }

    fn score_handle(
        &self,
        lower: &str,
        original: &str,
        feedback: &mut Vec<String>,
    ) -> (u8, Vec<Technique>) {
        let mut points = 0_u8;
        let mut techniques = Vec::new();

        if self.feel_felt_found.is_match(lower) {
            points += 2;
            techniques.push(Technique::FeelFeltFound);
            feedback.push("✓ Used Feel-Felt-Found empathy technique".into());
        }

        if self.has_there_ever_been.is_match(lower) {
            points += 2;
            techniques.push(Technique::HasThereEverBeen);
            feedback.push("✓ Used 'Has There Ever Been' pattern - leveraging past mistakes".into());
        }

        if self
            .level_shift_phrases
            .iter()
            .any(|phrase| lower.contains(phrase.as_str()))
        {
            points += 1;
            techniques.push(Technique::LevelShift);
            feedback.push("✓ Used Level Shift to reframe".into());
        }

        if let Some(command) = self.embedded_command.find(original) {
            points += 1;
            techniques.push(Technique::EmbeddedCommand);
            feedback.push(format!("✓ Used embedded command: {}", command.as_str()));
        }

        if points == 0 {
            points = 1;
            feedback.push(
                "⚠️ Consider using Feel-Felt-Found or Has There Ever Been technique".into(),
            );
        }

        (points.min(3), techniques)
    }

    fn score_close(&self, lower: &str, feedback: &mut Vec<String>) -> u8 {
        match count_matches(&self.closing, lower) {
            0 => {
                feedback.push(
                    "⚠️ Missing close - try 'Does that make sense?', 'Which works better for you?'"
                        .into(),
                );
                0
            }
            1 => {
                feedback.push("✓ Attempted close".into());
                1
            }
            _ => {
                feedback.push("✓ Strong close: multiple closing questions/statements".into());
                2
            }
        }
    }

    fn detect_magic_phrases(&self, lower: &str) -> Vec<String> {
        let mut used: Vec<String> = Vec::new();
        for phrase in &self.magic_phrases {
            let hit = phrase.cues.iter().any(|cue| cue.is_match(lower));
            if hit && !used.contains(&phrase.name) {
                used.push(phrase.name.clone());
            }
        }
        used
    }

    fn detect_rapport_breakers(&self, lower: &str) -> Vec<String> {
        self.rapport_breakers
            .iter()
            .filter(|breaker| breaker.fires(lower))
            .map(|breaker| breaker.message.clone())
            .collect()
    }
}

fn compile(field: &str, pattern: &str) -> Result<Regex, RubricError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| RubricError::InvalidPattern {
            field: field.to_string(),
            pattern: pattern.to_string(),
            source,
        })
}

fn compile_all(field: &str, patterns: &[String]) -> Result<Vec<Regex>, RubricError> {
    patterns
        .iter()
        .map(|pattern| compile(field, pattern))
        .collect()
}

fn count_matches(patterns: &[Regex], lower: &str) -> usize {
    patterns.iter().filter(|regex| regex.is_match(lower)).count()
}

fn lowercase_all(values: &[String]) -> Vec<String> {
    values.iter().map(|value| value.to_lowercase()).collect()
}
