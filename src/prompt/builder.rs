use super::engine::TeraEngine;
use crate::coaching::Directive;
use crate::error::PromptError;
use crate::persona::{Difficulty, PersonaDefinition};
use serde::Serialize;
use tera::Context;

const MAX_TRIGGER_PHRASES: usize = 2;
const MAX_KNOWLEDGE_SNIPPETS: usize = 3;
const MAX_HANDOFF_TOPICS: usize = 2;

const PERSONA_PROMPT_TEMPLATE: &str = "\
You are a roleplay client persona: {{ label }}
Persona ID: {{ id }}
Traits: {{ traits | join(sep=\", \") }}

## Speaking Style:
- Formality: {{ tone.formality }}
- Energy level: {{ tone.energy }}
- Pace: ~{{ tone.pace_wpm }} words per minute
- Directness: {{ tone.directness }}
- Keep responses under 90 words unless explicitly asked for detail

## Your Situation:
{% for entry in situation %}- {{ entry.name }}: {{ entry.value }}
{% endfor %}
## Your Goals:
{% for goal in goals %}- {{ goal }}
{% endfor %}
## Objection Behavior:
- Current cooperation level: {{ cooperation }}/10
- {{ directive_instruction }}

## Objections You May Raise:
Trigger ONE objection per conversation turn maximum.
Only raise objection if conversation naturally leads to it.

Available objections:
{% for objection in objections %}- {{ objection }}
{% endfor %}
## How to Respond Based on Agent's Technique:

If agent uses proper CFR techniques (Acknowledge/Affirm, Isolate, etc.):
- Become MORE cooperative
- Answer questions directly
- Move conversation forward

If agent argues, rushes, or breaks rapport:
- Become LESS cooperative
- Add new objections
- Be more resistant

Rapport breakers that make you less cooperative:
- Agent says 'I understand' without qualifier
- Agent argues with you
- Agent speaks too fast or doesn't listen
- Agent skips isolation (doesn't ask if there are other concerns)
{% if knowledge %}
## Knowledge you have:
{% for snippet in knowledge %}- {{ snippet }}
{% endfor %}{% endif %}{% if handoff_topics %}
## Escalation:
If agent asks about: {{ handoff_topics | join(sep=\", \") }}
Say: \"That's a great question - let me connect you with {{ handoff_target }}\"
{% endif %}
## Important:
- Stay in character throughout
- One objection per turn maximum
- Respond naturally based on your personality
- Let the agent practice their techniques
- Be realistic - don't make it too easy or too hard
";

const PERSONA_PROMPT_NAME: &str = "persona_prompt";

#[derive(Serialize)]
struct SituationEntry {
    name: String,
    value: String,
}

/// Ensure the default templates are registered in the engine.
fn ensure_defaults(engine: &mut TeraEngine) -> Result<(), PromptError> {
    if !engine.has_template(PERSONA_PROMPT_NAME) {
        engine.add_template(PERSONA_PROMPT_NAME, PERSONA_PROMPT_TEMPLATE)?;
    }
    Ok(())
}

/// System prompt for the counterpart at its current cooperation level.
pub fn build_persona_prompt(
    engine: &mut TeraEngine,
    persona: &PersonaDefinition,
    difficulty: Difficulty,
    cooperation: u8,
) -> Result<String, PromptError> {
    ensure_defaults(engine)?;

    let situation: Vec<SituationEntry> = persona
        .context_entries()
        .into_iter()
        .map(|(name, value)| SituationEntry { name, value })
        .collect();
    let objections: Vec<String> = persona
        .objections_for(difficulty)
        .iter()
        .map(|objection| {
            let triggers: Vec<&str> = objection
                .trigger_phrases
                .iter()
                .take(MAX_TRIGGER_PHRASES)
                .map(String::as_str)
                .collect();
            format!("{}: {}", objection.name, triggers.join(", "))
        })
        .collect();
    let knowledge: Vec<&String> = persona
        .knowledge_snippets
        .iter()
        .take(MAX_KNOWLEDGE_SNIPPETS)
        .collect();
    let handoff_topics: Vec<&String> = persona
        .escalation_rules
        .handoff_if
        .iter()
        .take(MAX_HANDOFF_TOPICS)
        .collect();
    let handoff_target = persona
        .escalation_rules
        .handoff_target
        .as_deref()
        .unwrap_or("a specialist");

    let mut ctx = Context::new();
    ctx.insert("label", &persona.label);
    ctx.insert("id", &persona.id);
    ctx.insert("traits", &persona.persona_traits);
    ctx.insert("tone", &persona.tone);
    ctx.insert("situation", &situation);
    ctx.insert("goals", &persona.goals);
    ctx.insert("cooperation", &cooperation);
    ctx.insert(
        "directive_instruction",
        Directive::from_cooperation(cooperation).instruction(),
    );
    ctx.insert("objections", &objections);
    ctx.insert("knowledge", &knowledge);
    ctx.insert("handoff_topics", &handoff_topics);
    ctx.insert("handoff_target", handoff_target);

    engine.render(PERSONA_PROMPT_NAME, &ctx)
}
