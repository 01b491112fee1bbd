use crate::coaching::Directive;
use crate::persona::ObjectionPattern;
use std::future::Future;
use std::pin::Pin;

/// Everything a generator needs to voice the counterpart's next reply.
#[derive(Debug, Clone, Copy)]
pub struct ReplyRequest<'a> {
    pub system_prompt: &'a str,
    pub utterance: &'a str,
    pub directive: Directive,
    /// Objection to raise on this reply, if the cursor produced one.
    pub objection: Option<&'a ObjectionPattern>,
}

/// Produces the simulated counterpart's replies. Language-model backends
/// implement this; the crate ships only [`ScriptedReplyGenerator`].
pub trait ReplyGenerator: Send + Sync {
    /// Generator identifier (e.g. "scripted").
    fn name(&self) -> &str;

    fn reply<'a>(
        &'a self,
        request: ReplyRequest<'a>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>>;
}

/// Deterministic counterpart: voices the pending objection, otherwise a
/// stock line for the directive.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedReplyGenerator;

impl ScriptedReplyGenerator {
    fn line_for(request: &ReplyRequest<'_>) -> String {
        if let Some(objection) = request.objection {
            return objection.opening_line().to_string();
        }
        match request.directive {
            Directive::Resistant => "I'm still not convinced this is right for me.",
            Directive::Cautious => "Okay. Tell me a bit more about how that would work.",
            Directive::Cooperative => "That makes sense. What would the next step be?",
        }
        .to_string()
    }
}

impl ReplyGenerator for ScriptedReplyGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    fn reply<'a>(
        &'a self,
        request: ReplyRequest<'a>,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        let line = Self::line_for(&request);
        Box::pin(async move { Ok(line) })
    }
}
