use crate::error::PromptError;
use tera::Tera;

/// Tera-backed template engine for counterpart prompts.
pub struct TeraEngine {
    tera: Tera,
}

impl TeraEngine {
    /// Create with inline templates (no filesystem).
    pub fn new() -> Self {
        Self {
            tera: Tera::default(),
        }
    }

    /// Register a template from a string, replacing any previous one.
    pub fn add_template(&mut self, name: &str, content: &str) -> Result<(), PromptError> {
        self.tera
            .add_raw_template(name, content)
            .map_err(|e| PromptError::Render(format!("{name}: {e}")))
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|known| known == name)
    }

    /// Render a named template with the given context.
    pub fn render(&self, name: &str, context: &tera::Context) -> Result<String, PromptError> {
        if !self.has_template(name) {
            return Err(PromptError::NotFound(name.to_string()));
        }
        self.tera
            .render(name, context)
            .map_err(|e| PromptError::Render(render_chain(&e)))
    }
}

/// Tera nests the useful message (missing variable, bad filter) in `source`.
fn render_chain(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = std::error::Error::source(inner);
    }
    message
}
