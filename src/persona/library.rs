use super::definition::PersonaDefinition;
use crate::error::PersonaError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// A persona file found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonaEntry {
    pub id: String,
    pub label: String,
    pub path: PathBuf,
    pub objections: usize,
}

/// Every loadable `*.json` persona in `dir`, sorted by id. Files that fail
/// to load are skipped with a warning.
pub fn list_personas(dir: &Path) -> Result<Vec<PersonaEntry>, PersonaError> {
    let entries = fs::read_dir(dir).map_err(|e| PersonaError::Read {
        path: dir.display().to_string(),
        message: e.to_string(),
    })?;

    let mut personas = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        match PersonaDefinition::load(&path) {
            Ok(persona) => personas.push(PersonaEntry {
                objections: persona.objection_patterns.len(),
                id: persona.id,
                label: persona.label,
                path,
            }),
            Err(error) => warn!(path = %path.display(), %error, "persona.skipped"),
        }
    }
    personas.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(personas)
}

/// Resolve a persona by file path, or by id as `<dir>/<id>.json`.
pub fn resolve_persona(dir: &Path, reference: &str) -> Result<PersonaDefinition, PersonaError> {
    let as_path = Path::new(reference);
    if as_path.is_file() {
        return PersonaDefinition::load(as_path);
    }

    let id = sanitize_persona_id(reference);
    if id.is_empty() {
        return Err(PersonaError::NotFound(reference.to_string()));
    }
    let path = dir.join(format!("{id}.json"));
    if !path.is_file() {
        return Err(PersonaError::NotFound(reference.to_string()));
    }
    PersonaDefinition::load(&path)
}

/// Keep ids to a safe file-name alphabet.
pub fn sanitize_persona_id(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.trim().chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_') {
            out.push(ch);
        } else {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}
