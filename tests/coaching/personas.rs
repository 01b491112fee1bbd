use callcoach::Config;
use callcoach::error::PersonaError;
use callcoach::persona::{Difficulty, PersonaDefinition, list_personas, resolve_persona};
use callcoach::roleplay::TrainingMode;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn shipped_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("personas")
}

#[test]
fn shipped_personas_are_listed_by_id() {
    let personas = list_personas(&shipped_dir()).unwrap();
    let ids: Vec<&str> = personas.iter().map(|entry| entry.id.as_str()).collect();
    assert_eq!(ids, vec!["first_time_buyer", "investor", "seller"]);
    assert!(personas.iter().all(|entry| entry.objections > 0));
}

#[test]
fn broken_and_foreign_files_are_skipped() {
    let dir = TempDir::new().unwrap();
    std::fs::copy(
        shipped_dir().join("seller.json"),
        dir.path().join("seller.json"),
    )
    .unwrap();
    std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

    let personas = list_personas(dir.path()).unwrap();
    assert_eq!(personas.len(), 1);
    assert_eq!(personas[0].id, "seller");
}

#[test]
fn persona_resolves_by_id_or_path() {
    let by_id = resolve_persona(&shipped_dir(), "seller").unwrap();
    let path = shipped_dir().join("seller.json");
    let by_path = resolve_persona(Path::new("/nonexistent"), path.to_str().unwrap()).unwrap();
    assert_eq!(by_id, by_path);
}

#[test]
fn unknown_persona_is_not_found() {
    let err = resolve_persona(&shipped_dir(), "landlord").unwrap_err();
    assert!(matches!(err, PersonaError::NotFound(_)));
}

#[test]
fn difficulty_limits_objections() {
    let investor = resolve_persona(&shipped_dir(), "investor").unwrap();
    let names = |difficulty| -> Vec<String> {
        investor
            .objections_for(difficulty)
            .iter()
            .map(|objection| objection.name.clone())
            .collect()
    };
    assert_eq!(names(Difficulty::Beginner), vec!["price", "timing"]);
    assert_eq!(names(Difficulty::Medium).len(), 4);
    assert_eq!(names(Difficulty::Advanced).len(), 5);
}

#[test]
fn magic_phrases_are_looked_up_by_objection() {
    let investor = resolve_persona(&shipped_dir(), "investor").unwrap();
    assert_eq!(
        investor.suggested_magic_phrases("price"),
        &["Besides the price, is there any other reason you wouldn't move forward?".to_string()]
    );
    assert!(investor.suggested_magic_phrases("unknown").is_empty());
}

#[test]
fn persona_without_trigger_phrases_is_invalid() {
    let raw = r#"{
        "id": "mute",
        "label": "Silent Client",
        "tone": {"formality": "casual", "energy": "low", "pace_wpm": 100, "directness": "low"},
        "objection_patterns": [{"name": "price", "trigger_phrases": []}]
    }"#;
    let err = PersonaDefinition::from_json_str(raw, "mute.json").unwrap_err();
    assert!(matches!(err, PersonaError::Invalid { .. }));
}

#[test]
fn training_defaults_come_from_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[training]\ndifficulty = \"advanced\"\nmode = \"challenge\"\n",
    )
    .unwrap();

    let config = Config::load_or_init_in(dir.path()).unwrap();
    assert_eq!(config.training.difficulty, Difficulty::Advanced);
    assert_eq!(config.training.mode, TrainingMode::Challenge);
    assert_eq!(config.analysis.max_missed_opportunities, 5);
}

#[test]
fn first_run_writes_default_config() {
    let dir = TempDir::new().unwrap();
    let callcoach_dir = dir.path().join(".callcoach");

    let config = Config::load_or_init_in(&callcoach_dir).unwrap();

    assert!(callcoach_dir.join("config.toml").is_file());
    assert_eq!(config.training.difficulty, Difficulty::Medium);
    assert_eq!(config.training.mode, TrainingMode::Scoring);
}
