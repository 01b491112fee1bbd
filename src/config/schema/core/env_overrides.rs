use super::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("CALLCOACH_RUBRIC_PATH")
            && !path.is_empty()
        {
            self.rubric.path = Some(path);
        }

        if let Ok(dir) = std::env::var("CALLCOACH_PERSONA_DIR")
            && !dir.is_empty()
        {
            self.training.persona_dir = Some(dir);
        }

        if let Ok(level) = std::env::var("CALLCOACH_LOG_LEVEL")
            && !level.is_empty()
        {
            self.observability.log_level = level.to_lowercase();
        }
    }
}
