use std::sync::{LazyLock, Mutex, MutexGuard};

static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Every variable `Config::apply_env_overrides` reads.
pub(in crate::config) const CALLCOACH_VARS: [&str; 3] = [
    "CALLCOACH_RUBRIC_PATH",
    "CALLCOACH_PERSONA_DIR",
    "CALLCOACH_LOG_LEVEL",
];

/// Serializes env-var mutation across tests and restores the previous values
/// on drop. Starts with every `CALLCOACH_*` variable unset.
pub(in crate::config) struct EnvScope {
    previous: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvScope {
    pub(in crate::config) fn clean() -> Self {
        let lock = ENV_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let previous = CALLCOACH_VARS
            .iter()
            .map(|key| (*key, std::env::var(key).ok()))
            .collect();
        for key in CALLCOACH_VARS {
            // SAFETY: ENV_LOCK is held for the lifetime of the scope.
            unsafe {
                std::env::remove_var(key);
            }
        }
        Self {
            previous,
            _lock: lock,
        }
    }

    pub(in crate::config) fn set(&self, key: &'static str, value: &str) {
        debug_assert!(CALLCOACH_VARS.contains(&key));
        // SAFETY: ENV_LOCK is held for the lifetime of the scope.
        unsafe {
            std::env::set_var(key, value);
        }
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        for (key, value) in &self.previous {
            // SAFETY: the lock field is dropped after this body runs.
            unsafe {
                match value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
