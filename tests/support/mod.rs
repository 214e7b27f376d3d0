use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with `REPOSITORY_TYPE` temporarily set (`None` removes it).
///
/// This is panic-safe (restores the previous value on unwind) and also
/// serializes access to the process-global env var to avoid flaky tests
/// when Rust runs tests in parallel.
pub fn with_repository_type<F, R>(value: Option<&str>, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK poisoned");
    let _guard = ScopedEnv::set("REPOSITORY_TYPE", value);
    f()
}

struct ScopedEnv {
    key: String,
    previous: Option<String>,
}

impl ScopedEnv {
    fn set(key: &str, value: Option<&str>) -> Self {
        let previous = std::env::var(key).ok();
        match value {
            Some(val) => std::env::set_var(key, val),
            None => std::env::remove_var(key),
        }
        Self {
            key: key.to_string(),
            previous,
        }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(val) => std::env::set_var(&self.key, val),
            None => std::env::remove_var(&self.key),
        }
    }
}
