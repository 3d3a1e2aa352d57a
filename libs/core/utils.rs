use chrono::{DateTime, Utc};
use std::sync::Mutex;

pub fn utc_now() -> DateTime<Utc> {
    Utc::now()
}

/// Monotonic ULID source shared by every repository.
pub struct IdGenerator {
    generator: Mutex<ulid::Generator>,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            generator: Mutex::new(ulid::Generator::new()),
        }
    }

    pub fn generate(&self) -> eyre::Result<String> {
        let mut generator = self
            .generator
            .lock()
            .map_err(|_| eyre::eyre!("id generator lock poisoned"))?;
        let id = generator
            .generate()
            .map_err(|e| eyre::eyre!("couldn't generate id: {e}"))?;
        Ok(id.to_string())
    }
}
