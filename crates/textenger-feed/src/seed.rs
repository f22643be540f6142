use jiff::Timestamp;

const PREVIEW_LEN: usize = 12;

/// Opaque per-session shuffle seed: `<unix millis>-<random fraction>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionSeed(String);

impl SessionSeed {
    /// Draw a new seed from the wall clock and the thread RNG.
    pub fn generate() -> Self {
        Self(generate_user_seed())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Seed for a secondary list in the same session, e.g. the explore tab.
    pub fn scoped(&self, scope: &str) -> SessionSeed {
        SessionSeed(format!("{}-{scope}", self.0))
    }

    /// Session start, read back from the timestamp prefix.
    pub fn started_at(&self) -> Option<Timestamp> {
        let (millis, _) = self.0.split_once('-').unwrap_or((self.0.as_str(), ""));
        let millis: i64 = millis.parse().ok()?;
        Timestamp::from_millisecond(millis).ok()
    }

    pub fn preview(&self) -> String {
        let head: String = self.0.chars().take(PREVIEW_LEN).collect();
        format!("{head}...")
    }
}

impl From<String> for SessionSeed {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionSeed {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for SessionSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn generate_user_seed() -> String {
    let millis = Timestamp::now().as_millisecond();
    let draw: f64 = rand::random();
    format!("{millis}-{draw}")
}
