use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Settings for a one-shot scheduling run from the command line
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Preference CSV to import. `None` means interactive entry.
    pub input: Option<PathBuf>,
    /// Seed for the coverage pass; a random one is drawn when absent
    pub seed: Option<u64>,
    /// Where to write the rendered schedule, if anywhere
    pub report_path: Option<PathBuf>,
    /// Where to export the preference table
    pub preferences_path: Option<PathBuf>,
    /// Where to export the assignment table
    pub assignments_path: Option<PathBuf>,
}

/// Settings for the web front end
#[derive(Debug, Clone)]
pub struct WebConfig {
    pub port: u16,
    /// Password for admin endpoints, sent in the `X-Admin-Password` header
    pub admin_password: String,
    pub seed: Option<u64>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            admin_password: "admin123".to_string(),
            seed: None,
        }
    }
}

impl WebConfig {
    /// Reads the admin password from `ADMIN_PASSWORD`, keeping the default otherwise
    pub fn with_env_password(mut self) -> Self {
        if let Ok(password) = std::env::var("ADMIN_PASSWORD") {
            self.admin_password = password;
        }
        self
    }
}

/// Random source for the coverage pass: seeded when a seed is given
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
