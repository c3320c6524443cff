use std::env;
use std::path::PathBuf;

const DEFAULT_API_BASE: &str = "http://localhost:8000";
const DEFAULT_SESSION_FILE: &str = ".bookworm_session";

/// Where the platform lives and where the session token is kept between
/// runs.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub session_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Config {
        let api_base = env::var("BOOKWORM_API_BASE")
            .unwrap_or_else(|_| String::from(DEFAULT_API_BASE))
            .trim_end_matches('/')
            .to_string();

        let session_file = env::var("BOOKWORM_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE));

        Config {
            api_base,
            session_file,
        }
    }
}
