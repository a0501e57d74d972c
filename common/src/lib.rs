pub mod env;
pub mod settings;

pub use env::{EnvFile, parse_env_entries, parse_env_file, parse_env_str};
pub use settings::{DEFAULT_API_URL, Settings};
