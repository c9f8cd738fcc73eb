use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "OPUS_DB_PATH";
pub const SYNC_URL_VAR: &str = "OPUS_SYNC_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub sync_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup(DB_PATH_VAR).map(PathBuf::from).unwrap_or_else(|| {
            let home_dir = lookup("HOME").unwrap_or_else(|| ".".to_string());
            PathBuf::from(home_dir).join(".opus.db")
        });
        let sync_url = lookup(SYNC_URL_VAR).filter(|url| !url.trim().is_empty());

        Config { db_path, sync_url }
    }
}
