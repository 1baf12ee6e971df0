use std::{
    fs,
    path::PathBuf,
};

use serde::{
    de::DeserializeOwned,
    Deserialize,
    Serialize,
};
use tracing::{
    info,
    warn,
};

use crate::{
    catalog::loader::DEFAULT_PAGE_SIZE,
    core::DexError,
};

const APP_NAME: &str = "dexview";
pub const SETTINGS_FILE: &str = "settings.json";

pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";
const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub api_base_url: String,
    pub page_size: usize,
    pub request_timeout_secs: u64,
    pub dark_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: 30,
            dark_mode: true,
        }
    }
}

impl AppSettings {
    /// Reads `settings.json` from the data directory, falling back to
    /// defaults. Never writes.
    pub fn load() -> Self {
        load_json_or_default::<AppSettings>(SETTINGS_FILE).normalized()
    }

    pub fn normalized(mut self) -> Self {
        let trimmed = self.api_base_url.trim().trim_end_matches('/');
        self.api_base_url = if trimmed.is_empty() {
            DEFAULT_API_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        };
        self.page_size = self.page_size.clamp(1, MAX_PAGE_SIZE);
        self.request_timeout_secs = self.request_timeout_secs.max(1);
        self
    }
}

pub fn get_app_data_dir() -> PathBuf {
    match dirs::data_local_dir() {
        Some(data_dir) => data_dir.join(APP_NAME),
        None => PathBuf::from("."),
    }
}

pub fn get_data_file_path(filename: &str) -> PathBuf {
    get_app_data_dir().join(filename)
}

pub fn parse_json<T: DeserializeOwned>(json: &str) -> Result<T, DexError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_json<T: DeserializeOwned + Default>(filename: &str) -> Result<T, DexError> {
    let file_path = get_data_file_path(filename);

    if !file_path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(&file_path)?;
    let data = parse_json(&json)?;
    info!("Settings loaded from: {}", file_path.display());
    Ok(data)
}

pub fn load_json_or_default<T: DeserializeOwned + Default>(filename: &str) -> T {
    match load_json::<T>(filename) {
        Ok(data) => data,
        Err(e) => {
            warn!("Failed to load {}: {}. Using defaults.", filename, e);
            T::default()
        }
    }
}
