pub mod prefs;
pub mod session;

use std::path::PathBuf;

fn default_data_dir() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("apitool")
}
