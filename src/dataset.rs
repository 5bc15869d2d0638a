use std::fs;
use std::path::Path;

use rust_embed::Embed;

use crate::catalog::RawEmojiRecord;
use crate::error::{PickerError, Result};

#[derive(Embed)]
#[folder = "assets/"]
struct DatasetAssets;

pub const BUNDLED_DATASET: &str = "emoji.json";

/// Records shipped inside the binary.
pub fn bundled() -> Result<Vec<RawEmojiRecord>> {
    let file = DatasetAssets::get(BUNDLED_DATASET)
        .ok_or_else(|| PickerError::Dataset(format!("{BUNDLED_DATASET} is not bundled")))?;
    let content = std::str::from_utf8(file.data.as_ref())
        .map_err(|e| PickerError::Dataset(format!("{BUNDLED_DATASET}: {e}")))?;
    from_json(content)
}

pub fn from_json(json: &str) -> Result<Vec<RawEmojiRecord>> {
    Ok(serde_json::from_str(json)?)
}

pub fn from_path(path: &Path) -> Result<Vec<RawEmojiRecord>> {
    let content = fs::read_to_string(path)?;
    from_json(&content)
}
