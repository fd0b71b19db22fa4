//! Prompt file naming and saving.

use std::path::{Path, PathBuf};

/// Derive a prompt filename from an image filename: the stem plus
/// `.prompt.txt` (`office.jpg` → `office.prompt.txt`).
#[must_use]
pub fn prompt_filename(image_name: &str) -> String {
    let stem = Path::new(image_name)
        .file_stem()
        .map_or_else(|| "prompt".to_string(), |s| s.to_string_lossy().into_owned());
    format!("{stem}.prompt.txt")
}

/// Save a prompt as a text file in the given directory, creating the
/// directory if needed. Returns the written path.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_prompt(dir: &Path, image_name: &str, text: &str) -> Result<PathBuf, std::io::Error> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(prompt_filename(image_name));
    std::fs::write(&path, text)?;
    Ok(path)
}
