use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum WordCountError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Number of whitespace-separated words in a UTF-8 text file.
pub fn count_words_in_file(path: impl AsRef<Path>) -> Result<usize, WordCountError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| WordCountError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text.split_whitespace().count())
}
