//! Single source of truth for the pulse filesystem layout.
//!
//! This module defines WHERE data lives. It has no I/O and no business
//! logic.
//!
//! ```text
//! ~/.pulse/                    # default data directory
//! ├── feedback.db              # SQLite feedback store
//! └── model/
//!     ├── vectorizer.json      # fitted TF-IDF extractor
//!     └── classifier.json      # fitted naive Bayes classifier
//! ```
//!
//! Every function takes the data directory as a parameter so tests (and the
//! `--data-dir` flag) can point the whole layout elsewhere.

use std::path::{Path, PathBuf};

/// Default data directory: `~/.pulse/`
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".pulse")
}

/// SQLite feedback database: `{data_dir}/feedback.db`
pub fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join("feedback.db")
}

/// Model artifact directory: `{data_dir}/model/`
pub fn model_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("model")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_rooted_in_data_dir() {
        let data_dir = PathBuf::from("/tmp/pulse-test");
        assert_eq!(db_path(&data_dir), PathBuf::from("/tmp/pulse-test/feedback.db"));
        assert_eq!(model_dir(&data_dir), PathBuf::from("/tmp/pulse-test/model"));
    }
}
