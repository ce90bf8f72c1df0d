use serde::{Deserialize, Serialize};

/// A single removed comment, as it appears in the JSON log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalRecord {
    /// Path of the file the comment was removed from
    pub file_path: String,
    /// 1-based line number the comment started on
    pub line_number: usize,
    /// Full comment text including the leading `#`
    pub comment_text: String,
}
