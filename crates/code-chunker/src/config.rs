use serde::{Deserialize, Serialize};

/// Configuration for chunk extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    /// Attach the block comment sitting directly above a type declaration
    /// to that type's header chunk
    pub include_doc_comments: bool,

    /// Prefix member chunks with the full package + import preamble instead
    /// of the package line alone
    pub member_imports: bool,

    /// Keyword used for the one-line wrapper around member chunks
    pub wrapper_keyword: String,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            include_doc_comments: true,
            member_imports: false,
            wrapper_keyword: "class".to_string(),
        }
    }
}

impl ChunkerConfig {
    /// Config whose member chunks repeat the whole file preamble
    pub fn with_member_imports() -> Self {
        Self {
            member_imports: true,
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.wrapper_keyword.is_empty() {
            return Err("wrapper_keyword must not be empty".to_string());
        }

        if self.wrapper_keyword.chars().any(char::is_whitespace) {
            return Err(format!(
                "wrapper_keyword ({:?}) must be a single word",
                self.wrapper_keyword
            ));
        }

        Ok(())
    }
}
