use serde::{Deserialize, Serialize};

/// A chunk of source text ready for embedding, with metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeChunk {
    /// Source file path
    pub file_path: String,

    /// Start line (1-indexed)
    pub start_line: usize,

    /// End line (1-indexed, inclusive)
    pub end_line: usize,

    /// The chunk text handed to the embedding model
    pub content: String,

    /// Metadata about this chunk
    pub metadata: ChunkMetadata,
}

impl CodeChunk {
    /// Create a new code chunk
    #[must_use]
    pub const fn new(
        file_path: String,
        start_line: usize,
        end_line: usize,
        content: String,
        metadata: ChunkMetadata,
    ) -> Self {
        Self {
            file_path,
            start_line,
            end_line,
            content,
            metadata,
        }
    }

    /// Header chunk (type skeleton) rather than a member chunk
    #[must_use]
    pub fn is_header(&self) -> bool {
        self.metadata.chunk_type.is_some_and(ChunkType::is_header)
    }
}

/// Metadata about a code chunk
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkMetadata {
    /// Programming language
    pub language: Option<String>,

    /// Declaration kind the chunk was built from
    pub chunk_type: Option<ChunkType>,

    /// Simple name of the type or member
    pub symbol_name: Option<String>,

    /// Import statements embedded in the chunk text
    pub context_imports: Vec<String>,

    /// Qualified name of the enclosing type
    pub parent_scope: Option<String>,

    /// Estimated token count (rough approximation)
    pub estimated_tokens: usize,

    /// Fully qualified name (e.g., "com.acme.Outer.Inner.method")
    pub qualified_name: Option<String>,

    /// Doc comment attached to a header chunk
    pub documentation: Option<String>,
}

impl ChunkMetadata {
    /// Create metadata with language only
    pub fn with_language(language: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            ..Default::default()
        }
    }

    /// Builder: set chunk type
    #[must_use]
    pub const fn chunk_type(mut self, chunk_type: ChunkType) -> Self {
        self.chunk_type = Some(chunk_type);
        self
    }

    /// Builder: set symbol name
    #[must_use]
    pub fn symbol_name(mut self, name: impl Into<String>) -> Self {
        self.symbol_name = Some(name.into());
        self
    }

    /// Builder: set parent scope
    #[must_use]
    pub fn parent_scope(mut self, scope: impl Into<String>) -> Self {
        self.parent_scope = Some(scope.into());
        self
    }

    /// Builder: set qualified name
    #[must_use]
    pub fn qualified_name(mut self, name: impl Into<String>) -> Self {
        self.qualified_name = Some(name.into());
        self
    }

    /// Builder: set estimated tokens
    #[must_use]
    pub const fn estimated_tokens(mut self, tokens: usize) -> Self {
        self.estimated_tokens = tokens;
        self
    }

    /// Estimate tokens from content
    #[must_use]
    pub fn estimate_tokens_from_content(content: &str) -> usize {
        let chars = content.len();
        // Rough estimate: 4 chars per token on average for code
        (chars / 4).max(1)
    }
}

/// Declaration kind behind a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChunkType {
    /// Class skeleton
    Class,
    /// Interface skeleton
    Interface,
    /// Enum skeleton
    Enum,
    /// Record skeleton
    Record,
    /// Annotation type skeleton
    Annotation,
    /// Method with its body
    Method,
    /// Constructor with its body
    Constructor,
}

impl ChunkType {
    /// Check if this chunk type is a type skeleton
    #[must_use]
    pub const fn is_header(self) -> bool {
        !matches!(self, Self::Method | Self::Constructor)
    }
}
