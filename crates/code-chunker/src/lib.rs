//! # Class Chunker
//!
//! Declaration-aware chunking of class-based source files for retrieval
//! pipelines.
//!
//! ## Philosophy
//!
//! Every chunk is a verbatim selection of source lines plus just enough
//! context to stand alone:
//! - One header chunk per type: package, imports, doc comment, signature,
//!   fields and initializer blocks
//! - One chunk per method and per constructor, wrapped in a one-line shell
//!   of its enclosing type
//! - Nested types are chunked the same way, after their parent's members
//!
//! ## Architecture
//!
//! ```text
//! Source File
//!     │
//!     ├──> Line Buffer (raw lines, 1-indexed)
//!     │
//!     ├──> Tree-sitter Parsing → declaration tree (Module / TypeDecl / MemberDecl)
//!     │
//!     ├──> Header Text (package + grouped imports, built once)
//!     │
//!     └──> Chunk Extraction (pre-order walk)
//!          ├─> Header chunk per type
//!          ├─> Member chunk per method / constructor
//!          └─> Emit CodeChunk values into a ChunkSink
//! ```
//!
//! ## Example
//!
//! ```rust
//! use class_chunker::{Chunker, ChunkerConfig};
//!
//! let chunker = Chunker::new(ChunkerConfig::default()).unwrap();
//!
//! let code = "package a.b;\nclass X {\n  int f = 1;\n  void m() { return; }\n}\n";
//!
//! let chunks = chunker.chunk_str(code, Some("X.java")).unwrap();
//! assert_eq!(chunks.len(), 2);
//! for chunk in chunks {
//!     println!("Chunk at lines {}-{}:\n{}", chunk.start_line, chunk.end_line, chunk.content);
//! }
//! ```

mod boundary;
mod chunker;
mod config;
mod context;
mod error;
mod extractor;
mod language;
mod sink;
mod source;
mod syntax;
mod types;

pub use chunker::Chunker;
pub use config::ChunkerConfig;
pub use context::HeaderText;
pub use error::{ChunkerError, Result};
pub use extractor::ChunkExtractor;
pub use language::Language;
pub use sink::{ChunkSink, JsonLinesSink, MarkedTextSink, Markers};
pub use source::{LineBuffer, LineSpan};
pub use syntax::{
    ImportDecl, ImportKind, JavaSyntax, MemberDecl, MemberKind, Module, PackageDecl,
    SyntaxProvider, TypeDecl, TypeKind, STATIC_INITIALIZER_KINDS,
};
pub use types::{ChunkMetadata, ChunkType, CodeChunk};
