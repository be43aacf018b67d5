use crate::config::ChunkerConfig;
use crate::context::HeaderText;
use crate::error::{ChunkerError, Result};
use crate::extractor::ChunkExtractor;
use crate::language::Language;
use crate::sink::ChunkSink;
use crate::source::LineBuffer;
use crate::syntax::{JavaSyntax, SyntaxProvider};
use crate::types::CodeChunk;
use std::path::Path;

/// Main chunker interface for processing source files
#[derive(Debug, Clone, Default)]
pub struct Chunker {
    config: ChunkerConfig,
}

impl Chunker {
    /// Create a new chunker with configuration
    pub fn new(config: ChunkerConfig) -> Result<Self> {
        config.validate().map_err(ChunkerError::invalid_config)?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Chunk code from a string; without a path the source is taken as Java
    pub fn chunk_str(&self, content: &str, file_path: Option<&str>) -> Result<Vec<CodeChunk>> {
        let (file_path, language) = match file_path {
            Some(path) => (path, Language::from_path(path)),
            None => ("unknown", Language::Java),
        };

        let mut chunks = Vec::new();
        self.chunk_with_language(content, file_path, language, &mut chunks)?;
        Ok(chunks)
    }

    /// Chunk code from a file
    pub fn chunk_file(&self, path: impl AsRef<Path>) -> Result<Vec<CodeChunk>> {
        let mut chunks = Vec::new();
        self.chunk_file_into(path, &mut chunks)?;
        Ok(chunks)
    }

    /// Chunk a file straight into a sink; returns the number of chunks
    pub fn chunk_file_into<S: ChunkSink + ?Sized>(
        &self,
        path: impl AsRef<Path>,
        sink: &mut S,
    ) -> Result<usize> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let file_path = path.to_str().unwrap_or("unknown");
        let language = Language::from_path(path);

        self.chunk_with_language(&content, file_path, language, sink)
    }

    /// Chunk code with explicit language
    pub fn chunk_with_language<S: ChunkSink + ?Sized>(
        &self,
        content: &str,
        file_path: &str,
        language: Language,
        sink: &mut S,
    ) -> Result<usize> {
        if !language.supports_ast() {
            return Err(ChunkerError::unsupported_language(format!(
                "{} ({file_path})",
                language.as_str()
            )));
        }

        let mut syntax = JavaSyntax::new()?;
        self.chunk_with_syntax(content, file_path, language, &mut syntax, sink)
    }

    /// Chunk code using a caller-supplied declaration tree provider
    pub fn chunk_with_syntax<P, S>(
        &self,
        content: &str,
        file_path: &str,
        language: Language,
        syntax: &mut P,
        sink: &mut S,
    ) -> Result<usize>
    where
        P: SyntaxProvider + ?Sized,
        S: ChunkSink + ?Sized,
    {
        // Parse fully before emitting anything.
        let module = syntax.parse(content)?;
        if module.types.is_empty() {
            log::warn!("{file_path}: no type declarations found");
        }

        let lines = LineBuffer::from_source(content);
        let header = HeaderText::build(&module);
        let extractor =
            ChunkExtractor::new(&self.config, &lines, &header, &module, file_path, language);

        let emitted = extractor.run(sink)?;
        log::debug!("{file_path}: emitted {emitted} chunks");
        Ok(emitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::LineSpan;
    use crate::syntax::{MemberDecl, MemberKind, Module, TypeDecl, TypeKind};

    struct FixedSyntax(Module);

    impl SyntaxProvider for FixedSyntax {
        fn parse(&mut self, _source: &str) -> Result<Module> {
            Ok(self.0.clone())
        }
    }

    struct FailingSyntax;

    impl SyntaxProvider for FailingSyntax {
        fn parse(&mut self, _source: &str) -> Result<Module> {
            Err(ChunkerError::parse("boom"))
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ChunkerConfig {
            wrapper_keyword: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            Chunker::new(config),
            Err(ChunkerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_unsupported_language() {
        let chunker = Chunker::default();
        let err = chunker
            .chunk_str("class X {}\n", Some("X.groovy"))
            .unwrap_err();
        assert!(matches!(err, ChunkerError::UnsupportedLanguage(_)));
    }

    #[test]
    fn test_custom_provider() {
        let mut ty = TypeDecl::new(TypeKind::Class, "X", 0, LineSpan::new(1, 3));
        ty.members
            .push(MemberDecl::new(MemberKind::Method, Some("m".into()), LineSpan::new(2, 2)));
        let mut syntax = FixedSyntax(Module {
            types: vec![ty],
            ..Default::default()
        });

        let mut chunks: Vec<CodeChunk> = Vec::new();
        let emitted = Chunker::default()
            .chunk_with_syntax(
                "class X {\n  void m() {}\n}\n",
                "X.java",
                Language::Java,
                &mut syntax,
                &mut chunks,
            )
            .unwrap();
        assert_eq!(emitted, 2);
        assert_eq!(chunks.len(), 2);
    }

    #[test]
    fn test_parse_failure_emits_nothing() {
        let mut chunks: Vec<CodeChunk> = Vec::new();
        let result = Chunker::default().chunk_with_syntax(
            "class X {}\n",
            "X.java",
            Language::Java,
            &mut FailingSyntax,
            &mut chunks,
        );
        assert!(result.is_err());
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Chunker::default()
            .chunk_file("/definitely/not/here/X.java")
            .unwrap_err();
        assert!(matches!(err, ChunkerError::IoError(_)));
    }
}
