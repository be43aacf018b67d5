use crate::boundary;
use crate::config::ChunkerConfig;
use crate::context::HeaderText;
use crate::error::Result;
use crate::language::Language;
use crate::sink::ChunkSink;
use crate::source::{LineBuffer, LineSpan};
use crate::syntax::{MemberDecl, MemberKind, Module, TypeDecl};
use crate::types::{ChunkMetadata, ChunkType, CodeChunk};

/// Walks a declaration tree and slices the source into header and member
/// chunks.
///
/// Every type yields its header chunk, then one chunk per method, then one
/// per constructor, then the chunks of its nested types, in declaration
/// order.
pub struct ChunkExtractor<'a> {
    config: &'a ChunkerConfig,
    lines: &'a LineBuffer,
    header: &'a HeaderText,
    module: &'a Module,
    file_path: &'a str,
    language: Language,
}

impl<'a> ChunkExtractor<'a> {
    pub fn new(
        config: &'a ChunkerConfig,
        lines: &'a LineBuffer,
        header: &'a HeaderText,
        module: &'a Module,
        file_path: &'a str,
        language: Language,
    ) -> Self {
        Self {
            config,
            lines,
            header,
            module,
            file_path,
            language,
        }
    }

    /// Emit every chunk of the module into `sink`; returns how many
    pub fn run<S: ChunkSink + ?Sized>(&self, sink: &mut S) -> Result<usize> {
        let mut emitted = 0;
        for ty in &self.module.types {
            emitted += self.walk_type(ty, None, sink)?;
        }
        Ok(emitted)
    }

    fn walk_type<S: ChunkSink + ?Sized>(
        &self,
        ty: &TypeDecl,
        parent: Option<&str>,
        sink: &mut S,
    ) -> Result<usize> {
        let qualified = self.qualify(parent, &ty.name);
        let mut emitted = 0;

        sink.emit(self.header_chunk(ty, parent, &qualified))?;
        emitted += 1;

        for member in ty.methods().chain(ty.constructors()) {
            if member.synthetic {
                log::debug!("{}: skipping synthetic member of {qualified}", self.file_path);
                continue;
            }
            sink.emit(self.member_chunk(ty, member, &qualified))?;
            emitted += 1;
        }

        for nested in ty.nested() {
            emitted += self.walk_type(nested, Some(qualified.as_str()), sink)?;
        }

        Ok(emitted)
    }

    /// Type skeleton: preamble, doc comment, signature, fields, initializers
    pub fn header_chunk(&self, ty: &TypeDecl, parent: Option<&str>, qualified: &str) -> CodeChunk {
        let start = ty.span.start;
        let mut content = String::from(self.header.as_str());

        let doc_start = if self.config.include_doc_comments {
            boundary::doc_comment_start(self.lines, start)
        } else {
            None
        };
        let documentation = doc_start.map(|line| self.lines.slice(line, start - 1));
        if let Some(doc) = &documentation {
            content.push_str(doc);
        }

        let brace = ty
            .brace_line
            .or_else(|| boundary::opening_brace_line(self.lines, start))
            .unwrap_or(ty.span.end);
        content.push_str(&self.lines.slice(start, brace));
        content.push('\n');

        // Lines already in the chunk, so members sharing a line print it once.
        let mut written = vec![LineSpan::new(start, brace)];
        let body_parts = ty
            .fields()
            .chain(ty.object_initializers())
            .chain(ty.static_initializers());
        for member in body_parts {
            if member.synthetic {
                continue;
            }
            if !member.span.is_known() {
                log::debug!("{}: member of {qualified} has no position", self.file_path);
            } else if written.iter().any(|seen| seen.covers(member.span)) {
                continue;
            } else {
                written.push(member.span);
            }
            content.push_str(&self.lines.slice_span(member.span));
            content.push('\n');
        }

        content.push_str("}\n");

        let mut metadata = self
            .metadata(ty.kind.chunk_type(), &content)
            .symbol_name(ty.name.clone())
            .qualified_name(qualified);
        metadata.context_imports = self.header.imports().to_vec();
        metadata.documentation = documentation;
        if let Some(parent) = parent {
            metadata = metadata.parent_scope(parent);
        }

        CodeChunk::new(
            self.file_path.to_string(),
            doc_start.unwrap_or(start),
            ty.span.end,
            content,
            metadata,
        )
    }

    /// One method or constructor inside a one-line wrapper of its type
    pub fn member_chunk(&self, ty: &TypeDecl, member: &MemberDecl, qualified: &str) -> CodeChunk {
        let preamble = if self.config.member_imports {
            self.header.as_str()
        } else {
            self.header.package_line()
        };

        let mut content = String::from(preamble);
        content.push_str(&format!("{} {} {{\n\n", self.config.wrapper_keyword, ty.name));
        content.push_str(&self.lines.slice_span(member.span));
        content.push('\n');
        content.push_str("}\n");

        let chunk_type = match member.kind {
            MemberKind::Constructor => ChunkType::Constructor,
            _ => ChunkType::Method,
        };
        let name = member.name.clone().unwrap_or_else(|| ty.name.clone());

        let mut metadata = self
            .metadata(chunk_type, &content)
            .qualified_name(format!("{qualified}.{name}"))
            .symbol_name(name)
            .parent_scope(qualified);
        if self.config.member_imports {
            metadata.context_imports = self.header.imports().to_vec();
        }

        CodeChunk::new(
            self.file_path.to_string(),
            member.span.start,
            member.span.end,
            content,
            metadata,
        )
    }

    fn metadata(&self, chunk_type: ChunkType, content: &str) -> ChunkMetadata {
        ChunkMetadata::with_language(self.language.as_str())
            .chunk_type(chunk_type)
            .estimated_tokens(ChunkMetadata::estimate_tokens_from_content(content))
    }

    fn qualify(&self, parent: Option<&str>, name: &str) -> String {
        match (parent, &self.module.package) {
            (Some(parent), _) => format!("{parent}.{name}"),
            (None, Some(package)) => format!("{}.{name}", package.name),
            (None, None) => name.to_string(),
        }
    }
}
