//! Declaration tree consumed by the extractor, and the tree-sitter adapter
//! that builds it.

use crate::error::{ChunkerError, Result};
use crate::language::Language;
use crate::source::LineSpan;
use crate::types::ChunkType;
use tree_sitter::{Node, Parser};

/// Node kinds that grammar versions have used for `static { ... }` blocks,
/// in preference order.
pub const STATIC_INITIALIZER_KINDS: &[&str] = &["static_initializer", "static_block"];

/// Anything that can turn source text into a declaration tree
pub trait SyntaxProvider {
    fn parse(&mut self, source: &str) -> Result<Module>;
}

/// Package declaration of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDecl {
    pub name: String,
    pub span: LineSpan,
}

/// Import flavour, in header rendering order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImportKind {
    Explicit,
    Wildcard,
    Static,
    StaticWildcard,
}

impl ImportKind {
    pub const ALL: [ImportKind; 4] = [
        ImportKind::Explicit,
        ImportKind::Wildcard,
        ImportKind::Static,
        ImportKind::StaticWildcard,
    ];

    const fn from_flags(is_static: bool, is_wildcard: bool) -> Self {
        match (is_static, is_wildcard) {
            (false, false) => ImportKind::Explicit,
            (false, true) => ImportKind::Wildcard,
            (true, false) => ImportKind::Static,
            (true, true) => ImportKind::StaticWildcard,
        }
    }
}

/// One import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    pub kind: ImportKind,
    /// Statement text, e.g. `import java.util.List;`
    pub text: String,
    pub span: LineSpan,
}

/// Kind of a type declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

impl TypeKind {
    /// Map a grammar node kind to a type kind
    pub fn from_node_kind(kind: &str) -> Option<Self> {
        match kind {
            "class_declaration" => Some(TypeKind::Class),
            "interface_declaration" => Some(TypeKind::Interface),
            "enum_declaration" => Some(TypeKind::Enum),
            "record_declaration" => Some(TypeKind::Record),
            "annotation_type_declaration" => Some(TypeKind::Annotation),
            _ => None,
        }
    }

    #[must_use]
    pub const fn chunk_type(self) -> ChunkType {
        match self {
            TypeKind::Class => ChunkType::Class,
            TypeKind::Interface => ChunkType::Interface,
            TypeKind::Enum => ChunkType::Enum,
            TypeKind::Record => ChunkType::Record,
            TypeKind::Annotation => ChunkType::Annotation,
        }
    }
}

/// Kind of a type member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Method,
    Constructor,
    ObjectInitializer,
    StaticInitializer,
}

/// A declaration owned by a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDecl {
    pub kind: MemberKind,
    pub name: Option<String>,
    pub span: LineSpan,
    /// Generated by the compiler rather than written by the author
    pub synthetic: bool,
}

impl MemberDecl {
    pub fn new(kind: MemberKind, name: Option<String>, span: LineSpan) -> Self {
        Self {
            kind,
            name,
            span,
            synthetic: false,
        }
    }

    #[must_use]
    pub fn synthetic(mut self) -> Self {
        self.synthetic = true;
        self
    }
}

/// A named type declaration and everything it owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub kind: TypeKind,
    pub name: String,
    /// 0 for top-level types
    pub depth: usize,
    pub span: LineSpan,
    /// Line of the body's opening `{`, when the provider knows it
    pub brace_line: Option<usize>,
    /// Members in declaration order
    pub members: Vec<MemberDecl>,
    /// Named nested types in declaration order
    pub nested: Vec<TypeDecl>,
}

impl TypeDecl {
    pub fn new(kind: TypeKind, name: impl Into<String>, depth: usize, span: LineSpan) -> Self {
        Self {
            kind,
            name: name.into(),
            depth,
            span,
            brace_line: None,
            members: Vec::new(),
            nested: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_brace_line(mut self, line: usize) -> Self {
        self.brace_line = Some(line);
        self
    }

    fn members_of(&self, kind: MemberKind) -> impl Iterator<Item = &MemberDecl> {
        self.members.iter().filter(move |m| m.kind == kind)
    }

    pub fn fields(&self) -> impl Iterator<Item = &MemberDecl> {
        self.members_of(MemberKind::Field)
    }

    pub fn methods(&self) -> impl Iterator<Item = &MemberDecl> {
        self.members_of(MemberKind::Method)
    }

    pub fn constructors(&self) -> impl Iterator<Item = &MemberDecl> {
        self.members_of(MemberKind::Constructor)
    }

    pub fn object_initializers(&self) -> impl Iterator<Item = &MemberDecl> {
        self.members_of(MemberKind::ObjectInitializer)
    }

    pub fn static_initializers(&self) -> impl Iterator<Item = &MemberDecl> {
        self.members_of(MemberKind::StaticInitializer)
    }

    pub fn nested(&self) -> impl Iterator<Item = &TypeDecl> {
        self.nested.iter()
    }
}

/// Declaration tree of one source file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Module {
    pub package: Option<PackageDecl>,
    /// Imports in source order
    pub imports: Vec<ImportDecl>,
    pub types: Vec<TypeDecl>,
}

impl Module {
    /// Imports of one kind, in source order
    pub fn imports_of(&self, kind: ImportKind) -> impl Iterator<Item = &ImportDecl> {
        self.imports.iter().filter(move |i| i.kind == kind)
    }
}

/// Tree-sitter backed provider for Java sources
pub struct JavaSyntax {
    parser: Parser,
    static_initializer_kind: Option<u16>,
}

impl JavaSyntax {
    pub fn new() -> Result<Self> {
        Self::with_static_initializer_kinds(STATIC_INITIALIZER_KINDS)
    }

    /// Build a provider that looks up static initializer blocks under the
    /// first of `candidates` the grammar knows about
    pub fn with_static_initializer_kinds(candidates: &[&str]) -> Result<Self> {
        let ts_language = Language::Java.tree_sitter_language()?;
        let mut parser = Parser::new();
        parser
            .set_language(&ts_language)
            .map_err(|e| ChunkerError::tree_sitter(format!("Failed to set language: {e}")))?;

        let static_initializer_kind = probe_node_kind(&ts_language, candidates);
        if static_initializer_kind.is_none() {
            log::debug!(
                "grammar has none of {candidates:?}; static initializers will be empty"
            );
        }

        Ok(Self {
            parser,
            static_initializer_kind,
        })
    }

    fn type_decl(&self, source: &str, node: Node, depth: usize) -> Option<TypeDecl> {
        let kind = TypeKind::from_node_kind(node.kind())?;
        let name = node.child_by_field_name("name")?;
        let mut decl = TypeDecl::new(kind, node_text(source, name), depth, span_of(node));

        if kind == TypeKind::Record {
            if let Some(params) = node.child_by_field_name("parameters") {
                let mut cursor = params.walk();
                for param in params.named_children(&mut cursor) {
                    if matches!(param.kind(), "formal_parameter" | "spread_parameter") {
                        let name = param
                            .child_by_field_name("name")
                            .map(|n| node_text(source, n).to_string());
                        decl.members.push(
                            MemberDecl::new(MemberKind::Field, name, span_of(param)).synthetic(),
                        );
                    }
                }
            }
        }

        if let Some(body) = node.child_by_field_name("body") {
            decl.brace_line = Some(body.start_position().row + 1);
            self.collect_body(source, body, &mut decl);
        }

        Some(decl)
    }

    fn collect_body(&self, source: &str, body: Node, decl: &mut TypeDecl) {
        let mut cursor = body.walk();
        let children: Vec<_> = body.named_children(&mut cursor).collect();

        for child in children {
            if Some(child.kind_id()) == self.static_initializer_kind {
                decl.members.push(MemberDecl::new(
                    MemberKind::StaticInitializer,
                    None,
                    span_of(child),
                ));
                continue;
            }

            let member_kind = match child.kind() {
                "field_declaration" | "constant_declaration" | "enum_constant" => {
                    Some(MemberKind::Field)
                }
                "method_declaration" | "annotation_type_element_declaration" => {
                    Some(MemberKind::Method)
                }
                "constructor_declaration" | "compact_constructor_declaration" => {
                    Some(MemberKind::Constructor)
                }
                "block" => Some(MemberKind::ObjectInitializer),
                "enum_body_declarations" => {
                    self.collect_body(source, child, decl);
                    None
                }
                kind if TypeKind::from_node_kind(kind).is_some() => {
                    if let Some(nested) = self.type_decl(source, child, decl.depth + 1) {
                        decl.nested.push(nested);
                    }
                    None
                }
                _ => None,
            };

            if let Some(kind) = member_kind {
                let name = member_name(source, child);
                decl.members.push(MemberDecl::new(kind, name, span_of(child)));
            }
        }
    }
}

impl SyntaxProvider for JavaSyntax {
    fn parse(&mut self, source: &str) -> Result<Module> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ChunkerError::parse("Failed to parse source code"))?;

        let root = tree.root_node();
        if root.has_error() {
            let line = first_error(root).map_or(0, |n| n.start_position().row + 1);
            return Err(ChunkerError::parse(format!("syntax error at line {line}")));
        }

        let mut module = Module::default();
        let mut cursor = root.walk();
        let children: Vec<_> = root.named_children(&mut cursor).collect();

        for child in children {
            match child.kind() {
                "package_declaration" => {
                    module.package = package_decl(source, child);
                }
                "import_declaration" => {
                    module.imports.push(import_decl(source, child));
                }
                _ => {
                    if let Some(decl) = self.type_decl(source, child, 0) {
                        module.types.push(decl);
                    }
                }
            }
        }

        Ok(module)
    }
}

/// First node kind among `candidates` that the grammar defines
pub fn probe_node_kind(language: &tree_sitter::Language, candidates: &[&str]) -> Option<u16> {
    candidates.iter().find_map(|kind| {
        let id = language.id_for_node_kind(kind, true);
        (id != 0).then_some(id)
    })
}

/// Line span of a node, 1-indexed and inclusive
fn span_of(node: Node) -> LineSpan {
    let start = node.start_position().row + 1;
    let end_pos = node.end_position();
    let mut end = end_pos.row + 1;
    if end_pos.column == 0 && end > start {
        end -= 1;
    }
    LineSpan::new(start, end)
}

fn node_text<'s>(source: &'s str, node: Node) -> &'s str {
    &source[node.start_byte()..node.end_byte()]
}

fn member_name(source: &str, node: Node) -> Option<String> {
    let name = match node.kind() {
        "field_declaration" | "constant_declaration" => node
            .child_by_field_name("declarator")
            .and_then(|d| d.child_by_field_name("name")),
        _ => node.child_by_field_name("name"),
    };
    name.map(|n| node_text(source, n).to_string())
}

fn package_decl(source: &str, node: Node) -> Option<PackageDecl> {
    let mut cursor = node.walk();
    let name = node
        .named_children(&mut cursor)
        .find(|child| matches!(child.kind(), "identifier" | "scoped_identifier"))?;

    Some(PackageDecl {
        name: node_text(source, name).to_string(),
        span: span_of(node),
    })
}

fn import_decl(source: &str, node: Node) -> ImportDecl {
    let mut is_static = false;
    let mut is_wildcard = false;

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "static" => is_static = true,
            "asterisk" => is_wildcard = true,
            _ => {}
        }
    }

    let text = node_text(source, node)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    ImportDecl {
        kind: ImportKind::from_flags(is_static, is_wildcard),
        text,
        span: span_of(node),
    }
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}
