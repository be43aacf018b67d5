use crate::syntax::{ImportKind, Module};

/// Package + import preamble shared by every chunk of one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderText {
    package_line: String,
    imports: Vec<String>,
    text: String,
}

impl HeaderText {
    /// Render the preamble for a parsed module
    pub fn build(module: &Module) -> Self {
        let package_line = module
            .package
            .as_ref()
            .map(|pkg| format!("package {};\n\n", pkg.name))
            .unwrap_or_default();

        let imports: Vec<String> = ImportKind::ALL
            .iter()
            .flat_map(|kind| module.imports_of(*kind))
            .map(|import| import.text.clone())
            .collect();

        let mut text = package_line.clone();
        for import in &imports {
            text.push_str(import);
            text.push('\n');
        }
        if !imports.is_empty() {
            text.push('\n');
        }

        Self {
            package_line,
            imports,
            text,
        }
    }

    /// Package line plus its blank line, or empty
    #[must_use]
    pub fn package_line(&self) -> &str {
        &self.package_line
    }

    /// Import statements in rendering order
    #[must_use]
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
