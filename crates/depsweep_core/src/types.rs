use serde::Serialize;
use std::path::PathBuf;

/// One import-like occurrence found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReference {
    pub raw_path: String,
    pub origin_file: PathBuf,
    pub kind: ImportKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// `import x from "pkg"`, `export * from "pkg"`
    Static,
    /// `import("pkg")`
    Dynamic,
    /// `require("pkg")`
    Require,
    /// ``require`pkg` `` or `` require(`pkg`) `` without interpolation
    TemplateLiteral,
}

/// A non-fatal failure tied to one file or installed package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileAnalysisError {
    pub file: PathBuf,
    pub message: String,
}

impl FileAnalysisError {
    pub fn new(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self { file: file.into(), message: message.into() }
    }
}

impl std::fmt::Display for FileAnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Outcome of a best-effort read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe<T> {
    Found(T),
    /// The read failed and `value` is a substituted default
    Fallback { value: T, reason: String },
}

impl<T> Probe<T> {
    pub fn value(&self) -> &T {
        match self {
            Probe::Found(v) | Probe::Fallback { value: v, .. } => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Probe::Found(v) | Probe::Fallback { value: v, .. } => v,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Probe::Fallback { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Probe::Found(_) => None,
            Probe::Fallback { reason, .. } => Some(reason),
        }
    }
}
