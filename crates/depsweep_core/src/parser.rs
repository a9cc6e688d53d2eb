use log::{debug, trace};
use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_ast_visit::{Visit, walk};
use oxc_parser::{Parser as OxcParser, ParserReturn};
use oxc_span::SourceType;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    constants::COMPONENT_EXTENSIONS,
    types::{FileAnalysisError, ImportKind, ImportReference},
};

/// Identifiers that turn a tagged template into a module reference.
const TEMPLATE_TAGS: &[&str] = &["require", "import"];

/// Syntax extensions enabled for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Script,
    Jsx,
    TypeScript,
    TypeScriptJsx,
}

impl Dialect {
    pub fn for_extension(ext: &str) -> Self {
        match ext {
            "jsx" => Dialect::Jsx,
            "ts" | "mts" | "cts" => Dialect::TypeScript,
            "tsx" => Dialect::TypeScriptJsx,
            _ => Dialect::Script,
        }
    }

    /// Dialect for a `<script lang="...">` block inside a component file.
    fn for_script_lang(lang: Option<&str>) -> Self {
        match lang {
            Some("ts") => Dialect::TypeScript,
            Some("tsx") => Dialect::TypeScriptJsx,
            Some("jsx") => Dialect::Jsx,
            _ => Dialect::Script,
        }
    }

    fn source_type(self, commonjs: bool) -> SourceType {
        SourceType::default()
            .with_jsx(matches!(self, Dialect::Jsx | Dialect::TypeScriptJsx))
            .with_typescript(matches!(self, Dialect::TypeScript | Dialect::TypeScriptJsx))
            .with_module(!commonjs)
    }
}

/// Reads `root/rel` and extracts every module reference in it.
pub fn imports_for(root: &Path, rel: &Path) -> Result<Vec<ImportReference>, FileAnalysisError> {
    trace!("Parsing file for imports: {}", rel.display());
    let src = fs::read_to_string(root.join(rel))
        .map_err(|e| FileAnalysisError::new(rel, format!("Failed to read file: {}", e)))?;
    extract_imports(rel, &src)
}

/// Extracts module references from one file's text, picking the dialect from its extension.
pub fn extract_imports(file: &Path, src: &str) -> Result<Vec<ImportReference>, FileAnalysisError> {
    let ext = file.extension().and_then(|e| e.to_str()).unwrap_or_default();

    let refs = if COMPONENT_EXTENSIONS.contains(&ext) {
        let mut refs = Vec::new();
        for block in script_blocks(src) {
            let dialect = Dialect::for_script_lang(block.lang);
            refs.extend(parse_references(file, block.body, dialect.source_type(false))?);
        }
        refs
    } else {
        let commonjs = matches!(ext, "cjs" | "cts");
        parse_references(file, src, Dialect::for_extension(ext).source_type(commonjs))?
    };

    debug!("Found {} import references in {}", refs.len(), file.display());
    Ok(refs)
}

fn parse_references(
    file: &Path,
    src: &str,
    st: SourceType,
) -> Result<Vec<ImportReference>, FileAnalysisError> {
    let allocator = Allocator::default();
    let ParserReturn { program, errors, panicked, .. } = OxcParser::new(&allocator, src, st).parse();

    if let Some(err) = errors.first() {
        trace!("Parse failed for {}: {}", file.display(), err);
        return Err(FileAnalysisError::new(file, format!("Failed to parse: {}", err)));
    }
    if panicked {
        return Err(FileAnalysisError::new(file, "Failed to parse: parser aborted"));
    }

    let mut visitor = ImportVisitor { origin: file.to_path_buf(), refs: Vec::new() };
    visitor.visit_program(&program);
    Ok(visitor.refs)
}

struct ImportVisitor {
    origin: PathBuf,
    refs: Vec<ImportReference>,
}

impl ImportVisitor {
    fn push(&mut self, raw_path: &str, kind: ImportKind) {
        trace!("Found {:?} reference: '{}' in {}", kind, raw_path, self.origin.display());
        self.refs.push(ImportReference {
            raw_path: raw_path.to_string(),
            origin_file: self.origin.clone(),
            kind,
        });
    }
}

/// The only chunk of a template with no interpolation.
fn static_template_text<'s>(tpl: &'s TemplateLiteral<'_>) -> Option<&'s str> {
    if !tpl.expressions.is_empty() || tpl.quasis.len() != 1 {
        return None;
    }
    tpl.quasis.first().map(|q| q.value.raw.as_str())
}

/// A module path given as a compile-time literal argument.
fn literal_source<'e>(expr: &'e Expression<'_>) -> Option<(&'e str, bool)> {
    match expr {
        Expression::StringLiteral(sl) => Some((sl.value.as_str(), false)),
        Expression::TemplateLiteral(tl) => static_template_text(tl).map(|s| (s, true)),
        _ => None,
    }
}

impl<'a> Visit<'a> for ImportVisitor {
    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        self.push(decl.source.value.as_str(), ImportKind::Static);
    }

    fn visit_export_named_declaration(&mut self, decl: &ExportNamedDeclaration<'a>) {
        if let Some(source) = &decl.source {
            self.push(source.value.as_str(), ImportKind::Static);
        }
        walk::walk_export_named_declaration(self, decl);
    }

    fn visit_export_all_declaration(&mut self, decl: &ExportAllDeclaration<'a>) {
        self.push(decl.source.value.as_str(), ImportKind::Static);
    }

    fn visit_call_expression(&mut self, ce: &CallExpression<'a>) {
        if let Expression::Identifier(callee) = &ce.callee
            && callee.name.as_str() == "require"
            && let Some(first) = ce.arguments.first().and_then(|a| a.as_expression())
            && let Some((path, templated)) = literal_source(first)
        {
            let kind = if templated { ImportKind::TemplateLiteral } else { ImportKind::Require };
            self.push(path, kind);
        }
        // Arguments and callee may hold nested require() calls
        walk::walk_call_expression(self, ce);
    }

    fn visit_import_expression(&mut self, ie: &ImportExpression<'a>) {
        if let Some((path, templated)) = literal_source(&ie.source) {
            let kind = if templated { ImportKind::TemplateLiteral } else { ImportKind::Dynamic };
            self.push(path, kind);
        }
        walk::walk_import_expression(self, ie);
    }

    fn visit_ts_import_equals_declaration(&mut self, decl: &TSImportEqualsDeclaration<'a>) {
        if let TSModuleReference::ExternalModuleReference(ext) = &decl.module_reference {
            self.push(ext.expression.value.as_str(), ImportKind::Require);
        }
        walk::walk_ts_import_equals_declaration(self, decl);
    }

    fn visit_tagged_template_expression(&mut self, tte: &TaggedTemplateExpression<'a>) {
        if let Expression::Identifier(tag) = &tte.tag
            && TEMPLATE_TAGS.contains(&tag.name.as_str())
            && let Some(path) = static_template_text(&tte.quasi)
        {
            self.push(path, ImportKind::TemplateLiteral);
        }
        walk::walk_tagged_template_expression(self, tte);
    }
}

struct ScriptBlock<'s> {
    lang: Option<&'s str>,
    body: &'s str,
}

/// Cuts every `<script>` block out of a single-file component.
fn script_blocks(src: &str) -> Vec<ScriptBlock<'_>> {
    let lower = src.to_ascii_lowercase();
    let mut blocks = Vec::new();
    let mut cursor = 0;

    while let Some(start) = lower[cursor..].find("<script").map(|i| i + cursor) {
        let Some(tag_end) = open_tag_end(src, start) else {
            break;
        };
        let attrs = &src[start + "<script".len()..tag_end];
        if attrs.trim_end().ends_with('/') {
            cursor = tag_end + 1;
            continue;
        }

        let body_start = tag_end + 1;
        let Some(body_end) = lower[body_start..].find("</script").map(|i| i + body_start) else {
            break;
        };

        blocks.push(ScriptBlock { lang: script_lang(attrs), body: &src[body_start..body_end] });
        cursor = body_end + "</script".len();
    }

    blocks
}

/// Offset of the `>` closing the tag opened at `start`, skipping quoted
/// attribute values such as `generic="T extends Array<string>"`.
fn open_tag_end(src: &str, start: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (i, &b) in src.as_bytes()[start..].iter().enumerate() {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return Some(start + i),
            None => {}
        }
    }
    None
}

fn script_lang(attrs: &str) -> Option<&str> {
    attribute_value(attrs, "lang")
}

/// Value of the attribute named `wanted` (case-insensitive) in a tag's
/// attribute text. Quoted and bare values are both accepted.
fn attribute_value<'s>(attrs: &'s str, wanted: &str) -> Option<&'s str> {
    let mut rest = attrs;
    loop {
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
        if rest.is_empty() {
            return None;
        }

        let name_end = rest.find(|c: char| c.is_whitespace() || c == '=').unwrap_or(rest.len());
        let name = &rest[..name_end];
        rest = rest[name_end..].trim_start();

        let mut value = None;
        if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            match after_eq.chars().next() {
                Some(q @ ('"' | '\'')) => {
                    let body = &after_eq[1..];
                    let end = body.find(q).unwrap_or(body.len());
                    value = Some(&body[..end]);
                    rest = body.get(end + 1..).unwrap_or_default();
                }
                _ => {
                    let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
                    value = Some(&after_eq[..end]);
                    rest = &after_eq[end..];
                }
            }
        }

        if name.eq_ignore_ascii_case(wanted) {
            return value;
        }
    }
}
