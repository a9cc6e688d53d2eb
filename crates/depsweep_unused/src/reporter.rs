use std::{
    env,
    io::{self, Write},
    path::{Component, Path, PathBuf},
};

use colored::Colorize;
use log::{debug, trace};

use crate::types::{AnalysisResult, PackageDetail};

/// Format a byte count as a human-readable string.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Root-relative path re-expressed relative to the working directory, so
/// terminals can turn it into a link.
fn relativize_to_cwd(root: &Path, relative_to_root: &Path) -> String {
    let Ok(cwd) = env::current_dir() else {
        debug!("Failed to get current directory");
        return relative_to_root.display().to_string();
    };
    let abs_path = root.join(relative_to_root);
    match make_relative(&abs_path, &cwd) {
        Some(rel_path) => rel_path.display().to_string(),
        None => {
            trace!("Could not relativize {:?}, using original", relative_to_root);
            relative_to_root.display().to_string()
        }
    }
}

/// Path from `base` to `target`, or None when they share no root.
fn make_relative(target: &Path, base: &Path) -> Option<PathBuf> {
    let target_parts: Vec<Component> = target.components().collect();
    let base_parts: Vec<Component> = base.components().collect();

    if target_parts.first() != base_parts.first() {
        return None;
    }

    let common = target_parts.iter().zip(&base_parts).take_while(|(t, b)| t == b).count();

    let mut result = PathBuf::new();
    for _ in &base_parts[common..] {
        result.push("..");
    }
    for component in &target_parts[common..] {
        match component {
            Component::Normal(p) => result.push(p),
            Component::ParentDir => result.push(".."),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    if result.as_os_str().is_empty() { Some(PathBuf::from(".")) } else { Some(result) }
}

fn describe(detail: Option<&PackageDetail>) -> (String, String) {
    match detail {
        Some(d) => (format!("v{}", d.version), format!("[{}]", format_size(d.size_bytes))),
        None => ("v?".to_string(), "[?]".to_string()),
    }
}

pub fn print_json<W: Write>(writer: &mut W, result: &AnalysisResult) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)?;
    writer.flush()
}

pub fn print_report<W: Write>(
    writer: &mut W,
    result: &AnalysisResult,
    root: &Path,
) -> io::Result<()> {
    debug!(
        "Printing report: {} used, {} unused, {} errors",
        result.used.len(),
        result.unused.len(),
        result.errors.len()
    );

    writeln!(writer, "\n{} Dependency analysis for {}\n", "📦".bold(), root.display())?;

    writeln!(writer, "{}", "Used dependencies:".bold())?;
    if result.used.is_empty() {
        writeln!(writer, "  {}", "none".dimmed())?;
    }
    for name in &result.used {
        let (version, size) = describe(result.package_details.get(name));
        writeln!(
            writer,
            "  {} {} {} {}",
            "✓".green(),
            name.bold(),
            version.dimmed(),
            size.blue()
        )?;
    }

    if !result.unused.is_empty() {
        writeln!(writer, "\n{}", "Unused dependencies:".bold())?;
        for name in &result.unused {
            let (version, size) = describe(result.package_details.get(name));
            writeln!(
                writer,
                "  {} {} {} {}",
                "✗".red(),
                name.bold(),
                version.dimmed(),
                size.blue()
            )?;
        }
    }

    if !result.errors.is_empty() {
        writeln!(writer, "\n{}", "Errors encountered:".bold())?;
        for error in &result.errors {
            writeln!(
                writer,
                "  {} {}: {}",
                "!".red(),
                relativize_to_cwd(root, &error.file).blue(),
                error.message
            )?;
        }
    }

    print_summary(writer, result)?;
    writer.flush()
}

fn print_summary<W: Write>(writer: &mut W, result: &AnalysisResult) -> io::Result<()> {
    let total = result.used.len() + result.unused.len();

    writeln!(writer, "\n{}", "─".repeat(60).dimmed())?;
    writeln!(writer, "{}", "Summary".bold())?;
    writeln!(writer, "  {} used dependencies", result.used.len().to_string().green().bold())?;
    writeln!(writer, "  {} unused dependencies", result.unused.len().to_string().red().bold())?;
    if total > 0 {
        let usage = result.used.len() * 100 / total;
        writeln!(writer, "  Usage: {}%", usage.to_string().cyan())?;
    }
    if !result.includes_dev_dependencies {
        writeln!(writer, "  {}", "devDependencies not included (use --dev)".dimmed())?;
    }

    if !result.unused.is_empty() {
        let reclaimable: u64 = result
            .unused
            .iter()
            .filter_map(|name| result.package_details.get(name))
            .map(|d| d.size_bytes)
            .sum();
        writeln!(writer, "  Unused on disk: {}", format_size(reclaimable).yellow())?;
        writeln!(
            writer,
            "\n{} Unused means no static import was found. Check for runtime-built requires, \
             CLI tools and config-file references before removing anything.",
            "⚠".yellow().bold()
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use depsweep_core::FileAnalysisError;

    fn sample() -> AnalysisResult {
        let mut result = AnalysisResult {
            includes_dev_dependencies: false,
            files_analyzed: 2,
            ..Default::default()
        };
        result.used.insert("react".to_string());
        result.unused.insert("left-pad".to_string());
        for (name, version, size) in [("react", "18.2.0", 2048), ("left-pad", "1.3.0", 512)] {
            result.package_details.insert(
                name.to_string(),
                PackageDetail { name: name.to_string(), version: version.to_string(), size_bytes: size },
            );
        }
        result.errors.push(FileAnalysisError::new("src/broken.js", "Failed to parse: boom"));
        result
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1048576), "1.00 MB");
        assert_eq!(format_size(1073741824), "1.00 GB");
    }

    #[test]
    fn test_print_report_lists_everything() {
        colored::control::set_override(false);
        let mut out = Vec::new();
        print_report(&mut out, &sample(), Path::new("/project")).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("✓ react v18.2.0 [2.00 KB]"));
        assert!(text.contains("✗ left-pad v1.3.0 [512 B]"));
        assert!(text.contains("Failed to parse: boom"));
        assert!(text.contains("Usage: 50%"));
        assert!(text.contains("Unused on disk: 512 B"));
    }

    #[test]
    fn test_print_report_empty_project() {
        colored::control::set_override(false);
        let mut out = Vec::new();
        print_report(&mut out, &AnalysisResult::default(), Path::new("/project")).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("none"));
        assert!(!text.contains("Usage:"));
        assert!(!text.contains("Unused dependencies:"));
    }

    #[test]
    fn test_print_json_shape() {
        let mut out = Vec::new();
        print_json(&mut out, &sample()).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(v["used"], serde_json::json!(["react"]));
        assert_eq!(v["unused"], serde_json::json!(["left-pad"]));
        assert_eq!(v["packageDetails"]["react"]["sizeBytes"], 2048);
        assert_eq!(v["errors"][0]["file"], "src/broken.js");
        assert_eq!(v["includesDevDependencies"], false);
    }

    #[test]
    fn test_make_relative_same_dir() {
        let result = make_relative(Path::new("/project/src/file.ts"), Path::new("/project/src"));
        assert_eq!(result, Some(PathBuf::from("file.ts")));
    }

    #[test]
    fn test_make_relative_parent_dir() {
        let result =
            make_relative(Path::new("/project/src/file.ts"), Path::new("/project/src/components"));
        assert_eq!(result, Some(PathBuf::from("../file.ts")));
    }

    #[test]
    fn test_make_relative_sibling_dir() {
        let result =
            make_relative(Path::new("/project/apps/web/index.ts"), Path::new("/project/apps/api"));
        assert_eq!(result, Some(PathBuf::from("../web/index.ts")));
    }

    #[test]
    fn test_make_relative_same_path() {
        let result = make_relative(Path::new("/project/src"), Path::new("/project/src"));
        assert_eq!(result, Some(PathBuf::from(".")));
    }

    #[test]
    fn test_make_relative_no_shared_root() {
        assert_eq!(make_relative(Path::new("relative/a"), Path::new("/abs/b")), None);
    }
}
