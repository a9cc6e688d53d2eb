use clap::Parser;
use depsweep_core::{CollectorConfig, EXCLUDED_DIRS, SOURCE_EXTENSIONS};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "unused")]
#[command(about = "Find declared dependencies that no source file imports")]
pub struct Config {
    /// Root directory of the project (defaults to the nearest directory with a package.json)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Include devDependencies in the analysis
    #[arg(short, long)]
    pub dev: bool,

    /// Print the result as JSON instead of a report
    #[arg(long)]
    pub json: bool,

    /// Source file extension to scan; replaces the default set when given (repeatable)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Extra directory name to skip, on top of node_modules, dist, build, coverage and .git (repeatable)
    #[arg(long = "exclude", value_name = "DIR")]
    pub exclude: Vec<String>,
}

impl Config {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: Some(root.into()), ..Default::default() }
    }

    /// Discovery settings for `root`, with the defaults filled in.
    pub fn collector_config(&self, root: &Path) -> CollectorConfig {
        let extensions = if self.extensions.is_empty() {
            SOURCE_EXTENSIONS.iter().map(|e| e.to_string()).collect()
        } else {
            self.extensions.iter().map(|e| e.trim_start_matches('.').to_string()).collect()
        };

        let mut exclude: Vec<String> = EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect();
        for dir in &self.exclude {
            if !exclude.contains(dir) {
                exclude.push(dir.clone());
            }
        }

        CollectorConfig { root: root.to_path_buf(), extensions, exclude }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::parse_from(["unused"]);
        assert!(cfg.root.is_none());
        assert!(!cfg.dev);

        let collector = cfg.collector_config(Path::new("/project"));
        assert_eq!(collector.extensions.len(), SOURCE_EXTENSIONS.len());
        assert_eq!(collector.exclude.len(), EXCLUDED_DIRS.len());
    }

    #[test]
    fn test_extensions_replace_defaults() {
        let cfg = Config::parse_from(["unused", "--ext", "ts", "--ext", ".tsx"]);
        let collector = cfg.collector_config(Path::new("/project"));
        assert_eq!(collector.extensions, vec!["ts", "tsx"]);
    }

    #[test]
    fn test_exclude_extends_defaults() {
        let cfg = Config::parse_from(["unused", "--exclude", "vendor", "--exclude", "dist"]);
        let collector = cfg.collector_config(Path::new("/project"));
        assert!(collector.exclude.contains(&"vendor".to_string()));
        assert!(collector.exclude.contains(&"node_modules".to_string()));
        assert_eq!(collector.exclude.len(), EXCLUDED_DIRS.len() + 1);
    }

    #[test]
    fn test_root_and_dev_flags() {
        let cfg = Config::parse_from(["unused", "--root", "/tmp/app", "-d", "--json"]);
        assert_eq!(cfg.root, Some(PathBuf::from("/tmp/app")));
        assert!(cfg.dev);
        assert!(cfg.json);
    }
}
