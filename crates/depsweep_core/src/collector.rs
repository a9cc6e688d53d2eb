use anyhow::{Result, anyhow};
use ignore::{Walk, WalkBuilder};
use log::{debug, trace};
use std::path::PathBuf;

use crate::constants::{EXCLUDED_DIRS, SOURCE_EXTENSIONS};

pub struct CollectorConfig {
    pub root: PathBuf,
    pub extensions: Vec<String>,
    pub exclude: Vec<String>,
}

impl CollectorConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: SOURCE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            exclude: EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// Lazily yields project-relative source paths in lexicographic walk order.
pub struct SourceFiles {
    root: PathBuf,
    extensions: Vec<String>,
    walker: Walk,
}

impl Iterator for SourceFiles {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let dent = match self.walker.next()? {
                Ok(dent) => dent,
                Err(e) => return Some(Err(anyhow!("Failed to walk directory: {}", e))),
            };

            if !dent.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let p = dent.path();
            let matches = p
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| self.extensions.iter().any(|want| want == ext));
            if !matches {
                continue;
            }

            let rel = p.strip_prefix(&self.root).unwrap_or(p).to_path_buf();
            trace!("Found source file: {}", rel.display());
            return Some(Ok(rel));
        }
    }
}

pub fn collect_sources(cfg: &CollectorConfig) -> SourceFiles {
    debug!(
        "Walking directory tree from root: {} (extensions: {:?}, excluded: {:?})",
        cfg.root.display(),
        cfg.extensions,
        cfg.exclude
    );

    let exclude = cfg.exclude.clone();
    let walker = WalkBuilder::new(&cfg.root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |dent| {
            let excluded = dent.depth() > 0
                && dent.file_type().is_some_and(|ft| ft.is_dir())
                && dent.file_name().to_str().is_some_and(|name| exclude.iter().any(|x| x == name));
            if excluded {
                trace!("Skipping excluded directory: {}", dent.path().display());
            }
            !excluded
        })
        .build();

    SourceFiles { root: cfg.root.clone(), extensions: cfg.extensions.clone(), walker }
}
