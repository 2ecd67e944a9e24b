use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use crate::treesitter::detect_python;

pub struct FileWalker {
    root: PathBuf,
    excludes: GlobSet,
}

impl FileWalker {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            excludes: GlobSet::empty(),
        }
    }

    /// Skip files whose root-relative path matches any of `patterns`.
    pub fn with_excludes(mut self, patterns: &[String]) -> Result<Self, globset::Error> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(Glob::new(pattern)?);
        }
        self.excludes = builder.build()?;
        Ok(self)
    }

    /// Python files under the root, sorted for deterministic batch output.
    pub fn walk(&self) -> Vec<PathBuf> {
        let mut entries = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .add_custom_ignore_filename(".docugenignore")
            .build();

        for result in walker {
            let entry = match result {
                Ok(e) => e,
                Err(_) => continue,
            };

            if !entry.file_type().map_or(false, |ft| ft.is_file()) {
                continue;
            }

            let path = entry.into_path();
            if !detect_python(&path) {
                continue;
            }
            let relative = path.strip_prefix(&self.root).unwrap_or(&path);
            if self.excludes.is_match(relative) {
                continue;
            }
            entries.push(path);
        }

        entries.sort();
        entries
    }
}
