//! Which tracked files get restyled

use crate::config::SelectionConfig;

/// Path filter built from the `[selection]` config section.
///
/// Paths are compared as plain strings relative to the repository root, the
/// way the VCS lists them (`js/src/jsapi.cpp`).
#[derive(Debug, Clone)]
pub struct FileSelection {
    extensions: Vec<String>,
    directories: Vec<String>,
    blacklist: Vec<String>,
}

impl FileSelection {
    pub fn new(config: &SelectionConfig) -> Self {
        Self {
            extensions: config.extensions.clone(),
            directories: config.directories.clone(),
            blacklist: config.blacklist.clone(),
        }
    }

    /// A path qualifies when it has a listed extension, is not under a
    /// blacklisted prefix, and is under at least one listed directory.
    pub fn should_restyle(&self, path: &str) -> bool {
        if !self.extensions.iter().any(|ext| path.ends_with(ext.as_str())) {
            return false;
        }

        if self.blacklist.iter().any(|dir| path.starts_with(dir.as_str())) {
            return false;
        }

        self.directories.iter().any(|dir| path.starts_with(dir.as_str()))
    }

    /// Keep only the paths that qualify, in their original order.
    pub fn filter<'a, I>(&self, paths: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        paths
            .into_iter()
            .filter(|path| self.should_restyle(path))
            .map(String::from)
            .collect()
    }
}
