// This software is released under the MIT license.
// See file LICENSE for full license details.
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::runtime::{DiagnosticSink, Error};

/// What to do when a companion executable cannot be found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DependencyPolicy {
    /// Log a warning and carry on.
    #[default]
    WarnOnly,
    /// Fail with `MissingDependency`.
    FailFast,
}

///////////////////////////////
/// Ordered list of directories searched for companion executables.
/// Built explicitly, the process environment is never modified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// `extra` first, then the directory of the running executable, then `$PATH`.
    pub fn from_env(extra: &[PathBuf]) -> Self {
        let mut dirs = extra.to_vec();
        if let Some(dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            dirs.push(dir);
        }
        if let Some(path) = std::env::var_os("PATH") {
            dirs.extend(std::env::split_paths(&path));
        }
        Self { dirs }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// First executable file called `utility` along the search path.
    pub fn find(&self, utility: &str) -> Option<PathBuf> {
        self.dirs
            .iter()
            .map(|dir| dir.join(utility))
            .find(|candidate| is_executable(candidate))
    }
}

impl fmt::Display for SearchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dirs.iter().map(|d| d.display()).join(":"))
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Where each companion executable was found. Utilities that were not found
/// resolve to their bare name.
#[derive(Clone, Debug, Default)]
pub struct CompanionTools {
    found: BTreeMap<String, PathBuf>,
}

impl CompanionTools {
    pub fn program(&self, utility: &str) -> PathBuf {
        self.found
            .get(utility)
            .cloned()
            .unwrap_or_else(|| PathBuf::from(utility))
    }

    pub fn is_found(&self, utility: &str) -> bool {
        self.found.contains_key(utility)
    }
}

/// Look up every utility on the search path.
pub fn check_companions(
    utilities: &[&str],
    search_path: &SearchPath,
    policy: DependencyPolicy,
    sink: &mut dyn DiagnosticSink,
) -> Result<CompanionTools, Error> {
    let mut tools = CompanionTools::default();
    for utility in utilities {
        sink.debug(&format!("Checking for {}", utility));
        match search_path.find(utility) {
            Some(path) => {
                sink.debug(&format!("Found {} at {}", utility, path.display()));
                tools.found.insert(utility.to_string(), path);
            }
            None => {
                let err = Error::missing_dependency(*utility, search_path.to_string());
                match policy {
                    DependencyPolicy::FailFast => return Err(err),
                    DependencyPolicy::WarnOnly => sink.warn(&err.to_string()),
                }
            }
        }
    }
    Ok(tools)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::CaptureSink;
    use std::fs;

    fn fake_tool(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
        path
    }

    #[test]
    fn finds_tool_in_first_matching_dir() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        fake_tool(second.path(), "kmat_tools");
        let expected = fake_tool(first.path(), "kmat_tools");

        let search = SearchPath::new(vec![first.path().into(), second.path().into()]);
        assert_eq!(search.find("kmat_tools"), Some(expected));
        assert_eq!(search.find("ggcat"), None);
    }

    #[cfg(unix)]
    #[test]
    fn skips_non_executable_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ggcat"), "").unwrap();
        let search = SearchPath::new(vec![dir.path().into()]);
        assert_eq!(search.find("ggcat"), None);
    }

    #[test]
    fn extra_dirs_come_first() {
        let search = SearchPath::from_env(&[PathBuf::from("/opt/muset/bin")]);
        assert_eq!(search.dirs()[0], PathBuf::from("/opt/muset/bin"));
        assert!(search.dirs().len() >= 2);
    }

    #[test]
    fn missing_tool_warns_by_default() {
        let dir = tempfile::tempdir().unwrap();
        fake_tool(dir.path(), "kmat_tools");
        let search = SearchPath::new(vec![dir.path().into()]);
        let mut sink = CaptureSink::new();

        let tools = check_companions(
            &["kmat_tools", "ggcat"],
            &search,
            DependencyPolicy::WarnOnly,
            &mut sink,
        )
        .unwrap();

        assert!(tools.is_found("kmat_tools"));
        assert!(!tools.is_found("ggcat"));
        assert_eq!(tools.program("ggcat"), PathBuf::from("ggcat"));
        assert_eq!(tools.program("kmat_tools"), dir.path().join("kmat_tools"));
        let warnings = sink.messages(log::Level::Warn);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("'ggcat'"));
    }

    #[test]
    fn missing_tool_fails_under_strict_policy() {
        let search = SearchPath::new(vec![]);
        let mut sink = CaptureSink::new();
        let err = check_companions(
            &["muset-kmtricks"],
            &search,
            DependencyPolicy::FailFast,
            &mut sink,
        )
        .unwrap_err();
        assert_eq!(err, Error::missing_dependency("muset-kmtricks", ""));
    }
}
