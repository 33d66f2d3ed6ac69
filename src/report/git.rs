//! Link-style reporter for repositories hosted behind a web UI.

use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use super::{write_plain, ErrorCounter};
use crate::diagnostics::{Diagnostic, Reporter};

/// Remote metadata of one repository root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GitInfo {
    /// Web URL of the repository, e.g. `https://github.com/owner/repo`.
    pub url: String,
    pub branch: String,
    pub commit: String,
    /// Last path segment of `url`.
    pub repo_name: String,
}

impl GitInfo {
    /// Query `git` in `root`.
    fn resolve(root: &Path) -> Option<Self> {
        let remote = git(root, &["config", "--get", "remote.origin.url"])?;
        let branch = git(root, &["rev-parse", "--abbrev-ref", "HEAD"])?;
        let commit = git(root, &["rev-parse", "HEAD"])?;
        debug!(root = %root.display(), %branch, %commit, "resolved repository");
        Some(Self::from_parts(&remote, branch, commit))
    }

    pub fn from_parts(remote: &str, branch: String, commit: String) -> Self {
        let url = web_url(remote);
        let repo_name = url.rsplit('/').next().unwrap_or_default().to_string();
        Self {
            url,
            branch,
            commit,
            repo_name,
        }
    }

    /// Link to `line` of `relative` at the pinned commit.
    pub fn line_url(&self, relative: &str, line: u32) -> String {
        format!("{}/blob/{}/{}#L{}", self.url, self.commit, relative, line)
    }
}

/// Turn a remote URL into the repository's web URL.
///
/// `git@host:owner/repo.git` and `ssh://git@host/owner/repo.git` become
/// `https://host/owner/repo`; other URLs only lose a trailing `.git`.
pub fn web_url(remote: &str) -> String {
    let remote = remote.trim();
    let remote = remote.strip_suffix(".git").unwrap_or(remote);
    if let Some(rest) = remote.strip_prefix("ssh://git@") {
        return format!("https://{rest}");
    }
    if let Some((host, path)) = remote.strip_prefix("git@").and_then(|rest| rest.split_once(':')) {
        return format!("https://{host}/{path}");
    }
    remote.to_string()
}

fn git(dir: &Path, args: &[&str]) -> Option<String> {
    let output = match Command::new("git").args(args).current_dir(dir).output() {
        Ok(output) => output,
        Err(err) => {
            warn!(%err, dir = %dir.display(), "failed to run git");
            return None;
        }
    };
    if !output.status.success() {
        debug!(dir = %dir.display(), ?args, "git exited with {}", output.status);
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Nearest ancestor directory of `file` holding a `.git` entry.
pub fn repository_root(file: &Path) -> Option<PathBuf> {
    let file = std::fs::canonicalize(file).unwrap_or_else(|_| file.to_path_buf());
    file.ancestors()
        .skip(1)
        .take_while(|dir| !dir.as_os_str().is_empty())
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

/// Prints each diagnostic as a checklist item linking to the remote line.
///
/// Remote metadata is resolved once per repository root; failures are cached
/// too. A diagnostic that cannot be linked, including whole-file findings,
/// is printed in the plain format.
pub struct GitLinkReporter<W: Write = Stdout> {
    out: W,
    counter: ErrorCounter,
    cache: FxHashMap<PathBuf, Option<GitInfo>>,
}

impl GitLinkReporter<Stdout> {
    pub fn stdout(strip_prefix: impl Into<String>) -> Self {
        Self::new(io::stdout(), strip_prefix)
    }
}

impl<W: Write> GitLinkReporter<W> {
    pub fn new(out: W, strip_prefix: impl Into<String>) -> Self {
        Self {
            out,
            counter: ErrorCounter::new(strip_prefix),
            cache: FxHashMap::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Seed the cache, e.g. when metadata is known up front.
    pub fn insert_info(&mut self, root: impl Into<PathBuf>, info: Option<GitInfo>) {
        self.cache.insert(root.into(), info);
    }

    fn link_line(&mut self, diagnostic: &Diagnostic) -> Option<String> {
        let line = diagnostic.pos?.line_one_indexed();
        let path = Path::new(&*diagnostic.file);
        let root = repository_root(path)?;
        let info = self
            .cache
            .entry(root.clone())
            .or_insert_with(|| GitInfo::resolve(&root))
            .as_ref()?;

        let absolute = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let relative = absolute.strip_prefix(&root).ok()?;
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let basename = path.file_name()?.to_string_lossy();

        Some(format!(
            "- [ ] [{}:{}:{}]({}) {}",
            info.repo_name,
            basename,
            line,
            info.line_url(&relative, line),
            diagnostic.message
        ))
    }
}

impl<W: Write> Reporter for GitLinkReporter<W> {
    fn report(&mut self, diagnostic: Diagnostic) {
        let result = match self.link_line(&diagnostic) {
            Some(line) => writeln!(self.out, "{line}"),
            None => {
                let name = self.counter.display_name(&diagnostic.file);
                write_plain(&mut self.out, name, &diagnostic)
            }
        };
        if let Err(err) = result {
            warn!(%err, "failed to write diagnostic");
        }
        self.counter.record(diagnostic.severity);
    }

    fn error_count(&self) -> usize {
        self.counter.count()
    }
}
