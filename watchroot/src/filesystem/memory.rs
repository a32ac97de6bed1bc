//! In-memory filesystem with selectable case sensitivity.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::ffi::{OsStr, OsString};
use std::io::{self, ErrorKind};
use std::path::{Component, Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use super::{EntryKind, Filesystem};
use crate::case::CaseSensitivity;

/// Maximum number of symlinks followed during a single lookup.
const MAX_SYMLINK_HOPS: usize = 40;

#[derive(Debug, Clone)]
enum Node {
    Dir(BTreeMap<OsString, Node>),
    File,
    Symlink(PathBuf),
}

#[derive(Debug)]
struct State {
    root: Node,
    denied: BTreeSet<PathBuf>,
    unlistable: BTreeSet<PathBuf>,
}

/// A synthetic filesystem for exercising resolution against either case
/// behavior, independent of the host.
///
/// Entry names keep the casing they were created with. On an
/// [`CaseSensitivity::Insensitive`] instance, lookups match names without
/// regard to case, and `canonicalize` reports the stored casing, just like a
/// case-preserving desktop filesystem.
///
/// Paths are interpreted with `/` roots; relative paths are anchored at the
/// configured current directory (`/` by default).
///
/// # Examples
///
/// ```
/// use watchroot::filesystem::{Filesystem, MemoryFilesystem};
/// use watchroot::CaseSensitivity;
/// use std::path::Path;
///
/// let fs = MemoryFilesystem::new(CaseSensitivity::Sensitive);
/// fs.create_dir_all("/tmp/FOO/bar");
///
/// assert!(fs.canonicalize(Path::new("/tmp/foo/bar")).is_err());
/// assert!(fs.canonicalize(Path::new("/tmp/FOO/bar")).is_ok());
/// ```
#[derive(Debug)]
pub struct MemoryFilesystem {
    sensitivity: CaseSensitivity,
    current_dir: PathBuf,
    literal_canonicalize: bool,
    state: RwLock<State>,
}

impl MemoryFilesystem {
    /// Create an empty filesystem containing only `/`.
    #[must_use]
    pub fn new(sensitivity: CaseSensitivity) -> Self {
        Self {
            sensitivity,
            current_dir: PathBuf::from("/"),
            literal_canonicalize: false,
            state: RwLock::new(State {
                root: Node::Dir(BTreeMap::new()),
                denied: BTreeSet::new(),
                unlistable: BTreeSet::new(),
            }),
        }
    }

    /// Set the directory relative paths are anchored at.
    #[must_use]
    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = dir.into();
        self
    }

    /// Make `canonicalize` echo the caller's spelling instead of the stored
    /// casing.
    ///
    /// This models a canonicalization primitive that normalizes case without
    /// reporting it; existence is still checked.
    #[must_use]
    pub fn with_literal_canonicalize(mut self, literal: bool) -> Self {
        self.literal_canonicalize = literal;
        self
    }

    /// The case behavior of this filesystem.
    #[must_use]
    pub fn sensitivity(&self) -> CaseSensitivity {
        self.sensitivity
    }

    /// Create a directory and any missing parents.
    ///
    /// Existing components are reused according to the filesystem's case
    /// rules, so on an insensitive instance `create_dir_all("/a/B")` after
    /// `create_dir_all("/A")` yields `/A/B`.
    pub fn create_dir_all(&self, path: impl AsRef<Path>) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let mut node = &mut state.root;
        for name in normal_names(path.as_ref()) {
            node = self.child_or_insert(node, &name, || Node::Dir(BTreeMap::new()));
        }
    }

    /// Create an empty file, creating parent directories as needed.
    pub fn create_file(&self, path: impl AsRef<Path>) {
        self.insert_leaf(path.as_ref(), Node::File);
    }

    /// Create a symlink at `link` pointing to `target`.
    ///
    /// Relative targets are interpreted relative to the link's parent.
    pub fn symlink(&self, target: impl Into<PathBuf>, link: impl AsRef<Path>) {
        self.insert_leaf(link.as_ref(), Node::Symlink(target.into()));
    }

    /// Make the directory at `path` (given in its stored casing) unreadable.
    ///
    /// Listing it or traversing through it fails with `PermissionDenied`;
    /// the directory itself can still be examined from its parent.
    pub fn deny(&self, path: impl AsRef<Path>) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.denied.insert(rooted(path.as_ref()));
    }

    /// Make the directory at `path` traversable but not listable, like mode `0711`.
    pub fn deny_listing(&self, path: impl AsRef<Path>) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.unlistable.insert(rooted(path.as_ref()));
    }

    fn insert_leaf(&self, path: &Path, leaf: Node) {
        let names = normal_names(path);
        let Some((last, parents)) = names.split_last() else {
            return;
        };
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let mut node = &mut state.root;
        for name in parents {
            node = self.child_or_insert(node, name, || Node::Dir(BTreeMap::new()));
        }
        if let Node::Dir(children) = node {
            let key = self
                .find_child_name(children, last)
                .unwrap_or_else(|| last.clone());
            children.insert(key, leaf);
        }
    }

    fn child_or_insert<'a>(
        &self,
        node: &'a mut Node,
        name: &OsStr,
        make: impl FnOnce() -> Node,
    ) -> &'a mut Node {
        if !matches!(node, Node::Dir(_)) {
            *node = Node::Dir(BTreeMap::new());
        }
        let Node::Dir(children) = node else {
            unreachable!("node was just made a directory");
        };
        let key = self
            .find_child_name(children, name)
            .unwrap_or_else(|| name.to_os_string());
        children.entry(key).or_insert_with(make)
    }

    fn find_child_name(&self, children: &BTreeMap<OsString, Node>, name: &OsStr) -> Option<OsString> {
        if children.contains_key(name) {
            return Some(name.to_os_string());
        }
        children
            .keys()
            .find(|stored| self.sensitivity.names_match(stored, name))
            .cloned()
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        if path.has_root() {
            path.to_path_buf()
        } else {
            self.current_dir.join(path)
        }
    }

    /// Walk `path`, following symlinks, and return the stored-case path.
    fn resolve(&self, state: &State, path: &Path) -> io::Result<PathBuf> {
        let mut pending: VecDeque<OsString> = walk_names(&self.absolute(path));
        let mut current = PathBuf::from("/");
        let mut hops = 0;

        while let Some(name) = pending.pop_front() {
            if name == ".." {
                current.pop();
                continue;
            }

            if state.denied.contains(&current) {
                return Err(io::Error::new(
                    ErrorKind::PermissionDenied,
                    format!("permission denied: {}", current.display()),
                ));
            }

            let Some(Node::Dir(children)) = node_at(&state.root, &current) else {
                return Err(io::Error::other(format!(
                    "not a directory: {}",
                    current.display()
                )));
            };

            let stored = self.find_child_name(children, &name).ok_or_else(|| {
                io::Error::new(
                    ErrorKind::NotFound,
                    format!("no such entry: {}", current.join(&name).display()),
                )
            })?;

            match &children[&stored] {
                Node::Symlink(target) => {
                    hops += 1;
                    if hops > MAX_SYMLINK_HOPS {
                        return Err(io::Error::other("too many levels of symbolic links"));
                    }
                    if target.has_root() {
                        current = PathBuf::from("/");
                    }
                    for (i, part) in walk_names(target).into_iter().enumerate() {
                        pending.insert(i, part);
                    }
                }
                _ => current.push(stored),
            }
        }

        Ok(current)
    }
}

impl Filesystem for MemoryFilesystem {
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let stored = self.resolve(&state, path)?;
        if self.literal_canonicalize {
            Ok(lexical_absolute(&self.absolute(path)))
        } else {
            Ok(stored)
        }
    }

    fn metadata(&self, path: &Path) -> io::Result<EntryKind> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let stored = self.resolve(&state, path)?;
        match node_at(&state.root, &stored) {
            Some(Node::Dir(_)) => Ok(EntryKind::Directory),
            Some(Node::File) => Ok(EntryKind::File),
            Some(Node::Symlink(_)) => Ok(EntryKind::Other),
            None => Err(io::Error::from(ErrorKind::NotFound)),
        }
    }

    fn read_dir_names(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let stored = self.resolve(&state, path)?;
        if state.denied.contains(&stored) || state.unlistable.contains(&stored) {
            return Err(io::Error::new(
                ErrorKind::PermissionDenied,
                format!("permission denied: {}", stored.display()),
            ));
        }
        match node_at(&state.root, &stored) {
            Some(Node::Dir(children)) => Ok(children.keys().cloned().collect()),
            Some(_) => Err(io::Error::other(format!(
                "not a directory: {}",
                stored.display()
            ))),
            None => Err(io::Error::from(ErrorKind::NotFound)),
        }
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.current_dir.clone())
    }
}

/// Look up a node by its exact stored path without following symlinks.
fn node_at<'a>(root: &'a Node, stored: &Path) -> Option<&'a Node> {
    let mut node = root;
    for name in normal_names(stored) {
        match node {
            Node::Dir(children) => node = children.get(&name)?,
            _ => return None,
        }
    }
    Some(node)
}

fn normal_names(path: &Path) -> Vec<OsString> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_os_string()),
            _ => None,
        })
        .collect()
}

/// Names to walk, keeping `..` so the walker can interpret it.
fn walk_names(path: &Path) -> VecDeque<OsString> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_os_string()),
            Component::ParentDir => Some(OsString::from("..")),
            _ => None,
        })
        .collect()
}

fn rooted(path: &Path) -> PathBuf {
    let mut out = PathBuf::from("/");
    out.extend(normal_names(path));
    out
}

fn lexical_absolute(path: &Path) -> PathBuf {
    let mut out = PathBuf::from("/");
    for name in walk_names(path) {
        if name == ".." {
            out.pop();
        } else {
            out.push(name);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insensitive_lookup_reports_stored_case() {
        let fs = MemoryFilesystem::new(CaseSensitivity::Insensitive);
        fs.create_dir_all("/tmp/FOO/bar");

        let canonical = fs.canonicalize(Path::new("/tmp/foo/BAR")).unwrap();
        assert_eq!(canonical, Path::new("/tmp/FOO/bar"));
    }

    #[test]
    fn test_sensitive_lookup_requires_exact_case() {
        let fs = MemoryFilesystem::new(CaseSensitivity::Sensitive);
        fs.create_dir_all("/tmp/FOO");

        let err = fs.canonicalize(Path::new("/tmp/foo")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_sensitive_allows_case_siblings() {
        let fs = MemoryFilesystem::new(CaseSensitivity::Sensitive);
        fs.create_dir_all("/tmp/foo");
        fs.create_dir_all("/tmp/FOO");

        let mut names = fs.read_dir_names(Path::new("/tmp")).unwrap();
        names.sort();
        assert_eq!(names, vec![OsString::from("FOO"), OsString::from("foo")]);
    }

    #[test]
    fn test_insensitive_create_reuses_existing_entry() {
        let fs = MemoryFilesystem::new(CaseSensitivity::Insensitive);
        fs.create_dir_all("/A");
        fs.create_dir_all("/a/B");

        assert_eq!(fs.read_dir_names(Path::new("/")).unwrap(), vec![OsString::from("A")]);
        assert_eq!(fs.canonicalize(Path::new("/a/b")).unwrap(), Path::new("/A/B"));
    }

    #[test]
    fn test_dot_dot_and_relative_paths() {
        let fs = MemoryFilesystem::new(CaseSensitivity::Sensitive).with_current_dir("/work");
        fs.create_dir_all("/work/src");
        fs.create_dir_all("/work/docs");

        let canonical = fs.canonicalize(Path::new("src/../docs/.")).unwrap();
        assert_eq!(canonical, Path::new("/work/docs"));
    }

    #[test]
    fn test_symlink_resolution() {
        let fs = MemoryFilesystem::new(CaseSensitivity::Sensitive);
        fs.create_dir_all("/private/tmp/data");
        fs.symlink("/private/tmp", "/tmp");
        fs.symlink("data", "/private/tmp/alias");

        assert_eq!(
            fs.canonicalize(Path::new("/tmp/alias")).unwrap(),
            Path::new("/private/tmp/data")
        );
        assert_eq!(fs.metadata(Path::new("/tmp/alias")).unwrap(), EntryKind::Directory);
    }

    #[test]
    fn test_symlink_loop_is_an_error() {
        let fs = MemoryFilesystem::new(CaseSensitivity::Sensitive);
        fs.symlink("/b", "/a");
        fs.symlink("/a", "/b");

        let err = fs.canonicalize(Path::new("/a")).unwrap_err();
        assert!(err.to_string().contains("symbolic links"));
    }

    #[test]
    fn test_file_metadata() {
        let fs = MemoryFilesystem::new(CaseSensitivity::Sensitive);
        fs.create_file("/etc/hosts");

        assert_eq!(fs.metadata(Path::new("/etc/hosts")).unwrap(), EntryKind::File);
        assert!(fs.read_dir_names(Path::new("/etc/hosts")).is_err());
    }

    #[test]
    fn test_unlistable_directory_is_traversable() {
        let fs = MemoryFilesystem::new(CaseSensitivity::Sensitive);
        fs.create_dir_all("/drop/inner");
        fs.deny_listing("/drop");

        assert_eq!(
            fs.canonicalize(Path::new("/drop/inner")).unwrap(),
            PathBuf::from("/drop/inner")
        );
        assert_eq!(
            fs.read_dir_names(Path::new("/drop")).unwrap_err().kind(),
            ErrorKind::PermissionDenied
        );
    }

    #[test]
    fn test_denied_directory() {
        let fs = MemoryFilesystem::new(CaseSensitivity::Sensitive);
        fs.create_dir_all("/locked/inner");
        fs.deny("/locked");

        assert_eq!(fs.metadata(Path::new("/locked")).unwrap(), EntryKind::Directory);
        assert_eq!(
            fs.read_dir_names(Path::new("/locked")).unwrap_err().kind(),
            ErrorKind::PermissionDenied
        );
        assert_eq!(
            fs.canonicalize(Path::new("/locked/inner")).unwrap_err().kind(),
            ErrorKind::PermissionDenied
        );
    }

    #[test]
    fn test_literal_canonicalize_echoes_request() {
        let fs = MemoryFilesystem::new(CaseSensitivity::Insensitive).with_literal_canonicalize(true);
        fs.create_dir_all("/tmp/FOO/bar");

        assert_eq!(
            fs.canonicalize(Path::new("/tmp/foo/./bar")).unwrap(),
            Path::new("/tmp/foo/bar")
        );
        assert!(fs.canonicalize(Path::new("/tmp/missing")).is_err());
    }
}
