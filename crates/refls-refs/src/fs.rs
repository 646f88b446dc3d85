//! File-backed ref source.
//!
//! [`FileRefSource`] reads a repository directory with the layout:
//!
//! ```text
//! <root>/HEAD           "ref: refs/heads/main" or a detached hex id
//! <root>/refs/**        loose refs, one hex id (or "ref: <name>") per file
//! <root>/packed-refs    "<hex> <name>" lines; "^<hex>" lines carry the
//!                       peeled target of the preceding tag ref
//! <root>/objects/xx/..  objects, addressed by the split hex of their id
//! ```
//!
//! Loose refs shadow packed ones of the same name. The packed-refs file is
//! parsed once at open time; malformed lines are logged and skipped.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use refls_types::ObjectId;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{RefError, Result};
use crate::names::is_well_formed;
use crate::traits::RefSource;

/// Directory name probed by [`FileRefSource::discover`].
pub const REPO_DIR: &str = ".refls";

/// Longest chain of symbolic refs followed before giving up.
const MAX_SYMREF_DEPTH: u8 = 5;

/// A [`RefSource`] reading refs from a repository directory.
#[derive(Debug)]
pub struct FileRefSource {
    root: PathBuf,
    packed: BTreeMap<String, ObjectId>,
    peeled: HashMap<ObjectId, ObjectId>,
}

impl FileRefSource {
    /// Open a repository directory, parsing `packed-refs` if present.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let mut source = Self {
            root,
            packed: BTreeMap::new(),
            peeled: HashMap::new(),
        };
        source.load_packed()?;
        Ok(source)
    }

    /// Open `path/.refls` if it exists, otherwise treat `path` itself as the
    /// repository directory.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let nested = path.join(REPO_DIR);
        if nested.is_dir() {
            Self::open(nested)
        } else {
            Self::open(path)
        }
    }

    /// The repository directory this source reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn load_packed(&mut self) -> Result<()> {
        let path = self.root.join("packed-refs");
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        let mut last_target: Option<ObjectId> = None;
        for line in contents.lines() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(peeled_hex) = line.strip_prefix('^') {
                let Some(tag) = last_target else {
                    warn!(%line, "peeled line without preceding ref in packed-refs");
                    continue;
                };
                match ObjectId::from_hex(peeled_hex) {
                    Ok(peeled) => {
                        self.peeled.insert(tag, peeled);
                    }
                    Err(e) => warn!(%line, error = %e, "bad peeled line in packed-refs"),
                }
                continue;
            }
            let Some((hex, name)) = line.split_once(' ') else {
                warn!(%line, "malformed line in packed-refs");
                last_target = None;
                continue;
            };
            match ObjectId::from_hex(hex) {
                Ok(target) if is_well_formed(name) => {
                    self.packed.insert(name.to_string(), target);
                    last_target = Some(target);
                }
                Ok(_) => {
                    warn!(%name, "ill-formed ref name in packed-refs");
                    last_target = None;
                }
                Err(e) => {
                    warn!(%line, error = %e, "bad object id in packed-refs");
                    last_target = None;
                }
            }
        }
        debug!(count = self.packed.len(), "loaded packed refs");
        Ok(())
    }

    /// Resolve the contents of a loose ref file: either a hex object id or
    /// a `ref: <name>` symbolic redirect.
    fn resolve_contents(&self, contents: &str, depth: u8) -> Result<Option<ObjectId>> {
        let contents = contents.trim();
        if let Some(target) = contents.strip_prefix("ref:") {
            if depth == 0 {
                return Err(RefError::Backend(
                    "symbolic ref chain too deep".to_string(),
                ));
            }
            return self.read_ref_at_depth(target.trim(), depth - 1);
        }
        match ObjectId::from_hex(contents) {
            Ok(id) => Ok(Some(id)),
            Err(e) => Err(RefError::Backend(format!("bad loose ref contents: {e}"))),
        }
    }

    fn read_ref_at_depth(&self, name: &str, depth: u8) -> Result<Option<ObjectId>> {
        if name == "HEAD" {
            return self.head_at_depth(depth);
        }
        // Validation doubles as a path-traversal guard: '..' and empty
        // components never reach the filesystem.
        if !is_well_formed(name) {
            return Ok(None);
        }
        let path = self.root.join(name);
        match std::fs::read_to_string(&path) {
            Ok(contents) => self.resolve_contents(&contents, depth),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(self.packed.get(name).copied())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn head_at_depth(&self, depth: u8) -> Result<Option<ObjectId>> {
        let path = self.root.join("HEAD");
        match std::fs::read_to_string(&path) {
            Ok(contents) => self.resolve_contents(&contents, depth),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Enumerate loose refs under `<root>/refs` as (name, target) pairs.
    fn loose_refs(&self) -> Result<BTreeMap<String, ObjectId>> {
        let refs_dir = self.root.join("refs");
        let mut loose = BTreeMap::new();
        if !refs_dir.is_dir() {
            return Ok(loose);
        }
        for entry in WalkDir::new(&refs_dir).follow_links(false) {
            let entry = entry.map_err(|e| RefError::Backend(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(&self.root)
                .map_err(|e| RefError::Backend(e.to_string()))?;
            let name: Vec<String> = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            let name = name.join("/");
            if !is_well_formed(&name) {
                warn!(%name, "skipping ill-formed loose ref");
                continue;
            }
            let contents = std::fs::read_to_string(entry.path())?;
            match self.resolve_contents(&contents, MAX_SYMREF_DEPTH) {
                Ok(Some(target)) => {
                    loose.insert(name, target);
                }
                Ok(None) => debug!(%name, "loose symbolic ref points nowhere"),
                Err(e) => warn!(%name, error = %e, "skipping unreadable loose ref"),
            }
        }
        Ok(loose)
    }
}

impl RefSource for FileRefSource {
    fn refs(&self, prefix: &str) -> Result<Vec<(String, ObjectId)>> {
        let mut merged = self.packed.clone();
        merged.extend(self.loose_refs()?);
        Ok(merged
            .into_iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .collect())
    }

    fn head(&self) -> Result<Option<ObjectId>> {
        self.head_at_depth(MAX_SYMREF_DEPTH)
    }

    fn read_ref(&self, name: &str) -> Result<Option<ObjectId>> {
        self.read_ref_at_depth(name, MAX_SYMREF_DEPTH)
    }

    fn object_exists(&self, id: &ObjectId) -> Result<bool> {
        let hex = id.to_hex();
        let path = self
            .root
            .join("objects")
            .join(&hex[..2])
            .join(&hex[2..]);
        Ok(path.is_file())
    }

    fn peel(&self, id: &ObjectId) -> Result<Option<ObjectId>> {
        Ok(self.peeled.get(id).copied())
    }
}
