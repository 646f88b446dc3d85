//! The [`RefSource`] trait defining the storage interface.
//!
//! Any backend (in-memory, filesystem) implements this trait to expose refs
//! to the refls command core.

use refls_types::object::{HEX_LEN, MIN_ABBREV};
use refls_types::ObjectId;

use crate::error::Result;

/// Read-only view of a repository's refs and the objects behind them.
///
/// Implementations must be thread-safe (`Send + Sync`). Enumeration order is
/// backend-determined; the command core imposes no ordering of its own.
pub trait RefSource: Send + Sync {
    /// List refs whose canonical name starts with `prefix`, with their
    /// target objects.
    ///
    /// Pass `""` to list all refs. Pass `"refs/heads/"` for branches only.
    /// The HEAD pseudo-ref is never included; use [`RefSource::head`].
    fn refs(&self, prefix: &str) -> Result<Vec<(String, ObjectId)>>;

    /// Resolve the HEAD pseudo-ref, if it exists.
    fn head(&self) -> Result<Option<ObjectId>>;

    /// Resolve a single ref by canonical name.
    ///
    /// `"HEAD"` resolves the pseudo-ref. Returns `Ok(None)` if the ref does
    /// not exist.
    fn read_ref(&self, name: &str) -> Result<Option<ObjectId>>;

    /// Check whether an object is present in storage.
    fn object_exists(&self, id: &ObjectId) -> Result<bool>;

    /// Resolve a tag object to the non-tag object it references.
    ///
    /// Returns `Ok(None)` when `id` is not a tag (nothing to peel).
    fn peel(&self, id: &ObjectId) -> Result<Option<ObjectId>>;

    /// Shortest hex prefix of `id` that is unique among all ref targets,
    /// at least `min_len` characters. A `min_len` of 0 yields the full hex.
    ///
    /// The default implementation extends the prefix until no other ref
    /// target (or HEAD) shares it. Backends with a full object index may
    /// override for stronger uniqueness.
    fn abbrev(&self, id: &ObjectId, min_len: usize) -> Result<String> {
        if min_len == 0 {
            return Ok(id.to_hex());
        }
        let hex = id.to_hex();
        let mut others: Vec<String> = self
            .refs("")?
            .into_iter()
            .map(|(_, target)| target.to_hex())
            .filter(|other| *other != hex)
            .collect();
        if let Some(head) = self.head()? {
            let head_hex = head.to_hex();
            if head_hex != hex {
                others.push(head_hex);
            }
        }
        let mut len = min_len.clamp(MIN_ABBREV, HEX_LEN);
        while len < HEX_LEN && others.iter().any(|other| other[..len] == hex[..len]) {
            len += 1;
        }
        Ok(hex[..len].to_string())
    }
}
