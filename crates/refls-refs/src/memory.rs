//! In-memory ref source for testing and ephemeral use.
//!
//! [`InMemoryRefSource`] keeps refs in a `BTreeMap` (so enumeration is
//! sorted by name) protected by a `RwLock`, plus a set of known objects and
//! a tag-peeling map. It implements the full [`RefSource`] trait and is the
//! backend used by the command-core unit tests.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::RwLock;

use refls_types::ObjectId;

use crate::error::{RefError, Result};
use crate::names::validate_ref_name;
use crate::traits::RefSource;

/// An in-memory implementation of [`RefSource`].
///
/// All data lives behind `RwLock`s and is lost when the source is dropped.
#[derive(Debug, Default)]
pub struct InMemoryRefSource {
    refs: RwLock<BTreeMap<String, ObjectId>>,
    head: RwLock<Option<ObjectId>>,
    objects: RwLock<HashSet<ObjectId>>,
    peeled: RwLock<HashMap<ObjectId, ObjectId>>,
}

impl InMemoryRefSource {
    /// Create a new empty ref source.
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned<E: std::fmt::Display>(e: E) -> RefError {
        RefError::Backend(format!("lock poisoned: {e}"))
    }

    /// Insert a ref pointing at `target` and register `target` as a known
    /// object. The name must be well-formed.
    pub fn insert_ref(&self, name: &str, target: ObjectId) -> Result<()> {
        validate_ref_name(name)?;
        self.objects
            .write()
            .map_err(Self::poisoned)?
            .insert(target);
        self.refs
            .write()
            .map_err(Self::poisoned)?
            .insert(name.to_string(), target);
        Ok(())
    }

    /// Insert an annotated-tag ref: the ref points at `tag`, which peels to
    /// `target`. Both objects are registered.
    pub fn insert_tag_ref(&self, name: &str, tag: ObjectId, target: ObjectId) -> Result<()> {
        self.insert_ref(name, tag)?;
        self.objects
            .write()
            .map_err(Self::poisoned)?
            .insert(target);
        self.peeled.write().map_err(Self::poisoned)?.insert(tag, target);
        Ok(())
    }

    /// Set the HEAD pseudo-ref to point directly at `target`.
    pub fn set_head(&self, target: ObjectId) -> Result<()> {
        self.objects
            .write()
            .map_err(Self::poisoned)?
            .insert(target);
        *self.head.write().map_err(Self::poisoned)? = Some(target);
        Ok(())
    }

    /// Remove an object from the known set, leaving any refs to it dangling.
    ///
    /// Used by tests to simulate repository corruption.
    pub fn forget_object(&self, id: &ObjectId) -> Result<bool> {
        Ok(self.objects.write().map_err(Self::poisoned)?.remove(id))
    }
}

impl RefSource for InMemoryRefSource {
    fn refs(&self, prefix: &str) -> Result<Vec<(String, ObjectId)>> {
        let refs = self.refs.read().map_err(Self::poisoned)?;
        Ok(refs
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(name, target)| (name.clone(), *target))
            .collect())
    }

    fn head(&self) -> Result<Option<ObjectId>> {
        Ok(*self.head.read().map_err(Self::poisoned)?)
    }

    fn read_ref(&self, name: &str) -> Result<Option<ObjectId>> {
        if name == "HEAD" {
            return self.head();
        }
        let refs = self.refs.read().map_err(Self::poisoned)?;
        Ok(refs.get(name).copied())
    }

    fn object_exists(&self, id: &ObjectId) -> Result<bool> {
        Ok(self.objects.read().map_err(Self::poisoned)?.contains(id))
    }

    fn peel(&self, id: &ObjectId) -> Result<Option<ObjectId>> {
        Ok(self.peeled.read().map_err(Self::poisoned)?.get(id).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(byte: u8) -> ObjectId {
        ObjectId::from_hash([byte; 32])
    }

    // ---- Test 1: Insert and enumerate refs ----
    #[test]
    fn insert_and_enumerate() {
        let source = InMemoryRefSource::new();
        source.insert_ref("refs/heads/main", oid(1)).unwrap();
        source.insert_ref("refs/tags/v1.0", oid(2)).unwrap();

        let all = source.refs("").unwrap();
        assert_eq!(all.len(), 2);
        // BTreeMap iteration is sorted by name.
        assert_eq!(all[0].0, "refs/heads/main");
        assert_eq!(all[1].0, "refs/tags/v1.0");
    }

    // ---- Test 2: Prefix filtering ----
    #[test]
    fn prefix_filtering() {
        let source = InMemoryRefSource::new();
        source.insert_ref("refs/heads/main", oid(1)).unwrap();
        source.insert_ref("refs/heads/dev", oid(2)).unwrap();
        source.insert_ref("refs/tags/v1.0", oid(3)).unwrap();

        let heads = source.refs("refs/heads/").unwrap();
        assert_eq!(heads.len(), 2);
        let tags = source.refs("refs/tags/").unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].0, "refs/tags/v1.0");
    }

    // ---- Test 3: HEAD is excluded from enumeration ----
    #[test]
    fn head_not_enumerated() {
        let source = InMemoryRefSource::new();
        source.set_head(oid(9)).unwrap();
        assert!(source.refs("").unwrap().is_empty());
        assert_eq!(source.head().unwrap(), Some(oid(9)));
    }

    // ---- Test 4: read_ref resolves HEAD and ordinary refs ----
    #[test]
    fn read_ref_resolves() {
        let source = InMemoryRefSource::new();
        source.insert_ref("refs/heads/main", oid(1)).unwrap();
        source.set_head(oid(1)).unwrap();

        assert_eq!(source.read_ref("refs/heads/main").unwrap(), Some(oid(1)));
        assert_eq!(source.read_ref("HEAD").unwrap(), Some(oid(1)));
        assert_eq!(source.read_ref("refs/heads/nope").unwrap(), None);
    }

    // ---- Test 5: Invalid names are rejected on insert ----
    #[test]
    fn reject_invalid_name_on_insert() {
        let source = InMemoryRefSource::new();
        let err = source.insert_ref("refs/heads/bad..name", oid(1)).unwrap_err();
        assert!(matches!(err, RefError::InvalidRefName { .. }));
    }

    // ---- Test 6: Object existence tracks inserts and forgets ----
    #[test]
    fn object_existence() {
        let source = InMemoryRefSource::new();
        source.insert_ref("refs/heads/main", oid(1)).unwrap();

        assert!(source.object_exists(&oid(1)).unwrap());
        assert!(!source.object_exists(&oid(2)).unwrap());

        assert!(source.forget_object(&oid(1)).unwrap());
        assert!(!source.object_exists(&oid(1)).unwrap());
    }

    // ---- Test 7: Tag refs peel to their target ----
    #[test]
    fn tag_peeling() {
        let source = InMemoryRefSource::new();
        source
            .insert_tag_ref("refs/tags/v1.0", oid(10), oid(11))
            .unwrap();

        assert_eq!(source.peel(&oid(10)).unwrap(), Some(oid(11)));
        // Non-tag objects do not peel.
        assert_eq!(source.peel(&oid(11)).unwrap(), None);
        // Both objects are known.
        assert!(source.object_exists(&oid(10)).unwrap());
        assert!(source.object_exists(&oid(11)).unwrap());
    }

    // ---- Test 8: Default abbrev extends past a shared prefix ----
    #[test]
    fn abbrev_extends_on_collision() {
        let source = InMemoryRefSource::new();
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        a[0] = 0xab;
        a[1] = 0xcd;
        b[0] = 0xab;
        b[1] = 0xcd;
        a[2] = 0x00;
        b[2] = 0x10;
        let a = ObjectId::from_hash(a);
        let b = ObjectId::from_hash(b);
        source.insert_ref("refs/heads/a", a).unwrap();
        source.insert_ref("refs/heads/b", b).unwrap();

        // The first 4 hex chars collide ("abcd"), so the requested width of
        // 4 is extended until the prefixes diverge at the 5th character.
        assert_eq!(source.abbrev(&a, 4).unwrap(), "abcd0");
        assert_eq!(source.abbrev(&b, 4).unwrap(), "abcd1");
    }

    // ---- Test 9: abbrev with 0 yields the full hex ----
    #[test]
    fn abbrev_zero_is_full() {
        let source = InMemoryRefSource::new();
        source.insert_ref("refs/heads/main", oid(1)).unwrap();
        assert_eq!(source.abbrev(&oid(1), 0).unwrap(), oid(1).to_hex());
    }

    // ---- Test 10: abbrev honors the requested minimum ----
    #[test]
    fn abbrev_honors_minimum() {
        let source = InMemoryRefSource::new();
        source.insert_ref("refs/heads/main", oid(1)).unwrap();
        assert_eq!(source.abbrev(&oid(1), 12).unwrap().len(), 12);
    }
}
