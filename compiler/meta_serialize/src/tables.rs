//! Interning tables.
//!
//! Every table maps structurally equal keys to one dense `u32` id, allocated
//! sequentially in first-seen order. Entries are never removed. A table can
//! be layered over a parent: lookups consult the parent first and new ids
//! continue after the parent's last id.

mod names;
mod type_table;
mod version_table;

use std::borrow::Borrow;
use std::hash::Hash;

use rustc_hash::FxHashMap;

pub use names::{NameTable, NameTableRecord, StringTable};
pub use type_table::TypeTable;
pub use version_table::VersionRequirementTable;

/// Insertion-ordered interner, optionally layered over a parent.
#[derive(Debug)]
pub struct Interner<'p, K> {
    parent: Option<&'p Interner<'p, K>>,
    /// Id of `entries[0]`; the parent's total length when layered.
    first_index: u32,
    map: FxHashMap<K, u32>,
    entries: Vec<K>,
}

impl<K> Default for Interner<'_, K> {
    fn default() -> Self {
        Interner {
            parent: None,
            first_index: 0,
            map: FxHashMap::default(),
            entries: Vec::new(),
        }
    }
}

impl<'p, K: Eq + Hash + Clone> Interner<'p, K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// An interner whose ids continue after everything `parent` holds.
    pub fn with_parent(parent: &'p Interner<'p, K>) -> Self {
        Interner {
            parent: Some(parent),
            first_index: parent.next_index(),
            map: FxHashMap::default(),
            entries: Vec::new(),
        }
    }

    /// The id the next new key would receive.
    fn next_index(&self) -> u32 {
        self.first_index + self.own_len()
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "table ids are u32 on the wire; a session never interns 2^32 entries"
    )]
    fn own_len(&self) -> u32 {
        self.entries.len() as u32
    }

    /// The id of `key`, searching parents first.
    pub fn get<Q>(&self, key: &Q) -> Option<u32>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        if let Some(id) = self.parent.and_then(|parent| parent.get(key)) {
            return Some(id);
        }
        self.map.get(key).copied()
    }

    /// Intern `key`, returning its existing id or allocating the next one.
    pub fn intern(&mut self, key: K) -> u32 {
        if let Some(id) = self.get(&key) {
            return id;
        }
        self.insert_new(key)
    }

    /// Intern a borrowed key, cloning it only when it is new.
    pub fn intern_borrowed<Q>(&mut self, key: &Q) -> u32
    where
        K: Borrow<Q> + for<'a> From<&'a Q>,
        Q: Eq + Hash + ?Sized,
    {
        if let Some(id) = self.get(key) {
            return id;
        }
        self.insert_new(K::from(key))
    }

    fn insert_new(&mut self, key: K) -> u32 {
        let id = self.next_index();
        tracing::trace!(id, "interned new entry");
        self.map.insert(key.clone(), id);
        self.entries.push(key);
        id
    }

    /// Entries added to this interner (not its parents), in id order.
    pub fn entries(&self) -> &[K] {
        &self.entries
    }

    /// Number of entries in this interner, excluding parents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
