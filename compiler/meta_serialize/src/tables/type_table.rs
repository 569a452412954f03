use crate::records::{TypeRecord, TypeTableRecord};

use super::Interner;

/// Interned type records, referenced from other records by id.
#[derive(Debug, Default)]
pub struct TypeTable {
    types: Interner<'static, TypeRecord>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, record: TypeRecord) -> u32 {
        self.types.intern(record)
    }

    pub fn types(&self) -> &[TypeRecord] {
        self.types.entries()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Snapshot of the table; `None` when nothing was interned.
    pub fn serialize(&self) -> Option<TypeTableRecord> {
        if self.is_empty() {
            return None;
        }
        Some(TypeTableRecord {
            types: self.types.entries().to_vec(),
        })
    }
}
