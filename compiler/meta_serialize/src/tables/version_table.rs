use crate::records::{VersionRequirementRecord, VersionRequirementTableRecord};

use super::Interner;

/// Interned version requirements, referenced from declarations by id.
#[derive(Debug, Default)]
pub struct VersionRequirementTable {
    requirements: Interner<'static, VersionRequirementRecord>,
}

impl VersionRequirementTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, requirement: VersionRequirementRecord) -> u32 {
        self.requirements.intern(requirement)
    }

    pub fn requirements(&self) -> &[VersionRequirementRecord] {
        self.requirements.entries()
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    /// Snapshot of the table; `None` when nothing was interned.
    pub fn serialize(&self) -> Option<VersionRequirementTableRecord> {
        if self.is_empty() {
            return None;
        }
        Some(VersionRequirementTableRecord {
            requirements: self.requirements.entries().to_vec(),
        })
    }
}
