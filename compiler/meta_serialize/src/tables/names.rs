use super::Interner;

/// String and qualified-name storage used by the encoder.
///
/// Implementations only have to honor the interning contract: the same
/// content always yields the same id, ids are dense and start at 0.
pub trait StringTable {
    /// Id of a plain string (simple names, messages).
    fn string_index(&mut self, string: &str) -> u32;

    /// Id of a slash-separated qualified name such as `core/Any`.
    fn qualified_name_index(&mut self, fq_name: &str) -> u32;
}

/// The reference [`StringTable`]: two independent interners.
#[derive(Debug, Default)]
pub struct NameTable {
    strings: Interner<'static, Box<str>>,
    qualified_names: Interner<'static, Box<str>>,
}

/// Snapshot of a [`NameTable`], entries in id order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct NameTableRecord {
    pub strings: Vec<String>,
    pub qualified_names: Vec<String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The string with id `index`.
    pub fn string(&self, index: u32) -> Option<&str> {
        self.strings.entries().get(index as usize).map(|s| &**s)
    }

    /// The qualified name with id `index`.
    pub fn qualified_name(&self, index: u32) -> Option<&str> {
        self.qualified_names
            .entries()
            .get(index as usize)
            .map(|s| &**s)
    }

    pub fn serialize(&self) -> NameTableRecord {
        NameTableRecord {
            strings: self.strings.entries().iter().map(|s| s.to_string()).collect(),
            qualified_names: self
                .qualified_names
                .entries()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl StringTable for NameTable {
    fn string_index(&mut self, string: &str) -> u32 {
        self.strings.intern_borrowed(string)
    }

    fn qualified_name_index(&mut self, fq_name: &str) -> u32 {
        self.qualified_names.intern_borrowed(fq_name)
    }
}
