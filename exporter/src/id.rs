// id.rs — Stable identifiers for declaration-tree nodes
//
// IDs are arena indices allocated in frontend emission (source) order,
// giving deterministic identity to declarations and source files across
// runs over the same dump.

use serde::{Deserialize, Serialize};

/// Stable identifier for a declaration node inside an `Ast` arena.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DeclId(pub u32);

impl DeclId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Stable identifier for a source file inside a `SourceMap`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FileId(pub u32);

impl FileId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
