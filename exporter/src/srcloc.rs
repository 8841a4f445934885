// srcloc.rs — Source locations and presumed-location resolution
//
// A `Loc` is the raw (file, line, column) triple recorded by the frontend.
// `SourceMap` resolves raw locations to *presumed* locations: the position
// the author sees once `#line` directives and macro-expansion remapping are
// applied. Resolution can fail (builtin declarations, command-line macros);
// callers substitute placeholders per their own naming rules.
//
// Preconditions: `Loc` values reference files registered in the map, or are
//                the invalid sentinel.
// Postconditions: `presumed` returns `None` exactly for invalid locations
//                 and unknown files.
// Failure modes: none.
// Side effects: none.

use serde::{Deserialize, Serialize};

use crate::id::FileId;

/// Sentinel file id marking an invalid location.
pub const NO_FILE: FileId = FileId(u32::MAX);

/// Raw source position as recorded by the frontend. Lines and columns are
/// 1-based; line 0 with the sentinel file id means "no location".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loc {
    pub file: FileId,
    pub line: u32,
    pub col: u32,
}

impl Loc {
    pub fn new(file: FileId, line: u32, col: u32) -> Loc {
        Loc { file, line, col }
    }

    /// The "no location" sentinel.
    pub fn invalid() -> Loc {
        Loc {
            file: NO_FILE,
            line: 0,
            col: 0,
        }
    }

    pub fn is_valid(self) -> bool {
        self.file != NO_FILE && self.line > 0
    }
}

/// A resolved file/line/column triple, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresumedLoc {
    pub file: String,
    pub line: u32,
    pub col: u32,
}

/// A `#line`-style remapping: from `from_line` onward in `file`, report
/// positions as if the text started at `presumed_line` of `presumed_file`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineOverride {
    pub file: FileId,
    pub from_line: u32,
    pub presumed_file: String,
    pub presumed_line: u32,
}

/// Registered source files plus presumed-line overrides.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SourceMap {
    files: Vec<String>,
    overrides: Vec<LineOverride>,
}

impl SourceMap {
    pub fn new() -> SourceMap {
        SourceMap::default()
    }

    /// Rebuild a map from dump data.
    pub fn from_parts(files: Vec<String>, overrides: Vec<LineOverride>) -> SourceMap {
        SourceMap { files, overrides }
    }

    /// Register a file path, returning its id.
    pub fn add_file(&mut self, path: impl Into<String>) -> FileId {
        let id = FileId(self.files.len() as u32);
        self.files.push(path.into());
        id
    }

    pub fn add_override(&mut self, ov: LineOverride) {
        self.overrides.push(ov);
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn file_name(&self, id: FileId) -> Option<&str> {
        self.files.get(id.index()).map(String::as_str)
    }

    /// Resolve a raw location to its presumed location.
    ///
    /// The last override at or before the raw line wins; lines past an
    /// override point shift by the override's offset. Invalid locations and
    /// unknown file ids resolve to `None`.
    pub fn presumed(&self, loc: Loc) -> Option<PresumedLoc> {
        if !loc.is_valid() {
            return None;
        }
        let file = self.files.get(loc.file.index())?;
        let active = self
            .overrides
            .iter()
            .filter(|ov| ov.file == loc.file && ov.from_line <= loc.line)
            .max_by_key(|ov| ov.from_line);
        Some(match active {
            Some(ov) => PresumedLoc {
                file: ov.presumed_file.clone(),
                line: ov.presumed_line + (loc.line - ov.from_line),
                col: loc.col,
            },
            None => PresumedLoc {
                file: file.clone(),
                line: loc.line,
                col: loc.col,
            },
        })
    }
}

// ── Tests ──
