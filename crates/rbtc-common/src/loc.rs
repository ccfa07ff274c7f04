//! Source location tracking.
//!
//! A [`Loc`] pairs a [`FileId`] with a half-open byte range rather than a
//! bare offset — a location is only meaningful together with the file it
//! points into.

use serde::Serialize;

/// Identifies a source file within a single compilation.
///
/// Stable for the lifetime of a `GlobalState`; index 0 is reserved for
/// synthetic locations that do not originate from any real file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct FileId(pub u32);

impl FileId {
    pub const NONE: FileId = FileId(0);

    pub fn exists(self) -> bool {
        self.0 != 0
    }
}

/// A half-open byte range `[begin, end)` within a specific file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Loc {
    pub file: FileId,
    pub begin: u32,
    pub end: u32,
}

impl Loc {
    pub const NONE: Loc = Loc {
        file: FileId::NONE,
        begin: 0,
        end: 0,
    };

    pub fn new(file: FileId, begin: u32, end: u32) -> Self {
        Loc { file, begin, end }
    }

    pub fn at(file: FileId, pos: u32) -> Self {
        Loc::new(file, pos, pos)
    }

    pub fn is_none(&self) -> bool {
        !self.file.exists()
    }

    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.begin)
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Smallest location covering both `self` and `other`. Mismatched files
    /// degrade to `self` rather than panicking.
    pub fn join(&self, other: Loc) -> Loc {
        if self.file != other.file {
            return *self;
        }
        Loc {
            file: self.file,
            begin: self.begin.min(other.begin),
            end: self.end.max(other.end),
        }
    }
}
