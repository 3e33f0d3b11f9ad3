//! Windowing requests and the page-shaped result.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_TO_RETURN: usize = 50;

/// Offset + limit over a restricted sequence.
///
/// `max_to_return == 0` asks for no entries; the result still reports the
/// total and whether entries remain from `start` on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Page {
    pub start: usize,
    pub max_to_return: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            start: 0,
            max_to_return: DEFAULT_MAX_TO_RETURN,
        }
    }
}

impl Page {
    pub fn new(start: usize, max_to_return: usize) -> Self {
        Self {
            start,
            max_to_return,
        }
    }

    /// Every entry from the beginning.
    pub fn all() -> Self {
        Self::new(0, usize::MAX)
    }

    /// Exclusive end of the window, saturating.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.max_to_return)
    }
}

/// One page of a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryResult<T> {
    entries: Vec<T>,
    at_end: bool,
    complete: bool,
    total: usize,
}

impl<T> DirectoryResult<T> {
    /// Cuts `page` out of the fully restricted `candidates`.
    pub fn from_window(candidates: Vec<T>, page: Page) -> Self {
        let total = candidates.len();
        let start = page.start.min(total);
        let end = page.end().min(total);
        let entries: Vec<T> = candidates.into_iter().skip(start).take(end - start).collect();
        Self {
            entries,
            at_end: end >= total,
            complete: start == 0 && end >= total,
            total,
        }
    }

    /// A result holding the whole sequence.
    pub fn from_complete(entries: Vec<T>) -> Self {
        let total = entries.len();
        Self {
            entries,
            at_end: true,
            complete: true,
            total,
        }
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<T> {
        self.entries
    }

    /// No entries exist past this page.
    pub fn is_at_end(&self) -> bool {
        self.at_end
    }

    pub fn has_more(&self) -> bool {
        !self.at_end
    }

    /// This page holds the whole restricted sequence.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Size of the restricted sequence, ignoring the window.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
