use crate::error::RestrictionError;
use crate::filter::{self, FilterComponent};
use crate::page::{DirectoryResult, Page};
use crate::query::QueryRestriction;
use crate::registry::KnownReferences;

/// Restricts, then counts or pages, a candidate sequence of `T`.
///
/// ```text
/// DirectoryBuilder::new(candidates, &references)
///     .restrict_query(query)?
///     .restrict(filter)?
///     .page(page)
///     .resolve()
/// ```
///
/// Restrictions run eagerly in call order, so [`count`](Self::count) and
/// [`resolve`](Self::resolve) always see the same sequence.
pub struct DirectoryBuilder<'r, T> {
    candidates: Vec<T>,
    references: &'r KnownReferences<T>,
    page: Page,
}

impl<'r, T> DirectoryBuilder<'r, T> {
    pub fn new(candidates: Vec<T>, references: &'r KnownReferences<T>) -> Self {
        Self {
            candidates,
            references,
            page: Page::all(),
        }
    }

    pub fn restrict_query(
        mut self,
        query: Option<&dyn QueryRestriction<T>>,
    ) -> Result<Self, RestrictionError> {
        if let Some(query) = query {
            let before = self.candidates.len();
            let predicate = query.compile(self.references)?;
            self.candidates.retain(|candidate| predicate(candidate));
            tracing::debug!(before, after = self.candidates.len(), "query restriction applied");
        }
        Ok(self)
    }

    pub fn restrict(mut self, filter: Option<&FilterComponent>) -> Result<Self, RestrictionError> {
        if let Some(component) = filter {
            let before = self.candidates.len();
            self.candidates = filter::restrict(self.candidates, Some(component), self.references)?;
            tracing::debug!(
                before,
                after = self.candidates.len(),
                attribute = %component.attribute,
                algorithm = %component.algorithm,
                "filter restriction applied"
            );
        }
        Ok(self)
    }

    pub fn add_start(mut self, start: usize) -> Self {
        self.page.start = start;
        self
    }

    pub fn add_max_to_return(mut self, max_to_return: usize) -> Self {
        self.page.max_to_return = max_to_return;
        self
    }

    pub fn page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    /// Size of the restricted sequence; the page is ignored.
    pub fn count(&self) -> usize {
        self.candidates.len()
    }

    pub fn resolve(self) -> DirectoryResult<T> {
        let total = self.candidates.len();
        if self.page.start > total {
            tracing::warn!(
                start = self.page.start,
                total,
                "page starts beyond the restricted directory"
            );
        }
        DirectoryResult::from_window(self.candidates, self.page)
    }
}
