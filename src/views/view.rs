//! Pull-based filtered view over a slice of records.

use super::filter::Predicate;

/// A view holds only its predicate.
///
/// Nothing is cached: every read re-evaluates the predicate against the
/// slice it is given, so the view can never go stale.
#[derive(Clone, Debug, Default)]
pub struct FilteredView<F> {
    filter: F,
}

impl<F> FilteredView<F> {
    pub fn new(filter: F) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: F) {
        self.filter = filter;
    }

    /// Items of `source` accepted by the filter, in source order.
    pub fn apply<'a, T>(&self, source: &'a [T]) -> Vec<&'a T>
    where
        F: Predicate<T>,
    {
        source
            .iter()
            .filter(|item| self.filter.matches(*item))
            .collect()
    }
}

impl<F: Default> FilteredView<F> {
    /// Go back to the default ("show everything") filter.
    pub fn reset(&mut self) {
        self.filter = F::default();
    }
}
