//! Index trait for pluggable nearest-candidate strategies

use crate::error::{Result, SearchError};
use crate::search::Neighbor;
use crate::sequence::Sequence;

/// A trained nearest-candidate search strategy.
///
/// `train` replaces the whole training set; indexes are rebuilt, never
/// patched.
pub trait Index<T> {
    /// Replace the training set.
    fn train(&mut self, training: Sequence<T>) -> Result<()>;

    /// Position and distance of the training element this strategy picks
    /// for `query`.
    fn nearest(&self, query: &T) -> Result<Neighbor>;

    /// Training element at `index`.
    fn get(&self, index: usize) -> Option<&T>;

    /// Short strategy name used in logs and reports.
    fn name(&self) -> &'static str;

    /// The number of training elements.
    fn len(&self) -> usize;

    /// Whether the index is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the training element picked for `query`.
    fn classify(&self, query: &T) -> Result<T>
    where
        T: Clone,
    {
        let hit = self.nearest(query)?;
        self.get(hit.index).cloned().ok_or(SearchError::OutOfRange {
            index: hit.index,
            len: self.len(),
        })
    }
}

impl<T, I: Index<T> + ?Sized> Index<T> for Box<I> {
    fn train(&mut self, training: Sequence<T>) -> Result<()> {
        (**self).train(training)
    }

    fn nearest(&self, query: &T) -> Result<Neighbor> {
        (**self).nearest(query)
    }

    fn get(&self, index: usize) -> Option<&T> {
        (**self).get(index)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}
