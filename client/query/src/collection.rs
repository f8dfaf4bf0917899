use std::sync::{Arc, PoisonError, RwLock};

/// Cloneable handle to one in-memory collection.
///
/// A drain streams pages into it while other holders read whatever subset has arrived.
#[derive(Debug)]
pub struct Shared<T> {
    inner: Arc<RwLock<Vec<T>>>,
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for Shared<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<T> Shared<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(items)),
        }
    }

    pub fn len(&self) -> usize {
        self.with(<[T]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `f` against the records loaded so far.
    pub fn with<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        let items = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&items)
    }

    pub fn extend(&self, page: Vec<T>) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(page);
    }

    pub fn clear(&self) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl<T: Clone> Shared<T> {
    pub fn snapshot(&self) -> Vec<T> {
        self.with(<[T]>::to_vec)
    }
}
