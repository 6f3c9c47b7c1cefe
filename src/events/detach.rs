// Handles that must be torn down exactly once, in attach order.

#[derive(Debug)]
pub struct AttachedSet<T> {
    items: Vec<T>,
}

impl<T> Default for AttachedSet<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> AttachedSet<T> {
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Hand every handle to `detach` and forget it. Returns how many were
    /// detached; a second call finds nothing left and returns 0.
    pub fn detach_all(&mut self, mut detach: impl FnMut(T)) -> usize {
        let n = self.items.len();
        for item in self.items.drain(..) {
            detach(item);
        }
        n
    }
}

impl<T> From<Vec<T>> for AttachedSet<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}
