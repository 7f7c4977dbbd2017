//! Change notification for view-model state.
//!
//! Listeners are plain callbacks invoked synchronously by the owning
//! view-model after every state change.

/// Identifies a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<T> = Box<dyn Fn(&T) + Send>;

/// Store-side half of the store-plus-listeners pattern
pub struct Listeners<T> {
    next_id: u64,
    entries: Vec<(ListenerId, Listener<T>)>,
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<T> Listeners<T> {
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&T) + Send + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn notify(&self, value: &T) {
        for (_, listener) in &self.entries {
            listener(value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
