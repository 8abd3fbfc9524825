use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Table<E> {
    next_id: u64,
    entries: BTreeMap<u64, Listener<E>>,
}

/// Registered callbacks for one event source.
///
/// `emit` snapshots the callbacks before calling them, so a listener may
/// unsubscribe itself (or others) from inside the callback.
pub(crate) struct Listeners<E> {
    table: Arc<Mutex<Table<E>>>,
}

impl<E> Clone for Listeners<E> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
        }
    }
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            table: Arc::new(Mutex::new(Table {
                next_id: 0,
                entries: BTreeMap::new(),
            })),
        }
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<E: 'static> Listeners<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, listener: impl Fn(&E) + Send + Sync + 'static) -> Subscription {
        let id = {
            let mut table = lock(&self.table);
            let id = table.next_id;
            table.next_id += 1;
            table.entries.insert(id, Arc::new(listener));
            id
        };

        let weak: Weak<Mutex<Table<E>>> = Arc::downgrade(&self.table);
        Subscription::new(move || {
            if let Some(table) = weak.upgrade() {
                lock(&table).entries.remove(&id);
            }
        })
    }

    pub fn emit(&self, event: &E) {
        let snapshot: Vec<(u64, Listener<E>)> = lock(&self.table)
            .entries
            .iter()
            .map(|(id, l)| (*id, l.clone()))
            .collect();

        for (id, listener) in snapshot {
            // Skip listeners removed by an earlier callback in this round.
            if !lock(&self.table).entries.contains_key(&id) {
                continue;
            }
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.table).entries.len()
    }
}

/// Disposer returned by every `subscribe`.
///
/// `unsubscribe` consumes the value, so it runs at most once; dropping an
/// unconsumed subscription releases it too.
pub(crate) struct Subscription {
    dispose: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new(dispose: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            dispose: Some(Box::new(dispose)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.dispose.is_some())
            .finish()
    }
}
