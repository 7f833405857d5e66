use std::mem::MaybeUninit;

/// Index-style arena with stable slots and a free list.
///
/// Removal never shifts other entries, so indices stay valid across
/// structural changes elsewhere in the collection.
pub(crate) struct Slab<T> {
    items: Vec<MaybeUninit<T>>,
    free: Vec<usize>,
    used: Vec<bool>,
    count: usize,
}

impl<T> Slab<T> {
    pub(crate) fn new(size: usize) -> Self {
        let items = (0..size).map(|_| MaybeUninit::<T>::uninit()).collect();
        let free = (0..size).collect();
        let used = (0..size).map(|_| false).collect();

        Self {
            items,
            free,
            used,
            count: 0,
        }
    }

    /// Number of occupied slots.
    pub(crate) fn len(&self) -> usize {
        self.count
    }

    pub(crate) fn insert(&mut self, item: T) -> usize {
        let index = if let Some(i) = self.free.pop() {
            i
        } else {
            let len = self.items.len();
            let new_len = if len == 0 { 1 } else { 2 * len };

            self.items
                .extend((len..new_len).map(|_| MaybeUninit::<T>::uninit()));
            self.free.extend((len + 1)..new_len);
            self.used.extend((len..new_len).map(|_| false));

            len
        };

        self.items[index] = MaybeUninit::new(item);
        self.used[index] = true;
        self.count += 1;

        index
    }

    pub(crate) fn remove(&mut self, index: usize) -> T {
        assert!(index < self.items.len(), "Index out of range");
        assert!(self.used[index], "Item is not set");

        self.free.push(index);
        self.used[index] = false;
        self.count -= 1;

        let item = unsafe { self.items[index].assume_init_read() };
        self.items[index] = MaybeUninit::uninit();

        item
    }

    /// Drops every entry for which `keep` returns `false`.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        for index in 0..self.items.len() {
            if self.used[index] {
                let keep_it = keep(unsafe { self.items[index].assume_init_ref() });

                if !keep_it {
                    let _ = self.remove(index);
                }
            }
        }
    }
}

impl<T> Drop for Slab<T> {
    fn drop(&mut self) {
        for (slot, &used) in self.items.iter_mut().zip(self.used.iter()) {
            if used {
                unsafe {
                    slot.assume_init_drop();
                }
            }
        }
    }
}
