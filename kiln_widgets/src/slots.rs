// Copyright 2025 the Kiln Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generational slot storage backing widget ids and entry handles.

/// Index plus generation. A key goes stale once its slot is freed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct SlotKey(u32, u32);

impl SlotKey {
    fn idx(self) -> usize {
        self.0 as usize
    }

    /// Pack into 64 bits (generation high, index low).
    pub(crate) fn to_bits(self) -> u64 {
        (u64::from(self.1) << 32) | u64::from(self.0)
    }
}

/// Vec of optional values with per-slot generations and a free list.
#[derive(Clone, Debug)]
pub(crate) struct Slots<T> {
    items: Vec<Option<T>>,
    generations: Vec<u32>, // last generation per slot (persists across frees)
    free_list: Vec<usize>,
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }
}

impl<T> Slots<T> {
    pub(crate) fn insert(&mut self, value: T) -> SlotKey {
        if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.items[idx] = Some(value);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Slot indices are 32-bit."
            )]
            SlotKey(idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.items.push(Some(value));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Slot indices are 32-bit."
            )]
            SlotKey((self.items.len() - 1) as u32, generation)
        }
    }

    pub(crate) fn remove(&mut self, key: SlotKey) -> Option<T> {
        if !self.contains(key) {
            return None;
        }
        let value = self.items[key.idx()].take();
        self.free_list.push(key.idx());
        value
    }

    pub(crate) fn contains(&self, key: SlotKey) -> bool {
        self.items
            .get(key.idx())
            .is_some_and(|n| n.is_some() && self.generations[key.idx()] == key.1)
    }

    pub(crate) fn get(&self, key: SlotKey) -> Option<&T> {
        if !self.contains(key) {
            return None;
        }
        self.items[key.idx()].as_ref()
    }

    pub(crate) fn get_mut(&mut self, key: SlotKey) -> Option<&mut T> {
        if !self.contains(key) {
            return None;
        }
        self.items[key.idx()].as_mut()
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len() - self.free_list.len()
    }
}
