//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
// -----------------------------------------------------------------------------
// Ported to rust from https://github.com/rxi/microui/ and the original license
//
// Copyright (c) 2020 rxi
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.
//
use crate::Id;
use log::debug;

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
/// Slot of a fixed-size recency pool.
pub struct PoolItem {
    /// Identifier occupying the slot.
    pub id: Id,
    /// Frame the slot was last touched.
    pub last_update: usize,
}

/// Claims an empty slot (default id), or else the least recently updated one, for `id` and
/// returns its index.
///
/// Panics when every slot is occupied and was already touched during `frame`: the pool is too
/// small for the number of live entries, which is a configuration error.
pub fn pool_init(items: &mut [PoolItem], frame: usize, id: Id) -> usize {
    let mut found = items.iter().position(|item| item.id == Id::default());
    if found.is_none() {
        let mut oldest = frame;
        for (i, item) in items.iter().enumerate() {
            if item.last_update < oldest {
                oldest = item.last_update;
                found = Some(i);
            }
        }
    }
    let idx = match found {
        Some(idx) => idx,
        None => panic!("pool of {} slots exhausted in frame {}", items.len(), frame),
    };
    items[idx].id = id;
    pool_update(items, idx, frame);
    idx
}

/// Index of the slot holding `id`, if any.
pub fn pool_get(items: &[PoolItem], id: Id) -> Option<usize> { items.iter().position(|item| item.id == id) }

/// Marks slot `idx` as used during `frame`.
pub fn pool_update(items: &mut [PoolItem], idx: usize, frame: usize) { items[idx].last_update = frame; }

/// Storage that grows in steps from an initial capacity up to a hard maximum.
/// Going past the maximum panics: it means a runaway number of entries, not a runtime condition.
pub struct Pool<T> {
    items: Vec<T>,
    max: usize,
}

impl<T> Pool<T> {
    /// Creates a pool preallocating `initial` entries and refusing to hold more than `max`.
    pub fn new(initial: usize, max: usize) -> Self {
        assert!(initial <= max, "initial pool size {} exceeds maximum {}", initial, max);
        Self { items: Vec::with_capacity(initial), max }
    }

    /// Stores `value` and returns its index. Indices are stable for the life of the pool.
    pub fn insert(&mut self, value: T) -> usize {
        if self.items.len() >= self.max {
            panic!("pool exhausted: hard maximum of {} entries reached", self.max);
        }
        if self.items.len() == self.items.capacity() {
            let grow = self.items.capacity().max(1).min(self.max - self.items.len());
            debug!("growing pool from {} by {} entries", self.items.capacity(), grow);
            self.items.reserve_exact(grow);
        }
        self.items.push(value);
        self.items.len() - 1
    }

    /// Entry at `idx`.
    pub fn get(&self, idx: usize) -> Option<&T> { self.items.get(idx) }

    /// Mutable entry at `idx`.
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> { self.items.get_mut(idx) }

    /// Number of stored entries.
    pub fn len(&self) -> usize { self.items.len() }

    /// Returns `true` when nothing is stored.
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Hard maximum of entries.
    pub fn max(&self) -> usize { self.max }

    /// Iterates over every entry in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> { self.items.iter() }
}

impl<T> std::ops::Index<usize> for Pool<T> {
    type Output = T;
    fn index(&self, idx: usize) -> &T { &self.items[idx] }
}

impl<T> std::ops::IndexMut<usize> for Pool<T> {
    fn index_mut(&mut self, idx: usize) -> &mut T { &mut self.items[idx] }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_replaces_least_recent() {
        let mut items = [PoolItem { id: Id::new(1), last_update: 0 }; 3];
        items[0].last_update = 5;
        items[1].last_update = 2;
        items[2].last_update = 4;
        let idx = pool_init(&mut items, 6, Id::new(42));
        assert_eq!(idx, 1);
        assert_eq!(items[1], PoolItem { id: Id::new(42), last_update: 6 });
        assert_eq!(pool_get(&items, Id::new(42)), Some(1));
        assert_eq!(pool_get(&items, Id::new(7)), None);
    }

    #[test]
    #[should_panic]
    fn init_panics_when_all_slots_are_fresh() {
        let mut items = [PoolItem { id: Id::new(1), last_update: 3 }; 2];
        pool_init(&mut items, 3, Id::new(9));
    }

    #[test]
    fn empty_slots_are_free_in_frame_zero() {
        let mut items = [PoolItem::default(); 2];
        assert_eq!(pool_init(&mut items, 0, Id::new(1)), 0);
        assert_eq!(pool_init(&mut items, 0, Id::new(2)), 1);
        assert_eq!(pool_get(&items, Id::new(2)), Some(1));
    }

    #[test]
    fn pool_grows_up_to_max() {
        let mut pool = Pool::new(1, 5);
        for i in 0..5 {
            assert_eq!(pool.insert(i * 10), i as usize);
        }
        assert_eq!(pool.len(), 5);
        assert_eq!(pool[3], 30);
        *pool.get_mut(3).unwrap() = 31;
        assert_eq!(pool.get(3), Some(&31));
    }

    #[test]
    #[should_panic(expected = "pool exhausted")]
    fn pool_panics_past_max() {
        let mut pool = Pool::new(0, 2);
        pool.insert(1);
        pool.insert(2);
        pool.insert(3);
    }
}
