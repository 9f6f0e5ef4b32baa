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
use log::warn;

const FNV_OFFSET_BASIS: u32 = 2166136261;
const FNV_PRIME: u32 = 16777619;

#[derive(Default, Copy, Clone, Eq, PartialEq, Hash, Debug)]
/// 32-bit FNV-1a identifier of a widget or container.
///
/// Two different `(name, scope)` pairs may hash to the same value; collisions are neither
/// detected nor resolved.
pub struct Id(u32);

impl Id {
    /// Wraps a raw hash value.
    pub const fn new(value: u32) -> Self { Self(value) }

    /// Hashes `label` without any scope. Containers use this so their identity does not depend
    /// on where they are opened from.
    pub fn from_str(label: &str) -> Self { Self(hash_bytes(FNV_OFFSET_BASIS, label.as_bytes())) }

    /// Returns the raw numeric value wrapped by this ID.
    pub fn raw(self) -> u32 { self.0 }
}

fn hash_bytes(mut hash: u32, bytes: &[u8]) -> u32 {
    for b in bytes {
        hash = (hash ^ *b as u32).wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Stack of ID scopes. Every ID generated through the stack is seeded by the scope on top.
#[derive(Default, Clone)]
pub struct IdStack {
    last_id: Option<Id>,
    stack: Vec<Id>,
}

impl IdStack {
    /// Creates an empty stack with room for `capacity` nested scopes.
    pub fn with_capacity(capacity: usize) -> Self { Self { last_id: None, stack: Vec::with_capacity(capacity) } }

    /// Number of scopes currently pushed.
    pub fn len(&self) -> usize { self.stack.len() }

    /// Returns `true` when no scope is pushed.
    pub fn is_empty(&self) -> bool { self.stack.is_empty() }

    /// The most recently generated ID.
    pub fn last_id(&self) -> Option<Id> { self.last_id }

    fn seed(&self) -> u32 {
        match self.stack.last() {
            Some(id) => id.0,
            None => FNV_OFFSET_BASIS,
        }
    }

    fn remember(&mut self, hash: u32) -> Id {
        let id = Id(hash);
        self.last_id = Some(id);
        id
    }

    /// Hashes `name` within the current scope.
    pub fn scoped_id(&mut self, name: &str) -> Id {
        let hash = hash_bytes(self.seed(), name.as_bytes());
        self.remember(hash)
    }

    /// Hashes an integer key (e.g. an icon-only control) within the current scope.
    pub fn scoped_id_u32(&mut self, key: u32) -> Id {
        let hash = hash_bytes(self.seed(), &key.to_le_bytes());
        self.remember(hash)
    }

    /// Hashes `name` ignoring the scope stack; identical to [`Id::from_str`].
    pub fn raw_id(&mut self, name: &str) -> Id {
        let hash = hash_bytes(FNV_OFFSET_BASIS, name.as_bytes());
        self.remember(hash)
    }

    /// Pushes the scoped hash of `name` as the new scope.
    pub fn push_scope(&mut self, name: &str) {
        let id = self.scoped_id(name);
        self.stack.push(id);
    }

    /// Pushes an already computed ID as the new scope.
    pub fn push_id(&mut self, id: Id) { self.stack.push(id); }

    /// Pops the innermost scope. Popping an empty stack is a no-op.
    pub fn pop_scope(&mut self) {
        if self.stack.pop().is_none() {
            warn!("pop_scope called on an empty id stack");
        }
    }

    pub(crate) fn clear(&mut self) { self.stack.clear(); }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv1a_reference_values() {
        // empty string hashes to the offset basis, "a" to the published FNV-1a value
        assert_eq!(Id::from_str("").raw(), 0x811c9dc5);
        assert_eq!(Id::from_str("a").raw(), 0xe40c292c);
    }

    #[test]
    fn scoped_id_is_pure() {
        let mut ids = IdStack::default();
        ids.push_scope("window");
        let a = ids.scoped_id("button");
        let b = ids.scoped_id("button");
        assert_eq!(a, b);
        ids.pop_scope();
        let c = ids.scoped_id("button");
        assert_ne!(a, c);
        assert_eq!(c, Id::from_str("button"));
    }

    #[test]
    fn raw_id_ignores_scope() {
        let mut ids = IdStack::default();
        ids.push_scope("outer");
        ids.push_scope("inner");
        assert_eq!(ids.raw_id("panel"), Id::from_str("panel"));
        assert_eq!(ids.last_id(), Some(Id::from_str("panel")));
    }

    #[test]
    fn integer_keys_differ_from_each_other() {
        let mut ids = IdStack::default();
        assert_ne!(ids.scoped_id_u32(1), ids.scoped_id_u32(2));
        assert_eq!(ids.scoped_id_u32(7), ids.scoped_id_u32(7));
    }

    #[test]
    fn pop_empty_is_noop() {
        let mut ids = IdStack::default();
        ids.pop_scope();
        assert!(ids.is_empty());
    }
}
