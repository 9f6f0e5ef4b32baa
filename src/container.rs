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
use crate::{ContainerOption, Id, Pool, Recti, Vec2i};
use log::debug;
use std::collections::HashMap;

/// Persistent state of a window, popup or panel.
#[derive(Clone)]
pub(crate) struct Container {
    pub id: Id,
    pub name: String,
    /// Screen-space rect including chrome.
    pub rect: Recti,
    /// Content rect after border/scrollbar reservation, as resolved on the last frame it ran.
    pub body: Recti,
    /// Extent of everything laid out during the last frame the container was open.
    pub content_size: Vec2i,
    /// Widest extent of fixed-width cells ever seen; only grows.
    pub min_content_width: i32,
    pub scroll: Vec2i,
    pub zindex: i32,
    pub open: bool,
    /// Set once the first `begin` decided whether the container starts open.
    pub initialized: bool,
    pub opt: ContainerOption,
    pub root: bool,
    pub head: usize,
    pub tail: usize,
    pub scrollbar_x: bool,
    pub scrollbar_y: bool,
    pub last_frame: usize,
}

impl Container {
    fn new(id: Id, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            rect: Recti::default(),
            body: Recti::default(),
            content_size: Vec2i::default(),
            min_content_width: 0,
            scroll: Vec2i::default(),
            zindex: 0,
            open: false,
            initialized: false,
            opt: ContainerOption::NONE,
            root: false,
            head: 0,
            tail: 0,
            scrollbar_x: false,
            scrollbar_y: false,
            last_frame: 0,
        }
    }

    pub fn is_always_on_top(&self) -> bool { self.opt.is_always_on_top() }

    /// Sort key used to order roots for painting and hover priority.
    pub fn order_key(&self) -> (bool, i32) { (self.is_always_on_top(), self.zindex) }

    pub fn info(&self) -> ContainerInfo {
        ContainerInfo {
            id: self.id,
            name: self.name.clone(),
            rect: self.rect,
            body: self.body,
            content_size: self.content_size,
            scroll: self.scroll,
            zindex: self.zindex,
            open: self.open,
            always_on_top: self.is_always_on_top(),
            has_scrollbar_x: self.scrollbar_x,
            has_scrollbar_y: self.scrollbar_y,
            last_frame: self.last_frame,
        }
    }
}

#[derive(Clone)]
/// Read-only snapshot of a container.
pub struct ContainerInfo {
    /// Unscoped identifier derived from the name.
    pub id: Id,
    /// Name the container was created with.
    pub name: String,
    /// Outer rect including title bar and frame.
    pub rect: Recti,
    /// Content rect after scrollbar reservation.
    pub body: Recti,
    /// Measured extent of the content.
    pub content_size: Vec2i,
    /// Current scroll offset.
    pub scroll: Vec2i,
    /// Stacking order among roots.
    pub zindex: i32,
    /// Whether the container is open.
    pub open: bool,
    /// Whether the container paints above every normal root.
    pub always_on_top: bool,
    /// Whether a horizontal scrollbar was shown on the last frame.
    pub has_scrollbar_x: bool,
    /// Whether a vertical scrollbar was shown on the last frame.
    pub has_scrollbar_y: bool,
    /// Last frame the container ran.
    pub last_frame: usize,
}

/// Owns every container ever referenced. Containers are created lazily, start closed and live
/// for the lifetime of the registry.
pub struct ContainerRegistry {
    pool: Pool<Container>,
    index: HashMap<Id, usize>,
}

impl ContainerRegistry {
    /// Creates a registry preallocating `capacity` containers and refusing more than `max`.
    pub fn new(capacity: usize, max: usize) -> Self { Self { pool: Pool::new(capacity, max), index: HashMap::with_capacity(capacity) } }

    /// Returns the slot of the container called `name`, creating it closed on first use.
    pub(crate) fn get_or_create(&mut self, name: &str) -> usize {
        let id = Id::from_str(name);
        if let Some(idx) = self.index.get(&id) {
            return *idx;
        }
        let idx = self.pool.insert(Container::new(id, name));
        self.index.insert(id, idx);
        debug!("container '{}' created ({:?})", name, id);
        idx
    }

    /// Slot of an existing container.
    pub(crate) fn lookup(&self, name: &str) -> Option<usize> { self.index.get(&Id::from_str(name)).copied() }

    pub(crate) fn get(&self, idx: usize) -> &Container { &self.pool[idx] }

    pub(crate) fn get_mut(&mut self, idx: usize) -> &mut Container { &mut self.pool[idx] }

    /// Number of containers created so far.
    pub fn len(&self) -> usize { self.pool.len() }

    /// Returns `true` when no container exists yet.
    pub fn is_empty(&self) -> bool { self.pool.is_empty() }

    /// Snapshot of the container called `name`.
    pub fn info(&self, name: &str) -> Option<ContainerInfo> { self.lookup(name).map(|idx| self.pool[idx].info()) }

    /// Snapshots of every container in creation order.
    pub fn iter(&self) -> impl Iterator<Item = ContainerInfo> + '_ { self.pool.iter().map(|c| c.info()) }
}
