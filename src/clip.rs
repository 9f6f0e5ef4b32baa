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
use crate::{Clip, Command, CommandBuffer, Recti, UNCLIPPED_RECT, intersect_rect, rect_within};
use log::warn;

/// Stack of nested clip rects. The top is always the intersection of everything pushed so far,
/// so the visible region can only shrink while nesting.
#[derive(Default, Clone)]
pub struct ClipStack {
    stack: Vec<Recti>,
}

impl ClipStack {
    /// Creates an empty stack with room for `capacity` nested rects.
    pub fn with_capacity(capacity: usize) -> Self { Self { stack: Vec::with_capacity(capacity) } }

    /// The active clip rect, or [`UNCLIPPED_RECT`] when nothing is pushed.
    pub fn current(&self) -> Recti { self.stack.last().copied().unwrap_or(UNCLIPPED_RECT) }

    /// Number of pushed rects.
    pub fn len(&self) -> usize { self.stack.len() }

    /// Returns `true` when no rect is pushed.
    pub fn is_empty(&self) -> bool { self.stack.is_empty() }

    /// Intersects `rect` with the current top, pushes the result and records the clip change.
    pub fn push(&mut self, rect: Recti, commands: &mut CommandBuffer) {
        let clipped = intersect_rect(rect, self.current());
        self.stack.push(clipped);
        commands.push(Command::Clip { rect: clipped });
    }

    /// Starts a fresh unclipped region for a root container.
    pub(crate) fn push_unclipped(&mut self, commands: &mut CommandBuffer) {
        self.stack.push(UNCLIPPED_RECT);
        commands.push(Command::Clip { rect: UNCLIPPED_RECT });
    }

    /// Discards the top and records a clip change back to the new top.
    pub fn pop(&mut self, commands: &mut CommandBuffer) {
        if self.stack.pop().is_none() {
            warn!("pop on an empty clip stack");
        }
        commands.push(Command::Clip { rect: self.current() });
    }

    /// Classifies `r` against the current clip rect.
    pub fn check(&self, r: Recti) -> Clip {
        let cr = self.current();
        if r.x >= cr.x + cr.width || r.x + r.width <= cr.x || r.y >= cr.y + cr.height || r.y + r.height <= cr.y {
            return Clip::All;
        }
        if rect_within(r, cr) {
            return Clip::None;
        }
        Clip::Part
    }

    pub(crate) fn clear(&mut self) { self.stack.clear(); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rect;

    #[test]
    fn nested_pushes_only_shrink() {
        let mut cmds = CommandBuffer::with_capacity(16);
        let mut clip = ClipStack::default();
        let pushed = [rect(0, 0, 200, 200), rect(50, 50, 400, 100), rect(-10, 60, 90, 500), rect(70, 0, 5, 5)];
        for r in pushed.iter() {
            clip.push(*r, &mut cmds);
            let top = clip.current();
            for earlier in pushed.iter().take(clip.len()) {
                assert!(top.width == 0 || top.height == 0 || rect_within(top, *earlier));
            }
        }
        assert_eq!(clip.current().height, 0);
    }

    #[test]
    fn push_and_pop_record_clip_changes() {
        let mut cmds = CommandBuffer::with_capacity(4);
        let mut clip = ClipStack::default();
        clip.push(rect(0, 0, 10, 10), &mut cmds);
        clip.pop(&mut cmds);
        assert_eq!(cmds.len(), 2);
        match cmds.iter().last() {
            Some(Command::Clip { rect }) => assert_eq!(rect.width, UNCLIPPED_RECT.width),
            _ => panic!("expected a clip command"),
        }
    }

    #[test]
    fn pop_empty_restores_unclipped() {
        let mut cmds = CommandBuffer::with_capacity(4);
        let mut clip = ClipStack::default();
        clip.pop(&mut cmds);
        assert!(clip.is_empty());
        assert_eq!(cmds.len(), 1);
    }

    #[test]
    fn check_classifies() {
        let mut cmds = CommandBuffer::with_capacity(4);
        let mut clip = ClipStack::default();
        clip.push(rect(10, 10, 100, 100), &mut cmds);
        assert_eq!(clip.check(rect(20, 20, 10, 10)), Clip::None);
        assert_eq!(clip.check(rect(100, 100, 20, 20)), Clip::Part);
        assert_eq!(clip.check(rect(110, 10, 5, 5)), Clip::All);
        assert_eq!(clip.check(rect(0, 0, 10, 10)), Clip::All);
    }
}
