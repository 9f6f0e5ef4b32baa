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
use crate::{Color, IconId, Recti, Vec2i};
use std::ops::Range;

/// Draw commands recorded while widgets run. Commands are replayed, never mutated.
#[derive(Clone)]
pub enum Command {
    /// Sets the active clip rectangle.
    Clip {
        /// Rect to clip against.
        rect: Recti,
    },
    /// Fills a rectangle.
    Rect {
        /// Target rectangle.
        rect: Recti,
        /// Fill color.
        color: Color,
    },
    /// Draws a one unit wide rectangle outline.
    Box {
        /// Outer rectangle of the outline.
        rect: Recti,
        /// Outline color.
        color: Color,
    },
    /// Draws text.
    Text {
        /// Top-left text position.
        pos: Vec2i,
        /// Text color.
        color: Color,
        /// UTF-8 string to render.
        text: String,
    },
    /// Draws an icon.
    Icon {
        /// Target rectangle.
        rect: Recti,
        /// Icon identifier.
        id: IconId,
        /// Tint color.
        color: Color,
    },
    /// Draws the track of a scrollbar.
    ScrollTrack {
        /// Track rectangle.
        rect: Recti,
        /// Track color.
        color: Color,
    },
    /// Draws the thumb of a scrollbar.
    ScrollThumb {
        /// Thumb rectangle.
        rect: Recti,
        /// Thumb color.
        color: Color,
    },
}

/// Append-only list of commands reused every frame.
pub struct CommandBuffer {
    commands: Vec<Command>,
}

impl CommandBuffer {
    /// Creates a buffer with room for `capacity` commands.
    pub fn with_capacity(capacity: usize) -> Self { Self { commands: Vec::with_capacity(capacity) } }

    /// Drops every command while keeping the allocation.
    pub fn reset(&mut self) { self.commands.clear(); }

    /// Appends a command.
    pub fn push(&mut self, cmd: Command) { self.commands.push(cmd); }

    /// Number of commands recorded this frame.
    pub fn len(&self) -> usize { self.commands.len() }

    /// Returns `true` when no command was recorded.
    pub fn is_empty(&self) -> bool { self.commands.is_empty() }

    /// Number of commands the buffer holds before reallocating.
    pub fn capacity(&self) -> usize { self.commands.capacity() }

    /// Iterates over every command in recording order.
    pub fn iter(&self) -> std::slice::Iter<'_, Command> { self.commands.iter() }

    /// Iterates over `range`, clamped to the recorded commands.
    pub fn range(&self, range: Range<usize>) -> std::slice::Iter<'_, Command> {
        let end = range.end.min(self.commands.len());
        let start = range.start.min(end);
        self.commands[start..end].iter()
    }

    pub(crate) fn as_slice(&self) -> &[Command] { &self.commands }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{color, rect};

    fn fill(n: usize) -> CommandBuffer {
        let mut buf = CommandBuffer::with_capacity(4);
        for i in 0..n {
            buf.push(Command::Rect { rect: rect(i as i32, 0, 1, 1), color: color(0, 0, 0, 255) });
        }
        buf
    }

    #[test]
    fn reset_keeps_capacity() {
        let mut buf = fill(32);
        let cap = buf.capacity();
        buf.reset();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn range_yields_exact_slice() {
        let buf = fill(10);
        let xs: Vec<i32> = buf
            .range(3..6)
            .map(|c| match c {
                Command::Rect { rect, .. } => rect.x,
                _ => -1,
            })
            .collect();
        assert_eq!(xs, vec![3, 4, 5]);
    }

    #[test]
    fn range_is_clamped() {
        let buf = fill(3);
        assert_eq!(buf.range(2..10).count(), 1);
        assert_eq!(buf.range(8..10).count(), 0);
    }
}
