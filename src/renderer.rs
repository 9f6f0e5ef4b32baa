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
use crate::{Color, Command, IconId, Recti, Vec2i, rect};

/// Text measurement used by the layout engine and text-bearing widgets.
/// Units are whatever the host renders in (pixels, terminal cells, ...).
pub trait Font {
    /// Width of `text` when drawn on a single line.
    fn text_width(&self, text: &str) -> i32;
    /// Height of one line of text.
    fn line_height(&self) -> i32;
}

#[derive(Copy, Clone, Debug)]
/// Fixed-advance font: every character has the same width.
pub struct MonoFont {
    char_width: i32,
    line_height: i32,
}

impl MonoFont {
    /// Creates a font whose glyphs are `char_width` wide and lines `line_height` tall.
    pub fn new(char_width: i32, line_height: i32) -> Self { Self { char_width, line_height } }
}

impl Font for MonoFont {
    fn text_width(&self, text: &str) -> i32 { text.chars().count() as i32 * self.char_width }
    fn line_height(&self) -> i32 { self.line_height }
}

/// Mandatory capabilities of a render backend.
pub trait Renderer {
    /// Fills a rectangle.
    fn fill_rect(&mut self, rect: Recti, color: Color);
    /// Draws a single line of text.
    fn draw_text(&mut self, font: &dyn Font, text: &str, pos: Vec2i, color: Color);
    /// Sets the clip rect for subsequent draws.
    fn set_clip(&mut self, rect: Recti);

    /// Icon drawing, if supported. Icons are skipped otherwise.
    fn icons(&mut self) -> Option<&mut dyn IconRenderer> { None }
    /// Native outline drawing, if supported. Falls back to four filled rects.
    fn boxes(&mut self) -> Option<&mut dyn BoxRenderer> { None }
    /// Native scrollbar drawing, if supported. Falls back to filled rects.
    fn scrollbars(&mut self) -> Option<&mut dyn ScrollbarRenderer> { None }
}

/// Optional icon capability.
pub trait IconRenderer {
    /// Draws `id` inside `rect`.
    fn draw_icon(&mut self, id: IconId, rect: Recti, color: Color);
}

/// Optional outline capability.
pub trait BoxRenderer {
    /// Draws a one unit outline of `rect`.
    fn draw_box(&mut self, rect: Recti, color: Color);
}

/// Optional scrollbar capability.
pub trait ScrollbarRenderer {
    /// Draws a scrollbar track.
    fn draw_track(&mut self, rect: Recti, color: Color);
    /// Draws a scrollbar thumb.
    fn draw_thumb(&mut self, rect: Recti, color: Color);
}

/// Replays a single command onto `renderer`, falling back when an optional capability is missing.
pub fn replay_command(renderer: &mut dyn Renderer, font: &dyn Font, cmd: &Command) {
    match cmd {
        Command::Clip { rect } => renderer.set_clip(*rect),
        Command::Rect { rect, color } => renderer.fill_rect(*rect, *color),
        Command::Text { pos, color, text } => renderer.draw_text(font, text, *pos, *color),
        Command::Icon { rect, id, color } => {
            if let Some(icons) = renderer.icons() {
                icons.draw_icon(*id, *rect, *color);
            }
        }
        Command::Box { rect: r, color } => match renderer.boxes() {
            Some(boxes) => boxes.draw_box(*r, *color),
            None => {
                renderer.fill_rect(rect(r.x + 1, r.y, r.width - 2, 1), *color);
                renderer.fill_rect(rect(r.x + 1, r.y + r.height - 1, r.width - 2, 1), *color);
                renderer.fill_rect(rect(r.x, r.y, 1, r.height), *color);
                renderer.fill_rect(rect(r.x + r.width - 1, r.y, 1, r.height), *color);
            }
        },
        Command::ScrollTrack { rect, color } => match renderer.scrollbars() {
            Some(bars) => bars.draw_track(*rect, *color),
            None => renderer.fill_rect(*rect, *color),
        },
        Command::ScrollThumb { rect, color } => match renderer.scrollbars() {
            Some(bars) => bars.draw_thumb(*rect, *color),
            None => renderer.fill_rect(*rect, *color),
        },
    }
}
