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
use crate::*;

/// Signature of the frame-chrome callback. It receives the rect to decorate and the semantic
/// color kind, already promoted to its hover/focus state.
pub type DrawFrameFn = fn(&mut DrawCtx<'_>, Recti, ControlColor);

/// Borrowed drawing surface handed to widgets and to the frame-chrome callback.
pub struct DrawCtx<'a> {
    commands: &'a mut CommandBuffer,
    clip: &'a mut ClipStack,
    style: &'a Style,
    font: &'a dyn Font,
}

impl<'a> DrawCtx<'a> {
    pub(crate) fn new(commands: &'a mut CommandBuffer, clip: &'a mut ClipStack, style: &'a Style, font: &'a dyn Font) -> Self {
        Self { commands, clip, style, font }
    }

    /// Active style.
    pub fn style(&self) -> &Style { self.style }

    /// Font used to measure text.
    pub fn font(&self) -> &dyn Font { self.font }

    /// Active clip rect.
    pub fn current_clip_rect(&self) -> Recti { self.clip.current() }

    /// Pushes a clip rect intersected with the current one.
    pub fn push_clip_rect(&mut self, rect: Recti) { self.clip.push(rect, self.commands); }

    /// Restores the previous clip rect.
    pub fn pop_clip_rect(&mut self) { self.clip.pop(self.commands); }

    /// Classifies `r` against the active clip rect.
    pub fn check_clip(&self, r: Recti) -> Clip { self.clip.check(r) }

    /// Appends a raw command.
    pub fn push_command(&mut self, cmd: Command) { self.commands.push(cmd); }

    // Partially visible commands are bracketed by clip commands restoring the outer clip.
    fn push_clipped(&mut self, r: Recti, cmd: Command) {
        match self.clip.check(r) {
            Clip::All => (),
            Clip::None => self.commands.push(cmd),
            Clip::Part => {
                let clip = self.clip.current();
                self.commands.push(Command::Clip { rect: clip });
                self.commands.push(cmd);
                self.commands.push(Command::Clip { rect: clip });
            }
        }
    }

    /// Fills `rect`, trimmed to the clip rect.
    pub fn draw_rect(&mut self, rect: Recti, color: Color) {
        let rect = intersect_rect(rect, self.clip.current());
        if rect.width > 0 && rect.height > 0 {
            self.commands.push(Command::Rect { rect, color });
        }
    }

    /// Outlines `rect`.
    pub fn draw_box(&mut self, rect: Recti, color: Color) { self.push_clipped(rect, Command::Box { rect, color }); }

    /// Draws `text` with its top-left corner at `pos`.
    pub fn draw_text(&mut self, text: &str, pos: Vec2i, color: Color) {
        let r = rect(pos.x, pos.y, self.font.text_width(text), self.font.line_height());
        self.push_clipped(r, Command::Text { pos, color, text: String::from(text) });
    }

    /// Draws an icon centered in `rect`.
    pub fn draw_icon(&mut self, id: IconId, rect: Recti, color: Color) { self.push_clipped(rect, Command::Icon { rect, id, color }); }

    /// Draws a scrollbar track.
    pub fn draw_scroll_track(&mut self, rect: Recti, color: Color) {
        let rect = intersect_rect(rect, self.clip.current());
        if rect.width > 0 && rect.height > 0 {
            self.commands.push(Command::ScrollTrack { rect, color });
        }
    }

    /// Draws a scrollbar thumb.
    pub fn draw_scroll_thumb(&mut self, rect: Recti, color: Color) {
        let rect = intersect_rect(rect, self.clip.current());
        if rect.width > 0 && rect.height > 0 {
            self.commands.push(Command::ScrollThumb { rect, color });
        }
    }

    /// Draws `text` aligned inside `rect` according to `opt`.
    pub fn draw_control_text(&mut self, text: &str, rect: Recti, colorid: ControlColor, opt: WidgetOption) {
        let tw = self.font.text_width(text);
        let th = self.font.line_height();
        let padding = self.style.padding;
        let color = self.style.color(colorid);
        self.push_clip_rect(rect);
        let y = rect.y + (rect.height - th) / 2;
        let x = if opt.is_aligned_center() {
            rect.x + (rect.width - tw) / 2
        } else if opt.is_aligned_right() {
            rect.x + rect.width - tw - padding
        } else {
            rect.x + padding
        };
        self.draw_text(text, vec2(x, y), color);
        self.pop_clip_rect();
    }
}

/// Built-in frame chrome: a filled rect plus a border when the border color is visible.
/// Scrollbar kinds map to their dedicated commands.
pub fn default_draw_frame(ctx: &mut DrawCtx<'_>, rect: Recti, colorid: ControlColor) {
    let color = ctx.style().color(colorid);
    match colorid {
        ControlColor::ScrollBase => ctx.draw_scroll_track(rect, color),
        ControlColor::ScrollThumb => ctx.draw_scroll_thumb(rect, color),
        ControlColor::TitleBG => ctx.draw_rect(rect, color),
        _ => {
            ctx.draw_rect(rect, color);
            let border = ctx.style().color(ControlColor::Border);
            if border.a != 0 {
                ctx.draw_box(expand_rect(rect, 1), border);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(buf: &CommandBuffer) -> Vec<&'static str> {
        buf.iter()
            .map(|c| match c {
                Command::Clip { .. } => "clip",
                Command::Rect { .. } => "rect",
                Command::Box { .. } => "box",
                Command::Text { .. } => "text",
                Command::Icon { .. } => "icon",
                Command::ScrollTrack { .. } => "track",
                Command::ScrollThumb { .. } => "thumb",
            })
            .collect()
    }

    #[test]
    fn hidden_text_is_skipped() {
        let style = Style::default();
        let font = MonoFont::new(8, 10);
        let mut cmds = CommandBuffer::with_capacity(8);
        let mut clip = ClipStack::default();
        clip.push(rect(0, 0, 50, 50), &mut cmds);
        cmds.reset();
        let mut ctx = DrawCtx::new(&mut cmds, &mut clip, &style, &font);
        ctx.draw_text("hidden", vec2(100, 100), color(255, 255, 255, 255));
        assert!(cmds.is_empty());
    }

    #[test]
    fn partial_text_is_wrapped_in_clips() {
        let style = Style::default();
        let font = MonoFont::new(8, 10);
        let mut cmds = CommandBuffer::with_capacity(8);
        let mut clip = ClipStack::default();
        clip.push(rect(0, 0, 50, 50), &mut cmds);
        cmds.reset();
        let mut ctx = DrawCtx::new(&mut cmds, &mut clip, &style, &font);
        ctx.draw_text("partially", vec2(40, 10), color(255, 255, 255, 255));
        assert_eq!(kinds(&cmds), vec!["clip", "text", "clip"]);
    }

    #[test]
    fn rects_are_trimmed_to_clip() {
        let style = Style::default();
        let font = MonoFont::new(8, 10);
        let mut cmds = CommandBuffer::with_capacity(8);
        let mut clip = ClipStack::default();
        clip.push(rect(0, 0, 50, 50), &mut cmds);
        cmds.reset();
        let mut ctx = DrawCtx::new(&mut cmds, &mut clip, &style, &font);
        ctx.draw_rect(rect(40, 40, 20, 20), color(1, 2, 3, 4));
        match cmds.iter().next() {
            Some(Command::Rect { rect, .. }) => assert_eq!((rect.x, rect.y, rect.width, rect.height), (40, 40, 10, 10)),
            _ => panic!("expected a rect"),
        }
    }

    #[test]
    fn default_frame_maps_scroll_kinds() {
        let style = Style::default();
        let font = MonoFont::new(8, 10);
        let mut cmds = CommandBuffer::with_capacity(8);
        let mut clip = ClipStack::default();
        let mut ctx = DrawCtx::new(&mut cmds, &mut clip, &style, &font);
        default_draw_frame(&mut ctx, rect(0, 0, 10, 100), ControlColor::ScrollBase);
        default_draw_frame(&mut ctx, rect(0, 0, 10, 20), ControlColor::ScrollThumb);
        default_draw_frame(&mut ctx, rect(10, 10, 10, 20), ControlColor::Button);
        assert_eq!(kinds(&cmds), vec!["track", "thumb", "rect", "box"]);
    }
}
