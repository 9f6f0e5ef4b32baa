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
use std::fmt::Write;

use crate::*;

impl Context {
    /// Draws a single line of text in the next cell.
    pub fn label(&mut self, text: &str) {
        let r = self.layout_next();
        self.draw_control_text(text, r, ControlColor::Text, WidgetOption::NONE);
    }

    /// Draws word-wrapped text, one row per line, inside a column.
    pub fn text(&mut self, text: &str) {
        let font = self.font.clone();
        let color = self.style.color(ControlColor::Text);
        self.column(|ctx| {
            ctx.layout_row(&[SizePolicy::Remainder(0)], SizePolicy::Fixed(font.line_height()));
            for line in text.split('\n') {
                let mut r = ctx.layout_next();
                let mut start = 0;
                let mut pos = 0;
                let mut width = 0;
                for word in line.split_inclusive(' ') {
                    let word_width = font.text_width(word.trim_end_matches(' '));
                    if width + word_width > r.width && pos > start {
                        ctx.draw_text(line[start..pos].trim_end(), vec2(r.x, r.y), color);
                        r = ctx.layout_next();
                        start = pos;
                        width = 0;
                    }
                    width += font.text_width(word);
                    pos += word.len();
                }
                let rest = &line[start..];
                if !rest.is_empty() {
                    ctx.draw_text(rest, vec2(r.x, r.y), color);
                }
            }
        });
    }

    /// Text button. Reports `SUBMIT` on the frame it is clicked.
    pub fn button(&mut self, label: &str) -> ResourceState { self.button_ex(label, None, WidgetOption::ALIGN_CENTER) }

    /// Button with an optional icon. An empty label keys the id on the icon.
    pub fn button_ex(&mut self, label: &str, icon: Option<IconId>, opt: WidgetOption) -> ResourceState {
        let mut res = ResourceState::NONE;
        let id = match (label.is_empty(), icon) {
            (true, Some(icon)) => self.ids.scoped_id_u32(icon.0),
            _ => self.ids.scoped_id(label),
        };
        let r = self.layout_next();
        let control = self.update_control(id, r, opt);
        if control.clicked {
            res |= ResourceState::SUBMIT;
        }
        self.draw_control_frame(id, r, ControlColor::Button, opt);
        if !label.is_empty() {
            self.draw_control_text(label, r, ControlColor::Text, opt);
        }
        if let Some(icon) = icon {
            let color = self.style.color(ControlColor::Text);
            self.draw_icon(icon, r, color);
        }
        res
    }

    /// Check box bound to `state`. Reports `CHANGE` when toggled.
    pub fn checkbox(&mut self, label: &str, state: &mut bool) -> ResourceState {
        let mut res = ResourceState::NONE;
        let id = self.ids.scoped_id(label);
        let r = self.layout_next();
        let check = rect(r.x, r.y, r.height, r.height);
        let control = self.update_control(id, r, WidgetOption::NONE);
        if control.clicked {
            res |= ResourceState::CHANGE;
            *state = !*state;
        }
        self.draw_control_frame(id, check, ControlColor::Base, WidgetOption::NONE);
        if *state {
            let color = self.style.color(ControlColor::Text);
            self.draw_icon(CHECK_ICON, check, color);
        }
        let r = rect(r.x + check.width, r.y, r.width - check.width, r.height);
        self.draw_control_text(label, r, ControlColor::Text, WidgetOption::NONE);
        res
    }

    // Shift-click turns a numeric control into a textbox until it loses focus or submits.
    fn number_textbox(&mut self, value: &mut Real, r: Recti, id: Id, precision: usize) -> bool {
        if self.input.mouse_pressed.is_left() && self.input.key_down.is_shift() && self.hover == Some(id) {
            self.number_edit = Some(id);
            self.number_edit_buf.clear();
            let _ = write!(self.number_edit_buf, "{:.*}", precision, value);
        }
        if self.number_edit != Some(id) {
            return false;
        }

        let mut buf = std::mem::take(&mut self.number_edit_buf);
        let res = self.textbox_raw(&mut buf, id, r, WidgetOption::NONE);
        let done = res.is_submitted() || self.focus != Some(id);
        if done {
            if let Ok(v) = buf.trim().parse::<Real>() {
                *value = v;
            }
            self.number_edit = None;
        }
        self.number_edit_buf = buf;
        !done
    }

    /// Horizontal slider over `[low, high]`.
    pub fn slider(&mut self, key: &str, value: &mut Real, low: Real, high: Real) -> ResourceState {
        self.slider_ex(key, value, low, high, 0.0, 2, WidgetOption::ALIGN_CENTER)
    }

    /// Slider snapping to `step` (0 for continuous) and printing `precision` decimals.
    pub fn slider_ex(&mut self, key: &str, value: &mut Real, low: Real, high: Real, step: Real, precision: usize, opt: WidgetOption) -> ResourceState {
        let mut res = ResourceState::NONE;
        let last = *value;
        let mut v = last;
        let id = self.ids.scoped_id(key);
        let base = self.layout_next();
        if self.number_textbox(&mut v, base, id, precision) {
            return res;
        }
        let range = high - low;
        self.update_control(id, base, opt);
        if self.focus == Some(id) && (!self.input.mouse_down.is_none() || self.input.mouse_pressed.is_left()) && base.width > 0 && range > 0.0 {
            v = low + (self.input.mouse_pos.x - base.x) as Real * range / base.width as Real;
            if step != 0.0 {
                v = ((v + step / 2.0) / step).floor() * step;
            }
        }
        v = v.max(low).min(high);
        *value = v;
        if last != v {
            res |= ResourceState::CHANGE;
        }

        self.draw_control_frame(id, base, ControlColor::Base, opt);
        let w = self.style.thumb_size;
        let available = (base.width - w).max(0);
        let x = if range > 0.0 { ((v - low) * available as Real / range) as i32 } else { 0 };
        let thumb = rect(base.x + x, base.y, w, base.height);
        self.draw_control_frame(id, thumb, ControlColor::Button, opt);
        let text = format!("{:.*}", precision, v);
        self.draw_control_text(&text, base, ControlColor::Text, opt);
        res
    }

    /// Number field changed by dragging horizontally.
    pub fn number(&mut self, key: &str, value: &mut Real, step: Real) -> ResourceState {
        self.number_ex(key, value, step, 2, WidgetOption::ALIGN_CENTER)
    }

    /// Number field printing `precision` decimals.
    pub fn number_ex(&mut self, key: &str, value: &mut Real, step: Real, precision: usize, opt: WidgetOption) -> ResourceState {
        let mut res = ResourceState::NONE;
        let id = self.ids.scoped_id(key);
        let base = self.layout_next();
        let last = *value;
        if self.number_textbox(value, base, id, precision) {
            return res;
        }
        self.update_control(id, base, opt);
        if self.focus == Some(id) && self.input.mouse_down.is_left() {
            *value += self.input.mouse_delta.x as Real * step;
        }
        if *value != last {
            res |= ResourceState::CHANGE;
        }
        self.draw_control_frame(id, base, ControlColor::Base, opt);
        let text = format!("{:.*}", precision, value);
        self.draw_control_text(&text, base, ControlColor::Text, opt);
        res
    }

    /// Single line text field editing `buf`.
    pub fn textbox(&mut self, key: &str, buf: &mut String) -> ResourceState { self.textbox_ex(key, buf, WidgetOption::NONE) }

    /// Text field with explicit options.
    pub fn textbox_ex(&mut self, key: &str, buf: &mut String, opt: WidgetOption) -> ResourceState {
        let id = self.ids.scoped_id(key);
        let r = self.layout_next();
        self.textbox_raw(buf, id, r, opt)
    }

    /// Text field for control `id` at `r`. Focus is held until a press lands elsewhere.
    pub fn textbox_raw(&mut self, buf: &mut String, id: Id, r: Recti, opt: WidgetOption) -> ResourceState {
        let mut res = ResourceState::NONE;
        self.update_control(id, r, opt | WidgetOption::HOLD_FOCUS);

        if self.focus == Some(id) {
            if !self.input.input_text.is_empty() {
                buf.push_str(&self.input.input_text);
                res |= ResourceState::CHANGE;
            }
            if self.input.key_pressed.is_backspace() && buf.pop().is_some() {
                res |= ResourceState::CHANGE;
            }
            if self.input.key_pressed.is_return() {
                self.set_focus(None);
                res |= ResourceState::SUBMIT;
            }
        }

        self.draw_control_frame(id, r, ControlColor::Base, opt);
        if self.focus == Some(id) {
            let color = self.style.color(ControlColor::Text);
            let padding = self.style.padding;
            let textw = self.font.text_width(buf);
            let texth = self.font.line_height();
            // keep the caret visible once the text overflows
            let ofx = r.width - padding - textw - 1;
            let textx = r.x + ofx.min(padding);
            let texty = r.y + (r.height - texth) / 2;
            self.push_clip_rect(r);
            self.draw_text(buf, vec2(textx, texty), color);
            self.draw_rect(rect(textx + textw, texty, 1, texth), color);
            self.pop_clip_rect();
        } else {
            self.draw_control_text(buf, r, ControlColor::Text, opt);
        }
        res
    }

    fn header_ex(&mut self, label: &str, treenode: bool, opt: WidgetOption) -> bool {
        let id = self.ids.scoped_id(label);
        let toggled = self.treenodes.get(&id).copied().unwrap_or(false);
        self.layout_row(&[SizePolicy::Remainder(0)], SizePolicy::Auto);
        let mut r = self.layout_next();
        let control = self.update_control(id, r, WidgetOption::NONE);
        let toggled = toggled ^ control.clicked;
        if toggled {
            self.treenodes.insert(id, true);
        } else {
            self.treenodes.remove(&id);
        }
        let expanded = if opt.is_expanded() { !toggled } else { toggled };

        if treenode {
            if self.hover == Some(id) {
                self.draw_frame(r, ControlColor::ButtonHover);
            }
        } else {
            self.draw_control_frame(id, r, ControlColor::Button, WidgetOption::NONE);
        }
        let color = self.style.color(ControlColor::Text);
        self.draw_icon(if expanded { EXPANDED_ICON } else { COLLAPSED_ICON }, rect(r.x, r.y, r.height, r.height), color);
        let padding = self.style.padding;
        r.x += r.height - padding;
        r.width -= r.height - padding;
        self.draw_control_text(label, r, ControlColor::Text, WidgetOption::NONE);
        expanded
    }

    /// Collapsible section header. Returns whether it is expanded.
    pub fn header(&mut self, label: &str, opt: WidgetOption) -> bool { self.header_ex(label, false, opt) }

    /// Collapsible tree node running `f` indented and scoped under its label while expanded.
    pub fn treenode<F: FnOnce(&mut Self)>(&mut self, label: &str, opt: WidgetOption, f: F) -> bool {
        if !self.header_ex(label, true, opt) {
            return false;
        }
        let indent = self.style.indent;
        let id = self.ids.scoped_id(label);
        self.indent(indent);
        self.ids.push_id(id);
        f(self);
        self.ids.pop_scope();
        self.indent(-indent);
        true
    }
}
