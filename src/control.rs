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
use log::trace;

use crate::{rect_contains, Clip, Context, Id, Recti, WidgetOption};

/// Interaction state of a control after [`Context::update_control`].
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub struct ControlState {
    /// The mouse rests over the control.
    pub hovered: bool,
    /// The control owns the keyboard and mouse focus.
    pub focused: bool,
    /// The left button was pressed on the control this frame.
    pub clicked: bool,
    /// The control is focused and the left button is held.
    pub active: bool,
}

impl Context {
    /// Whether the innermost root being built is the hover root.
    pub fn in_hover_root(&self) -> bool {
        let Some(hover_root) = self.hover_root else {
            return false;
        };
        for &idx in self.container_stack.iter().rev() {
            if idx == hover_root {
                return true;
            }
            // only the root a control belongs to matters, not the ones below it
            if self.registry.get(idx).root {
                break;
            }
        }
        false
    }

    /// Whether the mouse is over `rect` inside the current clip and hover root.
    pub fn mouse_over(&self, rect: Recti) -> bool {
        let mouse = self.input.mouse_pos;
        rect_contains(rect, mouse) && rect_contains(self.clip.current(), mouse) && self.in_hover_root()
    }

    /// Gives focus to `id`, or clears it.
    pub fn set_focus(&mut self, id: Option<Id>) {
        if self.focus != id {
            trace!("focus {:?} -> {:?}", self.focus, id);
        }
        self.focus = id;
        self.updated_focus = true;
    }

    /// Control currently under the mouse.
    pub fn hover_id(&self) -> Option<Id> { self.hover }

    /// Control holding focus.
    pub fn focus_id(&self) -> Option<Id> { self.focus }

    /// Updates hover and focus for the control `id` occupying `rect`.
    pub fn update_control(&mut self, id: Id, rect: Recti, opt: WidgetOption) -> ControlState {
        if opt.is_not_interactive() || self.clip.check(rect) == Clip::All {
            if self.hover == Some(id) {
                self.hover = None;
            }
            return ControlState::default();
        }

        let mouse = self.input.mouse_pos;
        let mouseover = rect_contains(rect, mouse) && rect_contains(self.clip.current(), mouse);
        let pressed = !self.input.mouse_pressed.is_none();
        let down = !self.input.mouse_down.is_none();

        if self.focus == Some(id) {
            self.updated_focus = true;
        }

        if !self.in_hover_root() {
            if pressed && self.focus == Some(id) {
                self.set_focus(None);
            }
            if self.hover == Some(id) {
                self.hover = None;
            }
            return self.control_state(id);
        }

        if mouseover && !down {
            self.hover = Some(id);
        }

        if self.focus == Some(id) {
            if pressed && !mouseover {
                self.set_focus(None);
            }
            if !down && !opt.is_holding_focus() {
                self.set_focus(None);
            }
        }

        if self.hover == Some(id) {
            if pressed {
                self.set_focus(Some(id));
            } else if !mouseover {
                self.hover = None;
            }
        } else if pressed && mouseover && self.hover.is_none() {
            // hover and press arrived in the same frame
            self.hover = Some(id);
            self.set_focus(Some(id));
        }

        self.control_state(id)
    }

    fn control_state(&self, id: Id) -> ControlState {
        let hovered = self.hover == Some(id);
        let focused = self.focus == Some(id);
        ControlState {
            hovered,
            focused,
            clicked: focused && self.input.mouse_pressed.is_left(),
            active: focused && self.input.mouse_down.is_left(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::context::tests::{context, run};
    use crate::{rect, Context, ContainerOption, ControlState, Id, MouseButton, SizePolicy};

    fn single_control(ctx: &mut Context, out: &mut ControlState) {
        ctx.window("w", rect(0, 0, 200, 200), ContainerOption::NONE, |ctx| {
            ctx.layout_row(&[SizePolicy::Fixed(100)], SizePolicy::Fixed(30));
            let r = ctx.layout_next();
            let id = ctx.scoped_id("control");
            *out = ctx.update_control(id, r, crate::WidgetOption::NONE);
        });
    }

    #[test]
    fn hover_follows_mouse() {
        let mut ctx = context();
        let mut st = ControlState::default();
        // layout starts at body (0,24) plus padding 5
        ctx.input_mut().mousemove(20, 40);
        run(&mut ctx, |ctx| single_control(ctx, &mut st));
        assert!(!st.hovered);
        run(&mut ctx, |ctx| single_control(ctx, &mut st));
        assert!(st.hovered);

        ctx.input_mut().mousemove(106, 40);
        run(&mut ctx, |ctx| single_control(ctx, &mut st));
        assert!(!st.hovered);
    }

    #[test]
    fn hover_clears_when_mouse_leaves_clip() {
        let mut ctx = context();
        let mut st = ControlState::default();
        let ui = |ctx: &mut Context, st: &mut ControlState| {
            ctx.window("w", rect(0, 0, 200, 200), ContainerOption::NONE, |ctx| {
                ctx.with_clip(rect(0, 24, 50, 50), |ctx| {
                    let id = ctx.scoped_id("clipped");
                    *st = ctx.update_control(id, rect(10, 30, 100, 20), crate::WidgetOption::NONE);
                });
            });
        };
        ctx.input_mut().mousemove(20, 40);
        run(&mut ctx, |ctx| ui(ctx, &mut st));
        run(&mut ctx, |ctx| ui(ctx, &mut st));
        assert!(st.hovered);
        ctx.input_mut().mousemove(60, 40);
        run(&mut ctx, |ctx| ui(ctx, &mut st));
        assert!(!st.hovered);
    }

    #[test]
    fn hover_clears_when_another_root_covers_control() {
        let mut ctx = context();
        let mut st = ControlState::default();
        let ui = |ctx: &mut Context, st: &mut ControlState| {
            single_control(ctx, st);
            ctx.window("cover", rect(50, 0, 200, 200), ContainerOption::NONE, |_| {});
        };
        ctx.input_mut().mousemove(20, 40);
        run(&mut ctx, |ctx| ui(ctx, &mut st));
        run(&mut ctx, |ctx| ui(ctx, &mut st));
        assert!(st.hovered);

        ctx.input_mut().mousemove(60, 40);
        run(&mut ctx, |ctx| ui(ctx, &mut st));
        run(&mut ctx, |ctx| ui(ctx, &mut st));
        assert!(!st.hovered);
    }

    #[test]
    fn press_focuses_and_release_clears() {
        let mut ctx = context();
        let mut st = ControlState::default();
        ctx.input_mut().mousemove(20, 40);
        run(&mut ctx, |ctx| single_control(ctx, &mut st));
        run(&mut ctx, |ctx| single_control(ctx, &mut st));
        ctx.input_mut().mousedown(20, 40, MouseButton::LEFT);
        run(&mut ctx, |ctx| single_control(ctx, &mut st));
        assert!(st.focused && st.clicked && st.active);
        assert_eq!(ctx.focus_id(), ctx.last_id());

        run(&mut ctx, |ctx| single_control(ctx, &mut st));
        assert!(st.focused && !st.clicked && st.active);

        ctx.input_mut().mouseup(20, 40, MouseButton::LEFT);
        run(&mut ctx, |ctx| single_control(ctx, &mut st));
        assert!(!st.focused);
    }

    #[test]
    fn focus_is_dropped_when_control_stops_running() {
        let mut ctx = context();
        run(&mut ctx, |ctx| {
            ctx.window("w", rect(0, 0, 200, 200), ContainerOption::NONE, |_| {});
        });
        ctx.set_focus(Some(Id::from_str("gone")));
        // focus set between frames survives the next one
        run(&mut ctx, |ctx| {
            ctx.window("w", rect(0, 0, 200, 200), ContainerOption::NONE, |_| {});
        });
        assert_eq!(ctx.focus_id(), Some(Id::from_str("gone")));
        run(&mut ctx, |ctx| {
            ctx.window("w", rect(0, 0, 200, 200), ContainerOption::NONE, |_| {});
        });
        assert_eq!(ctx.focus_id(), None);
    }

    #[test]
    fn fully_clipped_control_loses_hover() {
        let mut ctx = context();
        let mut st = ControlState::default();
        let ui = |ctx: &mut Context, st: &mut ControlState, clip: crate::Recti| {
            ctx.window("w", rect(0, 0, 200, 200), ContainerOption::NONE, |ctx| {
                ctx.with_clip(clip, |ctx| {
                    let id = ctx.scoped_id("clipped");
                    *st = ctx.update_control(id, rect(10, 30, 100, 20), crate::WidgetOption::NONE);
                });
            });
        };
        ctx.input_mut().mousemove(20, 40);
        run(&mut ctx, |ctx| ui(ctx, &mut st, rect(0, 24, 200, 176)));
        run(&mut ctx, |ctx| ui(ctx, &mut st, rect(0, 24, 200, 176)));
        assert!(st.hovered);
        assert!(ctx.hover_id().is_some());

        for _ in 0..3 {
            run(&mut ctx, |ctx| ui(ctx, &mut st, rect(150, 150, 20, 20)));
            assert_eq!(st, ControlState::default());
            assert_eq!(ctx.hover_id(), None);
        }
    }

    #[test]
    fn no_interact_reports_nothing_even_when_focused() {
        let mut ctx = context();
        let mut st = ControlState::default();
        let id = Id::from_str("inert");
        ctx.input_mut().mousemove(20, 40);
        run(&mut ctx, |ctx| {
            ctx.window("w", rect(0, 0, 200, 200), ContainerOption::NONE, |_| {});
        });
        ctx.set_focus(Some(id));
        ctx.hover = Some(id);
        run(&mut ctx, |ctx| {
            ctx.window("w", rect(0, 0, 200, 200), ContainerOption::NONE, |ctx| {
                st = ctx.update_control(id, rect(0, 24, 100, 100), crate::WidgetOption::NO_INTERACT);
            });
        });
        assert_eq!(st, ControlState::default());
        assert_eq!(ctx.hover_id(), None);
    }

    #[test]
    fn no_interact_is_inert() {
        let mut ctx = context();
        let mut st = ControlState { hovered: true, ..Default::default() };
        ctx.input_mut().mousemove(20, 40);
        for _ in 0..3 {
            run(&mut ctx, |ctx| {
                ctx.window("w", rect(0, 0, 200, 200), ContainerOption::NONE, |ctx| {
                    let id = ctx.scoped_id("inert");
                    st = ctx.update_control(id, rect(0, 24, 100, 100), crate::WidgetOption::NO_INTERACT);
                });
            });
        }
        assert_eq!(st, ControlState::default());
    }
}
