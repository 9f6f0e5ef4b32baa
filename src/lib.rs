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
#![deny(missing_docs)]
//! `microui-core` is the frame-state engine of a MicroUI style immediate-mode GUI.
//! Given per-frame input and a sequence of widget calls it resolves hover/focus/drag state,
//! computes layout rectangles, applies nested clipping, tracks window z-order and emits a flat,
//! render-agnostic list of [`Command`]s. It performs no pixel drawing of its own.

mod clip;
mod command;
mod container;
mod context;
mod control;
mod draw_context;
mod id;
mod input;
mod layout;
mod pool;
mod renderer;
mod scrollbar;
mod widgets;

pub use clip::*;
pub use command::*;
pub use container::{ContainerInfo, ContainerRegistry};
pub use context::*;
pub use control::ControlState;
pub use draw_context::{DrawCtx, DrawFrameFn, default_draw_frame};
pub use id::*;
pub use input::*;
pub use layout::SizePolicy;
pub use pool::*;
pub use renderer::*;
pub use rs_math3d::{Recti, Vec2i};
pub use scrollbar::ScrollAxis;

use bitflags::*;
use std::cmp::{max, min};

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[repr(u32)]
/// Describes whether a rectangle is clipped by the current clip rect.
pub enum Clip {
    /// Rectangle is fully visible.
    None = 0,
    /// Rectangle is partially visible.
    Part = 1,
    /// Rectangle is fully clipped away.
    All = 2,
}

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[repr(u32)]
/// Identifiers for each of the built-in style colors.
/// The value handed to the frame-chrome callback is the semantic kind already promoted to its
/// hover/focus state.
pub enum ControlColor {
    /// Number of color entries in [`Style::colors`].
    Max = 14,
    /// Thumb of scrollbars.
    ScrollThumb = 13,
    /// Track of scrollbars.
    ScrollBase = 12,
    /// Base color for focused widgets.
    BaseFocus = 11,
    /// Base color while the pointer hovers the widget.
    BaseHover = 10,
    /// Default base color.
    Base = 9,
    /// Button color while the widget is focused.
    ButtonFocus = 8,
    /// Button color while the pointer hovers the widget.
    ButtonHover = 7,
    /// Default button color.
    Button = 6,
    /// Panel background color.
    PanelBG = 5,
    /// Window title text color.
    TitleText = 4,
    /// Window title background color.
    TitleBG = 3,
    /// Window background color.
    WindowBG = 2,
    /// Outline/border color.
    Border = 1,
    /// Default text color.
    Text = 0,
}

impl ControlColor {
    /// Promotes the enum to the hover variant when relevant.
    pub fn hover(&mut self) {
        *self = match self {
            Self::Base => Self::BaseHover,
            Self::Button => Self::ButtonHover,
            _ => *self,
        }
    }

    /// Promotes the enum to the focused variant when relevant.
    pub fn focus(&mut self) {
        *self = match self {
            Self::Base => Self::BaseFocus,
            Self::Button => Self::ButtonFocus,
            Self::BaseHover => Self::BaseFocus,
            Self::ButtonHover => Self::ButtonFocus,
            _ => *self,
        }
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// State bits returned by widgets to describe their interaction outcome.
    pub struct ResourceState : u32 {
        /// Indicates that the widget's data changed.
        const CHANGE = 4;
        /// Indicates that the widget was submitted (e.g. button clicked).
        const SUBMIT = 2;
        /// Indicates that the widget is currently active.
        const ACTIVE = 1;
        /// Indicates no interaction.
        const NONE = 0;
    }
}

impl ResourceState {
    /// Returns `true` if the widget changed its bound value.
    pub fn is_changed(&self) -> bool { self.intersects(Self::CHANGE) }
    /// Returns `true` if the widget signaled submission.
    pub fn is_submitted(&self) -> bool { self.intersects(Self::SUBMIT) }
    /// Returns `true` if the widget is active.
    pub fn is_active(&self) -> bool { self.intersects(Self::ACTIVE) }
    /// Returns `true` if the state contains no flags.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Options that control how a container behaves.
    pub struct ContainerOption : u32 {
        /// Paints after every other root regardless of z-index and wins hover priority.
        const ALWAYS_ON_TOP = 4096;
        /// The container starts closed and only opens through an explicit call.
        const CLOSED = 2048;
        /// The container closes when the mouse is pressed outside of it.
        const POPUP = 1024;
        /// Automatically adapts the container size to its content.
        const AUTO_SIZE = 512;
        /// Hides the title bar.
        const NO_TITLE = 128;
        /// Hides the close button.
        const NO_CLOSE = 64;
        /// Disables scrollbars and wheel scrolling.
        const NO_SCROLL = 32;
        /// Prevents the user from resizing the window.
        const NO_RESIZE = 16;
        /// Hides the outer frame.
        const NO_FRAME = 8;
        /// The container never becomes a hover root candidate.
        const NO_INTERACT = 4;
        /// No special options.
        const NONE = 0;
    }

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Widget specific options that influence layout and interactivity.
    pub struct WidgetOption : u32 {
        /// Headers and tree nodes start expanded.
        const EXPANDED = 512;
        /// Keeps focus after the mouse button is released.
        const HOLD_FOCUS = 256;
        /// Draws the widget without its frame/background.
        const NO_FRAME = 128;
        /// Disables interaction for the widget.
        const NO_INTERACT = 4;
        /// Aligns the widget to the right side of the cell.
        const ALIGN_RIGHT = 2;
        /// Centers the widget inside the cell.
        const ALIGN_CENTER = 1;
        /// No special options.
        const NONE = 0;
    }
}

impl ContainerOption {
    /// Returns `true` if the option requests automatic sizing.
    pub fn is_auto_sizing(&self) -> bool { self.intersects(Self::AUTO_SIZE) }
    /// Returns `true` if the title bar should be hidden.
    pub fn has_no_title(&self) -> bool { self.intersects(Self::NO_TITLE) }
    /// Returns `true` if the close button should be hidden.
    pub fn has_no_close(&self) -> bool { self.intersects(Self::NO_CLOSE) }
    /// Returns `true` if the container is fixed-size.
    pub fn is_fixed(&self) -> bool { self.intersects(Self::NO_RESIZE) }
    /// Returns `true` if the outer frame is hidden.
    pub fn has_no_frame(&self) -> bool { self.intersects(Self::NO_FRAME) }
    /// Returns `true` if scrolling is disabled.
    pub fn has_no_scroll(&self) -> bool { self.intersects(Self::NO_SCROLL) }
    /// Returns `true` if the container ignores the mouse.
    pub fn is_not_interactive(&self) -> bool { self.intersects(Self::NO_INTERACT) }
    /// Returns `true` for popup containers.
    pub fn is_popup(&self) -> bool { self.intersects(Self::POPUP) }
    /// Returns `true` if the container starts closed.
    pub fn starts_closed(&self) -> bool { self.intersects(Self::CLOSED) }
    /// Returns `true` if the container is always painted last.
    pub fn is_always_on_top(&self) -> bool { self.intersects(Self::ALWAYS_ON_TOP) }
}

impl WidgetOption {
    /// Returns `true` if the widget should keep focus while held.
    pub fn is_holding_focus(&self) -> bool { self.intersects(WidgetOption::HOLD_FOCUS) }
    /// Returns `true` if the widget shouldn't draw its frame.
    pub fn has_no_frame(&self) -> bool { self.intersects(WidgetOption::NO_FRAME) }
    /// Returns `true` if the widget is non-interactive.
    pub fn is_not_interactive(&self) -> bool { self.intersects(WidgetOption::NO_INTERACT) }
    /// Returns `true` if the widget prefers right alignment.
    pub fn is_aligned_right(&self) -> bool { self.intersects(WidgetOption::ALIGN_RIGHT) }
    /// Returns `true` if the widget prefers centered alignment.
    pub fn is_aligned_center(&self) -> bool { self.intersects(WidgetOption::ALIGN_CENTER) }
    /// Returns `true` if a header/tree node starts expanded.
    pub fn is_expanded(&self) -> bool { self.intersects(WidgetOption::EXPANDED) }
}

#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
#[repr(C)]
/// Simple RGBA color stored with 8-bit components.
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Identifies an icon the renderer knows how to draw.
pub struct IconId(pub u32);

/// Close button of window title bars.
pub const CLOSE_ICON: IconId = IconId(1);
/// Check mark drawn inside checked checkboxes.
pub const CHECK_ICON: IconId = IconId(2);
/// Marker of a collapsed header or tree node.
pub const COLLAPSED_ICON: IconId = IconId(3);
/// Marker of an expanded header or tree node.
pub const EXPANDED_ICON: IconId = IconId(4);

/// Floating-point type used by widgets bound to numbers.
pub type Real = f32;

#[derive(Copy, Clone)]
/// Collection of visual constants that drive widget appearance and layout.
pub struct Style {
    /// Default cell size used by layouts when no width/height is configured.
    pub size: Vec2i,
    /// Inner padding applied to most widgets and container bodies.
    pub padding: i32,
    /// Spacing between cells in a layout.
    pub spacing: i32,
    /// Indentation applied to nested content.
    pub indent: i32,
    /// Height of window title bars.
    pub title_height: i32,
    /// Width of scrollbar tracks.
    pub scrollbar_size: i32,
    /// Gap left on both sides of a scrollbar track.
    pub scrollbar_margin: i32,
    /// Minimal length of scrollbar and slider thumbs.
    pub thumb_size: i32,
    /// Palette of [`ControlColor`] entries.
    pub colors: [Color; ControlColor::Max as usize],
}

impl Style {
    /// Returns the palette entry for `id`.
    pub fn color(&self, id: ControlColor) -> Color { self.colors[id as usize] }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            size: Vec2i::new(68, 10),
            padding: 5,
            spacing: 4,
            indent: 24,
            title_height: 24,
            scrollbar_size: 12,
            scrollbar_margin: 0,
            thumb_size: 8,
            colors: [
                color(230, 230, 230, 255),
                color(25, 25, 25, 255),
                color(50, 50, 50, 255),
                color(25, 25, 25, 255),
                color(240, 240, 240, 255),
                color(0, 0, 0, 0),
                color(75, 75, 75, 255),
                color(95, 95, 95, 255),
                color(115, 115, 115, 255),
                color(30, 30, 30, 255),
                color(35, 35, 35, 255),
                color(40, 40, 40, 255),
                color(43, 43, 43, 255),
                color(30, 30, 30, 255),
            ],
        }
    }
}

/// Rect used when no clipping applies.
pub const UNCLIPPED_RECT: Recti = Recti {
    x: 0,
    y: 0,
    width: 0x1000000,
    height: 0x1000000,
};

/// Convenience constructor for [`Vec2i`].
pub fn vec2(x: i32, y: i32) -> Vec2i { Vec2i { x, y } }

/// Convenience constructor for [`Recti`].
pub fn rect(x: i32, y: i32, w: i32, h: i32) -> Recti { Recti { x, y, width: w, height: h } }

/// Convenience constructor for [`Color`].
pub fn color(r: u8, g: u8, b: u8, a: u8) -> Color { Color { r, g, b, a } }

/// Expands (or shrinks) a rectangle uniformly on all sides.
pub fn expand_rect(r: Recti, n: i32) -> Recti { rect(r.x - n, r.y - n, r.width + n * 2, r.height + n * 2) }

/// Intersects two rectangles. Disjoint inputs collapse to a zero-sized rect.
pub fn intersect_rect(r1: Recti, r2: Recti) -> Recti {
    let x1 = max(r1.x, r2.x);
    let y1 = max(r1.y, r2.y);
    let x2 = min(r1.x + r1.width, r2.x + r2.width);
    let y2 = min(r1.y + r1.height, r2.y + r2.height);
    rect(x1, y1, max(x2 - x1, 0), max(y2 - y1, 0))
}

/// Returns `true` if `p` lies inside `r` (right and bottom edges excluded).
pub fn rect_contains(r: Recti, p: Vec2i) -> bool { p.x >= r.x && p.x < r.x + r.width && p.y >= r.y && p.y < r.y + r.height }

/// Returns `true` if `inner` lies entirely inside `outer`.
pub fn rect_within(inner: Recti, outer: Recti) -> bool {
    inner.x >= outer.x && inner.y >= outer.y && inner.x + inner.width <= outer.x + outer.width && inner.y + inner.height <= outer.y + outer.height
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuple(r: Recti) -> (i32, i32, i32, i32) { (r.x, r.y, r.width, r.height) }

    #[test]
    fn intersect_overlapping() {
        let r = intersect_rect(rect(0, 0, 100, 100), rect(50, 20, 100, 10));
        assert_eq!(tuple(r), (50, 20, 50, 10));
    }

    #[test]
    fn intersect_disjoint_is_empty() {
        let r = intersect_rect(rect(0, 0, 10, 10), rect(20, 20, 10, 10));
        assert_eq!((r.width, r.height), (0, 0));
    }

    #[test]
    fn contains_excludes_far_edges() {
        let r = rect(10, 10, 5, 5);
        assert!(rect_contains(r, vec2(10, 10)));
        assert!(rect_contains(r, vec2(14, 14)));
        assert!(!rect_contains(r, vec2(15, 12)));
        assert!(!rect_contains(r, vec2(9, 12)));
    }

    #[test]
    fn color_promotion() {
        let mut c = ControlColor::Button;
        c.hover();
        assert_eq!(c, ControlColor::ButtonHover);
        c.focus();
        assert_eq!(c, ControlColor::ButtonFocus);
        let mut t = ControlColor::Text;
        t.focus();
        assert_eq!(t, ControlColor::Text);
    }
}
