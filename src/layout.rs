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
use crate::{Recti, Style, Vec2i, rect, vec2};
use log::warn;
use std::cmp::max;

/// Maximum number of columns in a single row.
pub(crate) const MAX_WIDTHS: usize = 16;

/// Describes how a layout dimension should be resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum SizePolicy {
    /// Falls back to the style default (`style.size` plus padding).
    #[default]
    Auto,
    /// Exactly this many units.
    Fixed(i32),
    /// Fills the remaining space down to the body edge, minus the given margin.
    Remainder(i32),
}

impl SizePolicy {
    fn resolve(self, default_size: i32, available_space: i32) -> i32 {
        let resolved = match self {
            SizePolicy::Auto => default_size,
            SizePolicy::Fixed(value) => value,
            SizePolicy::Remainder(margin) => available_space.saturating_sub(margin),
        };
        resolved.max(0)
    }

    fn is_remainder(self) -> bool { matches!(self, SizePolicy::Remainder(_)) }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum NextKind {
    Relative,
    Absolute,
}

#[derive(Clone, Default)]
pub(crate) struct Layout {
    pub(crate) body: Recti,
    position: Vec2i,
    pub(crate) max: Option<Vec2i>,
    pub(crate) fixed_max_x: Option<i32>,
    next_row: i32,
    indent: i32,
    widths: [SizePolicy; MAX_WIDTHS],
    items: usize,
    item_index: usize,
    height: SizePolicy,
    next: Option<(Recti, NextKind)>,
    width_override: Option<SizePolicy>,
    height_override: Option<SizePolicy>,
    min_width: i32,
}

/// Saved row configuration, restored after a temporary row override.
#[derive(Clone, Copy)]
pub(crate) struct RowSnapshot {
    widths: [SizePolicy; MAX_WIDTHS],
    items: usize,
    item_index: usize,
    height: SizePolicy,
}

#[derive(Clone, Default)]
pub(crate) struct LayoutManager {
    pub last_rect: Recti,
    stack: Vec<Layout>,
}

impl LayoutManager {
    pub fn with_capacity(capacity: usize) -> Self { Self { last_rect: Recti::default(), stack: Vec::with_capacity(capacity) } }

    pub fn clear(&mut self) {
        self.stack.clear();
        self.last_rect = Recti::default();
    }

    pub fn depth(&self) -> usize { self.stack.len() }

    /// Starts a layout scope over `body`, shifted by `scroll`. `min_width` keeps fill cells from
    /// shrinking below previously measured content.
    pub fn push_layout(&mut self, body: Recti, scroll: Vec2i, min_width: i32) {
        let layout = Layout {
            body: rect(body.x - scroll.x, body.y - scroll.y, body.width, body.height),
            min_width,
            ..Layout::default()
        };
        self.stack.push(layout);
        self.row(&[SizePolicy::Auto], SizePolicy::Auto);
    }

    pub fn pop_layout(&mut self) -> Option<Layout> {
        let popped = self.stack.pop();
        if popped.is_none() {
            warn!("pop on an empty layout stack");
        }
        popped
    }

    fn top(&self) -> Option<&Layout> { self.stack.last() }

    fn top_mut(&mut self) -> Option<&mut Layout> { self.stack.last_mut() }

    pub fn current_body(&self) -> Recti { self.top().map(|l| l.body).unwrap_or_default() }

    pub fn adjust_indent(&mut self, delta: i32) {
        if let Some(layout) = self.top_mut() {
            layout.indent += delta;
        }
    }

    pub fn set_width(&mut self, width: SizePolicy) {
        if let Some(layout) = self.top_mut() {
            layout.width_override = Some(width);
        }
    }

    pub fn set_height(&mut self, height: SizePolicy) {
        if let Some(layout) = self.top_mut() {
            layout.height_override = Some(height);
        }
    }

    pub fn set_next(&mut self, r: Recti, relative: bool) {
        if let Some(layout) = self.top_mut() {
            let kind = if relative { NextKind::Relative } else { NextKind::Absolute };
            layout.next = Some((r, kind));
        }
    }

    pub fn begin_column(&mut self, style: &Style) {
        let layout_rect = self.next(style);
        self.push_layout(layout_rect, vec2(0, 0), 0);
    }

    pub fn end_column(&mut self) {
        let finished = match self.stack.pop() {
            Some(layout) => layout,
            None => {
                warn!("end_column without an active column");
                return;
            }
        };
        let parent = match self.top_mut() {
            Some(parent) => parent,
            None => {
                warn!("end_column without a parent layout");
                return;
            }
        };

        parent.position.x = max(parent.position.x, finished.position.x + finished.body.x - parent.body.x);
        parent.next_row = max(parent.next_row, finished.next_row + finished.body.y - parent.body.y);
        parent.max = match (parent.max, finished.max) {
            (Some(am), Some(bm)) => Some(vec2(max(am.x, bm.x), max(am.y, bm.y))),
            (am, bm) => am.or(bm),
        };
        parent.fixed_max_x = match (parent.fixed_max_x, finished.fixed_max_x) {
            (Some(a), Some(b)) => Some(max(a, b)),
            (a, b) => a.or(b),
        };
    }

    pub fn row(&mut self, widths: &[SizePolicy], height: SizePolicy) {
        if widths.len() > MAX_WIDTHS {
            warn!("row of {} columns truncated to {}", widths.len(), MAX_WIDTHS);
        }
        if let Some(layout) = self.top_mut() {
            let n = widths.len().min(MAX_WIDTHS);
            layout.widths[..n].copy_from_slice(&widths[..n]);
            layout.items = n;
            layout.item_index = 0;
            layout.height = height;
            layout.position = vec2(layout.indent, layout.next_row);
        }
    }

    pub fn snapshot_row(&self) -> Option<RowSnapshot> {
        self.top().map(|l| RowSnapshot { widths: l.widths, items: l.items, item_index: l.item_index, height: l.height })
    }

    pub fn restore_row(&mut self, snapshot: Option<RowSnapshot>) {
        if let (Some(layout), Some(snap)) = (self.stack.last_mut(), snapshot) {
            layout.widths = snap.widths;
            layout.items = snap.items;
            layout.item_index = snap.item_index;
            layout.height = snap.height;
        }
    }

    fn wrap_row(layout: &mut Layout) {
        layout.item_index = 0;
        layout.position = vec2(layout.indent, layout.next_row);
    }

    /// Produces the absolute rect of the next cell and advances the cursor.
    pub fn next(&mut self, style: &Style) -> Recti {
        let padding = style.padding;
        let spacing = style.spacing;
        let default_width = style.size.x + padding * 2;
        let default_height = style.size.y + padding * 2;

        let layout = match self.stack.last_mut() {
            Some(layout) => layout,
            None => {
                warn!("layout requested outside of any container");
                return self.last_rect;
            }
        };

        let mut fill_width = false;
        let mut res = match layout.next.take() {
            Some((r, NextKind::Absolute)) => {
                self.last_rect = r;
                return r;
            }
            Some((r, NextKind::Relative)) => r,
            None => {
                if layout.item_index == layout.items {
                    Self::wrap_row(layout);
                }
                let width_policy = match layout.width_override.take() {
                    Some(policy) => policy,
                    None if layout.items > 0 => layout.widths[layout.item_index],
                    None => SizePolicy::Auto,
                };
                let height_policy = layout.height_override.take().unwrap_or(layout.height);
                fill_width = width_policy.is_remainder();

                let x = layout.position.x;
                let y = layout.position.y;
                let available_width = max(layout.body.width, layout.min_width).saturating_sub(x);
                let available_height = layout.body.height.saturating_sub(y);
                let w = width_policy.resolve(default_width, available_width);
                let h = height_policy.resolve(default_height, available_height);
                if layout.item_index < layout.items {
                    layout.item_index += 1;
                }
                rect(x, y, w, h)
            }
        };

        layout.position.x = res.x + res.width + spacing;
        layout.next_row = max(layout.next_row, res.y + res.height + spacing);

        res.x += layout.body.x;
        res.y += layout.body.y;

        let right = res.x + res.width;
        let bottom = res.y + res.height;
        layout.max = match layout.max {
            None => Some(vec2(right, bottom)),
            Some(m) => Some(vec2(max(m.x, right), max(m.y, bottom))),
        };
        if !fill_width {
            layout.fixed_max_x = Some(layout.fixed_max_x.map_or(right, |m| max(m, right)));
        }

        self.last_rect = res;
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuple(r: Recti) -> (i32, i32, i32, i32) { (r.x, r.y, r.width, r.height) }

    fn manager(body: Recti) -> LayoutManager {
        let mut lm = LayoutManager::default();
        lm.push_layout(body, vec2(0, 0), 0);
        lm
    }

    #[test]
    fn auto_cells_stack_vertically() {
        let style = Style::default();
        let mut lm = manager(rect(10, 20, 200, 200));
        let a = lm.next(&style);
        let b = lm.next(&style);
        assert_eq!(tuple(a), (10, 20, 78, 20));
        assert_eq!(tuple(b), (10, 44, 78, 20));
    }

    #[test]
    fn row_columns_then_wrap() {
        let style = Style::default();
        let mut lm = manager(rect(0, 0, 200, 200));
        lm.row(&[SizePolicy::Fixed(50), SizePolicy::Remainder(0)], SizePolicy::Fixed(30));
        let a = lm.next(&style);
        let b = lm.next(&style);
        let c = lm.next(&style);
        assert_eq!(tuple(a), (0, 0, 50, 30));
        assert_eq!(tuple(b), (54, 0, 146, 30));
        assert_eq!(tuple(c), (0, 34, 50, 30));
    }

    #[test]
    fn overrides_are_one_shot() {
        let style = Style::default();
        let mut lm = manager(rect(0, 0, 200, 200));
        lm.row(&[SizePolicy::Fixed(50)], SizePolicy::Fixed(30));
        lm.set_width(SizePolicy::Fixed(70));
        lm.set_height(SizePolicy::Fixed(12));
        let a = lm.next(&style);
        let b = lm.next(&style);
        assert_eq!((a.width, a.height), (70, 12));
        assert_eq!((b.width, b.height), (50, 30));
    }

    #[test]
    fn set_next_absolute_and_relative() {
        let style = Style::default();
        let mut lm = manager(rect(100, 100, 200, 200));
        lm.set_next(rect(5, 5, 10, 10), false);
        assert_eq!(tuple(lm.next(&style)), (5, 5, 10, 10));
        lm.set_next(rect(5, 5, 10, 10), true);
        assert_eq!(tuple(lm.next(&style)), (105, 105, 10, 10));
        let max = lm.top().and_then(|l| l.max).unwrap();
        assert_eq!((max.x, max.y), (115, 115));
    }

    #[test]
    fn fill_respects_min_width() {
        let style = Style::default();
        let mut lm = LayoutManager::default();
        lm.push_layout(rect(0, 0, 100, 100), vec2(0, 0), 300);
        lm.row(&[SizePolicy::Remainder(0)], SizePolicy::Auto);
        assert_eq!(lm.next(&style).width, 300);
        assert!(lm.top().and_then(|l| l.fixed_max_x).is_none());
    }

    #[test]
    fn scroll_shifts_cells() {
        let style = Style::default();
        let mut lm = LayoutManager::default();
        lm.push_layout(rect(0, 0, 100, 100), vec2(0, 40), 0);
        assert_eq!(lm.next(&style).y, -40);
    }

    #[test]
    fn column_extent_bubbles_up() {
        let style = Style::default();
        // reference: the parent lays out the same cells directly
        let mut direct = manager(rect(0, 0, 300, 300));
        direct.row(&[SizePolicy::Fixed(100), SizePolicy::Fixed(40)], SizePolicy::Fixed(20));
        let first = direct.next(&style);

        let mut nested = manager(rect(0, 0, 300, 300));
        nested.row(&[SizePolicy::Fixed(100), SizePolicy::Fixed(40)], SizePolicy::Fixed(20));
        nested.begin_column(&style);
        nested.row(&[SizePolicy::Remainder(0)], SizePolicy::Fixed(50));
        let inner_a = nested.next(&style);
        let inner_b = nested.next(&style);
        nested.end_column();
        let after = nested.next(&style);

        assert_eq!(tuple(inner_a), (first.x, first.y, 100, 50));
        assert_eq!(tuple(inner_b), (0, 54, 100, 50));
        // the column occupies the first cell, the next cell follows it on the same row
        assert_eq!(tuple(after), (104, 0, 40, 20));
        let max = nested.top().and_then(|l| l.max).unwrap();
        assert_eq!((max.x, max.y), (144, 104));
        // the next row starts below the tallest nested cell
        let below = nested.next(&style);
        assert_eq!(below.y, 108);
        assert_eq!(nested.depth(), 1);
    }

    #[test]
    fn nested_columns_match_direct_placement() {
        let style = Style::default();
        let mut direct = manager(rect(0, 0, 300, 300));
        direct.row(&[SizePolicy::Fixed(60)], SizePolicy::Fixed(30));
        let expect_a = direct.next(&style);
        let expect_b = direct.next(&style);

        let mut nested = manager(rect(0, 0, 300, 300));
        nested.row(&[SizePolicy::Fixed(100), SizePolicy::Fixed(40)], SizePolicy::Fixed(20));
        nested.begin_column(&style);
        nested.row(&[SizePolicy::Fixed(80)], SizePolicy::Fixed(20));
        nested.begin_column(&style);
        nested.row(&[SizePolicy::Fixed(60)], SizePolicy::Fixed(30));
        let a = nested.next(&style);
        let b = nested.next(&style);
        assert_eq!(nested.depth(), 3);
        nested.end_column();
        nested.end_column();
        assert_eq!(nested.depth(), 1);

        assert_eq!(tuple(a), tuple(expect_a));
        assert_eq!(tuple(b), tuple(expect_b));
        let max = nested.top().and_then(|l| l.max).unwrap();
        assert_eq!((max.x, max.y), (100, 64));
        assert_eq!(tuple(nested.next(&style)), (104, 0, 40, 20));
        assert_eq!(nested.next(&style).y, 68);
    }
}
