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
use std::{collections::HashMap, rc::Rc};

use log::{debug, trace, warn};

use crate::{
    default_draw_frame, expand_rect, rect, rect_contains, scrollbar::*, Clip, ClipStack, Color, Command, CommandBuffer, ContainerInfo,
    ContainerOption, ContainerRegistry, ControlColor, DrawCtx, DrawFrameFn, Font, IconId, Id, IdStack, Input, InputQueue, InputSender, Recti,
    Renderer, ScrollAxis, SizePolicy, Style, Vec2i, WidgetOption, layout::LayoutManager, replay_command, vec2, CLOSE_ICON,
};

/// Callback applied to a window rect while its title bar is being dragged.
pub type DragHook = Box<dyn FnMut(&str, Recti) -> Recti>;

/// Smallest size a window can be resized to.
pub const MIN_WINDOW_SIZE: Vec2i = Vec2i { x: 96, y: 64 };

/// Capacities and defaults used when creating a [`Context`].
#[derive(Clone)]
pub struct ContextConfig {
    /// Commands preallocated for each frame.
    pub command_capacity: usize,
    /// Pending events the input queue holds before it starts dropping.
    pub input_queue_capacity: usize,
    /// Containers preallocated in the registry.
    pub container_capacity: usize,
    /// Hard limit of containers; exceeding it panics.
    pub max_containers: usize,
    /// Initial depth of the clip, id and layout stacks.
    pub stack_capacity: usize,
    /// Initial style.
    pub style: Style,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            command_capacity: 4096,
            input_queue_capacity: 256,
            container_capacity: 48,
            max_containers: 1024,
            stack_capacity: 32,
            style: Style::default(),
        }
    }
}

/// Primary entry point used to drive the UI frame by frame.
pub struct Context {
    pub(crate) style: Style,
    pub(crate) font: Rc<dyn Font>,
    draw_frame: DrawFrameFn,
    drag_hook: Option<DragHook>,

    pub(crate) hover: Option<Id>,
    pub(crate) focus: Option<Id>,
    pub(crate) updated_focus: bool,
    frame: usize,
    last_zindex: i32,
    pub(crate) hover_root: Option<usize>,
    next_hover_root: Option<usize>,
    scroll_target: Option<usize>,
    drag_id: Option<Id>,
    resize_id: Option<Id>,

    pub(crate) number_edit: Option<Id>,
    pub(crate) number_edit_buf: String,
    pub(crate) treenodes: HashMap<Id, bool>,

    pub(crate) commands: CommandBuffer,
    pub(crate) clip: ClipStack,
    pub(crate) ids: IdStack,
    pub(crate) layout: LayoutManager,
    pub(crate) container_stack: Vec<usize>,
    root_list: Vec<usize>,
    pub(crate) registry: ContainerRegistry,

    pub(crate) input: Input,
    queue: InputQueue,
}

impl Context {
    /// Creates a context measuring text with `font` and default capacities.
    pub fn new(font: Rc<dyn Font>) -> Self { Self::with_config(font, ContextConfig::default()) }

    /// Creates a context with explicit capacities.
    pub fn with_config(font: Rc<dyn Font>, config: ContextConfig) -> Self {
        Self {
            style: config.style,
            font,
            draw_frame: default_draw_frame,
            drag_hook: None,

            hover: None,
            focus: None,
            updated_focus: false,
            frame: 0,
            last_zindex: 0,
            hover_root: None,
            next_hover_root: None,
            scroll_target: None,
            drag_id: None,
            resize_id: None,

            number_edit: None,
            number_edit_buf: String::new(),
            treenodes: HashMap::new(),

            commands: CommandBuffer::with_capacity(config.command_capacity),
            clip: ClipStack::with_capacity(config.stack_capacity),
            ids: IdStack::with_capacity(config.stack_capacity),
            layout: LayoutManager::with_capacity(config.stack_capacity),
            container_stack: Vec::with_capacity(config.stack_capacity),
            root_list: Vec::with_capacity(config.container_capacity),
            registry: ContainerRegistry::new(config.container_capacity, config.max_containers),

            input: Input::default(),
            queue: InputQueue::new(config.input_queue_capacity),
        }
    }
}

impl Context {
    #[inline(never)]
    /// Starts a frame: resets per-frame state and ingests queued input.
    pub fn begin_frame(&mut self) {
        self.frame += 1;
        self.commands.reset();
        self.clip.clear();
        self.ids.clear();
        self.layout.clear();
        self.container_stack.clear();
        self.root_list.clear();
        self.scroll_target = None;

        if !self.input.mouse_down.is_left() {
            self.drag_id = None;
            self.resize_id = None;
        }

        self.hover_root = self.next_hover_root.take();
        self.queue.drain_into(&mut self.input);
        self.input.prelude();
        trace!("frame {} begins, hover root {:?}", self.frame, self.hover_root);
    }

    #[inline(never)]
    /// Finishes a frame: applies wheel scrolling, resolves focus and sorts the roots.
    pub fn end_frame(&mut self) {
        if !self.container_stack.is_empty() {
            warn!("frame {} ended with {} containers still open", self.frame, self.container_stack.len());
        }
        if self.layout.depth() != 0 {
            warn!("frame {} ended with {} layouts still pushed", self.frame, self.layout.depth());
        }

        if let Some(idx) = self.scroll_target {
            let delta = self.input.scroll_delta;
            let padding = self.style.padding;
            let c = self.registry.get_mut(idx);
            c.scroll.x = clamp_scroll(c.scroll.x + delta.x, c.content_size.x + padding * 2, c.body.width);
            c.scroll.y = clamp_scroll(c.scroll.y + delta.y, c.content_size.y + padding * 2, c.body.height);
        }

        if !self.updated_focus {
            self.focus = None;
        }
        self.updated_focus = false;

        if !self.input.mouse_pressed.is_none() {
            if let Some(idx) = self.next_hover_root {
                let z = self.registry.get(idx).zindex;
                if z < self.last_zindex && z >= 0 {
                    self.bring_to_front(idx);
                }
            }
        }

        self.input.epilogue();

        let registry = &self.registry;
        self.root_list.sort_by_key(|&idx| registry.get(idx).order_key());
    }

    /// Runs one whole frame around `f`.
    pub fn frame<F: FnOnce(&mut Self)>(&mut self, f: F) {
        self.begin_frame();
        f(self);
        self.end_frame();
    }

    /// Number of frames started so far.
    pub fn frame_count(&self) -> usize { self.frame }

    /// Gives `idx` a stacking order above every other root.
    pub(crate) fn bring_to_front(&mut self, idx: usize) {
        self.last_zindex += 1;
        self.registry.get_mut(idx).zindex = self.last_zindex;
    }

    /// Raises the named container above every other root.
    pub fn bring_to_front_by_name(&mut self, name: &str) {
        if let Some(idx) = self.registry.lookup(name) {
            self.bring_to_front(idx);
        }
    }
}

impl Context {
    #[inline(never)]
    fn begin_root_container(&mut self, idx: usize) {
        self.container_stack.push(idx);
        self.root_list.push(idx);

        let mouse = self.input.mouse_pos;
        let frame = self.frame;
        let head = self.commands.len();
        let c = self.registry.get_mut(idx);
        c.root = true;
        c.head = head;
        c.last_frame = frame;

        let key = c.order_key();
        if !c.opt.is_not_interactive() && rect_contains(c.rect, mouse) {
            let better = match self.next_hover_root {
                None => true,
                Some(cur) => key > self.registry.get(cur).order_key(),
            };
            if better {
                self.next_hover_root = Some(idx);
            }
        }

        self.clip.push_unclipped(&mut self.commands);
    }

    #[inline(never)]
    fn end_root_container(&mut self, idx: usize) {
        self.clip.pop(&mut self.commands);
        self.pop_container(idx);
        let tail = self.commands.len();
        self.registry.get_mut(idx).tail = tail;
    }

    fn pop_container(&mut self, idx: usize) {
        if let Some(layout) = self.layout.pop_layout() {
            let c = self.registry.get_mut(idx);
            c.content_size = match layout.max {
                Some(m) => vec2(m.x - layout.body.x, m.y - layout.body.y),
                None => Vec2i::default(),
            };
            if let Some(fx) = layout.fixed_max_x {
                c.min_content_width = c.min_content_width.max(fx - layout.body.x);
            }
        }
        match self.container_stack.pop() {
            Some(top) if top != idx => warn!("container stack mismatch: closing {} while {} is on top", idx, top),
            None => warn!("container stack underflow"),
            _ => (),
        }
        self.ids.pop_scope();
    }

    fn push_container_body(&mut self, idx: usize, body: Recti, opt: ContainerOption) {
        let mut body = body;
        if !opt.has_no_scroll() {
            self.scrollbars(idx, &mut body);
        } else {
            let c = self.registry.get_mut(idx);
            c.scrollbar_x = false;
            c.scrollbar_y = false;
        }
        let padding = self.style.padding;
        let c = self.registry.get_mut(idx);
        c.body = body;
        let (scroll, min_width) = (c.scroll, c.min_content_width);
        self.layout.push_layout(expand_rect(body, -padding), scroll, min_width);
    }

    fn scrollbars(&mut self, idx: usize, body: &mut Recti) {
        let style = self.style;
        let c = self.registry.get(idx);
        let content = vec2(c.content_size.x + style.padding * 2, c.content_size.y + style.padding * 2);
        // A container that never ran has no previous body to measure against.
        let prev_body = if c.body.width == 0 && c.body.height == 0 { *body } else { c.body };

        self.push_clip_rect(*body);
        let (needs_x, needs_y) = scrollbar_reserve_space(content, prev_body, body, &style);
        let view = *body;
        let has_y = self.scrollbar(idx, ScrollAxis::Vertical, needs_y, content, view);
        let has_x = self.scrollbar(idx, ScrollAxis::Horizontal, needs_x, content, view);
        self.pop_clip_rect();

        let c = self.registry.get_mut(idx);
        c.scrollbar_x = has_x;
        c.scrollbar_y = has_y;
    }

    /// Runs the bar of `axis` when space was `reserved` for it, otherwise pins its scroll to 0.
    fn scrollbar(&mut self, idx: usize, axis: ScrollAxis, reserved: bool, content: Vec2i, body: Recti) -> bool {
        let style = self.style;
        let content_len = axis.pick(content);
        let view_len = axis.len(body);
        let max_scroll = scrollbar_max_scroll(content_len, view_len);

        let scroll = axis.pick(self.registry.get(idx).scroll);
        if !reserved || max_scroll <= 0 || view_len <= 0 {
            self.set_axis_scroll(idx, axis, 0);
            return false;
        }

        let id = self.ids.scoped_id(match axis {
            ScrollAxis::Vertical => "!scrollbary",
            ScrollAxis::Horizontal => "!scrollbarx",
        });
        let base = scrollbar_base(axis, body, &style);
        let mut scroll = scroll;
        self.update_control(id, base, WidgetOption::NONE);
        if self.focus == Some(id) && self.input.mouse_down.is_left() {
            scroll += scrollbar_drag_delta(axis, self.input.mouse_delta, content_len, base);
        }
        let scroll = clamp_scroll(scroll, content_len, view_len);
        self.set_axis_scroll(idx, axis, scroll);

        self.draw_frame(base, ControlColor::ScrollBase);
        let thumb = scrollbar_thumb(axis, base, view_len, content_len, scroll, style.thumb_size);
        self.draw_frame(thumb, ControlColor::ScrollThumb);

        if self.mouse_over(body) {
            self.scroll_target = Some(idx);
        }
        true
    }

    fn set_axis_scroll(&mut self, idx: usize, axis: ScrollAxis, value: i32) {
        let c = self.registry.get_mut(idx);
        match axis {
            ScrollAxis::Vertical => c.scroll.y = value,
            ScrollAxis::Horizontal => c.scroll.x = value,
        }
    }
}

impl Context {
    /// Begins the window called `name`, returning `false` when it is closed.
    /// Every `true` must be paired with [`Context::end_window`].
    #[must_use]
    pub fn begin_window(&mut self, name: &str, initial_rect: Recti, opt: ContainerOption) -> bool {
        let idx = self.registry.get_or_create(name);
        let mut newly_opened = false;
        {
            let c = self.registry.get_mut(idx);
            c.opt = opt;
            if !c.initialized {
                c.initialized = true;
                if !opt.starts_closed() {
                    c.open = true;
                    newly_opened = true;
                }
            }
        }
        if newly_opened {
            debug!("window '{}' opened", name);
            self.bring_to_front(idx);
        }

        let c = self.registry.get_mut(idx);
        if !c.open {
            return false;
        }
        if c.rect.width == 0 && c.rect.height == 0 {
            c.rect = initial_rect;
        }
        let cid = c.id;
        self.ids.push_id(cid);

        self.begin_root_container(idx);
        let style = self.style;
        let win = self.registry.get(idx).rect;
        let mut body = win;

        if !opt.has_no_frame() {
            self.draw_frame(win, ControlColor::WindowBG);
        }

        if !opt.has_no_title() {
            let mut title = win;
            title.height = style.title_height;
            self.draw_frame(title, ControlColor::TitleBG);

            let title_id = self.ids.scoped_id("!title");
            self.update_control(title_id, title, WidgetOption::NONE);
            self.draw_control_text(name, title, ControlColor::TitleText, WidgetOption::NONE);
            if self.focus == Some(title_id) && self.input.mouse_pressed.is_left() && self.resize_id.is_none() {
                self.drag_id = Some(cid);
            }
            if self.drag_id == Some(cid) && self.input.mouse_down.is_left() {
                self.drag_window(idx);
            }

            if !opt.has_no_close() {
                let close_id = self.ids.scoped_id("!close");
                let r = rect(title.x + title.width - title.height, title.y, title.height, title.height);
                let color = style.color(ControlColor::TitleText);
                self.draw_icon(CLOSE_ICON, r, color);
                self.update_control(close_id, r, WidgetOption::NONE);
                if self.focus == Some(close_id) && self.input.mouse_pressed.is_left() {
                    self.registry.get_mut(idx).open = false;
                    debug!("window '{}' closed", name);
                }
            }

            body.y += title.height;
            body.height -= title.height;
        }

        self.push_container_body(idx, body, opt);

        if !opt.is_fixed() {
            let sz = style.title_height;
            let resize_id = self.ids.scoped_id("!resize");
            let r = rect(win.x + win.width - sz, win.y + win.height - sz, sz, sz);
            self.update_control(resize_id, r, WidgetOption::NONE);
            if self.focus == Some(resize_id) && self.input.mouse_pressed.is_left() && self.drag_id.is_none() {
                self.resize_id = Some(cid);
            }
            if self.resize_id == Some(cid) && self.input.mouse_down.is_left() {
                let delta = self.input.mouse_delta;
                let c = self.registry.get_mut(idx);
                c.rect.width = (c.rect.width + delta.x).max(MIN_WINDOW_SIZE.x);
                c.rect.height = (c.rect.height + delta.y).max(MIN_WINDOW_SIZE.y);
            }
        }

        if opt.is_auto_sizing() {
            let r = self.layout.current_body();
            let c = self.registry.get_mut(idx);
            c.rect.width = c.content_size.x + (c.rect.width - r.width);
            c.rect.height = c.content_size.y + (c.rect.height - r.height);
        }

        if opt.is_popup() && !self.input.mouse_pressed.is_none() && self.hover_root != Some(idx) {
            self.registry.get_mut(idx).open = false;
            debug!("popup '{}' dismissed", name);
        }

        let clip = self.registry.get(idx).body;
        self.push_clip_rect(clip);
        true
    }

    /// Ends the window begun by the last successful [`Context::begin_window`].
    pub fn end_window(&mut self) {
        let Some(&idx) = self.container_stack.last() else {
            warn!("end_window without a matching begin_window");
            return;
        };
        self.pop_clip_rect();
        self.end_root_container(idx);
    }

    /// Runs `f` inside the window called `name` if it is open. Returns whether `f` ran.
    pub fn window<F: FnOnce(&mut Self)>(&mut self, name: &str, initial_rect: Recti, opt: ContainerOption, f: F) -> bool {
        if !self.begin_window(name, initial_rect, opt) {
            return false;
        }
        f(self);
        self.end_window();
        true
    }

    fn drag_window(&mut self, idx: usize) {
        let delta = self.input.mouse_delta;
        let c = self.registry.get(idx);
        let mut moved = c.rect;
        moved.x += delta.x;
        moved.y += delta.y;
        if let Some(hook) = self.drag_hook.as_mut() {
            moved = hook(&c.name, moved);
        }
        self.registry.get_mut(idx).rect = moved;
    }

    /// Opens the named window, creating it if needed, and raises it.
    pub fn open_window(&mut self, name: &str) {
        let idx = self.registry.get_or_create(name);
        let c = self.registry.get_mut(idx);
        c.initialized = true;
        if !c.open {
            c.open = true;
            debug!("window '{}' opened", name);
            self.bring_to_front(idx);
        }
    }

    /// Closes the named window; it stops running until reopened.
    pub fn close_window(&mut self, name: &str) {
        if let Some(idx) = self.registry.lookup(name) {
            let c = self.registry.get_mut(idx);
            c.initialized = true;
            c.open = false;
        }
    }

    /// Opens the popup called `name` at the mouse position and makes it the hover root.
    pub fn open_popup(&mut self, name: &str) {
        let idx = self.registry.get_or_create(name);
        let mouse = self.input.mouse_pos;
        self.hover_root = Some(idx);
        self.next_hover_root = Some(idx);
        let c = self.registry.get_mut(idx);
        c.initialized = true;
        c.rect = rect(mouse.x, mouse.y, 1, 1);
        c.open = true;
        self.bring_to_front(idx);
        debug!("popup '{}' opened at ({}, {})", name, mouse.x, mouse.y);
    }

    /// Runs `f` inside the popup called `name` while it is open.
    /// Popups size to their content and close on any press outside them.
    pub fn popup<F: FnOnce(&mut Self)>(&mut self, name: &str, f: F) -> bool {
        let opt = ContainerOption::POPUP
            | ContainerOption::AUTO_SIZE
            | ContainerOption::NO_RESIZE
            | ContainerOption::NO_SCROLL
            | ContainerOption::NO_TITLE
            | ContainerOption::CLOSED;
        self.window(name, rect(0, 0, 0, 0), opt, f)
    }

    /// Begins a nested scrolling region laid out as the next cell of the current row.
    pub fn begin_panel(&mut self, name: &str, opt: ContainerOption) {
        let idx = self.registry.get_or_create(name);
        let frame = self.frame;
        let style = self.style;
        let r = self.layout.next(&style);
        let c = self.registry.get_mut(idx);
        c.open = true;
        c.initialized = true;
        c.root = false;
        c.opt = opt;
        c.last_frame = frame;
        c.rect = r;
        let cid = c.id;
        self.ids.push_id(cid);

        if !opt.has_no_frame() {
            self.draw_frame(r, ControlColor::PanelBG);
        }
        self.container_stack.push(idx);
        self.push_container_body(idx, r, opt);
        let clip = self.registry.get(idx).body;
        self.push_clip_rect(clip);
    }

    /// Ends the panel begun by the last [`Context::begin_panel`].
    pub fn end_panel(&mut self) {
        let Some(&idx) = self.container_stack.last() else {
            warn!("end_panel without a matching begin_panel");
            return;
        };
        self.pop_clip_rect();
        self.pop_container(idx);
    }

    /// Runs `f` inside the panel called `name`.
    pub fn panel<F: FnOnce(&mut Self)>(&mut self, name: &str, opt: ContainerOption, f: F) {
        self.begin_panel(name, opt);
        f(self);
        self.end_panel();
    }
}

impl Context {
    /// Snapshot of the container called `name`.
    pub fn container(&self, name: &str) -> Option<ContainerInfo> { self.registry.info(name) }

    /// Snapshots of every container ever created.
    pub fn containers(&self) -> impl Iterator<Item = ContainerInfo> + '_ { self.registry.iter() }

    /// Roots that ran during the last frame, back to front.
    pub fn root_order(&self) -> impl Iterator<Item = ContainerInfo> + '_ { self.root_list.iter().map(|&idx| self.registry.get(idx).info()) }

    /// Whether the named container is the hover root of the current frame.
    pub fn is_hover_root(&self, name: &str) -> bool {
        match (self.registry.lookup(name), self.hover_root) {
            (Some(idx), Some(hr)) => idx == hr,
            _ => false,
        }
    }

    /// Whether a window drag, resize or held control is in progress.
    pub fn is_interacting(&self) -> bool {
        self.drag_id.is_some() || self.resize_id.is_some() || (self.focus.is_some() && !self.input.mouse_down.is_none())
    }

    /// Overrides the scroll offset of the named container. The next frame clamps it.
    pub fn set_container_scroll(&mut self, name: &str, scroll: Vec2i) {
        if let Some(idx) = self.registry.lookup(name) {
            self.registry.get_mut(idx).scroll = scroll;
        }
    }

    /// Moves or resizes the named container.
    pub fn set_container_rect(&mut self, name: &str, r: Recti) {
        if let Some(idx) = self.registry.lookup(name) {
            self.registry.get_mut(idx).rect = r;
        }
    }

    /// Current style.
    pub fn style(&self) -> &Style { &self.style }

    /// Replaces the current style.
    pub fn set_style(&mut self, style: &Style) { self.style = *style; }

    /// Font used to measure text.
    pub fn font(&self) -> &dyn Font { &*self.font }

    /// Replaces the function drawing control frames.
    pub fn set_frame_drawer(&mut self, f: DrawFrameFn) { self.draw_frame = f; }

    /// Installs a callback that may adjust a window rect while it is dragged.
    pub fn set_drag_hook(&mut self, hook: DragHook) { self.drag_hook = Some(hook); }

    /// Removes the drag callback.
    pub fn clear_drag_hook(&mut self) { self.drag_hook = None; }

    /// Input state of the current frame.
    pub fn input(&self) -> &Input { &self.input }

    /// Mutable input state, for feeding events directly between frames.
    pub fn input_mut(&mut self) -> &mut Input { &mut self.input }

    /// Handle other threads can use to queue input for the next frame.
    pub fn input_sender(&self) -> InputSender { self.queue.sender() }

    /// Mouse position of the current frame.
    pub fn mouse_pos(&self) -> Vec2i { self.input.mouse_pos }

    /// Every command recorded during the last frame, in recording order.
    pub fn commands(&self) -> &CommandBuffer { &self.commands }

    /// Commands of the named root, excluding those of roots begun inside it.
    pub fn commands_for(&self, name: &str) -> Vec<&Command> {
        match self.registry.lookup(name) {
            Some(idx) if self.root_list.contains(&idx) => self.root_commands(idx),
            _ => Vec::new(),
        }
    }

    fn root_commands(&self, idx: usize) -> Vec<&Command> {
        let c = self.registry.get(idx);
        let (head, tail) = (c.head, c.tail.min(self.commands.len()));
        let mut nested: Vec<(usize, usize)> = self
            .root_list
            .iter()
            .filter(|&&other| other != idx)
            .map(|&other| {
                let o = self.registry.get(other);
                (o.head, o.tail)
            })
            .filter(|&(h, t)| h >= head && t <= tail)
            .collect();
        nested.sort();

        let all = self.commands.as_slice();
        let mut out = Vec::with_capacity(tail.saturating_sub(head));
        let mut pos = head;
        for (h, t) in nested {
            if h < pos {
                continue;
            }
            out.extend(all[pos..h].iter());
            pos = t;
        }
        if pos < tail {
            out.extend(all[pos..tail].iter());
        }
        out
    }

    /// Replays the last frame's commands root by root, back to front.
    pub fn render(&self, renderer: &mut dyn Renderer) {
        for &idx in &self.root_list {
            for cmd in self.root_commands(idx) {
                replay_command(renderer, &*self.font, cmd);
            }
        }
    }
}

impl Context {
    /// Drawing context over the current command buffer and clip stack.
    pub fn draw_ctx(&mut self) -> DrawCtx<'_> { DrawCtx::new(&mut self.commands, &mut self.clip, &self.style, &*self.font) }

    /// Draws a control frame with the installed frame drawer.
    pub fn draw_frame(&mut self, rect: Recti, colorid: ControlColor) {
        let f = self.draw_frame;
        f(&mut self.draw_ctx(), rect, colorid);
    }

    /// Draws the frame of control `id`, shaded by its hover and focus state.
    pub fn draw_control_frame(&mut self, id: Id, rect: Recti, colorid: ControlColor, opt: WidgetOption) {
        if opt.has_no_frame() {
            return;
        }
        let mut colorid = colorid;
        if self.focus == Some(id) {
            colorid.focus();
        } else if self.hover == Some(id) {
            colorid.hover();
        }
        self.draw_frame(rect, colorid);
    }

    /// Draws `text` aligned inside `rect`.
    pub fn draw_control_text(&mut self, text: &str, rect: Recti, colorid: ControlColor, opt: WidgetOption) {
        self.draw_ctx().draw_control_text(text, rect, colorid, opt);
    }

    /// Fills `rect`, clipped to the current clip rect.
    pub fn draw_rect(&mut self, rect: Recti, color: Color) { self.draw_ctx().draw_rect(rect, color); }

    /// Outlines `rect`.
    pub fn draw_box(&mut self, rect: Recti, color: Color) { self.draw_ctx().draw_box(rect, color); }

    /// Draws `text` at `pos`.
    pub fn draw_text(&mut self, text: &str, pos: Vec2i, color: Color) { self.draw_ctx().draw_text(text, pos, color); }

    /// Draws icon `id` centred in `rect`.
    pub fn draw_icon(&mut self, id: IconId, rect: Recti, color: Color) { self.draw_ctx().draw_icon(id, rect, color); }

    /// Pushes `rect` intersected with the current clip rect.
    pub fn push_clip_rect(&mut self, rect: Recti) { self.clip.push(rect, &mut self.commands); }

    /// Pops the current clip rect.
    pub fn pop_clip_rect(&mut self) { self.clip.pop(&mut self.commands); }

    /// Current clip rect.
    pub fn current_clip_rect(&self) -> Recti { self.clip.current() }

    /// How `r` relates to the current clip rect.
    pub fn check_clip(&self, r: Recti) -> Clip { self.clip.check(r) }

    /// Runs `f` with `rect` pushed on the clip stack.
    pub fn with_clip<F: FnOnce(&mut Self)>(&mut self, rect: Recti, f: F) {
        self.push_clip_rect(rect);
        f(self);
        self.pop_clip_rect();
    }
}

impl Context {
    /// Id of `name` in the current scope. The result becomes [`Context::last_id`].
    pub fn scoped_id(&mut self, name: &str) -> Id { self.ids.scoped_id(name) }

    /// Id keyed on an integer in the current scope, for controls without a label.
    pub fn scoped_id_u32(&mut self, key: u32) -> Id { self.ids.scoped_id_u32(key) }

    /// Last id produced by the id stack.
    pub fn last_id(&self) -> Option<Id> { self.ids.last_id() }

    /// Runs `f` with `name` pushed as an id scope.
    pub fn with_id<F: FnOnce(&mut Self)>(&mut self, name: &str, f: F) {
        self.ids.push_scope(name);
        f(self);
        self.ids.pop_scope();
    }

    /// Starts a new row with the given cell widths and height.
    pub fn layout_row(&mut self, widths: &[SizePolicy], height: SizePolicy) { self.layout.row(widths, height); }

    /// Overrides the width of the next cell.
    pub fn layout_width(&mut self, width: SizePolicy) { self.layout.set_width(width); }

    /// Overrides the height of the next cell.
    pub fn layout_height(&mut self, height: SizePolicy) { self.layout.set_height(height); }

    /// Places the next cell at `r`, relative to the cursor or absolute on screen.
    pub fn layout_set_next(&mut self, r: Recti, relative: bool) { self.layout.set_next(r, relative); }

    /// Allocates the next cell.
    pub fn layout_next(&mut self) -> Recti {
        let style = self.style;
        self.layout.next(&style)
    }

    /// Body of the innermost layout.
    pub fn layout_body(&self) -> Recti { self.layout.current_body() }

    /// Rect of the last allocated cell.
    pub fn last_rect(&self) -> Recti { self.layout.last_rect }

    /// Runs `f` inside a column occupying the next cell.
    pub fn column<F: FnOnce(&mut Self)>(&mut self, f: F) {
        let style = self.style;
        self.layout.begin_column(&style);
        f(self);
        self.layout.end_column();
    }

    /// Runs `f` with a temporary row configuration, then restores the previous one.
    pub fn with_row<F: FnOnce(&mut Self)>(&mut self, widths: &[SizePolicy], height: SizePolicy, f: F) {
        let saved = self.layout.snapshot_row();
        self.layout.row(widths, height);
        f(self);
        self.layout.restore_row(saved);
    }

    /// Moves the indentation of following rows by `delta`.
    pub fn indent(&mut self, delta: i32) { self.layout.adjust_indent(delta); }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{MonoFont, MouseButton};

    pub(crate) fn context() -> Context { Context::new(Rc::new(MonoFont::new(8, 10))) }

    pub(crate) fn run<F: FnOnce(&mut Context)>(ctx: &mut Context, f: F) { ctx.frame(f); }

    fn tall_window(ctx: &mut Context) {
        ctx.window("tall", rect(0, 0, 200, 200), ContainerOption::NONE, |ctx| {
            ctx.layout_row(&[SizePolicy::Remainder(0)], SizePolicy::Fixed(480));
            ctx.layout_next();
        });
    }

    #[test]
    fn window_opens_on_first_begin() {
        let mut ctx = context();
        let mut ran = false;
        run(&mut ctx, |ctx| {
            ran = ctx.window("w", rect(10, 20, 300, 200), ContainerOption::NONE, |_| {});
        });
        assert!(ran);
        let info = ctx.container("w").expect("container exists");
        assert!(info.open);
        assert_eq!((info.rect.x, info.rect.y, info.rect.width, info.rect.height), (10, 20, 300, 200));
        assert_eq!(info.last_frame, 1);
    }

    #[test]
    fn start_closed_window_never_runs_until_opened() {
        let mut ctx = context();
        let mut runs = 0;
        for _ in 0..3 {
            run(&mut ctx, |ctx| {
                if ctx.window("hidden", rect(0, 0, 100, 100), ContainerOption::CLOSED, |_| {}) {
                    runs += 1;
                }
            });
        }
        assert_eq!(runs, 0);
        assert!(!ctx.container("hidden").map(|i| i.open).unwrap_or(true));

        ctx.open_window("hidden");
        run(&mut ctx, |ctx| {
            if ctx.window("hidden", rect(0, 0, 100, 100), ContainerOption::CLOSED, |_| {}) {
                runs += 1;
            }
        });
        assert_eq!(runs, 1);
    }

    #[test]
    fn close_window_stops_it() {
        let mut ctx = context();
        run(&mut ctx, |ctx| {
            ctx.window("w", rect(0, 0, 100, 100), ContainerOption::NONE, |_| {});
        });
        ctx.close_window("w");
        let mut ran = true;
        run(&mut ctx, |ctx| {
            ran = ctx.window("w", rect(0, 0, 100, 100), ContainerOption::NONE, |_| {});
        });
        assert!(!ran);
    }

    #[test]
    fn tall_content_gets_scrollbar_on_second_frame() {
        let mut ctx = context();
        run(&mut ctx, tall_window);
        let info = ctx.container("tall").expect("container exists");
        assert!(info.content_size.y >= 480);

        run(&mut ctx, tall_window);
        let info = ctx.container("tall").expect("container exists");
        assert!(info.has_scrollbar_y);
        assert!(!info.has_scrollbar_x);
        assert!(info.content_size.y >= 480);
        assert!(info.body.width < 200);
        let body = info.body;

        // no horizontal bar shows up without room reserved for it
        for _ in 0..3 {
            run(&mut ctx, tall_window);
            let info = ctx.container("tall").expect("container exists");
            assert!(info.has_scrollbar_y);
            assert!(!info.has_scrollbar_x);
            assert_eq!((info.body.width, info.body.height), (body.width, body.height));
            assert_eq!(info.scroll.x, 0);
        }
    }

    #[test]
    fn oversized_scroll_is_clamped_next_frame() {
        let mut ctx = context();
        run(&mut ctx, tall_window);
        run(&mut ctx, tall_window);
        ctx.set_container_scroll("tall", vec2(0, 100_000));
        run(&mut ctx, tall_window);
        let info = ctx.container("tall").expect("container exists");
        let max = info.content_size.y + ctx.style().padding * 2 - info.body.height;
        assert!(info.scroll.y <= max);
        assert!(info.scroll.y > 0);

        ctx.set_container_scroll("tall", vec2(-50, -50));
        run(&mut ctx, tall_window);
        let info = ctx.container("tall").expect("container exists");
        assert_eq!((info.scroll.x, info.scroll.y), (0, 0));
    }

    #[test]
    fn wheel_scrolls_the_container_under_the_mouse() {
        let mut ctx = context();
        ctx.input_mut().mousemove(50, 100);
        run(&mut ctx, tall_window);
        run(&mut ctx, tall_window);
        ctx.input_mut().scroll(0, 30);
        run(&mut ctx, tall_window);
        assert_eq!(ctx.container("tall").map(|i| i.scroll.y), Some(30));
        // the wheel delta is consumed by the frame
        run(&mut ctx, tall_window);
        assert_eq!(ctx.container("tall").map(|i| i.scroll.y), Some(30));
    }

    #[test]
    fn title_drag_moves_window_by_mouse_delta() {
        let mut ctx = context();
        let win = |ctx: &mut Context| {
            ctx.window("drag", rect(50, 50, 200, 150), ContainerOption::NONE, |ctx| {
                ctx.layout_next();
            });
        };
        ctx.input_mut().mousemove(100, 60);
        run(&mut ctx, win);
        run(&mut ctx, win);
        ctx.input_mut().mousedown(100, 60, MouseButton::LEFT);
        run(&mut ctx, win);
        ctx.input_mut().mousemove(130, 80);
        run(&mut ctx, win);
        let r = ctx.container("drag").map(|i| i.rect).expect("container exists");
        assert_eq!((r.x, r.y, r.width, r.height), (80, 70, 200, 150));
        assert!(ctx.is_interacting());

        ctx.input_mut().mouseup(130, 80, MouseButton::LEFT);
        run(&mut ctx, win);
        ctx.input_mut().mousemove(160, 90);
        run(&mut ctx, win);
        let r = ctx.container("drag").map(|i| i.rect).expect("container exists");
        assert_eq!((r.x, r.y), (80, 70));
    }

    #[test]
    fn body_press_does_not_move_window() {
        let mut ctx = context();
        let win = |ctx: &mut Context| {
            ctx.window("still", rect(50, 50, 200, 150), ContainerOption::NONE, |_| {});
        };
        ctx.input_mut().mousemove(100, 120);
        run(&mut ctx, win);
        run(&mut ctx, win);
        ctx.input_mut().mousedown(100, 120, MouseButton::LEFT);
        run(&mut ctx, win);
        ctx.input_mut().mousemove(130, 140);
        run(&mut ctx, win);
        let r = ctx.container("still").map(|i| i.rect).expect("container exists");
        assert_eq!((r.x, r.y), (50, 50));
    }

    #[test]
    fn drag_hook_adjusts_the_rect() {
        let mut ctx = context();
        ctx.set_drag_hook(Box::new(|_: &str, mut r: Recti| {
            r.x = r.x.max(60);
            r
        }));
        let win = |ctx: &mut Context| {
            ctx.window("hooked", rect(70, 50, 200, 150), ContainerOption::NONE, |_| {});
        };
        ctx.input_mut().mousemove(100, 60);
        run(&mut ctx, win);
        run(&mut ctx, win);
        ctx.input_mut().mousedown(100, 60, MouseButton::LEFT);
        run(&mut ctx, win);
        ctx.input_mut().mousemove(50, 60);
        run(&mut ctx, win);
        assert_eq!(ctx.container("hooked").map(|i| i.rect.x), Some(60));
    }

    #[test]
    fn resize_grip_respects_minimum() {
        let mut ctx = context();
        let win = |ctx: &mut Context| {
            ctx.window("sized", rect(0, 0, 200, 150), ContainerOption::NONE, |_| {});
        };
        ctx.input_mut().mousemove(195, 145);
        run(&mut ctx, win);
        run(&mut ctx, win);
        ctx.input_mut().mousedown(195, 145, MouseButton::LEFT);
        run(&mut ctx, win);
        ctx.input_mut().mousemove(5, 5);
        run(&mut ctx, win);
        let r = ctx.container("sized").map(|i| i.rect).expect("container exists");
        assert_eq!((r.width, r.height), (MIN_WINDOW_SIZE.x, MIN_WINDOW_SIZE.y));
    }

    #[test]
    fn close_button_closes_window() {
        let mut ctx = context();
        let win = |ctx: &mut Context| {
            ctx.window("closable", rect(0, 0, 200, 150), ContainerOption::NONE, |_| {});
        };
        // centre of the close button in the top right corner
        ctx.input_mut().mousemove(188, 12);
        run(&mut ctx, win);
        run(&mut ctx, win);
        ctx.input_mut().mousedown(188, 12, MouseButton::LEFT);
        run(&mut ctx, win);
        assert_eq!(ctx.container("closable").map(|i| i.open), Some(false));
    }

    #[test]
    fn newer_window_is_hover_root_where_they_overlap() {
        let mut ctx = context();
        let both = |ctx: &mut Context| {
            ctx.window("back", rect(0, 0, 200, 200), ContainerOption::NONE, |_| {});
            ctx.window("front", rect(100, 0, 200, 200), ContainerOption::NONE, |_| {});
        };
        ctx.input_mut().mousemove(150, 100);
        run(&mut ctx, both);
        run(&mut ctx, both);
        assert!(ctx.is_hover_root("front"));

        ctx.input_mut().mousemove(50, 100);
        run(&mut ctx, both);
        run(&mut ctx, both);
        assert!(ctx.is_hover_root("back"));
    }

    #[test]
    fn press_brings_hover_root_to_front() {
        let mut ctx = context();
        let both = |ctx: &mut Context| {
            ctx.window("back", rect(0, 0, 200, 200), ContainerOption::NONE, |_| {});
            ctx.window("front", rect(100, 0, 200, 200), ContainerOption::NONE, |_| {});
        };
        ctx.input_mut().mousemove(50, 100);
        run(&mut ctx, both);
        ctx.input_mut().mousedown(50, 100, MouseButton::LEFT);
        run(&mut ctx, both);
        let names: Vec<String> = ctx.root_order().map(|i| i.name).collect();
        assert_eq!(names, vec!["front", "back"]);
    }

    #[test]
    fn always_on_top_wins_over_higher_zindex() {
        let mut ctx = context();
        let both = |ctx: &mut Context| {
            ctx.window("pinned", rect(0, 0, 200, 200), ContainerOption::ALWAYS_ON_TOP, |_| {});
            ctx.window("normal", rect(0, 0, 200, 200), ContainerOption::NONE, |_| {});
        };
        ctx.input_mut().mousemove(50, 100);
        run(&mut ctx, both);
        ctx.bring_to_front_by_name("normal");
        run(&mut ctx, both);
        assert!(ctx.container("normal").map(|i| i.zindex) > ctx.container("pinned").map(|i| i.zindex));
        assert!(ctx.is_hover_root("pinned"));
        let names: Vec<String> = ctx.root_order().map(|i| i.name).collect();
        assert_eq!(names, vec!["normal", "pinned"]);
    }

    #[test]
    fn queued_input_is_seen_in_the_same_frame() {
        let mut ctx = context();
        run(&mut ctx, |_| {});
        let sender = ctx.input_sender();
        sender.push(crate::InputEvent::MouseMove { x: 40, y: 30 });
        let mut seen = (vec2(0, 0), vec2(0, 0));
        run(&mut ctx, |ctx| {
            seen = (ctx.mouse_pos(), ctx.input().mouse_delta());
        });
        assert_eq!((seen.0.x, seen.0.y), (40, 30));
        assert_eq!((seen.1.x, seen.1.y), (40, 30));
    }

    #[test]
    fn popup_opens_at_mouse_and_closes_on_outside_press() {
        let mut ctx = context();
        let ui = |ctx: &mut Context| {
            ctx.window("main", rect(0, 0, 300, 300), ContainerOption::NONE, |_| {});
            ctx.popup("menu", |ctx| {
                ctx.layout_next();
            });
        };
        ctx.input_mut().mousemove(40, 50);
        run(&mut ctx, ui);
        ctx.open_popup("menu");
        run(&mut ctx, ui);
        let info = ctx.container("menu").expect("popup exists");
        assert!(info.open);
        assert_eq!((info.rect.x, info.rect.y), (40, 50));
        assert!(info.rect.width > 1);

        ctx.input_mut().mousemove(250, 250);
        run(&mut ctx, ui);
        ctx.input_mut().mousedown(250, 250, MouseButton::LEFT);
        run(&mut ctx, ui);
        assert_eq!(ctx.container("menu").map(|i| i.open), Some(false));
    }

    #[test]
    fn nested_root_commands_are_not_replayed_twice() {
        let mut ctx = context();
        ctx.input_mut().mousemove(20, 40);
        run(&mut ctx, |_| {});
        ctx.open_popup("inner");
        run(&mut ctx, |ctx| {
            ctx.window("outer", rect(0, 0, 300, 300), ContainerOption::NONE, |ctx| {
                ctx.popup("inner", |ctx| {
                    ctx.layout_next();
                });
            });
        });
        let outer = ctx.commands_for("outer").len();
        let inner = ctx.commands_for("inner").len();
        assert!(outer > 0 && inner > 0);
        assert_eq!(outer + inner, ctx.commands().len());

        let mut renderer = crate::renderer::tests::RecordingRenderer::default();
        ctx.render(&mut renderer);
        assert!(!renderer.ops.is_empty());
    }

    #[test]
    fn panel_scrolls_independently() {
        let mut ctx = context();
        let ui = |ctx: &mut Context| {
            ctx.window("host", rect(0, 0, 300, 300), ContainerOption::NONE, |ctx| {
                ctx.layout_row(&[SizePolicy::Remainder(0)], SizePolicy::Fixed(100));
                ctx.panel("list", ContainerOption::NONE, |ctx| {
                    ctx.layout_row(&[SizePolicy::Remainder(0)], SizePolicy::Fixed(400));
                    ctx.layout_next();
                });
            });
        };
        run(&mut ctx, ui);
        run(&mut ctx, ui);
        let list = ctx.container("list").expect("panel exists");
        assert!(list.has_scrollbar_y);
        assert!(!ctx.container("host").map(|i| i.has_scrollbar_y).unwrap_or(true));
        assert_eq!(ctx.root_order().count(), 1);
    }

    #[test]
    fn wheel_prefers_nested_panel_over_its_window() {
        let mut ctx = context();
        let ui = |ctx: &mut Context| {
            ctx.window("host", rect(0, 0, 300, 300), ContainerOption::NONE, |ctx| {
                ctx.layout_row(&[SizePolicy::Remainder(0)], SizePolicy::Fixed(100));
                ctx.panel("list", ContainerOption::NONE, |ctx| {
                    ctx.layout_row(&[SizePolicy::Remainder(0)], SizePolicy::Fixed(400));
                    ctx.layout_next();
                });
                ctx.layout_row(&[SizePolicy::Remainder(0)], SizePolicy::Fixed(400));
                ctx.layout_next();
            });
        };
        // panel occupies (5, 29) .. (x, 129) inside the host body
        ctx.input_mut().mousemove(50, 60);
        for _ in 0..3 {
            run(&mut ctx, ui);
        }
        assert!(ctx.container("host").map(|i| i.has_scrollbar_y).unwrap_or(false));
        assert!(ctx.container("list").map(|i| i.has_scrollbar_y).unwrap_or(false));

        ctx.input_mut().scroll(0, 20);
        run(&mut ctx, ui);
        assert_eq!(ctx.container("list").map(|i| i.scroll.y), Some(20));
        assert_eq!(ctx.container("host").map(|i| i.scroll.y), Some(0));
    }
}
