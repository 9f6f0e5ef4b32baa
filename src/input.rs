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
use crate::{Vec2i, vec2};
use bitflags::*;
use log::warn;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Mouse button state as reported by the input system.
    pub struct MouseButton : u32 {
        /// Middle mouse button.
        const MIDDLE = 4;
        /// Right mouse button.
        const RIGHT = 2;
        /// Left mouse button.
        const LEFT = 1;
        /// No buttons pressed.
        const NONE = 0;
    }
}

impl MouseButton {
    /// Returns `true` if the middle mouse button is set.
    pub fn is_middle(&self) -> bool { self.intersects(Self::MIDDLE) }
    /// Returns `true` if the right mouse button is set.
    pub fn is_right(&self) -> bool { self.intersects(Self::RIGHT) }
    /// Returns `true` if the left mouse button is set.
    pub fn is_left(&self) -> bool { self.intersects(Self::LEFT) }
    /// Returns `true` if no mouse buttons are set.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Modifier and editing keys tracked by the input system.
    pub struct KeyMode : u32 {
        /// Delete key.
        const DELETE = 32;
        /// Return/Enter key.
        const RETURN = 16;
        /// Backspace key.
        const BACKSPACE = 8;
        /// Alt key.
        const ALT = 4;
        /// Control key.
        const CTRL = 2;
        /// Shift key.
        const SHIFT = 1;
        /// No key.
        const NONE = 0;
    }
}

impl KeyMode {
    /// Returns `true` if no key is set.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
    /// Returns `true` if Delete is set.
    pub fn is_delete(&self) -> bool { self.intersects(Self::DELETE) }
    /// Returns `true` if Return/Enter is set.
    pub fn is_return(&self) -> bool { self.intersects(Self::RETURN) }
    /// Returns `true` if Backspace is set.
    pub fn is_backspace(&self) -> bool { self.intersects(Self::BACKSPACE) }
    /// Returns `true` if Alt is set.
    pub fn is_alt(&self) -> bool { self.intersects(Self::ALT) }
    /// Returns `true` if Control is set.
    pub fn is_ctrl(&self) -> bool { self.intersects(Self::CTRL) }
    /// Returns `true` if Shift is set.
    pub fn is_shift(&self) -> bool { self.intersects(Self::SHIFT) }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Logical navigation keys handled by the UI.
    pub struct KeyCode : u32 {
        /// End key.
        const END = 32;
        /// Home key.
        const HOME = 16;
        /// Right arrow key.
        const RIGHT = 8;
        /// Left arrow key.
        const LEFT = 4;
        /// Down arrow key.
        const DOWN = 2;
        /// Up arrow key.
        const UP = 1;
        /// No navigation keys pressed.
        const NONE = 0;
    }
}

#[derive(Clone, Debug, PartialEq)]
/// A single input event, delivered directly or through an [`InputQueue`].
pub enum InputEvent {
    /// The pointer moved.
    MouseMove {
        /// Horizontal position.
        x: i32,
        /// Vertical position.
        y: i32,
    },
    /// A mouse button went down.
    MouseDown {
        /// Horizontal position.
        x: i32,
        /// Vertical position.
        y: i32,
        /// Button that changed.
        button: MouseButton,
    },
    /// A mouse button went up.
    MouseUp {
        /// Horizontal position.
        x: i32,
        /// Vertical position.
        y: i32,
        /// Button that changed.
        button: MouseButton,
    },
    /// The wheel moved.
    Scroll {
        /// Horizontal delta.
        x: i32,
        /// Vertical delta.
        y: i32,
    },
    /// A modifier or editing key went down.
    KeyDown(KeyMode),
    /// A modifier or editing key went up.
    KeyUp(KeyMode),
    /// A navigation key went down.
    KeyCodeDown(KeyCode),
    /// A navigation key went up.
    KeyCodeUp(KeyCode),
    /// UTF-8 text was typed.
    Text(String),
}

#[derive(Clone, Debug)]
/// Input state of the current frame. Pressed sets, deltas and text are frame-scoped.
pub struct Input {
    pub(crate) mouse_pos: Vec2i,
    pub(crate) last_mouse_pos: Vec2i,
    pub(crate) mouse_delta: Vec2i,
    pub(crate) scroll_delta: Vec2i,
    pub(crate) mouse_down: MouseButton,
    pub(crate) mouse_pressed: MouseButton,
    pub(crate) key_down: KeyMode,
    pub(crate) key_pressed: KeyMode,
    pub(crate) key_code_down: KeyCode,
    pub(crate) key_code_pressed: KeyCode,
    pub(crate) input_text: String,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            mouse_pos: Vec2i::default(),
            last_mouse_pos: Vec2i::default(),
            mouse_delta: Vec2i::default(),
            scroll_delta: Vec2i::default(),
            mouse_down: MouseButton::NONE,
            mouse_pressed: MouseButton::NONE,
            key_down: KeyMode::NONE,
            key_pressed: KeyMode::NONE,
            key_code_down: KeyCode::NONE,
            key_code_pressed: KeyCode::NONE,
            input_text: String::default(),
        }
    }
}

impl Input {
    /// Current pointer position.
    pub fn mouse_pos(&self) -> Vec2i { self.mouse_pos }

    /// Pointer movement since the previous frame.
    pub fn mouse_delta(&self) -> Vec2i { self.mouse_delta }

    /// Wheel movement accumulated this frame.
    pub fn scroll_delta(&self) -> Vec2i { self.scroll_delta }

    /// Currently held mouse buttons.
    pub fn mouse_down(&self) -> MouseButton { self.mouse_down }

    /// Mouse buttons pressed this frame.
    pub fn mouse_pressed(&self) -> MouseButton { self.mouse_pressed }

    /// Currently held modifier/editing keys.
    pub fn key_state(&self) -> KeyMode { self.key_down }

    /// Modifier/editing keys pressed this frame.
    pub fn key_pressed(&self) -> KeyMode { self.key_pressed }

    /// Currently held navigation keys.
    pub fn key_codes(&self) -> KeyCode { self.key_code_down }

    /// Navigation keys pressed this frame.
    pub fn key_codes_pressed(&self) -> KeyCode { self.key_code_pressed }

    /// UTF-8 text entered this frame.
    pub fn text_input(&self) -> &str { &self.input_text }

    /// Updates the current mouse pointer position.
    pub fn mousemove(&mut self, x: i32, y: i32) { self.mouse_pos = vec2(x, y); }

    /// Records that the specified mouse button was pressed.
    pub fn mousedown(&mut self, x: i32, y: i32, btn: MouseButton) {
        self.mousemove(x, y);
        self.mouse_down |= btn;
        self.mouse_pressed |= btn;
    }

    /// Records that the specified mouse button was released.
    pub fn mouseup(&mut self, x: i32, y: i32, btn: MouseButton) {
        self.mousemove(x, y);
        self.mouse_down &= !btn;
    }

    /// Accumulates scroll wheel movement.
    pub fn scroll(&mut self, x: i32, y: i32) {
        self.scroll_delta.x += x;
        self.scroll_delta.y += y;
    }

    /// Records that a modifier key was pressed.
    pub fn keydown(&mut self, key: KeyMode) {
        self.key_pressed |= key;
        self.key_down |= key;
    }

    /// Records that a modifier key was released.
    pub fn keyup(&mut self, key: KeyMode) { self.key_down &= !key; }

    /// Records that a navigation key was pressed.
    pub fn keydown_code(&mut self, code: KeyCode) {
        self.key_code_pressed |= code;
        self.key_code_down |= code;
    }

    /// Records that a navigation key was released.
    pub fn keyup_code(&mut self, code: KeyCode) { self.key_code_down &= !code; }

    /// Appends UTF-8 text to the input buffer.
    pub fn text(&mut self, text: &str) { self.input_text.push_str(text); }

    /// Applies a single event.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::MouseMove { x, y } => self.mousemove(x, y),
            InputEvent::MouseDown { x, y, button } => self.mousedown(x, y, button),
            InputEvent::MouseUp { x, y, button } => self.mouseup(x, y, button),
            InputEvent::Scroll { x, y } => self.scroll(x, y),
            InputEvent::KeyDown(key) => self.keydown(key),
            InputEvent::KeyUp(key) => self.keyup(key),
            InputEvent::KeyCodeDown(code) => self.keydown_code(code),
            InputEvent::KeyCodeUp(code) => self.keyup_code(code),
            InputEvent::Text(text) => self.text(&text),
        }
    }

    pub(crate) fn prelude(&mut self) {
        self.mouse_delta.x = self.mouse_pos.x - self.last_mouse_pos.x;
        self.mouse_delta.y = self.mouse_pos.y - self.last_mouse_pos.y;
    }

    pub(crate) fn epilogue(&mut self) {
        self.key_pressed = KeyMode::NONE;
        self.key_code_pressed = KeyCode::NONE;
        self.input_text.clear();
        self.mouse_pressed = MouseButton::NONE;
        self.scroll_delta = vec2(0, 0);
        self.last_mouse_pos = self.mouse_pos;
    }
}

struct QueueState {
    events: VecDeque<InputEvent>,
    capacity: usize,
}

/// Bounded, lock-guarded event queue drained at the start of every frame.
pub struct InputQueue {
    state: Arc<Mutex<QueueState>>,
}

/// Cloneable, `Send` handle that pushes events into an [`InputQueue`] from any thread.
#[derive(Clone)]
pub struct InputSender {
    state: Arc<Mutex<QueueState>>,
}

fn lock(state: &Mutex<QueueState>) -> MutexGuard<'_, QueueState> {
    match state.lock() {
        Ok(guard) => guard,
        // the queue holds plain data, a panicking producer cannot leave it half-written
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn push_event(state: &Mutex<QueueState>, event: InputEvent) -> bool {
    let mut guard = lock(state);
    if guard.events.len() >= guard.capacity {
        warn!("input queue full ({} events), dropping {:?}", guard.capacity, event);
        return false;
    }
    guard.events.push_back(event);
    true
}

impl InputQueue {
    /// Creates a queue holding at most `capacity` pending events.
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(QueueState { events: VecDeque::with_capacity(capacity), capacity })),
        }
    }

    /// Returns a handle other threads can push through.
    pub fn sender(&self) -> InputSender { InputSender { state: self.state.clone() } }

    /// Enqueues an event. Returns `false` when the queue is full and the event was dropped.
    pub fn push(&self, event: InputEvent) -> bool { push_event(&self.state, event) }

    /// Number of pending events.
    pub fn len(&self) -> usize { lock(&self.state).events.len() }

    /// Returns `true` when nothing is pending.
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Applies every pending event to `input` in arrival order, under a single lock.
    pub fn drain_into(&self, input: &mut Input) {
        let mut guard = lock(&self.state);
        while let Some(event) = guard.events.pop_front() {
            input.apply(event);
        }
    }
}

impl InputSender {
    /// Enqueues an event. Returns `false` when the queue is full and the event was dropped.
    pub fn push(&self, event: InputEvent) -> bool { push_event(&self.state, event) }
}
