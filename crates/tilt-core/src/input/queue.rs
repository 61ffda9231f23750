use glam::Vec2;

/// Input event types the engine understands.
/// Generic — no game-specific semantics.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// The pointer moved to world coordinates (x, y).
    PointerMove { x: f32, y: f32 },
}

/// A queue of raw input events. The shell writes events in; the engine
/// folds them into an [`InputState`] once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events, clearing the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-frame key/pointer sample built from the raw event queue.
///
/// `is_down` is level-triggered (true every frame the key is held);
/// `just_pressed` is edge-triggered (true only on the frame the key went
/// down). Game code polls this instead of touching the queue.
pub struct InputState {
    held: Vec<u32>,
    pressed: Vec<u32>,
    pointer: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: Vec::new(),
            pressed: Vec::new(),
            pointer: Vec2::ZERO,
        }
    }

    /// Fold one frame's worth of queued events into the sampled state.
    /// Clears the previous frame's edge-triggered set first.
    pub fn begin_frame(&mut self, queue: &mut InputQueue) {
        self.pressed.clear();
        for event in queue.drain() {
            match event {
                InputEvent::KeyDown { key_code } => {
                    if !self.held.contains(&key_code) {
                        self.held.push(key_code);
                        self.pressed.push(key_code);
                    }
                }
                InputEvent::KeyUp { key_code } => {
                    self.held.retain(|&k| k != key_code);
                }
                InputEvent::PointerMove { x, y } => {
                    self.pointer = Vec2::new(x, y);
                }
            }
        }
    }

    /// True every frame the key is held down.
    pub fn is_down(&self, key_code: u32) -> bool {
        self.held.contains(&key_code)
    }

    /// True only on the frame the key transitioned to down.
    pub fn just_pressed(&self, key_code: u32) -> bool {
        self.pressed.contains(&key_code)
    }

    /// Last known pointer position in world coordinates.
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
