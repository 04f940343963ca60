//! Coalescing redraw scheduler.

/// Dirty flag consumed once per frame. Any number of requests between two frames
/// produce a single render.
#[derive(Debug, Default)]
pub struct RedrawScheduler {
    dirty: bool,
    frames: u64,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self) {
        self.dirty = true;
    }

    pub fn is_pending(&self) -> bool {
        self.dirty
    }

    /// Consume a pending request. Returns true if a frame should be drawn.
    pub fn take_frame(&mut self) -> bool {
        if std::mem::take(&mut self.dirty) {
            self.frames += 1;
            true
        } else {
            false
        }
    }

    /// Frames handed out so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
