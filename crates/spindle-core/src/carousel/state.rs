use super::gesture::{self, DragPhase, GestureConfig, GestureOutcome};
use super::layout::{self, LayoutConfig, VisualTransform};
use std::num::NonZeroUsize;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CarouselError {
    #[error("A carousel needs at least one item")]
    Empty,
}

/// Wraps `current + delta` into `[0, len)`.
pub fn offset_index(current: usize, len: NonZeroUsize, delta: i64) -> usize {
    (current as i128 + delta as i128).rem_euclid(len.get() as i128) as usize
}

/// Transient interaction state of one carousel.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselState {
    current_index: usize,
    len: NonZeroUsize,
    drag: DragPhase,
}

impl CarouselState {
    pub fn new(len: usize) -> Result<Self, CarouselError> {
        let len = NonZeroUsize::new(len).ok_or(CarouselError::Empty)?;
        Ok(Self {
            current_index: 0,
            len,
            drag: DragPhase::Idle,
        })
    }

    pub fn len(&self) -> NonZeroUsize {
        self.len
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn drag_phase(&self) -> DragPhase {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn drag_start(&self) -> f64 {
        match self.drag {
            DragPhase::Dragging { start, .. } => start,
            DragPhase::Idle => 0.0,
        }
    }

    pub fn drag_current(&self) -> f64 {
        match self.drag {
            DragPhase::Dragging { current, .. } => current,
            DragPhase::Idle => 0.0,
        }
    }

    pub fn drag_fraction(&self, sensitivity: f64) -> f64 {
        self.drag.fraction(sensitivity)
    }

    /// "3 / 10" style position indicator.
    pub fn indicator(&self) -> String {
        format!("{} / {}", self.current_index + 1, self.len)
    }

    pub fn transforms(&self, gesture: &GestureConfig, layout: &LayoutConfig) -> Vec<VisualTransform> {
        layout::project(
            self.current_index,
            self.len,
            self.drag_fraction(gesture.sensitivity),
            layout,
        )
    }

    /// Starts a drag at `x`. Returns false if one is already running.
    pub fn press(&mut self, x: f64) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.drag = DragPhase::Dragging { start: x, current: x };
        true
    }

    /// Returns true when the drag position changed.
    pub fn drag_to(&mut self, x: f64) -> bool {
        match &mut self.drag {
            DragPhase::Dragging { current, .. } if *current != x => {
                *current = x;
                true
            }
            _ => false,
        }
    }

    /// Ends the drag and commits it under `config.policy`.
    pub fn release(&mut self, config: &GestureConfig) -> GestureOutcome {
        let outcome = gesture::resolve(self.drag, config);
        self.drag = DragPhase::Idle;
        if let GestureOutcome::Moved { delta } = outcome {
            self.current_index = offset_index(self.current_index, self.len, delta);
        }
        outcome
    }

    /// Abandons a drag without committing. Returns true if one was running.
    pub fn cancel(&mut self) -> bool {
        std::mem::take(&mut self.drag).is_dragging()
    }

    /// Navigation is refused while a drag is in flight; `None` means refused.
    pub fn step(&mut self, delta: i64) -> Option<usize> {
        if self.is_dragging() {
            return None;
        }
        self.current_index = offset_index(self.current_index, self.len, delta);
        Some(self.current_index)
    }

    pub fn next(&mut self) -> Option<usize> {
        self.step(1)
    }

    pub fn previous(&mut self) -> Option<usize> {
        self.step(-1)
    }

    /// Out-of-range targets wrap; `-1` is the last item.
    pub fn jump_to(&mut self, index: i64) -> Option<usize> {
        if self.is_dragging() {
            return None;
        }
        self.current_index = offset_index(0, self.len, index);
        Some(self.current_index)
    }

    /// Adopts a new item count, keeping the current index when it still
    /// exists and clamping to the last item otherwise.
    pub fn resize(&mut self, len: usize) -> Result<(), CarouselError> {
        let len = NonZeroUsize::new(len).ok_or(CarouselError::Empty)?;
        self.drag = DragPhase::Idle;
        self.len = len;
        self.current_index = self.current_index.min(len.get() - 1);
        Ok(())
    }
}
