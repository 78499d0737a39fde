//! Pointer input handling
//!
//! The input handler is the only writer of the pointer position and the
//! simulation the only reader, once per frame.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

/// Latest vertical pointer position, shared between input handler and loop
#[derive(Debug, Clone)]
pub struct PointerInput {
    y_bits: Arc<AtomicU32>,
    attached: Arc<AtomicBool>,
}

impl PointerInput {
    pub fn new(y: f32) -> Self {
        Self {
            y_bits: Arc::new(AtomicU32::new(y.to_bits())),
            attached: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn attach(&self) {
        self.attached.store(true, Ordering::Release);
    }

    /// Stop accepting pointer events; the last position is kept
    pub fn detach(&self) {
        self.attached.store(false, Ordering::Release);
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }

    /// Record a pointer move. Ignored while detached.
    pub fn set(&self, y: f32) {
        if self.is_attached() && y.is_finite() {
            self.y_bits.store(y.to_bits(), Ordering::Release);
        }
    }

    /// Record a pointer move given in client coordinates
    pub fn set_from_client(&self, client_y: f32, surface_top: f32) {
        self.set(client_y - surface_top);
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.y_bits.load(Ordering::Acquire))
    }

    /// Move straight to `y`, even while detached (used when a match starts)
    pub(crate) fn reset(&self, y: f32) {
        self.y_bits.store(y.to_bits(), Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_pointer_ignores_moves() {
        let pointer = PointerInput::new(240.0);
        pointer.set(10.0);
        assert_eq!(pointer.get(), 240.0);

        pointer.attach();
        pointer.set(10.0);
        assert_eq!(pointer.get(), 10.0);

        pointer.detach();
        pointer.set(300.0);
        assert_eq!(pointer.get(), 10.0);
    }

    #[test]
    fn test_client_coordinates_are_offset() {
        let pointer = PointerInput::new(0.0);
        pointer.attach();
        pointer.set_from_client(350.0, 100.0);
        assert_eq!(pointer.get(), 250.0);
    }

    #[test]
    fn test_clones_share_position() {
        let pointer = PointerInput::new(0.0);
        let handler = pointer.clone();
        pointer.attach();
        handler.set(42.0);
        assert_eq!(pointer.get(), 42.0);
    }

    #[test]
    fn test_non_finite_positions_are_dropped() {
        let pointer = PointerInput::new(5.0);
        pointer.attach();
        pointer.set(f32::NAN);
        assert_eq!(pointer.get(), 5.0);
    }
}
