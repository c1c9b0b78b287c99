use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub sprint: bool,
    pub left_mouse: bool,
    pub right_mouse: bool,
}

/// Gate between raw device input and the camera.
///
/// Cloning yields another handle to the same gate. While any
/// [`InputSuppression`] guard is alive, [`InputControl::filter`] hands out
/// an idle `InputState`.
#[derive(Debug, Clone, Default)]
pub struct InputControl {
    suppressed: Arc<AtomicU32>,
}

impl InputControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes input away from the user until the returned guard is dropped.
    pub fn suppress(&self) -> InputSuppression {
        self.suppressed.fetch_add(1, Ordering::SeqCst);
        tracing::debug!("Input suppressed");
        InputSuppression {
            suppressed: Arc::clone(&self.suppressed),
        }
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed.load(Ordering::SeqCst) > 0
    }

    pub fn filter(&self, raw: &InputState) -> InputState {
        if self.is_suppressed() {
            InputState::default()
        } else {
            *raw
        }
    }
}

/// Scoped ownership of input control. Released on drop, including unwinding.
#[derive(Debug)]
pub struct InputSuppression {
    suppressed: Arc<AtomicU32>,
}

impl Drop for InputSuppression {
    fn drop(&mut self) {
        self.suppressed.fetch_sub(1, Ordering::SeqCst);
        tracing::debug!("Input restored");
    }
}
