//! Completion feedback — the terminal acknowledgment after a successful
//! submission.
//!
//! Holds no business state; its only obligation is to invoke the provided
//! continue callback, which performs the navigation.

/// Terminal acknowledgment shown once after a successful submission.
pub struct CompletionFeedback {
    on_continue: Box<dyn FnOnce() + Send>,
}

impl CompletionFeedback {
    pub fn new(on_continue: impl FnOnce() + Send + 'static) -> Self {
        Self {
            on_continue: Box::new(on_continue),
        }
    }

    /// Dismiss the feedback, invoking the continue callback exactly once.
    pub fn acknowledge(self) {
        (self.on_continue)();
    }
}
