/// Callbacks queued during one frame and applied at the start of the next,
/// so state read by the current render pass is never written mid-pass.
pub struct DeferredQueue<T> {
    pending: Vec<Box<dyn FnOnce(&mut T)>>,
}

impl<T> std::fmt::Debug for DeferredQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredQueue")
            .field("pending", &format!("<{} callbacks>", self.pending.len()))
            .finish()
    }
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Schedule `callback` for the next flush
    pub fn defer(&mut self, callback: impl FnOnce(&mut T) + 'static) {
        self.pending.push(Box::new(callback));
    }

    /// Run every queued callback in the order it was deferred
    pub fn flush(&mut self, target: &mut T) {
        for callback in std::mem::take(&mut self.pending) {
            callback(target);
        }
    }
}
