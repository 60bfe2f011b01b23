use tokio::sync::watch;

/// Read-only view of a piece of store-owned state.
///
/// A projection always holds the current value and can wait for the next
/// change. Holders cannot write to the underlying state.
#[derive(Debug, Clone)]
pub struct Projection<T> {
    rx: watch::Receiver<T>,
}

impl<T: Clone> Projection<T> {
    pub(crate) fn new(rx: watch::Receiver<T>) -> Self {
        Projection { rx }
    }

    /// Returns a snapshot of the current value.
    pub fn get(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Returns true if the value changed since it was last seen through this projection.
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Waits for the next change and returns the new value.
    ///
    /// Returns `None` once the owning store is gone.
    pub async fn changed(&mut self) -> Option<T> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Returns the underlying watch receiver, for use with `tokio::select!`
    /// or stream adapters.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.rx.clone()
    }
}
