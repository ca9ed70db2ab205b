use std::sync::Mutex;

/// The fatal error channel: structural problems in manifests and input
/// files. Append-only during stages 1-10; a non-empty list at the end of
/// the run is a fatal condition for the driver.
///
/// One mutex around a shared collection, the same pattern `tm-pipeline`'s
/// per-stage work queues use, but `std::sync::Mutex` here since the list is
/// appended to, never contended for long critical sections.
#[derive(Default)]
pub struct ErrorList {
    errors: Mutex<Vec<String>>,
}

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a structural error. Individual errors never abort the stage
    /// that raised them; only a non-empty list at end-of-run is fatal.
    pub fn add_error(&self, message: impl Into<String>) {
        self.errors.lock().unwrap().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.lock().unwrap().is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.lock().unwrap().len()
    }

    /// Snapshot of all errors recorded so far, in insertion order.
    pub fn snapshot(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_in_order() {
        let el = ErrorList::new();
        el.add_error("first");
        el.add_error("second");
        assert_eq!(el.snapshot(), vec!["first", "second"]);
        assert_eq!(el.len(), 2);
        assert!(!el.is_empty());
    }

    #[test]
    fn empty_by_default() {
        let el = ErrorList::new();
        assert!(el.is_empty());
    }
}
