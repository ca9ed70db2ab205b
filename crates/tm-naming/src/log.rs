use parking_lot::Mutex;

/// Records every naming decision that wasn't a first-try success: region
/// codes appended, reverts to the simple name, and `!` tie-breakers.
#[derive(Default)]
pub struct NamingLog {
    entries: Mutex<Vec<String>>,
}

impl NamingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.entries.lock().push(entry.into());
    }

    pub fn lines(&self) -> Vec<String> {
        self.entries.lock().clone()
    }
}
