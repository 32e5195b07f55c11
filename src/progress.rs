/// Progress reporting for the offer loop. Frontends implement what they need.
pub trait Progress {
    /// Called once with the number of offers about to be parsed.
    fn begin(&mut self, _total: usize) {}

    /// Called after each offer, extracted or skipped.
    fn item_done(&mut self, _position: usize) {}

    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Reports progress through `tracing`.
#[derive(Debug, Default)]
pub struct LogProgress {
    total: usize,
    done: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
        tracing::info!(total, "starting to parse the offers");
    }

    fn item_done(&mut self, position: usize) {
        self.done += 1;
        tracing::info!(position, "parsed offer {}/{}", self.done, self.total);
    }

    fn finish(&mut self) {
        tracing::info!(parsed = self.done, "finished parsing offers");
    }
}
