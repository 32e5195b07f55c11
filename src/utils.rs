use std::time::Duration;

pub fn pause(duration: Duration) {
    if duration.is_zero() {
        return;
    }
    tracing::trace!(?duration, "pausing");
    std::thread::sleep(duration);
}
