/// De-duplicated failure notice.
///
/// A refresh failure should be surfaced to the user once, not once per
/// retry; the next successful refresh re-arms the notice. This state is
/// owned by the controller that uses it, so it cannot leak across
/// unrelated screens or test runs.
#[derive(Debug, Default)]
pub struct FailureNotice {
    muted: bool,
}

impl FailureNotice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure. Returns `true` when this failure should be
    /// surfaced, `false` when the user has already seen one since the
    /// last success.
    pub fn on_failure(&mut self) -> bool {
        if self.muted {
            false
        } else {
            self.muted = true;
            true
        }
    }

    /// Record a success, re-arming the notice.
    pub fn on_success(&mut self) {
        self.muted = false;
    }
}
