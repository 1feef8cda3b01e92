/// Lifecycle of one submitted generation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum JobState {
    Running,
    Completed,
    Cancelled,
    Failed,
}

impl JobState {
    #[must_use]
    pub fn is_finished(self) -> bool {
        !matches!(self, Self::Running)
    }
}
