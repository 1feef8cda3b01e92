use crate::controllers::interactive::events::render_event::RenderEvent;

/// Receives coordinator events. Called from worker threads while the
/// coordinator holds its publish gate, so implementations must not call back
/// into the coordinator.
pub trait InteractivePresenterPort: Send + Sync {
    fn present(&self, event: RenderEvent);
}
