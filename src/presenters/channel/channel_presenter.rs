use crate::controllers::interactive::events::render_event::RenderEvent;
use crate::controllers::interactive::ports::presenter_port::InteractivePresenterPort;
use std::sync::mpsc::{self, Receiver, Sender};

/// Forwards coordinator events to a channel so a UI thread can drain them.
#[derive(Debug)]
pub struct ChannelPresenter {
    sender: Sender<RenderEvent>,
}

impl ChannelPresenter {
    pub fn new() -> (Self, Receiver<RenderEvent>) {
        let (sender, receiver) = mpsc::channel();

        (Self { sender }, receiver)
    }
}

impl InteractivePresenterPort for ChannelPresenter {
    fn present(&self, event: RenderEvent) {
        if self.sender.send(event).is_err() {
            log::trace!("render event dropped: receiver closed");
        }
    }
}
