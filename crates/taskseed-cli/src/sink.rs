//! Event sink that logs run events and keeps them for rendering.

use log::{debug, info, warn};
use taskseed_core::{EventSink, RunEvent};

/// Logs each event at a level matching its importance and collects it.
#[derive(Default)]
pub struct LogSink {
    events: Vec<RunEvent>,
}

impl LogSink {
    pub fn events(&self) -> &[RunEvent] {
        &self.events
    }
}

impl EventSink for LogSink {
    fn record(&mut self, event: RunEvent) {
        match &event {
            RunEvent::Failed { .. } => warn!("{event}"),
            RunEvent::Created { task } | RunEvent::Planned { task } => {
                info!("{event}");
                debug!("instance {} due {}", task.instance_id, task.due);
            }
            _ => debug!("{event}"),
        }
        self.events.push(event);
    }
}
