use shadesync_api::{Envelope, OutputMessage};
use shadesync_engine::{Clock, Dispatcher, EngineError};
use tracing::{debug, info, warn};

use crate::settings::Settings;

/// Single worker owning the dispatcher; turns input lines into output lines.
pub struct ControllerWorker<C: Clock> {
    dispatcher: Dispatcher<C>,
}

impl<C: Clock> ControllerWorker<C> {
    /// Build a worker with every blind from `settings` installed.
    ///
    /// An invalid pre-configured blind aborts start-up.
    pub fn new(settings: &Settings, clock: C) -> Result<Self, EngineError> {
        let mut dispatcher = Dispatcher::new(clock).with_catalog(settings.reason_catalog());

        for blind in &settings.blinds {
            dispatcher.configure(blind)?;
        }
        info!(blinds = settings.blinds.len(), "Controller ready");

        Ok(Self { dispatcher })
    }

    pub fn dispatcher(&self) -> &Dispatcher<C> {
        &self.dispatcher
    }

    pub fn handle_line(&mut self, line: &str) -> Result<Vec<OutputMessage>, EngineError> {
        let envelope: Envelope =
            serde_json::from_str(line).map_err(|e| EngineError::MalformedInput(e.to_string()))?;

        debug!(topic = %envelope.topic, "Message received");

        self.dispatcher.handle_message(&envelope)
    }

    /// Rejected lines are logged and produce no output.
    pub fn process_line(&mut self, line: &str) -> Vec<String> {
        let line = line.trim();
        if line.is_empty() {
            return Vec::new();
        }

        let outputs = match self.handle_line(line) {
            Ok(outputs) => outputs,
            Err(e) => {
                warn!(error = %e, "Message rejected");
                return Vec::new();
            }
        };

        outputs
            .iter()
            .filter_map(|output| match serde_json::to_string(output) {
                Ok(text) => Some(text),
                Err(e) => {
                    warn!(channel = output.payload.channel, error = %e, "Failed to encode output");
                    None
                }
            })
            .collect()
    }
}
