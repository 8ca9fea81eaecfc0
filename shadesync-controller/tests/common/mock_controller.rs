use serde_json::Value;
use shadesync_controller::settings::Settings;
use shadesync_controller::worker::ControllerWorker;
use shadesync_engine::ManualClock;
use time::OffsetDateTime;
use time::macros::datetime;

pub const START: OffsetDateTime = datetime!(2026-06-21 12:00 UTC);

pub const SETTINGS: &str = r#"
[logger]
level = "debug"

[[blinds]]
channel = 1
orientation = 180
top = 2
bottom = 0.5
depth = 1
increment = 25
altitudethreshold = 10

[[blinds]]
channel = 2
orientation = "90"
top = "2"
bottom = "0.5"
depth = "1"
increment = "25"
opposite = "true"

[reasons]
"02" = "Nacht"
"#;

pub struct MockController {
    pub worker: ControllerWorker<ManualClock>,
    pub clock: ManualClock,
}

impl MockController {
    pub fn new() -> Self {
        let settings = Settings::from_toml(SETTINGS).unwrap();
        let clock = ManualClock::new(START);
        let worker = ControllerWorker::new(&settings, clock.clone()).unwrap();

        Self { worker, clock }
    }

    /// Output lines decoded back to JSON values
    pub fn send(&mut self, line: &str) -> Vec<Value> {
        self.worker
            .process_line(line)
            .iter()
            .map(|output| serde_json::from_str(output).unwrap())
            .collect()
    }
}
