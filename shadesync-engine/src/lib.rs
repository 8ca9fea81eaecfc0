pub mod blind;
pub mod clock;
pub mod dispatcher;
pub mod environment;
pub mod error;
pub mod event;
pub mod expiry;
pub mod geometry;
pub mod policy;
pub mod reason;
pub mod validation;

pub use blind::{Blind, BlindConfig, BlindState, Threshold};
pub use clock::{Clock, ManualClock, SystemClock};
pub use dispatcher::Dispatcher;
pub use environment::{Environment, SunPosition, Weather};
pub use error::{EngineError, FieldViolation, Result};
pub use event::InputEvent;
pub use policy::{Decision, decide, recompute};
pub use reason::ReasonCatalog;
