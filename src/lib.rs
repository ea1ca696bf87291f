pub mod clock;
pub mod config;
pub mod slides;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
