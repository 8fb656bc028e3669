pub mod client;
pub mod configuration;
pub mod error;
pub mod fetch;
pub mod identity;
pub mod proxy;
pub mod recorder;
pub mod runner;

pub use configuration::RunConfig;
pub use error::Error;
pub use recorder::{LogFormat, Recorder, SuccessRecord};
pub use runner::{run, RunStats};
