pub mod controller;
pub mod state;

pub use controller::ViewController;
pub use state::{LoadError, LoadPhase, LoadStatus, ViewError, ViewEvent, ViewState};
