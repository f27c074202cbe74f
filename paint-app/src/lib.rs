pub mod app;
pub mod form_args;
pub mod logging;
pub mod report;
pub mod settings;
pub mod state;
pub mod utils;
