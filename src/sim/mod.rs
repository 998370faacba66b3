pub mod event;
pub mod loader;
pub mod session;
pub mod step;
