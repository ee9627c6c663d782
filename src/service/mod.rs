pub mod events;
pub mod notifier;
pub mod presenter;
pub mod session;
