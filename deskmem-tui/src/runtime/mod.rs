mod action_queue;
mod actions;
mod event_loop;
mod refresh;
mod views;

pub use event_loop::run_app;
