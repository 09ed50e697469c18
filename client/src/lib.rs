mod actions;
mod app;
mod dom;
mod export;
mod palette;
mod render;
mod state;

pub use app::run;
