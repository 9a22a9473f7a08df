mod app;
mod dom;
mod render;

pub use app::run;
