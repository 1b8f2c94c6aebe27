pub mod app;
pub mod theme;
pub mod view;
pub mod window;
