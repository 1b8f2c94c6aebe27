pub mod events;
pub mod gui;
pub mod sys;
