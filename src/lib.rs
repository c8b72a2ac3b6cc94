pub mod gui;
pub mod transcript;
pub mod webhook_api;
