pub mod attendees;
pub mod cli;
pub mod client;
pub mod config;
pub mod global;
pub mod models;
pub mod text_io;
pub mod workflow;
