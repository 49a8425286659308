pub mod clear;
pub mod config;
pub mod context;
pub mod edit;
pub mod list;
pub mod prompts;
pub mod show;
