pub mod context;
pub mod prompt;
pub mod service;
