/// Command definitions and their handlers
pub mod commands;
/// Dispatcher schema and update handlers
pub mod handlers;
