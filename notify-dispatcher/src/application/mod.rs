pub mod commands;
pub mod handlers;

pub use commands::DispatchMessageCommand;
pub use handlers::DispatchCommandHandler;
