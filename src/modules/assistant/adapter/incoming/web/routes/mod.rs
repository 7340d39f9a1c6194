pub mod ask;

pub use ask::ask_assistant_handler;
