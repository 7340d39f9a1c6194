pub mod read_state;

pub use read_state::annotate_read_state;
