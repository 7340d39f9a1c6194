pub mod entities;
pub mod webhook;
