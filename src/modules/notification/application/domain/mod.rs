pub mod entities;
pub mod vapid;
