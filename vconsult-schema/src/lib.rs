pub mod message;
pub mod postgrest;

pub use message::{Message, NewMessage};
pub use postgrest::PostgrestErrorBody;
