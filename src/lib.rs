pub mod config;
pub mod error;
pub mod estimator;
pub mod messages;
pub mod server;
pub mod supabase;
pub mod utils;

pub use error::{AppError, MessageError, SupabaseError};
pub use messages::MessageBoard;
pub use supabase::SupabaseClient;
