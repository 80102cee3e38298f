mod app;
mod message;
mod supabase;

pub use app::{ApiErrorBody, ApiErrorObject, AppError};
pub use message::MessageError;
pub use supabase::SupabaseError;
