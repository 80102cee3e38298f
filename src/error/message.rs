use thiserror::Error as ThisError;

use super::SupabaseError;

#[derive(Debug, ThisError)]
pub enum MessageError {
    #[error("Message text must not be empty")]
    EmptyText,

    #[error(transparent)]
    Supabase(#[from] SupabaseError),
}
