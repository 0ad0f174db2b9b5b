use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Update or delete targeted an id that does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// Any failure reported by the database, passed through as-is.
    #[error("persistence error: {0}")]
    Persistence(#[from] DbErr),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: i32) -> Self { Self::NotFound(format!("{} {} not found", entity, id)) }
}
