// All repositories module
pub mod users;
pub mod maps;

// Re-export all repositories for convenience
pub use users::*;
pub use maps::*;

/// 중복 키 에러 (메모리 저장소가 partial unique index 위반 대신 반환)
/// Duplicate key raised by the in-memory repositories
#[derive(Debug, thiserror::Error)]
#[error("duplicate key: {0}")]
pub struct DuplicateKey(pub String);

/// unique 제약 위반 여부 (Postgres SQLSTATE 23505 또는 `DuplicateKey`)
/// Whether a repository error was caused by a unique constraint violation
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    if err.downcast_ref::<DuplicateKey>().is_some() {
        return true;
    }

    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .and_then(|e| e.code())
        .map(|code| code == "23505")
        .unwrap_or(false)
}
