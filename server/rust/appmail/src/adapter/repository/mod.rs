pub mod in_memory;
pub mod template_postgres;
pub mod translation_postgres;

use crate::domain::repository::UniqueViolation;

/// sqlx のエラーを anyhow::Error に変換する。一意制約違反は UniqueViolation として包む。
pub(crate) fn map_sqlx_error(err: sqlx::Error, constraint: &str) -> anyhow::Error {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            let name = db_err.constraint().unwrap_or(constraint);
            return UniqueViolation::new(name).into();
        }
    }
    err.into()
}
