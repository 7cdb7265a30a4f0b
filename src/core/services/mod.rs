pub mod category_service;
pub mod entry_service;
pub mod report_service;

pub use category_service::CategoryService;
pub use entry_service::EntryService;
pub use report_service::ReportService;

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
