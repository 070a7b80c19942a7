use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocStoreError {
    #[error("storage error: {0}")]
    Storage(String),
}
