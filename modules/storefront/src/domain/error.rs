#[derive(Debug, thiserror::Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
