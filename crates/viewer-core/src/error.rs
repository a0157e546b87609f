use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("failed to fetch asset '{path}': {reason}")]
    AssetFetch { path: String, reason: String },
    #[error("failed to decode asset '{path}': {reason}")]
    AssetDecode { path: String, reason: String },
    #[error("asset '{path}' contains no scene")]
    EmptyAsset { path: String },
}
