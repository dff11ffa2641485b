//! bcrypt hashing, run on the blocking pool.

use anyhow::Context as _;

use crate::error::ApiError;

pub async fn hash_secret(secret: String, cost: u32) -> Result<String, ApiError> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(secret, cost))
        .await
        .context("hashing task panicked")?
        .context("bcrypt hash")?;
    Ok(hash)
}

pub async fn verify_secret(secret: String, hash: String) -> Result<bool, ApiError> {
    let matched = tokio::task::spawn_blocking(move || bcrypt::verify(secret, &hash))
        .await
        .context("verify task panicked")?
        .context("bcrypt verify")?;
    Ok(matched)
}
