//! SHA-256 content hashing used to name uploaded objects.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::core::error::{AppError, Result};

/// Hash bytes with SHA-256 and return the lowercase hex digest (64 chars)
pub fn compute_hash(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Hash the content of a file on disk
pub async fn hash_file(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        AppError::Internal(format!(
            "Failed to read '{}' for hashing: {}",
            path.display(),
            e
        ))
    })?;

    Ok(compute_hash(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_hash_known_vector() {
        assert_eq!(
            compute_hash(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_compute_hash_is_lowercase_hex() {
        let hash = compute_hash(b"");
        assert_eq!(hash.len(), 64);
        assert!(hash
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[tokio::test]
    async fn test_hash_file_matches_in_memory_hash() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, b"some image bytes").unwrap();

        let hash = hash_file(&path).await.unwrap();
        assert_eq!(hash, compute_hash(b"some image bytes"));
    }

    #[tokio::test]
    async fn test_hash_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = hash_file(&dir.path().join("missing.png")).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
