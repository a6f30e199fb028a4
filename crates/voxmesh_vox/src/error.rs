use thiserror::Error;

/// Reasons a byte stream cannot be used as a `.vox` file at all.
///
/// Anything after the `MAIN` header is recovered locally: truncation ends the chunk stream, and malformed chunk payloads
/// are skipped.
#[derive(Debug, Error)]
pub enum VoxError {
    #[error("failed to read .vox data: {0}")]
    Io(#[from] std::io::Error),
    #[error("expected magic \"VOX \", found {found:?}")]
    BadMagic { found: [u8; 4] },
    #[error("missing MAIN chunk")]
    MissingMain,
}
