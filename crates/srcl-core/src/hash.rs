//! SHA-512 content hashing

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use sha2::{Digest, Sha512};

use crate::{Error, Result};

/// Hash a file's full content, streaming it from disk.
pub fn sha512_file(path: &Path) -> Result<String> {
    let hash_error = |source: io::Error| Error::HashComputation {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(hash_error)?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha512::new();
    io::copy(&mut reader, &mut hasher).map_err(hash_error)?;

    Ok(hex::encode(hasher.finalize()))
}

/// Hash an in-memory buffer.
pub fn sha512_bytes(bytes: &[u8]) -> String {
    hex::encode(Sha512::digest(bytes))
}
