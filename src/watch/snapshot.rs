// src/watch/snapshot.rs

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blake3::Hasher;
use tracing::debug;

/// Compute a deterministic hash over the contents of the input files.
///
/// Watch events fire for touches that leave the bytes unchanged (editors
/// rewriting files in place, metadata-only changes); the watch loop compares
/// this hash against the previous one and skips the rebuild when nothing
/// actually changed. Order of `paths` does not matter; we sort before
/// hashing to keep the hash stable. Missing files simply contribute nothing,
/// so deleting an optional input also changes the hash.
pub fn hash_inputs<I, P>(paths: I) -> Result<String>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut hasher = Hasher::new();

    let mut paths_vec: Vec<PathBuf> =
        paths.into_iter().map(|p| p.as_ref().to_path_buf()).collect();
    paths_vec.sort();

    for path in paths_vec {
        if !path.is_file() {
            continue;
        }
        debug!("hashing input {:?}", path);

        // Separate the files in the stream so contents cannot alias across
        // a boundary shift.
        hasher.update(path.to_string_lossy().as_bytes());
        hasher.update(&[0]);

        let mut file =
            File::open(&path).with_context(|| format!("opening input for hashing: {:?}", path))?;
        let mut buf = [0u8; 8192];
        loop {
            let n = file.read(&mut buf)?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        hasher.update(&[0]);
    }

    let hash = hasher.finalize().to_hex().to_string();
    debug!(hash = %hash, "computed input snapshot hash");
    Ok(hash)
}
