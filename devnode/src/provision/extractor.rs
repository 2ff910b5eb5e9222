//! Gzip-compressed tar extraction.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use flate2::read::GzDecoder;
use tar::Archive;

use super::error::{ProvisionError, ProvisionResult};
use super::traits::ArchiveExtractor;

/// Extracts `.tar.gz` release assets.
#[derive(Debug, Clone, Copy, Default)]
pub struct TarGzExtractor;

impl TarGzExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ArchiveExtractor for TarGzExtractor {
    fn extract(&self, archive: &Path, dest_dir: &Path) -> ProvisionResult<usize> {
        let extract_error = |reason: String| ProvisionError::Extract {
            archive: archive.to_path_buf(),
            reason,
        };

        let file = File::open(archive).map_err(|e| ProvisionError::io(archive, e))?;
        let mut tar = Archive::new(GzDecoder::new(BufReader::new(file)));
        tar.set_preserve_permissions(true);

        let mut count = 0;
        for entry in tar.entries().map_err(|e| extract_error(e.to_string()))? {
            let mut entry = entry.map_err(|e| extract_error(e.to_string()))?;
            // unpack_in refuses entries that would escape dest_dir
            if entry
                .unpack_in(dest_dir)
                .map_err(|e| extract_error(e.to_string()))?
            {
                count += 1;
            }
        }

        tracing::debug!(
            archive = %archive.display(),
            dest = %dest_dir.display(),
            entries = count,
            "Archive extracted"
        );
        Ok(count)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use flate2::write::GzEncoder;
    use flate2::Compression;

    /// Build a `.tar.gz` holding the given `(path, contents, mode)` files.
    pub(crate) fn build_archive(files: &[(&str, &[u8], u32)]) -> Vec<u8> {
        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (path, contents, mode) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(contents.len() as u64);
            header.set_mode(*mode);
            header.set_cksum();
            builder.append_data(&mut header, path, *contents).unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap()
    }

    #[test]
    fn test_extract_files() {
        let temp = tempfile::tempdir().unwrap();
        let archive = temp.path().join("tool.tar.gz");
        std::fs::write(
            &archive,
            build_archive(&[
                ("anvil-zksync", b"#!/bin/sh\n", 0o755),
                ("LICENSE", b"MIT", 0o644),
            ]),
        )
        .unwrap();

        let dest = temp.path().join("out");
        std::fs::create_dir_all(&dest).unwrap();

        let count = TarGzExtractor::new().extract(&archive, &dest).unwrap();
        assert_eq!(count, 2);
        assert_eq!(
            std::fs::read(dest.join("anvil-zksync")).unwrap(),
            b"#!/bin/sh\n"
        );
        assert_eq!(std::fs::read(dest.join("LICENSE")).unwrap(), b"MIT");
    }

    #[test]
    fn test_extract_missing_archive() {
        let temp = tempfile::tempdir().unwrap();
        let result = TarGzExtractor::new().extract(&temp.path().join("nope.tar.gz"), temp.path());
        assert!(matches!(result, Err(ProvisionError::Io { .. })));
    }

    #[test]
    fn test_extract_corrupt_archive() {
        let temp = tempfile::tempdir().unwrap();
        let archive = temp.path().join("bad.tar.gz");
        std::fs::write(&archive, b"definitely not gzip").unwrap();

        let result = TarGzExtractor::new().extract(&archive, temp.path());
        assert!(matches!(result, Err(ProvisionError::Extract { .. })));
    }
}
