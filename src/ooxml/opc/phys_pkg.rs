//! Physical (ZIP) layer of an OPC package.

use crate::ooxml::opc::error::Result;
use crate::ooxml::opc::packuri::PackURI;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Writes parts into an in-memory ZIP archive.
///
/// Every entry carries the same fixed timestamp so identical packages
/// serialize to identical bytes.
pub struct PhysPkgWriter {
    archive: ZipWriter<Cursor<Vec<u8>>>,
}

impl PhysPkgWriter {
    pub fn new() -> Self {
        Self {
            archive: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    fn options(method: CompressionMethod) -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(method)
            .last_modified_time(DateTime::default())
    }

    /// Write a part with Deflate compression.
    pub fn write(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        self.archive
            .start_file(pack_uri.membername(), Self::options(CompressionMethod::Deflated))?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Write a part without compression. Used for already-compressed media.
    pub fn write_stored(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        self.archive
            .start_file(pack_uri.membername(), Self::options(CompressionMethod::Stored))?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Finish writing and return the archive bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        Ok(self.archive.finish()?.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_produces_zip() {
        let mut writer = PhysPkgWriter::new();
        writer
            .write(&PackURI::new("/[Content_Types].xml").unwrap(), b"<Types/>")
            .unwrap();
        writer
            .write_stored(&PackURI::new("/ppt/media/image1.png").unwrap(), b"\x89PNG")
            .unwrap();
        let bytes = writer.finish().unwrap();
        // Local file header signature
        assert_eq!(&bytes[..4], b"PK\x03\x04");
    }

    #[test]
    fn test_output_is_deterministic() {
        let build = || {
            let mut writer = PhysPkgWriter::new();
            writer
                .write(&PackURI::new("/a.xml").unwrap(), b"<a/>")
                .unwrap();
            writer.finish().unwrap()
        };
        assert_eq!(build(), build());
    }
}
