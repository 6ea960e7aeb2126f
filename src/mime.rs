//! Leading-byte MIME sniffing.
//! Cheap heuristic only: a single byte picks the type, everything else is binary.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MimeType {
    Jpeg,
    Png,
    Gif,
    Tiff,
    Pdf,
    Vnd,
    PlainText,
    Binary,
}

impl MimeType {
    pub fn from_first_byte(byte: u8) -> Self {
        match byte {
            0xFF => MimeType::Jpeg,
            0x89 => MimeType::Png,
            0x47 => MimeType::Gif,
            0x49 | 0x4D => MimeType::Tiff,
            0x25 => MimeType::Pdf,
            0xD0 => MimeType::Vnd,
            0x46 => MimeType::PlainText,
            _ => MimeType::Binary,
        }
    }

    /// Sniff from the first byte of `bytes`; empty input is binary.
    pub fn sniff_bytes(bytes: &[u8]) -> Self {
        bytes.first().copied().map_or(MimeType::Binary, Self::from_first_byte)
    }

    /// Read one byte from `path` and sniff it.
    pub fn sniff_path(path: &Path) -> io::Result<Self> {
        let mut buf = [0u8; 1];
        let n = File::open(path)?.read(&mut buf)?;
        Ok(Self::sniff_bytes(&buf[..n]))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MimeType::Jpeg => "image/jpeg",
            MimeType::Png => "image/png",
            MimeType::Gif => "image/gif",
            MimeType::Tiff => "image/tiff",
            MimeType::Pdf => "application/pdf",
            MimeType::Vnd => "application/vnd",
            MimeType::PlainText => "text/plain",
            MimeType::Binary => "application/octet-stream",
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
