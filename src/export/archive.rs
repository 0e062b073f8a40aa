use std::io::{Cursor, Write};

use log::info;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::core::SweeperError;
use crate::session::Session;

use super::encode_csv;

pub const ARCHIVE_MEDIA_TYPE: &str = "application/zip";
pub const ARCHIVE_NAME: &str = "processed_files.zip";

pub fn archive_entry_name(name: &str) -> String {
    format!("processed_{name}")
}

impl From<zip::result::ZipError> for SweeperError {
    fn from(err: zip::result::ZipError) -> Self {
        SweeperError::EncodingError(err.to_string())
    }
}

/// Zips the working table of every entry as CSV. An empty session gives an
/// empty, valid archive.
pub fn encode_archive(session: &Session) -> Result<Vec<u8>, SweeperError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in session.entries() {
        let csv = encode_csv(entry.working())?;
        zip.start_file(archive_entry_name(&entry.name), options)?;
        zip.write_all(&csv)
            .map_err(|e| SweeperError::EncodingError(e.to_string()))?;
    }

    let bytes = zip.finish()?.into_inner();
    info!("archived {} files, {} bytes", session.len(), bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::UploadedFile;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn test_empty_session_gives_empty_archive() {
        let bytes = encode_archive(&Session::default()).unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 0);
    }

    #[test]
    fn test_one_csv_per_entry() {
        let mut session = Session::default();
        session
            .ingest(&UploadedFile::new("a.csv", "x\n1\n1\n"))
            .unwrap();
        session
            .ingest(&UploadedFile::new("b.csv", "y\n2\n"))
            .unwrap();
        session
            .apply_cleaning("a.csv", &[crate::clean::CleaningOp::RemoveDuplicates])
            .unwrap();

        let bytes = encode_archive(&session).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), session.len());

        let mut content = String::new();
        archive
            .by_name("processed_a.csv")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "x\n1\n");
        assert!(archive.by_name("processed_b.csv").is_ok());
    }
}
