mod info;

use log::info;
use tokio::sync::RwLock;

use crate::chart::{self, ChartKind, ChartSpec};
use crate::clean::CleaningOp;
use crate::conf::Config;
use crate::core::SweeperError;
use crate::export::{self, Export, ExportFormat};
use crate::ingest::{ParseOptions, UploadedFile};
use crate::session::{IngestOutcome, Session};
use crate::summary::{self, Summary};

pub use info::FileInfo;

/// Hosts one [`Session`]. Each call takes the session lock once, so a
/// request either sees the state before another request's change or after
/// it, never half of it.
pub struct SweeperService {
    session: RwLock<Session>,
    config: Config,
}

impl SweeperService {
    pub fn new(config: Config) -> Self {
        let parse_options = ParseOptions {
            schema_inference_rows: config.session.schema_inference_rows,
        };
        Self {
            session: RwLock::new(Session::new(parse_options)),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Ingests `file` and describes the resulting entry under the same lock.
    pub async fn upload(
        &self,
        file: UploadedFile,
    ) -> Result<(IngestOutcome, FileInfo), SweeperError> {
        let mut session = self.session.write().await;
        let outcome = session.ingest(&file)?;
        let info = FileInfo::from(session.get(&file.name)?);
        Ok((outcome, info))
    }

    pub async fn list(&self) -> Vec<FileInfo> {
        let session = self.session.read().await;
        session.entries().map(FileInfo::from).collect()
    }

    pub async fn summary(&self, name: &str) -> Result<Summary, SweeperError> {
        let session = self.session.read().await;
        let entry = session.get(name)?;
        Ok(summary::summarize(entry, self.config.session.preview_rows))
    }

    pub async fn clean(&self, name: &str, ops: &[CleaningOp]) -> Result<FileInfo, SweeperError> {
        let mut session = self.session.write().await;
        let entry = session.apply_cleaning(name, ops)?;
        Ok(FileInfo::from(entry))
    }

    pub async fn chart(
        &self,
        name: &str,
        kind: ChartKind,
        x: &str,
        y: &str,
    ) -> Result<ChartSpec, SweeperError> {
        let session = self.session.read().await;
        chart::build(session.get(name)?.working(), kind, x, y)
    }

    /// Returns the download file name together with the encoded table.
    pub async fn export(
        &self,
        name: &str,
        format: ExportFormat,
    ) -> Result<(String, Export), SweeperError> {
        let session = self.session.read().await;
        let export = export::encode(session.get(name)?.working(), format)?;
        info!("exported {} as {:?}, {} bytes", name, format, export.bytes.len());
        Ok((export::download_name(name, format), export))
    }

    pub async fn export_all(&self) -> Result<Vec<u8>, SweeperError> {
        let session = self.session.read().await;
        export::encode_archive(&session)
    }

    pub async fn reset(&self) {
        let mut session = self.session.write().await;
        session.remove_all();
    }
}
