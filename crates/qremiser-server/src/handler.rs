use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::response::{Html, Json};
use qremiser_digest::Algorithm;
use qremiser_record::{Record, RecordAssembler};
use serde::Serialize;
use serde_json::json;
use tempfile::TempDir;
use tokio::io::AsyncWriteExt;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};

/// Shared state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub assembler: Arc<RecordAssembler>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let assembler = RecordAssembler::new().with_pipeline(config.pipeline());
        Self {
            assembler: Arc::new(assembler),
            config: Arc::new(config),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

const UPLOAD_FORM: &str = r#"<html>
    <body>
        <h1>Create a qremis metadata record for a file.</h1>
        <form action="" enctype="multipart/form-data" method="post">
            <p>Please specify a file:<br>
            <input type="file" name="file" size="40"></p>
            <p>originalName:<br>
            <input type="text" name="originalName" size="30"></p>
            <p>File md5 (optional):<br>
            <input type="text" name="md5" size="30"></p>
            <div><input type="submit" value="Submit"></div>
        </form>
    </body>
</html>
"#;

/// Upload form handler.
pub async fn form_handler() -> Html<&'static str> {
    Html(UPLOAD_FORM)
}

/// An upload staged on disk. The directory is removed when this is dropped.
struct StagedUpload {
    _dir: TempDir,
    path: PathBuf,
}

impl StagedUpload {
    fn create(config: &ServerConfig) -> ServerResult<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("qremiser-");
        let dir = match &config.temp_dir {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        let path = dir.path().join("upload");
        Ok(Self { _dir: dir, path })
    }
}

/// Characterize an uploaded file.
///
/// Form fields: `file` (required), `originalName`, `md5`. The md5 value is
/// accepted but not compared against the computed digest.
pub async fn describe_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ServerResult<Json<Record>> {
    tracing::info!("upload received");
    let mut staged: Option<StagedUpload> = None;
    let mut original_name: Option<String> = None;

    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let upload = StagedUpload::create(&state.config)?;
                let mut out = tokio::fs::File::create(&upload.path).await?;
                let mut written = 0u64;
                while let Some(chunk) = field.chunk().await? {
                    out.write_all(&chunk).await?;
                    written += chunk.len() as u64;
                }
                out.flush().await?;
                tracing::debug!(path = %upload.path.display(), bytes = written, "upload staged");
                staged = Some(upload);
            }
            Some("originalName") => {
                let text = field.text().await?;
                original_name = (!text.is_empty()).then_some(text);
            }
            Some("md5") => {
                let text = field.text().await?;
                if !text.is_empty() {
                    tracing::debug!(md5 = %text, "supplied checksum accepted, not verified");
                }
            }
            other => {
                tracing::debug!(field = ?other, "ignoring unexpected form field");
            }
        }
    }

    let upload = staged.ok_or(ServerError::MissingField("file"))?;
    let assembler = Arc::clone(&state.assembler);
    let path = upload.path.clone();
    let record = tokio::task::spawn_blocking(move || {
        assembler.assemble(&path, original_name.as_deref(), None)
    })
    .await
    .map_err(|e| ServerError::Internal(e.to_string()))??;
    drop(upload);

    tracing::debug!(object = %record.object().identifier, "record created");
    Ok(Json(record))
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler.
pub async fn info_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let algorithms: Vec<&str> = state
        .assembler
        .pipeline()
        .algorithms()
        .iter()
        .filter(|a| a.is_available())
        .map(|a| a.name())
        .collect();
    let available: Vec<&str> = Algorithm::available().map(Algorithm::name).collect();
    Json(json!({
        "name": "qremiser",
        "version": env!("CARGO_PKG_VERSION"),
        "algorithms": algorithms,
        "available_algorithms": available,
    }))
}
