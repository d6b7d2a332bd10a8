//! PDF export of the result document.
//!
//! The shipped exporter shells out to an HTML-to-PDF converter. When none is
//! installed the export is reported as unavailable and nothing else changes.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use tokio::process::Command;
use tracing::{debug, error, info, warn};

use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::profile::Objective;

use super::render::ResultDocument;

/// Alert shown when no PDF capability is present.
pub const EXPORT_UNAVAILABLE_MESSAGE: &str = "Erro ao carregar biblioteca de PDF. Tente novamente.";

const CONVERTER_TIMEOUT: Duration = Duration::from_secs(60);

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    A4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
}

/// Page and image settings for one export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub page_size: PageSize,
    pub orientation: Orientation,
    /// Top, right, bottom, left.
    pub margins_mm: [u32; 4],
    pub scale: u32,
    pub jpeg_quality: f32,
    pub filename: String,
}

impl ExportOptions {
    pub fn for_objective(objective: Objective) -> Self {
        Self {
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            margins_mm: [10; 4],
            scale: 2,
            jpeg_quality: 0.98,
            filename: export_filename(objective),
        }
    }
}

/// `plano-nutricional-<objective>.pdf`, objective lowercased with whitespace
/// runs collapsed to `-`.
pub fn export_filename(objective: Objective) -> String {
    let label = objective.label().to_lowercase();
    let slug = WHITESPACE_RUN.replace_all(&label, "-");
    format!("plano-nutricional-{slug}.pdf")
}

#[async_trait]
pub trait Exporter: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the PDF capability is present right now.
    async fn is_available(&self) -> bool;

    /// Write the document as a PDF and return its path.
    async fn export(
        &self,
        document: &ResultDocument,
        options: &ExportOptions,
    ) -> Result<PathBuf, ExportError>;
}

/// Export `document` with the options derived from its objective. A missing
/// or unavailable exporter fails with [`ExportError::Unavailable`] and has no
/// side effects.
pub async fn export_plan(
    exporter: Option<&dyn Exporter>,
    document: &ResultDocument,
) -> Result<PathBuf, ExportError> {
    let Some(exporter) = exporter else {
        warn!("No PDF exporter configured");
        return Err(ExportError::Unavailable);
    };
    if !exporter.is_available().await {
        warn!(exporter = exporter.name(), "PDF exporter not available");
        return Err(ExportError::Unavailable);
    }

    let options = ExportOptions::for_objective(document.profile.objective);
    let path = exporter.export(document, &options).await?;
    info!(exporter = exporter.name(), path = %path.display(), "Plan exported");
    Ok(path)
}

/// Exporter backed by an external converter such as `wkhtmltopdf`.
#[derive(Debug, Clone)]
pub struct CommandExporter {
    command: String,
    output_dir: PathBuf,
}

impl CommandExporter {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            command: config.command.clone(),
            output_dir: config.output_dir.clone(),
        }
    }

    /// Converter flags for `options`, without input and output paths.
    pub fn converter_args(options: &ExportOptions) -> Vec<String> {
        let page_size = match options.page_size {
            PageSize::A4 => "A4",
        };
        let orientation = match options.orientation {
            Orientation::Portrait => "Portrait",
        };
        let [top, right, bottom, left] = options.margins_mm;

        let mut args = vec![
            "--quiet".to_string(),
            "--encoding".to_string(),
            "utf-8".to_string(),
            "--page-size".to_string(),
            page_size.to_string(),
            "--orientation".to_string(),
            orientation.to_string(),
        ];
        for (flag, mm) in [
            ("--margin-top", top),
            ("--margin-right", right),
            ("--margin-bottom", bottom),
            ("--margin-left", left),
        ] {
            args.push(flag.to_string());
            args.push(format!("{mm}mm"));
        }
        args.push("--dpi".to_string());
        args.push((96 * options.scale).to_string());
        args.push("--image-quality".to_string());
        args.push(((options.jpeg_quality * 100.0).round() as u32).to_string());
        args
    }

    fn resolve_command(&self) -> Option<PathBuf> {
        let candidate = Path::new(&self.command);
        if candidate.components().count() > 1 {
            return candidate.is_file().then(|| candidate.to_path_buf());
        }
        let path = std::env::var_os("PATH")?;
        std::env::split_paths(&path)
            .map(|dir| dir.join(&self.command))
            .find(|p| p.is_file())
    }

    fn failed(&self, reason: impl Into<String>) -> ExportError {
        ExportError::Failed {
            exporter: self.command.clone(),
            reason: reason.into(),
        }
    }

    async fn convert(&self, program: &Path, args: &[String]) -> Result<(), ExportError> {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        // stderr is read while waiting so a chatty converter cannot block on
        // a full pipe. On timeout the dropped child is killed.
        let output = match tokio::time::timeout(CONVERTER_TIMEOUT, child.wait_with_output()).await
        {
            Ok(output) => output?,
            Err(_) => {
                return Err(self.failed(format!(
                    "timed out after {}s",
                    CONVERTER_TIMEOUT.as_secs()
                )));
            }
        };

        if output.status.success() {
            return Ok(());
        }

        let message = String::from_utf8_lossy(&output.stderr);
        let code = output
            .status
            .code()
            .map_or_else(|| "signal".to_string(), |c| c.to_string());
        Err(self.failed(format!("exit status {code}: {}", message.trim())))
    }
}

#[async_trait]
impl Exporter for CommandExporter {
    fn name(&self) -> &str {
        &self.command
    }

    async fn is_available(&self) -> bool {
        self.resolve_command().is_some()
    }

    async fn export(
        &self,
        document: &ResultDocument,
        options: &ExportOptions,
    ) -> Result<PathBuf, ExportError> {
        let program = self.resolve_command().ok_or(ExportError::Unavailable)?;

        tokio::fs::create_dir_all(&self.output_dir).await?;
        let output = self.output_dir.join(&options.filename);
        let html_path = output.with_extension("html");
        tokio::fs::write(&html_path, document.to_html()).await?;

        let mut args = Self::converter_args(options);
        args.push(html_path.to_string_lossy().into_owned());
        args.push(output.to_string_lossy().into_owned());
        debug!(program = %program.display(), ?args, "Running PDF converter");

        let result = self.convert(&program, &args).await;
        if let Err(e) = tokio::fs::remove_file(&html_path).await {
            warn!(path = %html_path.display(), error = %e, "Failed to remove temporary HTML");
        }

        match result {
            Ok(()) => Ok(output),
            Err(e) => {
                error!(error = %e, "PDF conversion failed");
                Err(e)
            }
        }
    }
}
