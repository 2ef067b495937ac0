use async_trait::async_trait;
use common::err_context::ErrorContextExt;
use common::settings::OcrSettings;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::domain::ports::secondary::{ExtractionError as Error, TextExtractor};
use crate::domain::{ImageDataUrl, OcrCapability};

/// Checks whether the OCR command can be run, by asking for its version.
///
/// This never fails: whatever goes wrong ends up as the reason of an
/// `OcrCapability::Unavailable`.
#[tracing::instrument(name = "Checking OCR capability", skip(settings), fields(command = %settings.command))]
pub async fn detect_capability(settings: &OcrSettings) -> OcrCapability {
    let command = &settings.command;
    let run = Command::new(command)
        .arg("--version")
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output();

    let capability = match tokio::time::timeout(Duration::from_secs(settings.timeout), run).await
    {
        Err(_) => OcrCapability::Unavailable {
            reason: format!(
                "'{command} --version' did not complete within {}s",
                settings.timeout
            ),
        },
        Ok(Err(err)) => OcrCapability::Unavailable {
            reason: format!("could not run '{command}': {err}"),
        },
        Ok(Ok(output)) if !output.status.success() => OcrCapability::Unavailable {
            reason: format!("'{command} --version' exited with {}", output.status),
        },
        Ok(Ok(output)) => {
            // Older tesseract releases print their version on stderr.
            let version = first_line(&output.stdout)
                .or_else(|| first_line(&output.stderr))
                .unwrap_or_else(|| "unknown".to_string());
            OcrCapability::Available {
                engine: command.clone(),
                version,
            }
        }
    };

    match &capability {
        OcrCapability::Available { version, .. } => {
            tracing::info!(%version, "OCR engine is available")
        }
        OcrCapability::Unavailable { reason } => {
            tracing::warn!(%reason, "OCR engine is NOT available")
        }
    }

    capability
}

fn first_line(bytes: &[u8]) -> Option<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(String::from)
}

/// Extracts text by running tesseract on the image: the image is written on the
/// process' stdin, and the text read from its stdout.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    command: String,
    languages: String,
    timeout: Duration,
}

impl TesseractEngine {
    pub fn new(settings: OcrSettings) -> Self {
        let OcrSettings {
            command,
            languages,
            timeout,
        } = settings;
        TesseractEngine {
            command,
            languages,
            timeout: Duration::from_secs(timeout),
        }
    }
}

#[async_trait]
impl TextExtractor for TesseractEngine {
    async fn extract_text(&self, image: &ImageDataUrl) -> Result<String, Error> {
        let mut child = Command::new(&self.command)
            .args(["stdin", "stdout", "-l", self.languages.as_str()])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .context(format!("Could not run '{}'", self.command))?;

        let mut stdin = child.stdin.take().ok_or_else(|| Error::Engine {
            context: "OCR process has no stdin".to_string(),
        })?;

        // Feed stdin concurrently, so a large image cannot deadlock against a full stdout pipe.
        let bytes = image.bytes().to_vec();
        let feeder = tokio::spawn(async move {
            stdin.write_all(&bytes).await?;
            stdin.shutdown().await
        });

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| Error::Timeout {
                context: format!(
                    "OCR process did not complete within {}s",
                    self.timeout.as_secs()
                ),
            })?
            .context("Could not collect OCR process output")?;

        if let Ok(Err(err)) = feeder.await {
            // Expected when the engine rejects the image before reading all of it.
            tracing::debug!(%err, "Could not write the whole image to the OCR process");
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Engine {
                context: format!("'{}' exited with {}: {}", self.command, output.status, stderr.trim()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
