mod error;
mod listener;
pub mod opts;
pub mod server;

pub use self::error::Error;

use axum::{routing::Router, Server};
use common::err_context::ErrorContextExt;
use common::settings::{ApplicationSettings, OcrSettings, Settings, VisionSettings};
use std::net::TcpListener;
use std::sync::Arc;

use self::listener::listen_with_host_port;
use self::server::{AppState, DynAssistant, DynExtractor};
use crate::domain::{ExtractionEngine, OcrCapability};
use crate::services::sample::SampleService;
use crate::services::tesseract::{self, TesseractEngine};
use crate::services::vision::VisionClient;

pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::default()
    }
}

#[derive(Default)]
pub struct ApplicationBuilder {
    pub extractor: Option<DynExtractor>,
    pub assistant: Option<DynAssistant>,
    pub capability: Option<OcrCapability>,
    pub engine: Option<ExtractionEngine>,
    pub listener: Option<TcpListener>,
    pub debug: bool,
    pub body_limit: Option<usize>,
}

impl ApplicationBuilder {
    pub async fn new(settings: Settings) -> Result<Self, Error> {
        let Settings {
            application,
            vision,
            ocr,
            mode,
        } = settings;
        tracing::info!(%mode, "Building application");
        let builder = Self::default()
            .engines(vision, ocr)
            .await?
            .listener(&application)?
            .debug(application.debug)
            .body_limit(application.body_limit);

        Ok(builder)
    }

    /// Checks the local OCR engine, and picks the extractor and assistant
    /// serving the requests.
    pub async fn engines(mut self, vision: VisionSettings, ocr: OcrSettings) -> Result<Self, Error> {
        let capability = tesseract::detect_capability(&ocr).await;
        let has_vision_credentials = vision
            .api_key
            .as_ref()
            .map_or(false, |key| !key.trim().is_empty());
        let engine = ExtractionEngine::select(has_vision_credentials, &capability);

        let (extractor, assistant) = match engine {
            ExtractionEngine::Vision => {
                let client = Arc::new(
                    VisionClient::new(vision).context("Establishing a vision service client")?,
                );
                let extractor: DynExtractor = client.clone();
                let assistant: DynAssistant = client;
                (extractor, assistant)
            }
            ExtractionEngine::Tesseract => {
                let extractor: DynExtractor = Arc::new(TesseractEngine::new(ocr));
                let assistant: DynAssistant = Arc::new(SampleService);
                (extractor, assistant)
            }
            ExtractionEngine::Sample => {
                tracing::warn!("No extraction engine available, serving sample data");
                let extractor: DynExtractor = Arc::new(SampleService);
                let assistant: DynAssistant = Arc::new(SampleService);
                (extractor, assistant)
            }
        };
        tracing::info!(?engine, "Extraction engine selected");

        self.extractor = Some(extractor);
        self.assistant = Some(assistant);
        self.capability = Some(capability);
        self.engine = Some(engine);
        Ok(self)
    }

    pub fn listener(mut self, settings: &ApplicationSettings) -> Result<Self, Error> {
        let listener = listen_with_host_port(settings.host.as_str(), settings.port).context(
            format!("Could not create listener for {}:{}", settings.host, settings.port),
        )?;
        self.listener = Some(listener);
        Ok(self)
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = Some(body_limit);
        self
    }

    pub fn build(self) -> Result<Application, Error> {
        let ApplicationBuilder {
            extractor,
            assistant,
            capability,
            engine,
            listener,
            debug,
            body_limit,
        } = self;

        let incomplete = |component: &str| Error::Incomplete {
            context: format!("missing {component}"),
        };

        let listener = listener.ok_or_else(|| incomplete("listener"))?;
        let port = listener
            .local_addr()
            .map_err(|err| Error::Incomplete {
                context: format!("listener has no local address: {err}"),
            })?
            .port();

        let state = AppState {
            extractor: extractor.ok_or_else(|| incomplete("text extractor"))?,
            assistant: assistant.ok_or_else(|| incomplete("chat assistant"))?,
            capability: capability.ok_or_else(|| incomplete("OCR capability"))?,
            engine: engine.ok_or_else(|| incomplete("extraction engine"))?,
            debug,
        };
        let router = server::new(state, body_limit.ok_or_else(|| incomplete("body limit"))?);

        Ok(Application {
            port,
            listener,
            router,
        })
    }
}

impl Application {
    /// The port actually bound, which differs from the configured one when that was 0.
    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), Error> {
        let Application {
            port,
            listener,
            router,
        } = self;
        tracing::info!(port, "Serving screenshot analyzer");
        Server::from_tcp(listener)
            .context("Could not serve from TCP listener")?
            .serve(router.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server execution error")?;
        tracing::info!("Server stopped");
        Ok(())
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "Could not listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "Could not listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
