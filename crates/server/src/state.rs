//! Shared router state.

use std::sync::Arc;

use kudos_client::TestimonialsService;
use kudos_core::config::AppConfig;
use kudos_core::{Error, TestimonialCache};

/// Per-process state handed to every handler.
///
/// A missing table backend secret does not stop the server from booting;
/// it is reported on each request instead.
#[derive(Clone)]
pub struct AppState {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    Ready(Arc<TestimonialsService>),
    Unconfigured(Arc<str>),
}

impl AppState {
    pub fn new(service: TestimonialsService) -> Self {
        Self { backend: Backend::Ready(Arc::new(service)) }
    }

    /// Build the state once per process; `cache` is shared by every request.
    pub fn from_config(config: &AppConfig, cache: Arc<dyn TestimonialCache>) -> Self {
        match TestimonialsService::from_config(config, cache) {
            Ok(service) => Self::new(service),
            Err(e) => {
                tracing::warn!(error = %e, "testimonials backend not configured");
                let message = match e {
                    Error::Config(msg) => msg,
                    other => other.to_string(),
                };
                Self { backend: Backend::Unconfigured(message.into()) }
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self.backend, Backend::Ready(_))
    }

    pub fn testimonials(&self) -> Result<&TestimonialsService, Error> {
        match &self.backend {
            Backend::Ready(service) => Ok(service),
            Backend::Unconfigured(message) => Err(Error::Config(message.to_string())),
        }
    }
}
