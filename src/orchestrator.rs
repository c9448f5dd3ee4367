//! Turns a travel question into a model answer.
//!
//! [`Orchestrator::send_prompt`] resolves the location, renders the prompt,
//! calls the generative backend and publishes the outcome as a [`ResultState`]
//! on a `watch` channel. The chat front-end observes that channel.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::{watch, OnceCell};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::ai::image::ImageData;
use crate::ai::prompts::MessageIntent;
use crate::ai::remote_config::{ApiKeySource, StaticApiKey};
use crate::location::{LocationDescriptor, LocationProvider};
use crate::messages::{
    EMPTY_RESPONSE, LOCATION_NOT_FOUND, PICTURE_TAKING_ERROR, SENDING_PROMPT_ERROR,
    SERVER_PROBLEM,
};
use crate::text_utils::strip_bold_markup;

/// Generative model that answers a prompt, optionally looking at a picture.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// `Ok(None)` means the call succeeded but produced no usable text.
    async fn generate(&self, prompt: &str, image: Option<&ImageData>) -> Result<Option<String>>;
}

/// Outcome of the latest request, as seen by observers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultState {
    #[default]
    Idle,
    Pending,
    Succeeded(String),
    Failed(String),
}

impl ResultState {
    pub fn is_settled(&self) -> bool {
        matches!(self, ResultState::Succeeded(_) | ResultState::Failed(_))
    }
}

/// One user action: what to ask, with what, and where.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub intent: MessageIntent,
    pub prompt: Option<String>,
    pub image: Option<ImageData>,
    /// Place typed by the user; takes precedence over the device location.
    pub manual_location: Option<String>,
}

impl GenerationRequest {
    pub fn new(intent: MessageIntent) -> Self {
        Self {
            intent,
            ..Default::default()
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_image(mut self, image: ImageData) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_manual_location(mut self, place: Option<String>) -> Self {
        self.manual_location = place;
        self
    }
}

type Connect = dyn Fn(String) -> Arc<dyn GenerativeBackend> + Send + Sync;

/// Backend created on first use from an API key.
///
/// A failed initialization leaves the slot empty so the next request tries
/// to fetch the key again.
pub struct LazyBackend {
    backend: OnceCell<Arc<dyn GenerativeBackend>>,
    key_source: Arc<dyn ApiKeySource>,
    connect: Box<Connect>,
}

impl LazyBackend {
    pub fn new<F>(key_source: Arc<dyn ApiKeySource>, connect: F) -> Self
    where
        F: Fn(String) -> Arc<dyn GenerativeBackend> + Send + Sync + 'static,
    {
        Self {
            backend: OnceCell::new(),
            key_source,
            connect: Box::new(connect),
        }
    }

    /// A backend that is already initialized.
    pub fn ready(backend: Arc<dyn GenerativeBackend>) -> Self {
        let fallback = backend.clone();
        Self {
            backend: OnceCell::new_with(Some(backend)),
            key_source: Arc::new(StaticApiKey::new("")),
            connect: Box::new(move |_| fallback.clone()),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.backend.initialized()
    }

    pub async fn initialize(&self) -> Result<()> {
        self.get().await.map(|_| ())
    }

    pub async fn get(&self) -> Result<Arc<dyn GenerativeBackend>> {
        let backend = self
            .backend
            .get_or_try_init(|| async {
                let key = self.key_source.fetch_api_key().await?;
                Ok::<_, anyhow::Error>((self.connect)(key))
            })
            .await?;
        Ok(backend.clone())
    }
}

/// Runs requests for one user and publishes their outcome.
///
/// Each request gets a sequence number. A completion from a request older
/// than the latest started one is not published; its caller still gets it
/// through the returned `JoinHandle`.
#[derive(Clone)]
pub struct Orchestrator {
    inner: Arc<Inner>,
}

struct Inner {
    location: Arc<dyn LocationProvider>,
    backend: Arc<LazyBackend>,
    state: watch::Sender<ResultState>,
    latest: AtomicU64,
}

impl Orchestrator {
    pub fn new(location: Arc<dyn LocationProvider>, backend: Arc<LazyBackend>) -> Self {
        let (state, _) = watch::channel(ResultState::Idle);
        Self {
            inner: Arc::new(Inner {
                location,
                backend,
                state,
                latest: AtomicU64::new(0),
            }),
        }
    }

    /// Make sure the backend is usable, publishing a failure when it is not.
    ///
    /// The failure is only published while no request has started; a request
    /// owns the state until it settles.
    pub async fn initialize(&self) -> bool {
        match self.inner.backend.initialize().await {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "Generative backend initialization failed");
                self.inner.publish(0, ResultState::Failed(SERVER_PROBLEM.to_string()));
                false
            }
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ResultState> {
        self.inner.state.subscribe()
    }

    pub fn state(&self) -> ResultState {
        self.inner.state.borrow().clone()
    }

    /// Start a request. `Pending` is published before this returns; the rest
    /// runs on a spawned task. Must be called inside a Tokio runtime.
    pub fn send_prompt(&self, request: GenerationRequest) -> JoinHandle<ResultState> {
        let mut seq = 0;
        self.inner.state.send_modify(|state| {
            seq = self.inner.latest.fetch_add(1, Ordering::SeqCst) + 1;
            *state = ResultState::Pending;
        });
        debug!(seq, intent = %request.intent, "Request started");

        let inner = self.inner.clone();
        tokio::spawn(async move {
            let outcome = inner.run(request).await;
            inner.publish(seq, outcome.clone());
            outcome
        })
    }
}

impl Inner {
    async fn run(&self, request: GenerationRequest) -> ResultState {
        match self.execute(request).await {
            Ok(state) => state,
            Err(err) => {
                warn!(error = %err, "Request failed");
                ResultState::Failed(fault_message(&err))
            }
        }
    }

    #[instrument(level = "debug", skip(self, request), fields(intent = %request.intent))]
    async fn execute(&self, request: GenerationRequest) -> Result<ResultState> {
        let Some(location) = self.resolve_location(request.manual_location).await? else {
            info!("No location available");
            return Ok(ResultState::Failed(LOCATION_NOT_FOUND.to_string()));
        };

        if request.intent.requires_image() && request.image.is_none() {
            return Ok(ResultState::Failed(PICTURE_TAKING_ERROR.to_string()));
        }

        let prompt = request.intent.render(&location, request.prompt.as_deref());
        debug!(prompt_len = prompt.len(), "Rendered prompt");

        let backend = match self.backend.get().await {
            Ok(backend) => backend,
            Err(err) => {
                warn!(error = %err, "Generative backend unavailable");
                return Ok(ResultState::Failed(SERVER_PROBLEM.to_string()));
            }
        };

        let response = backend.generate(&prompt, request.image.as_ref()).await?;
        Ok(match response.filter(|text| !text.is_empty()) {
            Some(text) => ResultState::Succeeded(strip_bold_markup(&text)),
            None => ResultState::Failed(EMPTY_RESPONSE.to_string()),
        })
    }

    async fn resolve_location(&self, manual: Option<String>) -> Result<Option<LocationDescriptor>> {
        if let Some(place) = manual.filter(|p| !p.trim().is_empty()) {
            return Ok(Some(LocationDescriptor::Place(place)));
        }
        Ok(self
            .location
            .current_location()
            .await?
            .map(LocationDescriptor::Coordinates))
    }

    fn publish(&self, seq: u64, outcome: ResultState) {
        let published = self.state.send_if_modified(|state| {
            if self.latest.load(Ordering::SeqCst) != seq {
                return false;
            }
            *state = outcome;
            true
        });
        if !published {
            debug!(seq, "Discarding stale completion");
        }
    }
}

fn fault_message(err: &anyhow::Error) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        SENDING_PROMPT_ERROR.to_string()
    } else {
        message
    }
}
