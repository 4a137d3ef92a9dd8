//! Conversation controller
//!
//! The controller owns one [`SessionState`] and a model provider. Front ends
//! turn user input into [`Action`]s and hand them to [`Controller::dispatch`],
//! which updates the session, calls the model when needed and returns a
//! [`RenderInstruction`] describing what to redraw.
//!
//! Nothing raised inside an action escapes it: decode problems and model
//! failures come back as notices, and a failed model call still records a
//! fallback assistant reply so every user message is answered.

use crate::bitmap::{decode_bitmap, Bitmap};
use crate::error::FridgechefError;
use crate::panel::Panel;
use crate::prompts::{build_prompt, PromptMode};
use crate::providers::Provider;
use crate::session::{CameraState, ChatMessage, SessionState};
use std::fmt;

/// Reply recorded when an extraction request fails
pub const EXTRACTION_FALLBACK: &str =
    "Sorry, I couldn't process the image. Please try again later.";

/// Reply recorded when a conversation request fails
pub const CONVERSATION_FALLBACK: &str =
    "Sorry, I couldn't process your request. Please try again later.";

/// Canned questions offered as one-tap shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    /// Dinner ideas
    RecipeIdeas,
    /// Healthy meal options
    HealthyOptions,
    /// Meals under 30 minutes
    QuickMeals,
}

impl QuickAction {
    /// All quick actions in display order
    pub const ALL: [QuickAction; 3] = [
        QuickAction::RecipeIdeas,
        QuickAction::HealthyOptions,
        QuickAction::QuickMeals,
    ];

    /// Parse a quick action from its short name
    ///
    /// # Examples
    ///
    /// ```
    /// use fridgechef::controller::QuickAction;
    ///
    /// assert_eq!(QuickAction::parse_str("meals").unwrap(), QuickAction::QuickMeals);
    /// assert!(QuickAction::parse_str("dessert").is_err());
    /// ```
    pub fn parse_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "ideas" | "recipe-ideas" | "recipes" => Ok(Self::RecipeIdeas),
            "healthy" | "healthy-options" => Ok(Self::HealthyOptions),
            "meals" | "quick-meals" | "quick" => Ok(Self::QuickMeals),
            other => Err(format!("Unknown quick action: {}", other)),
        }
    }

    /// Text sent as the user's message
    pub fn text(&self) -> &'static str {
        match self {
            Self::RecipeIdeas => "Give me some quick recipe ideas for dinner",
            Self::HealthyOptions => "What are some healthy meal options?",
            Self::QuickMeals => "What are some meals I can make in under 30 minutes?",
        }
    }

    /// Label shown while the model works
    pub fn progress_label(&self) -> &'static str {
        match self {
            Self::RecipeIdeas => "Generating recipe ideas...",
            Self::HealthyOptions => "Finding healthy options...",
            Self::QuickMeals => "Finding quick meals...",
        }
    }

    /// Short name accepted by [`QuickAction::parse_str`]
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::RecipeIdeas => "ideas",
            Self::HealthyOptions => "healthy",
            Self::QuickMeals => "meals",
        }
    }
}

impl fmt::Display for QuickAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RecipeIdeas => write!(f, "Recipe Ideas"),
            Self::HealthyOptions => write!(f, "Healthy Options"),
            Self::QuickMeals => write!(f, "Quick Meals"),
        }
    }
}

/// A user action on one of the panels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Switch a panel camera on or off
    ToggleCamera {
        /// Panel owning the camera
        panel: Panel,
    },
    /// Take a photo with a panel camera
    Capture {
        /// Panel owning the camera
        panel: Panel,
        /// Raw frame bytes
        bytes: Vec<u8>,
    },
    /// Upload a photo to be sent with the next request
    AttachImage {
        /// Panel the upload widget belongs to
        panel: Panel,
        /// Raw file bytes
        bytes: Vec<u8>,
    },
    /// Send the text box (and any photo) to the model
    Submit {
        /// Panel the text box belongs to
        panel: Panel,
        /// Typed text, possibly empty
        text: String,
        /// Photo supplied together with the text
        image: Option<Vec<u8>>,
    },
    /// Ask for ingredients and recipes from a photo
    GenerateRecipes {
        /// Panel the button belongs to
        panel: Panel,
        /// Photo supplied with the request
        image: Option<Vec<u8>>,
    },
    /// Send a canned question from the chat panel
    QuickAction(QuickAction),
    /// Empty the transcript and staged photo
    Clear,
}

impl Action {
    /// Label to show while this action waits on the model
    ///
    /// Returns `None` for actions that never call the model.
    pub fn progress_label(&self) -> Option<&'static str> {
        match self {
            Self::Submit { .. } => Some("Thinking..."),
            Self::GenerateRecipes { .. } => Some("Analyzing image and generating recipes..."),
            Self::QuickAction(kind) => Some(kind.progress_label()),
            Self::ToggleCamera { .. }
            | Self::Capture { .. }
            | Self::AttachImage { .. }
            | Self::Clear => None,
        }
    }

    fn panel(&self) -> Panel {
        match self {
            Self::ToggleCamera { panel }
            | Self::Capture { panel, .. }
            | Self::AttachImage { panel, .. }
            | Self::Submit { panel, .. }
            | Self::GenerateRecipes { panel, .. } => *panel,
            Self::QuickAction(_) | Self::Clear => Panel::Chat,
        }
    }
}

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Confirmation of a state change
    Info,
    /// The action was rejected and nothing changed
    Warning,
    /// Something failed
    Error,
}

/// Short message for the user, shown next to the transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Message text
    pub text: String,
}

impl Notice {
    fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// What the front end should do after an action
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderInstruction {
    /// Session state changed and the panel should be redrawn
    pub redraw: bool,
    /// Message to show the user
    pub notice: Option<Notice>,
}

impl RenderInstruction {
    fn redraw() -> Self {
        Self {
            redraw: true,
            notice: None,
        }
    }

    fn unchanged() -> Self {
        Self::default()
    }

    fn rejected(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            redraw: false,
            notice: Some(Notice::new(level, text)),
        }
    }

    fn with_notice(mut self, level: NoticeLevel, text: impl Into<String>) -> Self {
        self.notice = Some(Notice::new(level, text));
        self
    }
}

/// Drives one user session
pub struct Controller {
    session: SessionState,
    provider: Box<dyn Provider>,
    max_image_bytes: usize,
}

impl Controller {
    /// Creates a controller with a fresh session
    ///
    /// # Arguments
    ///
    /// * `provider` - Model client used for every request
    /// * `max_image_bytes` - Size cap for uploads and captures
    pub fn new(provider: Box<dyn Provider>, max_image_bytes: usize) -> Self {
        let session = SessionState::new();
        tracing::info!(session = %session.id(), "Started session");
        Self {
            session,
            provider,
            max_image_bytes,
        }
    }

    /// Current session state
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Model client backing this controller
    pub fn provider(&self) -> &dyn Provider {
        self.provider.as_ref()
    }

    /// Applies one action to the session
    ///
    /// Always returns; errors raised while handling the action are reported
    /// through the returned notice.
    #[tracing::instrument(skip_all, fields(session = %self.session.id()))]
    pub async fn dispatch(&mut self, action: Action) -> RenderInstruction {
        if !action.panel().is_interactive() {
            return RenderInstruction::rejected(
                NoticeLevel::Warning,
                format!("The {} panel does not accept input", action.panel()),
            );
        }

        match action {
            Action::ToggleCamera { panel } => self.toggle_camera(panel),
            Action::Capture { panel, bytes } => self.capture(panel, &bytes),
            Action::AttachImage { panel, bytes } => self.attach_image(panel, &bytes),
            Action::Submit { panel, text, image } => {
                self.submit(panel, &text, image.as_deref()).await
            }
            Action::GenerateRecipes { panel, image } => {
                self.generate_recipes(panel, image.as_deref()).await
            }
            Action::QuickAction(kind) => self.quick_action(kind).await,
            Action::Clear => self.clear(),
        }
    }

    fn toggle_camera(&mut self, panel: Panel) -> RenderInstruction {
        let state = self.session.toggle_camera(panel);
        tracing::debug!(%panel, camera = %state, "Toggled camera");
        RenderInstruction::redraw()
    }

    fn capture(&mut self, panel: Panel, bytes: &[u8]) -> RenderInstruction {
        if !self.session.camera(panel).is_on() {
            return RenderInstruction::rejected(
                NoticeLevel::Warning,
                FridgechefError::CameraOff(panel.to_string()).to_string(),
            );
        }

        let bitmap = match self.decode(bytes) {
            Ok(bitmap) => bitmap,
            Err(notice) => return notice,
        };

        self.session.record_capture(panel, bitmap.clone());
        self.session.stage_image(bitmap);
        tracing::debug!(%panel, "Captured photo");
        RenderInstruction::redraw().with_notice(NoticeLevel::Info, "Photo captured")
    }

    fn attach_image(&mut self, panel: Panel, bytes: &[u8]) -> RenderInstruction {
        let bitmap = match self.decode(bytes) {
            Ok(bitmap) => bitmap,
            Err(notice) => return notice,
        };

        tracing::debug!(
            %panel,
            kind = %bitmap.kind(),
            bytes = bitmap.byte_len(),
            "Attached image"
        );
        self.session.stage_image(bitmap);
        RenderInstruction::redraw().with_notice(NoticeLevel::Info, "Image attached")
    }

    async fn submit(&mut self, panel: Panel, text: &str, image: Option<&[u8]>) -> RenderInstruction {
        let fresh = match image.map(|bytes| self.decode(bytes)).transpose() {
            Ok(fresh) => fresh,
            Err(notice) => return notice,
        };

        let text = text.trim();
        let effective = fresh.or_else(|| self.session.pending_image().cloned());

        let mode = match (text.is_empty(), effective.is_some()) {
            (false, _) => PromptMode::Conversation,
            (true, true) => PromptMode::Extraction,
            (true, false) => return RenderInstruction::unchanged(),
        };

        self.session.take_pending_image();
        self.exchange(panel, mode, text, effective).await
    }

    async fn generate_recipes(&mut self, panel: Panel, image: Option<&[u8]>) -> RenderInstruction {
        let fresh = match image.map(|bytes| self.decode(bytes)).transpose() {
            Ok(fresh) => fresh,
            Err(notice) => return notice,
        };

        let Some(bitmap) = fresh.or_else(|| self.session.pending_image().cloned()) else {
            return RenderInstruction::rejected(
                NoticeLevel::Warning,
                FridgechefError::MissingImage("generate recipes".to_string()).to_string(),
            );
        };

        self.session.take_pending_image();
        self.exchange(panel, PromptMode::Extraction, "", Some(bitmap))
            .await
    }

    async fn quick_action(&mut self, kind: QuickAction) -> RenderInstruction {
        tracing::debug!(action = %kind, "Quick action");
        self.exchange(Panel::Chat, PromptMode::Conversation, kind.text(), None)
            .await
    }

    fn clear(&mut self) -> RenderInstruction {
        self.session.clear();
        tracing::info!("Cleared conversation");
        RenderInstruction::redraw()
    }

    /// Records the user message, calls the model and records the reply
    async fn exchange(
        &mut self,
        panel: Panel,
        mode: PromptMode,
        text: &str,
        bitmap: Option<Bitmap>,
    ) -> RenderInstruction {
        let request = match build_prompt(mode, text, bitmap) {
            Ok(request) => request,
            Err(e) => return RenderInstruction::rejected(NoticeLevel::Warning, e.to_string()),
        };

        self.session
            .push(ChatMessage::user(panel, text, request.bitmap.clone()));

        tracing::info!(%panel, %mode, has_image = request.has_image(), "Calling model");

        match self.provider.generate(&request).await {
            Ok(completion) => {
                if let Some(usage) = completion.usage {
                    tracing::debug!(
                        prompt_tokens = usage.prompt_tokens,
                        completion_tokens = usage.completion_tokens,
                        "Model replied"
                    );
                }
                self.session
                    .push(ChatMessage::assistant(panel, completion.text));
                RenderInstruction::redraw()
            }
            Err(e) => {
                tracing::error!(%panel, %mode, "Model call failed: {:#}", e);
                let fallback = match mode {
                    PromptMode::Extraction => EXTRACTION_FALLBACK,
                    PromptMode::Conversation => CONVERSATION_FALLBACK,
                };
                self.session.push(ChatMessage::assistant(panel, fallback));
                RenderInstruction::redraw().with_notice(NoticeLevel::Error, e.to_string())
            }
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<Bitmap, RenderInstruction> {
        decode_bitmap(bytes, self.max_image_bytes).map_err(|e| {
            tracing::warn!("Rejected image: {}", e);
            RenderInstruction::rejected(NoticeLevel::Error, format!("Could not use image: {}", e))
        })
    }

    /// Camera state of a panel
    pub fn camera(&self, panel: Panel) -> &CameraState {
        self.session.camera(panel)
    }
}
