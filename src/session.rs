//! Per-session conversation state
//!
//! A [`SessionState`] holds the transcript, the image staged for the next
//! request, and the camera of each interactive panel. It is owned by a single
//! controller and only ever mutated through `&mut self`.

use crate::bitmap::Bitmap;
use crate::panel::Panel;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Typed or synthesized by the user
    User,
    /// Returned by the model (or a fallback standing in for it)
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// One entry of the transcript
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    /// Sender
    pub role: Role,
    /// Message text; empty for a photo sent without a question
    pub content: String,
    /// Photo sent with a user message
    pub attached_image: Option<Bitmap>,
    /// Panel the message was produced on
    pub panel: Panel,
    /// Time the message was recorded
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Creates a user message
    pub fn user(panel: Panel, content: impl Into<String>, attached_image: Option<Bitmap>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            attached_image,
            panel,
            created_at: Utc::now(),
        }
    }

    /// Creates an assistant message
    pub fn assistant(panel: Panel, content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            attached_image: None,
            panel,
            created_at: Utc::now(),
        }
    }
}

/// Camera state of one panel
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CameraState {
    /// Camera switched off; captures are rejected
    #[default]
    Off,
    /// Camera on, no frame taken yet
    AwaitingCapture,
    /// Camera on with a captured frame
    Captured(Bitmap),
}

impl CameraState {
    /// Whether the camera is switched on
    pub fn is_on(&self) -> bool {
        !matches!(self, Self::Off)
    }

    /// The captured frame, if any
    pub fn captured(&self) -> Option<&Bitmap> {
        match self {
            Self::Captured(bitmap) => Some(bitmap),
            _ => None,
        }
    }
}

impl fmt::Display for CameraState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::AwaitingCapture => write!(f, "on"),
            Self::Captured(_) => write!(f, "on (photo captured)"),
        }
    }
}

/// State of one user session
#[derive(Debug)]
pub struct SessionState {
    id: Uuid,
    messages: Vec<ChatMessage>,
    pending_image: Option<Bitmap>,
    cameras: HashMap<Panel, CameraState>,
}

impl SessionState {
    /// Creates an empty session with every camera off
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            messages: Vec::new(),
            pending_image: None,
            cameras: HashMap::new(),
        }
    }

    /// Random identifier used in log output
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Transcript in chronological order
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Image staged for the next request
    pub fn pending_image(&self) -> Option<&Bitmap> {
        self.pending_image.as_ref()
    }

    /// Camera state of a panel
    pub fn camera(&self, panel: Panel) -> &CameraState {
        static OFF: CameraState = CameraState::Off;
        self.cameras.get(&panel).unwrap_or(&OFF)
    }

    pub(crate) fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Stages an image for the next request, replacing any previous one
    pub(crate) fn stage_image(&mut self, bitmap: Bitmap) {
        self.pending_image = Some(bitmap);
    }

    /// Removes and returns the staged image
    ///
    /// A camera whose captured frame is the staged image goes back to
    /// awaiting a new capture.
    pub(crate) fn take_pending_image(&mut self) -> Option<Bitmap> {
        let taken = self.pending_image.take()?;
        for camera in self.cameras.values_mut() {
            if camera.captured() == Some(&taken) {
                *camera = CameraState::AwaitingCapture;
            }
        }
        Some(taken)
    }

    /// Flips a panel camera on or off and returns the new state
    ///
    /// Switching off drops an unsent capture; if that capture is also the
    /// staged image, the staged image goes with it.
    pub(crate) fn toggle_camera(&mut self, panel: Panel) -> &CameraState {
        let camera = self.cameras.entry(panel).or_default();
        let previous = std::mem::take(camera);

        match previous {
            CameraState::Off => *camera = CameraState::AwaitingCapture,
            CameraState::AwaitingCapture => {}
            CameraState::Captured(bitmap) => {
                if self.pending_image.as_ref() == Some(&bitmap) {
                    self.pending_image = None;
                }
            }
        }

        self.camera(panel)
    }

    /// Records a captured frame on a panel whose camera is on
    ///
    /// Returns `false` and changes nothing if the camera is off.
    pub(crate) fn record_capture(&mut self, panel: Panel, bitmap: Bitmap) -> bool {
        match self.cameras.get_mut(&panel) {
            Some(camera) if camera.is_on() => {
                *camera = CameraState::Captured(bitmap);
                true
            }
            _ => false,
        }
    }

    /// Empties the transcript and staged image
    ///
    /// Cameras keep their on/off state; a captured frame is discarded.
    pub(crate) fn clear(&mut self) {
        self.messages.clear();
        self.pending_image = None;
        for camera in self.cameras.values_mut() {
            if let CameraState::Captured(_) = camera {
                *camera = CameraState::AwaitingCapture;
            }
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
