//! Session controller
//!
//! Drives the redesign workflow through its states: idle until an image
//! is accepted, editing while the user shapes a request, generating
//! while the backend works, and review once a result arrives. Shared
//! inputs (prompt, style, reference and object images) live on the
//! session itself and survive state changes; the editing surface and
//! comparison slider live inside the state they belong to.

use std::time::{SystemTime, UNIX_EPOCH};

use editor::{ComparisonSlider, EditingSurface, Selection};
use lumina_genai::{DesignBackend, GenAiError};
use lumina_ipc::{DataUri, DesignHistoryItem, DesignStyle, GenerationRequest, IpcError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Most recent generations kept per session
pub const HISTORY_CAP: usize = 5;

/// Region description sent when a box selection is active
const REGION_HINT: &str = "Apply changes primarily to the highlighted region of interest.";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("not editing an image")]
    NotEditing,

    #[error("no generated result to review")]
    NotReviewing,

    #[error("no history entry at index {0}")]
    HistoryIndex(usize),

    #[error(transparent)]
    Backend(#[from] GenAiError),

    #[error(transparent)]
    Ipc(#[from] IpcError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Editing state: the loaded photo and its interactive surface
pub struct EditSession {
    pub base_image: DataUri,
    pub surface: EditingSurface,
}

impl EditSession {
    /// Create a fresh editing session for an image, sizing the mask
    /// canvas to the image's pixel dimensions
    fn new(base_image: DataUri) -> Result<Self, SessionError> {
        let raster = base_image.to_rgba()?;
        let surface = EditingSurface::new(raster.width(), raster.height());
        Ok(Self {
            base_image,
            surface,
        })
    }
}

/// Review state: original and generated images under the slider
pub struct ReviewSession {
    pub base_image: DataUri,
    pub generated_image: DataUri,
    pub slider: ComparisonSlider,
}

/// Workflow state, carrying the data that only exists in that state
pub enum SessionState {
    Idle,
    Editing(EditSession),
    Generating(EditSession),
    Review(ReviewSession),
}

/// One user's redesign workflow against a generation backend
pub struct Session<B: DesignBackend> {
    backend: B,
    state: SessionState,
    reference_image: Option<DataUri>,
    object_image: Option<DataUri>,
    prompt: String,
    style: DesignStyle,
    suggestions: Vec<String>,
    is_suggesting: bool,
    history: Vec<DesignHistoryItem>,
    last_error: Option<String>,
}

impl<B: DesignBackend> Session<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: SessionState::Idle,
            reference_image: None,
            object_image: None,
            prompt: String::new(),
            style: DesignStyle::Modern,
            suggestions: Vec::new(),
            is_suggesting: false,
            history: Vec::new(),
            last_error: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn style(&self) -> DesignStyle {
        self.style
    }

    pub fn set_style(&mut self, style: DesignStyle) {
        self.style = style;
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn is_suggesting(&self) -> bool {
        self.is_suggesting
    }

    /// Copy a fetched suggestion into the prompt
    pub fn apply_suggestion(&mut self, index: usize) {
        if let Some(suggestion) = self.suggestions.get(index) {
            self.prompt = suggestion.clone();
        }
    }

    pub fn history(&self) -> &[DesignHistoryItem] {
        &self.history
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The editing surface, when the session is editing
    pub fn surface_mut(&mut self) -> Option<&mut EditingSurface> {
        match &mut self.state {
            SessionState::Editing(edit) => Some(&mut edit.surface),
            _ => None,
        }
    }

    /// The comparison slider, when the session is reviewing
    pub fn slider_mut(&mut self) -> Option<&mut ComparisonSlider> {
        match &mut self.state {
            SessionState::Review(review) => Some(&mut review.slider),
            _ => None,
        }
    }

    pub fn set_reference_image(&mut self, image: Option<DataUri>) {
        self.reference_image = image;
    }

    pub fn set_object_image(&mut self, image: Option<DataUri>) {
        self.object_image = image;
    }

    /// Accept an uploaded photo and enter the editing state.
    ///
    /// Resets the prompt, suggestions and any previous error; history is
    /// kept across images. Suggestion fetching is a separate async step:
    /// callers follow up with [`Session::refresh_suggestions`] once the
    /// image is accepted, so accepting stays synchronous.
    pub fn accept_image(&mut self, image: DataUri) -> Result<(), SessionError> {
        info!("Accepting new base image ({})", image.mime_type);
        self.state = SessionState::Editing(EditSession::new(image)?);
        self.prompt.clear();
        self.suggestions.clear();
        self.last_error = None;
        Ok(())
    }

    /// Fetch design suggestions for the loaded image.
    ///
    /// Backend failures degrade to an empty suggestion list; they never
    /// disturb the workflow state.
    pub async fn refresh_suggestions(&mut self) {
        let base = match &self.state {
            SessionState::Editing(edit) | SessionState::Generating(edit) => {
                edit.base_image.clone()
            }
            _ => {
                debug!("No base image; skipping suggestions");
                return;
            }
        };

        self.suggestions.clear();
        self.is_suggesting = true;
        match self.backend.suggest(&base).await {
            Ok(suggestions) => {
                debug!("Received {} suggestions", suggestions.len());
                self.suggestions = suggestions;
            }
            Err(err) => warn!("Suggestion fetch failed: {}", err),
        }
        self.is_suggesting = false;
    }

    /// Run a generation for the current editing state.
    ///
    /// On success the session enters review and the result is prepended
    /// to history, evicting the oldest entry past the cap. On failure
    /// the session returns to editing with its surface intact and the
    /// error recorded.
    pub async fn generate(&mut self) -> Result<(), SessionError> {
        let edit = match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Editing(edit) => edit,
            other => {
                self.state = other;
                return Err(SessionError::NotEditing);
            }
        };

        let request = self.build_request(&edit);
        info!(
            "Generating: style={}, mask={}, region_hint={}",
            request.style,
            request.mask_image.is_some(),
            request.region_hint.is_some()
        );

        self.last_error = None;
        self.state = SessionState::Generating(edit);

        let result = self.backend.generate(&request).await;

        let SessionState::Generating(edit) =
            std::mem::replace(&mut self.state, SessionState::Idle)
        else {
            // State is private and nothing else mutates it mid-await
            return Err(SessionError::NotEditing);
        };

        match result {
            Ok(generated) => {
                self.push_history(&edit.base_image, &generated);
                self.state = SessionState::Review(ReviewSession {
                    base_image: edit.base_image,
                    generated_image: generated,
                    slider: ComparisonSlider::new(),
                });
                Ok(())
            }
            Err(err) => {
                warn!("Generation failed: {}", err);
                self.last_error = Some(err.to_string());
                self.state = SessionState::Editing(edit);
                Err(err.into())
            }
        }
    }

    /// Leave review and start editing the same photo again, with a
    /// fresh surface and selection
    pub fn back_to_editing(&mut self) -> Result<(), SessionError> {
        let review = match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Review(review) => review,
            other => {
                self.state = other;
                return Err(SessionError::NotReviewing);
            }
        };
        self.state = SessionState::Editing(EditSession::new(review.base_image)?);
        Ok(())
    }

    /// Drop the current image and return to idle. History survives.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.prompt.clear();
        self.suggestions.clear();
        self.reference_image = None;
        self.object_image = None;
        self.last_error = None;
    }

    /// Reopen a past generation in the review state
    pub fn load_history(&mut self, index: usize) -> Result<(), SessionError> {
        let item = self
            .history
            .get(index)
            .ok_or(SessionError::HistoryIndex(index))?;
        self.prompt = item.prompt.clone();
        self.style = item.style;
        self.state = SessionState::Review(ReviewSession {
            base_image: item.original_image.clone(),
            generated_image: item.generated_image.clone(),
            slider: ComparisonSlider::new(),
        });
        Ok(())
    }

    /// The generated image currently under review
    pub fn reviewed_image(&self) -> Result<&DataUri, SessionError> {
        match &self.state {
            SessionState::Review(review) => Ok(&review.generated_image),
            _ => Err(SessionError::NotReviewing),
        }
    }

    fn build_request(&self, edit: &EditSession) -> GenerationRequest {
        let mut request = GenerationRequest::new(
            edit.base_image.clone(),
            self.prompt.clone(),
            self.style,
        );
        request.reference_image = self.reference_image.clone();
        request.object_image = self.object_image.clone();

        match edit.surface.selection() {
            Selection::Mask(mask) => request.mask_image = Some(mask),
            Selection::Box(_) => request.region_hint = Some(REGION_HINT.to_string()),
            Selection::None => {}
        }
        request
    }

    fn push_history(&mut self, original: &DataUri, generated: &DataUri) {
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        self.history.insert(
            0,
            DesignHistoryItem {
                id: timestamp_ms.to_string(),
                original_image: original.clone(),
                generated_image: generated.clone(),
                prompt: self.prompt.clone(),
                style: self.style,
                timestamp_ms,
            },
        );
        self.history.truncate(HISTORY_CAP);
    }
}

/// File name for an exported result
pub fn export_file_name(timestamp_ms: u64) -> String {
    format!("lumina-design-{timestamp_ms}.png")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumina_ipc::SelectionMode;
    use std::sync::Mutex;

    /// Scripted backend capturing requests and replaying canned results
    struct MockBackend {
        generate_results: Mutex<Vec<Result<DataUri, GenAiError>>>,
        suggest_result: Result<Vec<String>, GenAiError>,
        seen_requests: Mutex<Vec<GenerationRequest>>,
    }

    impl MockBackend {
        fn returning(results: Vec<Result<DataUri, GenAiError>>) -> Self {
            Self {
                generate_results: Mutex::new(results),
                suggest_result: Ok(Vec::new()),
                seen_requests: Mutex::new(Vec::new()),
            }
        }

        fn generated() -> DataUri {
            DataUri::from_parts("image/png", "Z2VuZXJhdGVk")
        }
    }

    impl DesignBackend for MockBackend {
        async fn generate(&self, request: &GenerationRequest) -> Result<DataUri, GenAiError> {
            self.seen_requests.lock().unwrap().push(request.clone());
            self.generate_results.lock().unwrap().remove(0)
        }

        async fn suggest(&self, _base: &DataUri) -> Result<Vec<String>, GenAiError> {
            match &self.suggest_result {
                Ok(items) => Ok(items.clone()),
                Err(_) => Err(GenAiError::NoCandidate),
            }
        }
    }

    fn room_photo() -> DataUri {
        let img = image::RgbaImage::from_pixel(8, 8, image::Rgba([200, 180, 160, 255]));
        DataUri::from_rgba(&img).unwrap()
    }

    fn editing_session(results: Vec<Result<DataUri, GenAiError>>) -> Session<MockBackend> {
        let mut session = Session::new(MockBackend::returning(results));
        session.accept_image(room_photo()).unwrap();
        session
    }

    #[test]
    fn test_accept_image_enters_editing_and_clears_prompt() {
        let mut session = Session::new(MockBackend::returning(vec![]));
        session.set_prompt("stale");
        session.accept_image(room_photo()).unwrap();

        assert!(matches!(session.state(), SessionState::Editing(_)));
        assert_eq!(session.prompt(), "");
    }

    #[tokio::test]
    async fn test_generate_happy_path_enters_review_and_records_history() {
        let mut session = editing_session(vec![Ok(MockBackend::generated())]);
        session.set_prompt("add plants");
        session.set_style(DesignStyle::Japandi);

        session.generate().await.unwrap();

        assert!(matches!(session.state(), SessionState::Review(_)));
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].prompt, "add plants");
        assert_eq!(session.history()[0].style, DesignStyle::Japandi);
        assert_eq!(
            session.reviewed_image().unwrap(),
            &MockBackend::generated()
        );
    }

    #[tokio::test]
    async fn test_generate_failure_returns_to_editing_with_error() {
        let mut session = editing_session(vec![Err(GenAiError::SafetyBlocked)]);

        let err = session.generate().await.unwrap_err();
        assert!(matches!(err, SessionError::Backend(GenAiError::SafetyBlocked)));
        assert!(matches!(session.state(), SessionState::Editing(_)));
        assert!(session.last_error().unwrap().contains("safety"));
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_generate_requires_editing_state() {
        let mut session = Session::new(MockBackend::returning(vec![]));
        let err = session.generate().await.unwrap_err();
        assert!(matches!(err, SessionError::NotEditing));
        assert!(matches!(session.state(), SessionState::Idle));
    }

    #[tokio::test]
    async fn test_history_capped_at_five_newest_first() {
        let results = (0..7).map(|_| Ok(MockBackend::generated())).collect();
        let mut session = editing_session(results);

        for i in 0..7 {
            session.set_prompt(format!("round {i}"));
            session.generate().await.unwrap();
            session.back_to_editing().unwrap();
        }

        assert_eq!(session.history().len(), HISTORY_CAP);
        assert_eq!(session.history()[0].prompt, "round 6");
        assert_eq!(session.history()[4].prompt, "round 2");
    }

    #[tokio::test]
    async fn test_mask_selection_sent_without_region_hint() {
        let mut session = editing_session(vec![Ok(MockBackend::generated())]);
        {
            let surface = session.surface_mut().unwrap();
            surface.set_select_enabled(true);
            surface.set_mode(SelectionMode::Brush);
            surface.pointer_down(0.5, 0.5);
            surface.pointer_up().unwrap();
        }

        session.generate().await.unwrap();

        let requests = session.backend.seen_requests.lock().unwrap();
        assert!(requests[0].mask_image.is_some());
        assert!(requests[0].region_hint.is_none());
    }

    #[tokio::test]
    async fn test_box_selection_sent_as_region_hint() {
        let mut session = editing_session(vec![Ok(MockBackend::generated())]);
        {
            let surface = session.surface_mut().unwrap();
            surface.set_select_enabled(true);
            surface.pointer_down(0.2, 0.2);
            surface.pointer_move(0.6, 0.6);
            surface.pointer_up().unwrap();
        }

        session.generate().await.unwrap();

        let requests = session.backend.seen_requests.lock().unwrap();
        assert!(requests[0].mask_image.is_none());
        assert_eq!(requests[0].region_hint.as_deref(), Some(REGION_HINT));
    }

    #[tokio::test]
    async fn test_back_to_editing_gets_fresh_surface() {
        let mut session = editing_session(vec![Ok(MockBackend::generated())]);
        {
            let surface = session.surface_mut().unwrap();
            surface.set_select_enabled(true);
            surface.set_mode(SelectionMode::Brush);
            surface.pointer_down(0.5, 0.5);
            surface.pointer_up().unwrap();
        }

        session.generate().await.unwrap();
        session.back_to_editing().unwrap();

        let surface = session.surface_mut().unwrap();
        assert!(surface.selection().is_none());
        assert!(!surface.can_undo());
    }

    #[tokio::test]
    async fn test_reset_keeps_history() {
        let mut session = editing_session(vec![Ok(MockBackend::generated())]);
        session.generate().await.unwrap();

        session.reset();
        assert!(matches!(session.state(), SessionState::Idle));
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn test_load_history_enters_review() {
        let mut session = editing_session(vec![Ok(MockBackend::generated())]);
        session.set_prompt("first look");
        session.generate().await.unwrap();
        session.reset();

        session.load_history(0).unwrap();
        assert!(matches!(session.state(), SessionState::Review(_)));
        assert_eq!(session.prompt(), "first look");

        assert!(matches!(
            session.load_history(9),
            Err(SessionError::HistoryIndex(9))
        ));
    }

    #[tokio::test]
    async fn test_suggestion_failure_degrades_to_empty() {
        let mut session = Session::new(MockBackend {
            generate_results: Mutex::new(vec![]),
            suggest_result: Err(GenAiError::NoCandidate),
            seen_requests: Mutex::new(vec![]),
        });
        session.accept_image(room_photo()).unwrap();

        session.refresh_suggestions().await;
        assert!(session.suggestions().is_empty());
        assert!(!session.is_suggesting());
        assert!(matches!(session.state(), SessionState::Editing(_)));
    }

    #[tokio::test]
    async fn test_apply_suggestion_sets_prompt() {
        let mut session = Session::new(MockBackend {
            generate_results: Mutex::new(vec![]),
            suggest_result: Ok(vec!["Add a rug".to_string(), "Swap the lamp".to_string()]),
            seen_requests: Mutex::new(vec![]),
        });
        session.accept_image(room_photo()).unwrap();
        session.refresh_suggestions().await;

        session.apply_suggestion(1);
        assert_eq!(session.prompt(), "Swap the lamp");

        session.apply_suggestion(10);
        assert_eq!(session.prompt(), "Swap the lamp");
    }

    #[tokio::test]
    async fn test_reference_and_object_images_forwarded() {
        let mut session = editing_session(vec![Ok(MockBackend::generated())]);
        session.set_reference_image(Some(DataUri::from_parts("image/jpeg", "cmVm")));
        session.set_object_image(Some(DataUri::from_parts("image/png", "b2Jq")));

        session.generate().await.unwrap();

        let requests = session.backend.seen_requests.lock().unwrap();
        assert_eq!(
            requests[0].reference_image.as_ref().unwrap().data,
            "cmVm"
        );
        assert_eq!(requests[0].object_image.as_ref().unwrap().data, "b2Jq");
    }

    #[tokio::test]
    async fn test_slider_available_only_in_review() {
        let mut session = editing_session(vec![Ok(MockBackend::generated())]);
        assert!(session.slider_mut().is_none());

        session.generate().await.unwrap();
        let slider = session.slider_mut().unwrap();
        slider.press();
        slider.drag_to(75.0, 0.0, 100.0);
        slider.release();
        assert_eq!(slider.position(), 75.0);
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name(1700000000000), "lumina-design-1700000000000.png");
    }
}
