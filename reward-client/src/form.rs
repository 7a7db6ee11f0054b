//! Admin form models
//!
//! Plain state holders mirroring the creation forms. They validate
//! locally so that an incomplete form never reaches the network.

use shared::models::{Participant, RewardCreate, UploadedMedia};
use shared::validation::{
    MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_TITLE_LEN, MAX_URL_LEN,
    validate_audience, validate_optional_text, validate_required_text,
};

use crate::error::ClientResult;

/// New category input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
}

impl CategoryForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Trimmed name, rejected if blank
    pub fn validated_name(&self) -> ClientResult<String> {
        let name = self.name.trim();
        validate_required_text(name, "Category name", MAX_NAME_LEN)?;
        Ok(name.to_string())
    }

    pub fn clear(&mut self) {
        self.name.clear();
    }
}

/// Reward session creation form
///
/// The audience is sized by [`RewardForm::set_audience_count`]; slots are
/// then filled one by one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewardForm {
    pub title: String,
    pub description: String,
    pub banner_url: String,
    pub button_text: String,
    pub button_link: String,
    pub category_id: Option<String>,
    audience: Vec<Participant>,
}

impl RewardForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn audience(&self) -> &[Participant] {
        &self.audience
    }

    pub fn audience_count(&self) -> usize {
        self.audience.len()
    }

    /// Resize the audience
    ///
    /// Slots below `count` keep what was typed into them, new slots start
    /// empty, slots past `count` are dropped.
    pub fn set_audience_count(&mut self, count: usize) {
        self.audience.resize_with(count, Participant::default);
    }

    pub fn participant_mut(&mut self, index: usize) -> Option<&mut Participant> {
        self.audience.get_mut(index)
    }

    /// Fill one slot; `false` if `index` is outside the audience
    pub fn set_participant(
        &mut self,
        index: usize,
        name: impl Into<String>,
        mobile: impl Into<String>,
    ) -> bool {
        match self.audience.get_mut(index) {
            Some(slot) => {
                *slot = Participant::new(name, mobile);
                true
            }
            None => false,
        }
    }

    /// Replace the audience wholesale, resizing the count with it
    pub fn set_audience(&mut self, audience: Vec<Participant>) {
        self.audience = audience;
    }

    /// Store an uploaded banner; same field as a typed-in URL
    pub fn apply_upload(&mut self, media: &UploadedMedia) {
        self.banner_url = media.file_path.clone();
    }

    /// Validate and build the request body
    pub fn to_payload(&self) -> ClientResult<RewardCreate> {
        validate_required_text(&self.title, "Title", MAX_TITLE_LEN)?;
        validate_optional_text(Some(self.description.as_str()), "Description", MAX_DESCRIPTION_LEN)?;
        validate_optional_text(Some(self.banner_url.as_str()), "Banner URL", MAX_URL_LEN)?;
        validate_optional_text(Some(self.button_text.as_str()), "Button text", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(Some(self.button_link.as_str()), "Button link", MAX_URL_LEN)?;
        validate_audience(&self.audience)?;

        Ok(RewardCreate {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            banner_url: self.banner_url.trim().to_string(),
            button_text: self.button_text.trim().to_string(),
            button_link: self.button_link.trim().to_string(),
            category_id: self
                .category_id
                .clone()
                .filter(|id| !id.trim().is_empty()),
            audience: self
                .audience
                .iter()
                .map(|p| Participant::new(p.name.trim(), p.mobile.trim()))
                .collect(),
        })
    }

    /// Back to the initial, empty form
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_pristine(&self) -> bool {
        *self == Self::default()
    }
}
