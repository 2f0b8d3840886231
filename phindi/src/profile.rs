use crate::models::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Email,
    Phone,
    Bio,
    Location,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("profile is not being edited")]
    NotEditing,
    #[error("name cannot be empty")]
    EmptyName,
}

/// Saved profile plus the draft of an edit in progress.
pub struct ProfileEditor {
    saved: UserProfile,
    draft: Option<UserProfile>,
}

impl ProfileEditor {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            saved: profile,
            draft: None,
        }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.saved
    }

    pub fn draft(&self) -> Option<&UserProfile> {
        self.draft.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn begin_edit(&mut self) {
        if self.draft.is_none() {
            self.draft = Some(self.saved.clone());
        }
    }

    /// Edit a draft field. Ignored when not editing.
    pub fn set_field(&mut self, field: ProfileField, value: String) -> bool {
        let Some(draft) = self.draft.as_mut() else {
            return false;
        };
        match field {
            ProfileField::Name => draft.name = value,
            ProfileField::Email => draft.email = value,
            ProfileField::Phone => draft.phone = value,
            ProfileField::Bio => draft.bio = value,
            ProfileField::Location => draft.location = value,
        }
        true
    }

    pub fn save(&mut self) -> Result<&UserProfile, ProfileError> {
        let draft = self.draft.as_ref().ok_or(ProfileError::NotEditing)?;
        if draft.name.trim().is_empty() {
            return Err(ProfileError::EmptyName);
        }
        if let Some(draft) = self.draft.take() {
            self.saved = draft;
            tracing::info!(name = %self.saved.name, "Profile saved");
        }
        Ok(&self.saved)
    }

    pub fn cancel(&mut self) {
        self.draft = None;
    }
}
