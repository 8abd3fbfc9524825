use crate::error::{SiteError, ValidationErrors};
use crate::models::{Draft, NewBook, NewChannel, NewIdea, NewPodcast};
use crate::store::Attachment;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum FormPhase {
    #[default]
    Idle,
    Submitting,
}

/// How a finished submission left the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SubmitOutcome {
    Succeeded,
    /// Field errors are on the machine; nothing was sent.
    Invalid,
    Failed(String),
}

/// The raw inputs of one form.
pub(crate) trait FormFields: Default + Clone {
    type Output;

    fn validate(&self) -> Result<Self::Output, ValidationErrors>;
}

/// `Idle -> Submitting -> Idle`, shared by every form on the site.
///
/// Success clears the inputs; failure keeps them so the user can resubmit.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct FormMachine<F: FormFields> {
    pub fields: F,
    pub errors: ValidationErrors,
    pub phase: FormPhase,
}

impl<F: FormFields> FormMachine<F> {
    pub fn new() -> Self {
        Self {
            fields: F::default(),
            errors: ValidationErrors::new(),
            phase: FormPhase::Idle,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn error(&self, field: &str) -> Option<String> {
        self.errors.get(field).map(str::to_string)
    }

    /// Validates and moves to `Submitting`. Returns what to send, or `None`
    /// when the input is invalid or a submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<F::Output> {
        if self.is_submitting() {
            return None;
        }
        match self.fields.validate() {
            Ok(out) => {
                self.errors = ValidationErrors::new();
                self.phase = FormPhase::Submitting;
                Some(out)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    pub fn finish<T>(&mut self, result: &Result<T, SiteError>) -> SubmitOutcome {
        self.phase = FormPhase::Idle;
        match result {
            Ok(_) => {
                self.fields = F::default();
                self.errors = ValidationErrors::new();
                SubmitOutcome::Succeeded
            }
            Err(SiteError::Validation(errors)) => {
                self.errors = errors.clone();
                SubmitOutcome::Invalid
            }
            Err(e) => SubmitOutcome::Failed(e.to_string()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct IdeaFields {
    pub name: String,
    pub email: String,
    pub category: String,
    pub idea: String,
}

impl FormFields for IdeaFields {
    type Output = NewIdea;

    fn validate(&self) -> Result<NewIdea, ValidationErrors> {
        NewIdea::parse(&self.name, &self.email, &self.category, &self.idea)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct BookFields {
    pub title: String,
    pub author: String,
    pub description: String,
    pub link: String,
    pub cover: Option<Attachment>,
}

impl FormFields for BookFields {
    type Output = (NewBook, Attachment);

    fn validate(&self) -> Result<Self::Output, ValidationErrors> {
        let draft = NewBook {
            title: self.title.clone(),
            author: self.author.clone(),
            description: self.description.clone(),
            image_url: String::new(),
            link: self.link.trim().to_string(),
        };
        let mut errors = match draft.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors.without("imageUrl"),
        };
        let cover = self.cover.clone().filter(|c| !c.is_empty());
        if cover.is_none() {
            errors.push("imageUrl", "Please upload a cover image.");
        }
        errors.into_result()?;
        Ok((draft, cover.unwrap_or_default()))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ChannelFields {
    pub title: String,
    pub creator: String,
    pub description: String,
    pub channel_url: String,
    pub thumbnail_url: String,
}

impl FormFields for ChannelFields {
    type Output = NewChannel;

    fn validate(&self) -> Result<NewChannel, ValidationErrors> {
        let draft = NewChannel {
            title: self.title.clone(),
            creator: self.creator.clone(),
            description: self.description.clone(),
            channel_url: self.channel_url.trim().to_string(),
            thumbnail_url: self.thumbnail_url.trim().to_string(),
        };
        draft.validate()?;
        Ok(draft)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct PodcastFields {
    pub title: String,
    pub host: String,
    pub description: String,
    pub podcast_url: String,
    pub image_url: String,
}

impl FormFields for PodcastFields {
    type Output = NewPodcast;

    fn validate(&self) -> Result<NewPodcast, ValidationErrors> {
        let draft = NewPodcast {
            title: self.title.clone(),
            host: self.host.clone(),
            description: self.description.clone(),
            podcast_url: self.podcast_url.trim().to_string(),
            image_url: self.image_url.trim().to_string(),
        };
        draft.validate()?;
        Ok(draft)
    }
}
