use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::error::{SiteError, ValidationErrors};
use crate::store::{Document, FieldValue, Fields};
use crate::validation::{char_len, is_email, require, require_url};

/// A typed view over one backend collection.
pub(crate) trait Entity: Clone + PartialEq + Send + Sync + 'static {
    const COLLECTION: &'static str;

    /// Unsaved value written by `create`.
    type Draft: Draft;

    fn from_document(doc: &Document) -> Result<Self, SiteError>;
}

pub(crate) trait Draft {
    fn validate(&self) -> Result<(), ValidationErrors>;

    /// Document fields, without `createdAt` (the server sets it).
    fn into_fields(self) -> Fields;
}

/// Drafts whose image URL comes from an uploaded file.
pub(crate) trait WithImage: Draft {
    const IMAGE_FIELD: &'static str;

    fn set_image_url(&mut self, url: String);
}

fn put(fields: &mut Fields, key: &str, value: impl Into<FieldValue>) {
    fields.insert(key.to_string(), value.into());
}

// ---------------------------------------------------------------------------
// Books
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub image_url: String,
    pub link: String,
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct NewBook {
    pub title: String,
    pub author: String,
    pub description: String,
    pub image_url: String,
    pub link: String,
}

impl Entity for Book {
    const COLLECTION: &'static str = "books";
    type Draft = NewBook;

    fn from_document(doc: &Document) -> Result<Self, SiteError> {
        Ok(Self {
            id: doc.id.clone(),
            title: doc.string("title")?,
            author: doc.string("author")?,
            description: doc.string("description")?,
            image_url: doc.string("imageUrl")?,
            link: doc.string("link")?,
            created_at: doc.created_at(),
        })
    }
}

impl Draft for NewBook {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "title", "Title", &self.title);
        require(&mut errors, "author", "Author", &self.author);
        require(&mut errors, "description", "Description", &self.description);
        require_url(&mut errors, "link", "Link", &self.link);
        require_url(&mut errors, "imageUrl", "Cover image URL", &self.image_url);
        errors.into_result()
    }

    fn into_fields(self) -> Fields {
        let mut f = Fields::new();
        put(&mut f, "title", self.title);
        put(&mut f, "author", self.author);
        put(&mut f, "description", self.description);
        put(&mut f, "imageUrl", self.image_url);
        put(&mut f, "link", self.link);
        f
    }
}

impl WithImage for NewBook {
    const IMAGE_FIELD: &'static str = "imageUrl";

    fn set_image_url(&mut self, url: String) {
        self.image_url = url;
    }
}

// ---------------------------------------------------------------------------
// YouTube channels
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct YouTubeChannel {
    pub id: String,
    pub title: String,
    pub creator: String,
    pub description: String,
    pub channel_url: String,
    pub thumbnail_url: String,
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct NewChannel {
    pub title: String,
    pub creator: String,
    pub description: String,
    pub channel_url: String,
    pub thumbnail_url: String,
}

impl Entity for YouTubeChannel {
    const COLLECTION: &'static str = "youtube";
    type Draft = NewChannel;

    fn from_document(doc: &Document) -> Result<Self, SiteError> {
        Ok(Self {
            id: doc.id.clone(),
            title: doc.string("title")?,
            creator: doc.string("creator")?,
            description: doc.string("description")?,
            channel_url: doc.string("channelUrl")?,
            thumbnail_url: doc.string("thumbnailUrl")?,
            created_at: doc.created_at(),
        })
    }
}

impl Draft for NewChannel {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "title", "Channel title", &self.title);
        require(&mut errors, "creator", "Creator name", &self.creator);
        require(&mut errors, "description", "Channel description", &self.description);
        require_url(&mut errors, "channelUrl", "Channel URL", &self.channel_url);
        require_url(&mut errors, "thumbnailUrl", "Thumbnail URL", &self.thumbnail_url);
        errors.into_result()
    }

    fn into_fields(self) -> Fields {
        let mut f = Fields::new();
        put(&mut f, "title", self.title);
        put(&mut f, "creator", self.creator);
        put(&mut f, "description", self.description);
        put(&mut f, "channelUrl", self.channel_url);
        put(&mut f, "thumbnailUrl", self.thumbnail_url);
        f
    }
}

// ---------------------------------------------------------------------------
// Podcasts
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Podcast {
    pub id: String,
    pub title: String,
    pub host: String,
    pub description: String,
    pub podcast_url: String,
    pub image_url: String,
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct NewPodcast {
    pub title: String,
    pub host: String,
    pub description: String,
    pub podcast_url: String,
    pub image_url: String,
}

impl Entity for Podcast {
    const COLLECTION: &'static str = "podcasts";
    type Draft = NewPodcast;

    fn from_document(doc: &Document) -> Result<Self, SiteError> {
        Ok(Self {
            id: doc.id.clone(),
            title: doc.string("title")?,
            host: doc.string("host")?,
            description: doc.string("description")?,
            podcast_url: doc.string("podcastUrl")?,
            image_url: doc.string("imageUrl")?,
            created_at: doc.created_at(),
        })
    }
}

impl Draft for NewPodcast {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "title", "Podcast title", &self.title);
        require(&mut errors, "host", "Host", &self.host);
        require(&mut errors, "description", "Podcast description", &self.description);
        require_url(&mut errors, "podcastUrl", "Podcast URL", &self.podcast_url);
        require_url(&mut errors, "imageUrl", "Cover image URL", &self.image_url);
        errors.into_result()
    }

    fn into_fields(self) -> Fields {
        let mut f = Fields::new();
        put(&mut f, "title", self.title);
        put(&mut f, "host", self.host);
        put(&mut f, "description", self.description);
        put(&mut f, "podcastUrl", self.podcast_url);
        put(&mut f, "imageUrl", self.image_url);
        f
    }
}

// ---------------------------------------------------------------------------
// Ideas
// ---------------------------------------------------------------------------

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumString, AsRefStr, IntoStaticStr, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum IdeaCategory {
    Books,
    Youtube,
    Podcasts,
    Other,
}

impl IdeaCategory {
    /// Stored value, also the `<option>` value.
    pub fn value(self) -> &'static str {
        self.into()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Books => "Books",
            Self::Youtube => "YouTube",
            Self::Podcasts => "Podcasts",
            Self::Other => "Other",
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

pub(crate) const REVIEWED: &str = "reviewed";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Idea {
    pub id: String,
    pub name: String,
    pub email: String,
    pub category: IdeaCategory,
    pub idea: String,
    pub reviewed: bool,
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NewIdea {
    pub name: String,
    pub email: String,
    pub category: IdeaCategory,
    pub idea: String,
}

impl NewIdea {
    /// Checks the raw form input; `category` is the `<select>` value.
    pub fn parse(name: &str, email: &str, category: &str, idea: &str) -> Result<Self, ValidationErrors> {
        let mut errors = check_idea_text(name, email, idea);
        match category.parse::<IdeaCategory>() {
            Ok(category) if errors.is_empty() => Ok(Self {
                name: name.to_string(),
                email: email.to_string(),
                category,
                idea: idea.to_string(),
            }),
            Ok(_) => Err(errors),
            Err(_) => {
                errors.push("category", "Please select a category.");
                Err(errors)
            }
        }
    }
}

fn check_idea_text(name: &str, email: &str, idea: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if char_len(name) < 2 {
        errors.push("name", "Name must be at least 2 characters.");
    }
    if !is_email(email) {
        errors.push("email", "Please enter a valid email address.");
    }
    if char_len(idea) < 10 {
        errors.push("idea", "Your idea should be at least 10 characters.");
    }
    errors
}

impl Entity for Idea {
    const COLLECTION: &'static str = "ideas";
    type Draft = NewIdea;

    fn from_document(doc: &Document) -> Result<Self, SiteError> {
        // Anything the select never offered lands in "other".
        let category = doc
            .string("category")?
            .parse()
            .unwrap_or(IdeaCategory::Other);
        Ok(Self {
            id: doc.id.clone(),
            name: doc.string("name")?,
            email: doc.string("email")?,
            category,
            idea: doc.string("idea")?,
            reviewed: doc.flag(REVIEWED)?,
            created_at: doc.created_at(),
        })
    }
}

impl Draft for NewIdea {
    fn validate(&self) -> Result<(), ValidationErrors> {
        check_idea_text(&self.name, &self.email, &self.idea).into_result()
    }

    fn into_fields(self) -> Fields {
        let mut f = Fields::new();
        put(&mut f, "name", self.name);
        put(&mut f, "email", self.email);
        put(&mut f, "category", self.category.value());
        put(&mut f, "idea", self.idea);
        put(&mut f, REVIEWED, false);
        f
    }
}

/// The three showcased collections, as tabs on the categories page.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumString, AsRefStr, IntoStaticStr, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum ContentKind {
    #[default]
    Books,
    Youtube,
    Podcasts,
}

impl ContentKind {
    /// `#books` / `books` / `BOOKS` all select the books tab.
    pub fn from_fragment(fragment: &str) -> Option<Self> {
        fragment
            .trim_start_matches('#')
            .trim()
            .to_ascii_lowercase()
            .parse()
            .ok()
    }

    /// Fragment and DOM id of the tab's section.
    pub fn slug(self) -> &'static str {
        self.into()
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Books => "Books",
            Self::Youtube => "YouTube",
            Self::Podcasts => "Podcasts",
        }
    }

    /// Long form used for section headings and the footer.
    pub fn section_title(self) -> &'static str {
        match self {
            Self::Youtube => "YouTube Channels",
            other => other.title(),
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Books => "📚",
            Self::Youtube => "🎥",
            Self::Podcasts => "🎙️",
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}
