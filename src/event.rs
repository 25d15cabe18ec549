/// Title used when a notification carries none
pub const NO_TITLE: &str = "No Title";

/// Text used when a notification carries no body
pub const NO_TEXT: &str = "No Text";

/// Notification as handed over by the host platform
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEvent {
    /// Identifier of the application that posted the notification
    pub source_id: Option<String>,

    /// Notification title
    pub title: Option<String>,

    /// Notification body
    pub body: Option<String>,
}

impl RawEvent {
    /// Creates an instance of [`RawEvent`]
    pub fn new(source_id: Option<&str>, title: Option<&str>, body: Option<&str>) -> Self {
        Self {
            source_id: source_id.map(str::to_owned),
            title: title.map(str::to_owned),
            body: body.map(str::to_owned),
        }
    }
}

/// Captured notification as kept in the log and relayed to the endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedEvent {
    /// Identifier of the application that posted the notification
    pub source_id: Option<String>,

    /// Notification title
    pub title: Option<String>,

    /// Notification body
    pub body: Option<String>,
}

impl NormalizedEvent {
    /// Title, or [`NO_TITLE`] when absent
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or(NO_TITLE)
    }

    /// Body, or [`NO_TEXT`] when absent
    pub fn body_or_default(&self) -> &str {
        self.body.as_deref().unwrap_or(NO_TEXT)
    }
}

impl From<RawEvent> for NormalizedEvent {
    /// Fills in missing title and body. A missing source stays missing.
    fn from(raw: RawEvent) -> Self {
        Self {
            source_id: raw.source_id,
            title: Some(raw.title.unwrap_or_else(|| NO_TITLE.to_string())),
            body: Some(raw.body.unwrap_or_else(|| NO_TEXT.to_string())),
        }
    }
}
