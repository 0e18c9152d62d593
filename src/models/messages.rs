use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A full email or SMS message.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique identifier.
    pub id: String,
    #[serde(default)]
    pub from: Vec<MessageAddress>,
    #[serde(default)]
    pub to: Vec<MessageAddress>,
    #[serde(default)]
    pub cc: Vec<MessageAddress>,
    #[serde(default)]
    pub bcc: Vec<MessageAddress>,
    /// When the service received the message.
    pub received: Option<DateTime<Utc>>,
    #[serde(default)]
    pub subject: String,
    /// HTML body with extracted links and images.
    pub html: Option<MessageContent>,
    /// Plain-text body with extracted links.
    pub text: Option<MessageContent>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    pub metadata: Option<Metadata>,
    /// Server (inbox) the message was delivered to.
    #[serde(default)]
    pub server: String,
}

/// Sender or recipient of a message. SMS messages carry a phone number
/// instead of an email address.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageAddress {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// One body part of a message.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageContent {
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Link {
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Image {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

/// Attachment metadata, or an attachment to send when creating a message.
///
/// `content` holds base64 data and is only populated on outgoing
/// attachments; download received ones with
/// [`Files::get_attachment`](crate::Files::get_attachment).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Envelope and header data.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default)]
    pub headers: Vec<MessageHeader>,
    #[serde(default)]
    pub mail_from: String,
    #[serde(default)]
    pub rcpt_to: Vec<MessageAddress>,
    #[serde(default)]
    pub ehlo: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MessageHeader {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub value: String,
}

/// A page of message summaries, as returned by listing and search.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MessageListResult {
    #[serde(default)]
    pub items: Vec<MessageSummary>,
}

/// Lightweight view of a message, without bodies.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSummary {
    pub id: String,
    #[serde(default)]
    pub server: String,
    #[serde(default)]
    pub from: Vec<MessageAddress>,
    #[serde(default)]
    pub to: Vec<MessageAddress>,
    #[serde(default)]
    pub cc: Vec<MessageAddress>,
    #[serde(default)]
    pub bcc: Vec<MessageAddress>,
    pub received: Option<DateTime<Utc>>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub summary: String,
    /// Number of attachments.
    #[serde(default)]
    pub attachments: u32,
}

/// How the fields of a [`SearchCriteria`] combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SearchMatch {
    /// Every populated field must match.
    #[default]
    All,
    /// At least one populated field must match.
    Any,
}

/// Fields to match messages against.
///
/// # Examples
/// ```
/// use mailosaur_client::{SearchCriteria, SearchMatch};
///
/// let criteria = SearchCriteria::new()
///     .sent_to("someone@abc123.mailosaur.net")
///     .subject("Your code")
///     .match_mode(SearchMatch::Any);
/// assert_eq!(criteria.match_mode, Some(SearchMatch::Any));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    /// Sender email address or phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_from: Option<String>,
    /// Recipient email address or phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_to: Option<String>,
    /// Substring of the subject line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Substring of the message body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Defaults to [`SearchMatch::All`] when unset.
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_mode: Option<SearchMatch>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_from(mut self, sent_from: impl Into<String>) -> Self {
        self.sent_from = Some(sent_from.into());
        self
    }

    pub fn sent_to(mut self, sent_to: impl Into<String>) -> Self {
        self.sent_to = Some(sent_to.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn match_mode(mut self, match_mode: SearchMatch) -> Self {
        self.match_mode = Some(match_mode);
        self
    }

    /// Copy of these criteria with the match mode filled in.
    pub(crate) fn with_default_match(&self) -> Self {
        Self {
            match_mode: Some(self.match_mode.unwrap_or_default()),
            ..self.clone()
        }
    }
}

/// A new message to create, and optionally send, from a server.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageCreateOptions {
    /// Recipient; must be a verified address when `send` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Send the message rather than only storing it.
    pub send: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MessageForwardOptions {
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MessageReplyOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

/// One email client to render a preview in.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    /// Client label, e.g. `OL2021`. See
    /// [`Previews::list_email_clients`](crate::Previews::list_email_clients).
    pub email_client: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disable_images: bool,
}

impl PreviewRequest {
    pub fn new(email_client: impl Into<String>) -> Self {
        Self {
            email_client: email_client.into(),
            disable_images: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PreviewRequestOptions {
    pub previews: Vec<PreviewRequest>,
}

/// A preview requested for a message. Its image is fetched with
/// [`Files::get_preview`](crate::Files::get_preview) once rendered.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    pub id: String,
    #[serde(default)]
    pub email_client: String,
    #[serde(default)]
    pub disable_images: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreviewListResult {
    #[serde(default)]
    pub items: Vec<Preview>,
}

/// An email client that previews can be rendered in.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailClient {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailClientListResult {
    #[serde(default)]
    pub items: Vec<EmailClient>,
}
