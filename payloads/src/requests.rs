use crate::{
    ConversationId, EventId, MessageId, PromotionMode, TicketTypeId, UserId,
};
use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const EMAIL_MAX_LEN: usize = 255;
pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 30;
pub const EVENT_TITLE_MIN_LEN: usize = 3;
pub const EVENT_TITLE_MAX_LEN: usize = 120;
pub const MESSAGE_MAX_LEN: usize = 4000;
pub const MESSAGE_PAGE_MAX: u32 = 100;

/// Validation result for usernames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameValidation {
    Valid,
    TooShort,
    TooLong,
    InvalidCharacters,
    MustStartWithLetter,
}

impl UsernameValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            Self::Valid => None,
            Self::TooShort => Some("Username must be at least 3 characters"),
            Self::TooLong => Some("Username must be at most 30 characters"),
            Self::InvalidCharacters => Some(
                "Username can only contain letters, numbers, and underscores",
            ),
            Self::MustStartWithLetter => {
                Some("Username must start with a letter")
            }
        }
    }
}

/// Validate a username.
///
/// Rules:
/// - 3-30 characters
/// - ASCII letters, numbers, and underscores only
/// - Must start with a letter
pub fn validate_username(username: &str) -> UsernameValidation {
    if username.len() < USERNAME_MIN_LEN {
        return UsernameValidation::TooShort;
    }
    if username.len() > USERNAME_MAX_LEN {
        return UsernameValidation::TooLong;
    }

    let mut chars = username.chars();
    if let Some(first) = chars.next()
        && !first.is_ascii_alphabetic()
    {
        return UsernameValidation::MustStartWithLetter;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return UsernameValidation::InvalidCharacters;
    }

    UsernameValidation::Valid
}

/// Validation result for event titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTitleValidation {
    Valid,
    TooShort,
    TooLong,
    Blank,
}

impl EventTitleValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            Self::Valid => None,
            Self::TooShort => {
                Some("Event title must be at least 3 characters")
            }
            Self::TooLong => {
                Some("Event title must be at most 120 characters")
            }
            Self::Blank => Some("Event title cannot be blank"),
        }
    }
}

/// Validate an event title. Length limits apply to the trimmed title.
pub fn validate_event_title(title: &str) -> EventTitleValidation {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return EventTitleValidation::Blank;
    }
    if trimmed.len() < EVENT_TITLE_MIN_LEN {
        return EventTitleValidation::TooShort;
    }
    if trimmed.len() > EVENT_TITLE_MAX_LEN {
        return EventTitleValidation::TooLong;
    }
    EventTitleValidation::Valid
}

/// Validation result for message bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBodyValidation {
    Valid,
    Blank,
    TooLong,
}

impl MessageBodyValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            Self::Valid => None,
            Self::Blank => Some("Message cannot be empty"),
            Self::TooLong => Some("Message must be at most 4000 characters"),
        }
    }
}

pub fn validate_message_body(body: &str) -> MessageBodyValidation {
    if body.trim().is_empty() {
        return MessageBodyValidation::Blank;
    }
    if body.len() > MESSAGE_MAX_LEN {
        return MessageBodyValidation::TooLong;
    }
    MessageBodyValidation::Valid
}

#[derive(Serialize, Deserialize)]
pub struct CreateAccount {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfile {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEvent {
    pub title: String,
    pub description: Option<String>,
    pub venue: String,
    pub starts_at: Timestamp,
}

/// List events, optionally restricted to a single organizer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GetEvents {
    pub organizer_id: Option<UserId>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PurchaseTickets {
    pub event_id: EventId,
    pub ticket_type_id: TicketTypeId,
    pub quantity: u32,
}

/// Submit a scanned ticket code for validation. The backend performs the
/// atomic check-in; the client only renders the outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanTicket {
    pub event_id: EventId,
    pub ticket_code: String,
}

/// Page backwards through a conversation. `before` is exclusive; `None`
/// starts from the newest message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GetMessages {
    pub conversation_id: ConversationId,
    pub before: Option<MessageId>,
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessage {
    pub conversation_id: ConversationId,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePromotion {
    pub event_id: EventId,
    pub budget: Decimal,
    pub bid_amount: Decimal,
    pub mode: PromotionMode,
    pub audience_interests: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RequestPayout {
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCateringListings {
    pub query: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CreateLiveSessionToken {
    pub event_id: EventId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rules() {
        assert!(validate_username("alice").is_valid());
        assert!(validate_username("a_1").is_valid());
        assert_eq!(validate_username("ab"), UsernameValidation::TooShort);
        assert_eq!(
            validate_username(&"a".repeat(31)),
            UsernameValidation::TooLong
        );
        assert_eq!(
            validate_username("1abc"),
            UsernameValidation::MustStartWithLetter
        );
        assert_eq!(
            validate_username("ab-cd"),
            UsernameValidation::InvalidCharacters
        );
    }

    #[test]
    fn event_title_rules() {
        assert!(validate_event_title("Warehouse Rave").is_valid());
        assert_eq!(validate_event_title("   "), EventTitleValidation::Blank);
        assert_eq!(validate_event_title("ab"), EventTitleValidation::TooShort);
        assert_eq!(
            validate_event_title(&"x".repeat(121)),
            EventTitleValidation::TooLong
        );
        // Surrounding whitespace doesn't count against the limits.
        assert!(validate_event_title("  ab c  ").is_valid());
    }

    #[test]
    fn message_body_rules() {
        assert!(validate_message_body("hey, still on for tonight?").is_valid());
        assert_eq!(validate_message_body(""), MessageBodyValidation::Blank);
        assert_eq!(validate_message_body(" \n "), MessageBodyValidation::Blank);
        assert_eq!(
            validate_message_body(&"m".repeat(4001)),
            MessageBodyValidation::TooLong
        );
    }
}
