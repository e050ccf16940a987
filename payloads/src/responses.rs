use crate::{
    ConversationId, EventId, EventStatus, ListingId, MessageId, PayoutId,
    PayoutStatus, PromotionId, PromotionMode, PromotionStatus, TicketId,
    TicketStatus, TicketTypeId, UserId,
};
use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// User identification bundled with display information
///
/// This is the standard way to reference users in API responses.
/// The frontend should display display_name (if present) or username,
/// but use user_id for any API calls that reference the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub user_id: UserId,
    pub username: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub email_verified: bool,
    pub is_organizer: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub organizer: UserIdentity,
    pub title: String,
    pub description: Option<String>,
    pub venue: String,
    pub status: EventStatus,
    pub starts_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketType {
    pub id: TicketTypeId,
    pub event_id: EventId,
    pub name: String,
    pub price: Decimal,
    pub quantity_total: u32,
    pub quantity_sold: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub event_id: EventId,
    pub ticket_type_id: TicketTypeId,
    pub holder: UserIdentity,
    /// Opaque code encoded in the ticket's QR image.
    pub code: String,
    pub status: TicketStatus,
    pub purchased_at: Timestamp,
}

/// Outcome of a gate scan. The check-in itself happens atomically on the
/// backend; a second scan of the same code reports `AlreadyCheckedIn`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TicketScanOutcome {
    Admitted { ticket: Ticket },
    AlreadyCheckedIn { scanned_at: Timestamp },
    Rejected { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub participants: Vec<UserIdentity>,
    pub last_message: Option<Message>,
    pub unread_count: u32,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub conversation_id: ConversationId,
    pub sender: UserIdentity,
    pub body: String,
    pub sent_at: Timestamp,
}

/// One page of a conversation, newest first. `next_before` feeds the next
/// `GetMessages.before` to continue paging; `None` means the history is
/// exhausted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagePage {
    pub messages: Vec<Message>,
    pub next_before: Option<MessageId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: PromotionId,
    pub event_id: EventId,
    pub status: PromotionStatus,
    pub mode: PromotionMode,
    pub budget: Decimal,
    pub bid_amount: Decimal,
    pub spent: Decimal,
    pub audience_interests: Vec<String>,
    pub created_at: Timestamp,
}

/// Promotional credit available to spend before the payment method is
/// charged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoCreditBalance {
    pub available: Decimal,
    pub lifetime_granted: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsSummary {
    pub available_for_payout: Decimal,
    pub pending: Decimal,
    pub lifetime_gross: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub id: PayoutId,
    pub amount: Decimal,
    pub status: PayoutStatus,
    pub requested_at: Timestamp,
    pub paid_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CateringListing {
    pub id: ListingId,
    pub vendor: UserIdentity,
    pub title: String,
    pub cuisine: String,
    pub price_per_head: Decimal,
    pub region: String,
}

/// Short-lived credential for joining a live video room hosted by the
/// video SaaS. The token is opaque to the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveSessionToken {
    pub room_name: String,
    pub token: String,
    pub expires_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessMessage {
    pub message: String,
}
