pub mod cancel;
pub mod use_authentication;
pub mod use_catering_listings;
pub mod use_conversations;
pub mod use_data_fetch;
pub mod use_earnings;
pub mod use_event;
pub mod use_events;
pub mod use_logout;
pub mod use_message_stream;
pub mod use_messages;
pub mod use_promo_credits;
pub mod use_promotions;
pub mod use_tickets;

pub use cancel::{CancelScope, FlightToken};
pub use use_authentication::use_authentication;
pub use use_catering_listings::use_catering_listings;
pub use use_conversations::use_conversations;
pub use use_data_fetch::{
    DataFetchHandle, FetchOptions, RetryPolicy, use_data_fetch,
};
pub use use_earnings::use_earnings;
pub use use_event::use_event;
pub use use_events::use_events;
pub use use_logout::use_logout;
pub use use_message_stream::use_message_stream;
pub use use_messages::{send_message, use_messages};
pub use use_promo_credits::use_promo_credits;
pub use use_promotions::use_promotions;
pub use use_tickets::use_tickets;
