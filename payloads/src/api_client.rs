use crate::{ConversationId, EventId, PromotionId, requests, responses};
use reqwest::StatusCode;
use serde::Serialize;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for interfacing with the backend.
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", &self.address)
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.post(self.format_url(path)).json(body);

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn empty_post(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.post(self.format_url(path));

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path));

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }
}

/// Methods on the backend API
impl APIClient {
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let response = self.empty_get("health_check").await?;
        ok_empty(response).await
    }

    pub async fn create_account(
        &self,
        details: &requests::CreateAccount,
    ) -> Result<(), ClientError> {
        let response = self.post("create_account", details).await?;
        ok_empty(response).await
    }

    pub async fn login(
        &self,
        details: &requests::LoginCredentials,
    ) -> Result<(), ClientError> {
        let response = self.post("login", &details).await?;
        ok_empty(response).await
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = self.empty_post("logout").await?;
        ok_empty(response).await
    }

    /// Check if the user is logged in.
    pub async fn login_check(&self) -> Result<bool, ClientError> {
        let response = self.empty_post("login_check").await?;
        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::UNAUTHORIZED => Ok(false),
            _ => Err(ClientError::APIError(
                response.status(),
                response.text().await?,
            )),
        }
    }

    /// Get the current user's profile information.
    pub async fn user_profile(
        &self,
    ) -> Result<responses::UserProfile, ClientError> {
        let response = self.empty_get("user_profile").await?;
        ok_body(response).await
    }

    pub async fn update_profile(
        &self,
        details: &requests::UpdateProfile,
    ) -> Result<responses::UserProfile, ClientError> {
        let response = self.post("update_profile", details).await?;
        ok_body(response).await
    }

    pub async fn get_events(
        &self,
        details: &requests::GetEvents,
    ) -> Result<Vec<responses::Event>, ClientError> {
        let response = self.post("get_events", details).await?;
        ok_body(response).await
    }

    pub async fn get_event(
        &self,
        event_id: &EventId,
    ) -> Result<responses::Event, ClientError> {
        let response = self.post("get_event", event_id).await?;
        ok_body(response).await
    }

    pub async fn create_event(
        &self,
        details: &requests::CreateEvent,
    ) -> Result<responses::Event, ClientError> {
        let response = self.post("create_event", details).await?;
        ok_body(response).await
    }

    pub async fn get_ticket_types(
        &self,
        event_id: &EventId,
    ) -> Result<Vec<responses::TicketType>, ClientError> {
        let response = self.post("get_ticket_types", event_id).await?;
        ok_body(response).await
    }

    pub async fn purchase_tickets(
        &self,
        details: &requests::PurchaseTickets,
    ) -> Result<Vec<responses::Ticket>, ClientError> {
        let response = self.post("purchase_tickets", details).await?;
        ok_body(response).await
    }

    /// Tickets held by the current user.
    pub async fn get_my_tickets(
        &self,
    ) -> Result<Vec<responses::Ticket>, ClientError> {
        let response = self.empty_get("my_tickets").await?;
        ok_body(response).await
    }

    /// Validate a scanned ticket code. The atomic check-in is performed
    /// server-side; this call only reports the outcome.
    pub async fn scan_ticket(
        &self,
        details: &requests::ScanTicket,
    ) -> Result<responses::TicketScanOutcome, ClientError> {
        let response = self.post("scan_ticket", details).await?;
        ok_body(response).await
    }

    pub async fn get_conversations(
        &self,
    ) -> Result<Vec<responses::Conversation>, ClientError> {
        let response = self.empty_get("conversations").await?;
        ok_body(response).await
    }

    pub async fn get_messages(
        &self,
        details: &requests::GetMessages,
    ) -> Result<responses::MessagePage, ClientError> {
        let response = self.post("get_messages", details).await?;
        ok_body(response).await
    }

    pub async fn send_message(
        &self,
        details: &requests::SendMessage,
    ) -> Result<responses::Message, ClientError> {
        let response = self.post("send_message", details).await?;
        ok_body(response).await
    }

    /// Returns the URL of the server-sent-events feed for a conversation.
    /// Use this for an `EventSource`, not a one-shot request.
    pub fn message_stream_url(
        &self,
        conversation_id: &ConversationId,
    ) -> String {
        format!(
            "{}/api/conversations/{}/stream",
            self.address, conversation_id.0
        )
    }

    pub async fn get_promotions(
        &self,
    ) -> Result<Vec<responses::Promotion>, ClientError> {
        let response = self.empty_get("promotions").await?;
        ok_body(response).await
    }

    pub async fn get_promotion(
        &self,
        promotion_id: &PromotionId,
    ) -> Result<responses::Promotion, ClientError> {
        let response = self.post("get_promotion", promotion_id).await?;
        ok_body(response).await
    }

    pub async fn create_promotion(
        &self,
        details: &requests::CreatePromotion,
    ) -> Result<responses::Promotion, ClientError> {
        let response = self.post("create_promotion", details).await?;
        ok_body(response).await
    }

    pub async fn get_promo_credits(
        &self,
    ) -> Result<responses::PromoCreditBalance, ClientError> {
        let response = self.empty_get("promo_credits").await?;
        ok_body(response).await
    }

    pub async fn get_earnings_summary(
        &self,
    ) -> Result<responses::EarningsSummary, ClientError> {
        let response = self.empty_get("earnings_summary").await?;
        ok_body(response).await
    }

    pub async fn request_payout(
        &self,
        details: &requests::RequestPayout,
    ) -> Result<responses::Payout, ClientError> {
        let response = self.post("request_payout", details).await?;
        ok_body(response).await
    }

    pub async fn get_payouts(
        &self,
    ) -> Result<Vec<responses::Payout>, ClientError> {
        let response = self.empty_get("payouts").await?;
        ok_body(response).await
    }

    pub async fn search_catering_listings(
        &self,
        details: &requests::SearchCateringListings,
    ) -> Result<Vec<responses::CateringListing>, ClientError> {
        let response = self.post("search_catering_listings", details).await?;
        ok_body(response).await
    }

    /// Mint a short-lived join token for an event's live video room.
    pub async fn create_live_session_token(
        &self,
        details: &requests::CreateLiveSessionToken,
    ) -> Result<responses::LiveSessionToken, ClientError> {
        let response = self.post("create_live_session_token", details).await?;
        ok_body(response).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(response.json::<T>().await?)
}

/// Check that an empty response is OK, returning a ClientError if not.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(())
}
