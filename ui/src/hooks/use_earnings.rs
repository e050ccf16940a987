use payloads::responses;
use yew::prelude::*;

use crate::get_api_client;
use crate::hooks::{DataFetchHandle, FetchOptions, use_data_fetch};

/// Hook for the creator earnings summary (payout-ready, pending, and
/// lifetime gross).
#[hook]
pub fn use_earnings() -> DataFetchHandle<responses::EarningsSummary> {
    use_data_fetch(
        (),
        FetchOptions::default()
            .with_error_message("Failed to load earnings"),
        || async {
            let api_client = get_api_client();
            api_client
                .get_earnings_summary()
                .await
                .map_err(|e| e.to_string())
        },
    )
}
