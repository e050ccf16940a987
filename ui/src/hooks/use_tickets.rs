use payloads::responses;
use yew::prelude::*;

use crate::get_api_client;
use crate::hooks::{
    DataFetchHandle, FetchOptions, RetryPolicy, use_data_fetch,
};

/// Hook for the current user's tickets. Ticket lists gate entry flows, so
/// transient failures retry a couple of times before surfacing.
#[hook]
pub fn use_tickets() -> DataFetchHandle<Vec<responses::Ticket>> {
    use_data_fetch(
        (),
        FetchOptions::default()
            .with_error_message("Failed to load your tickets")
            .with_retry(RetryPolicy::new(2, 1500)),
        || async {
            let api_client = get_api_client();
            api_client
                .get_my_tickets()
                .await
                .map_err(|e| e.to_string())
        },
    )
}
