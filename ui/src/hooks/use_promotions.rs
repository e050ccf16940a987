use payloads::responses;
use yew::prelude::*;

use crate::get_api_client;
use crate::hooks::{DataFetchHandle, FetchOptions, use_data_fetch};

/// Hook for the creator's promotions dashboard list.
#[hook]
pub fn use_promotions() -> DataFetchHandle<Vec<responses::Promotion>> {
    use_data_fetch(
        (),
        FetchOptions::default()
            .with_error_message("Failed to load promotions"),
        || async {
            let api_client = get_api_client();
            api_client
                .get_promotions()
                .await
                .map_err(|e| e.to_string())
        },
    )
}
