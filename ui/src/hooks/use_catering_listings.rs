use payloads::{requests, responses};
use yew::prelude::*;

use crate::get_api_client;
use crate::hooks::{DataFetchHandle, FetchOptions, use_data_fetch};

/// Hook to search catering listings. Re-queries whenever the search terms
/// change; rapid typing is safe because superseded fetches are discarded.
#[hook]
pub fn use_catering_listings(
    query: Option<String>,
    region: Option<String>,
) -> DataFetchHandle<Vec<responses::CateringListing>> {
    let deps = (query.clone(), region.clone());

    use_data_fetch(
        deps,
        FetchOptions::default()
            .with_error_message("Failed to search catering listings"),
        move || {
            let query = query.clone();
            let region = region.clone();
            async move {
                let api_client = get_api_client();
                api_client
                    .search_catering_listings(
                        &requests::SearchCateringListings { query, region },
                    )
                    .await
                    .map_err(|e| e.to_string())
            }
        },
    )
}
