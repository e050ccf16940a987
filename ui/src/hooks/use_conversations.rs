use payloads::responses;
use yew::prelude::*;

use crate::cache::use_session_cache;
use crate::get_api_client;
use crate::hooks::{DataFetchHandle, FetchOptions, use_data_fetch};

/// Session-cache key for the conversation list. Mutations that change
/// previews (sending a message) invalidate it.
pub const CONVERSATIONS_CACHE_KEY: &str = "conversations";

/// Hook for the user's conversation list, backed by the session cache so
/// hopping between inbox views doesn't refetch every time.
#[hook]
pub fn use_conversations() -> DataFetchHandle<Vec<responses::Conversation>> {
    let cache = use_session_cache();

    use_data_fetch(
        (),
        FetchOptions::default()
            .with_error_message("Failed to load conversations"),
        move || {
            let cache = cache.clone();
            async move {
                if let Some(cached) = cache
                    .get::<Vec<responses::Conversation>>(
                        CONVERSATIONS_CACHE_KEY,
                    )
                {
                    return Ok(cached);
                }

                let api_client = get_api_client();
                let conversations = api_client
                    .get_conversations()
                    .await
                    .map_err(|e| e.to_string())?;
                cache.set(CONVERSATIONS_CACHE_KEY, conversations.clone());
                Ok(conversations)
            }
        },
    )
}
