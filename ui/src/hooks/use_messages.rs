use payloads::{ConversationId, MessageId, requests, responses};
use yew::prelude::*;

use super::use_conversations::CONVERSATIONS_CACHE_KEY;
use crate::cache::{SessionCacheHandle, use_session_cache};
use crate::get_api_client;
use crate::hooks::{DataFetchHandle, FetchOptions, use_data_fetch};

pub const MESSAGE_PAGE_SIZE: u32 = 50;

/// Cache key prefix shared by everything belonging to one conversation,
/// so one prefix invalidation clears all of its pages.
pub fn conversation_cache_prefix(conversation_id: ConversationId) -> String {
    format!("conv:{conversation_id}:")
}

fn message_page_key(
    conversation_id: ConversationId,
    before: Option<MessageId>,
) -> String {
    let prefix = conversation_cache_prefix(conversation_id);
    match before {
        Some(before) => format!("{prefix}messages:{before}"),
        None => format!("{prefix}messages:latest"),
    }
}

/// Hook for one page of a conversation, newest first. `before` pages
/// backwards through history; `None` is the latest page.
#[hook]
pub fn use_messages(
    conversation_id: ConversationId,
    before: Option<MessageId>,
) -> DataFetchHandle<responses::MessagePage> {
    let cache = use_session_cache();

    use_data_fetch(
        (conversation_id, before),
        FetchOptions::default().with_error_message("Failed to load messages"),
        move || {
            let cache = cache.clone();
            async move {
                let key = message_page_key(conversation_id, before);
                if let Some(page) =
                    cache.get::<responses::MessagePage>(&key)
                {
                    return Ok(page);
                }

                let api_client = get_api_client();
                let page = api_client
                    .get_messages(&requests::GetMessages {
                        conversation_id,
                        before,
                        limit: MESSAGE_PAGE_SIZE,
                    })
                    .await
                    .map_err(|e| e.to_string())?;
                cache.set(key, page.clone());
                Ok(page)
            }
        },
    )
}

/// Send a message, then drop every cached page of the conversation (and
/// the conversation list, whose previews just changed) so the next read
/// goes back to the server.
pub async fn send_message(
    cache: &SessionCacheHandle,
    details: &requests::SendMessage,
) -> Result<responses::Message, String> {
    let api_client = get_api_client();
    let message = api_client
        .send_message(details)
        .await
        .map_err(|e| e.to_string())?;

    cache.invalidate_prefix(&conversation_cache_prefix(
        details.conversation_id,
    ));
    cache.invalidate(CONVERSATIONS_CACHE_KEY);
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn page_keys_share_the_conversation_prefix() {
        let conversation_id = ConversationId(Uuid::new_v4());
        let prefix = conversation_cache_prefix(conversation_id);

        let latest = message_page_key(conversation_id, None);
        let older = message_page_key(
            conversation_id,
            Some(MessageId(Uuid::new_v4())),
        );

        assert!(latest.starts_with(&prefix));
        assert!(older.starts_with(&prefix));
        assert_ne!(latest, older);
    }
}
