use payloads::{ConversationId, responses};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

use super::use_conversations::CONVERSATIONS_CACHE_KEY;
use super::use_messages::conversation_cache_prefix;
use crate::cache::use_session_cache;
use crate::get_api_client;

/// Hook wiring a conversation's server-sent-events feed to a callback.
///
/// Each incoming frame invalidates the conversation's cached pages before
/// the callback runs, so any follow-up fetch sees fresh data. The source
/// is closed when the conversation changes or the component unmounts.
#[hook]
pub fn use_message_stream(
    conversation_id: ConversationId,
    on_message: Callback<responses::Message>,
) {
    let cache = use_session_cache();

    use_effect_with(conversation_id, move |conversation_id| {
        let conversation_id = *conversation_id;
        let url = get_api_client().message_stream_url(&conversation_id);

        let source = match web_sys::EventSource::new(&url) {
            Ok(source) => Some(source),
            Err(_) => {
                tracing::error!("failed to open message stream");
                None
            }
        };

        let listener = source.as_ref().map(|source| {
            let callback = Closure::<dyn FnMut(web_sys::MessageEvent)>::new(
                move |event: web_sys::MessageEvent| {
                    let Some(text) = event.data().as_string() else {
                        return;
                    };
                    match serde_json::from_str::<responses::Message>(&text) {
                        Ok(message) => {
                            cache.invalidate_prefix(
                                &conversation_cache_prefix(conversation_id),
                            );
                            cache.invalidate(CONVERSATIONS_CACHE_KEY);
                            on_message.emit(message);
                        }
                        Err(e) => {
                            tracing::warn!(
                                error = %e,
                                "dropping malformed stream frame"
                            );
                        }
                    }
                },
            );
            source.set_onmessage(Some(callback.as_ref().unchecked_ref()));
            callback
        });

        move || {
            if let Some(source) = source {
                source.close();
            }
            // Keep the js closure alive for as long as the source is
            drop(listener);
        }
    });
}
