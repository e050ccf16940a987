use payloads::{UserId, requests, responses};
use yew::prelude::*;
use yewdux::prelude::*;

use crate::hooks::{DataFetchHandle, FetchOptions, use_data_fetch};
use crate::{State, get_api_client};

/// Hook to load an organizer's events, populating the canonical store so
/// detail views can serve from it without refetching.
#[hook]
pub fn use_events(
    organizer_id: UserId,
) -> DataFetchHandle<Vec<responses::Event>> {
    let (_state, dispatch) = use_store::<State>();

    use_data_fetch(
        organizer_id,
        FetchOptions::default().with_error_message("Failed to load events"),
        move || {
            let dispatch = dispatch.clone();
            async move {
                let api_client = get_api_client();
                let events = api_client
                    .get_events(&requests::GetEvents {
                        organizer_id: Some(organizer_id),
                    })
                    .await
                    .map_err(|e| e.to_string())?;
                dispatch.reduce_mut(|state| {
                    state.set_events_for_organizer(
                        organizer_id,
                        events.clone(),
                    );
                });
                Ok(events)
            }
        },
    )
}
