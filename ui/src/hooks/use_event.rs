use payloads::{EventId, responses};
use yew::prelude::*;
use yewdux::prelude::*;

use crate::hooks::{DataFetchHandle, FetchOptions, use_data_fetch};
use crate::{State, get_api_client};

/// Hook for a single event. Serves the canonical store copy when one is
/// already loaded and only fetches on a store miss; `refetch` forces a
/// refresh either way.
#[hook]
pub fn use_event(event_id: EventId) -> DataFetchHandle<responses::Event> {
    let (state, dispatch) = use_store::<State>();

    let mut options = FetchOptions::default()
        .with_error_message("Failed to load event");
    if let Some(event) = state.get_event(event_id) {
        options = options.with_initial_data(event.clone()).manual();
    }

    use_data_fetch(event_id, options, move || {
        let dispatch = dispatch.clone();
        async move {
            let api_client = get_api_client();
            let event = api_client
                .get_event(&event_id)
                .await
                .map_err(|e| e.to_string())?;
            dispatch.reduce_mut(|state| state.set_event(event.clone()));
            Ok(event)
        }
    })
}
