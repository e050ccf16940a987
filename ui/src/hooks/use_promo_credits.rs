use payloads::responses;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::hooks::{DataFetchHandle, FetchOptions, use_data_fetch};
use crate::{State, get_api_client};

/// Hook for the promotional-credit balance shown next to the budget field.
/// The balance is mirrored into the global store so the waterfall preview
/// can read it from anywhere in the promotion form.
#[hook]
pub fn use_promo_credits() -> DataFetchHandle<responses::PromoCreditBalance> {
    let (_state, dispatch) = use_store::<State>();

    use_data_fetch(
        (),
        FetchOptions::default()
            .with_error_message("Failed to load promotional credits"),
        move || {
            let dispatch = dispatch.clone();
            async move {
                let api_client = get_api_client();
                let credits = api_client
                    .get_promo_credits()
                    .await
                    .map_err(|e| e.to_string())?;
                dispatch.reduce_mut(|state| {
                    state.set_promo_credits(credits.clone());
                });
                Ok(credits)
            }
        },
    )
}
