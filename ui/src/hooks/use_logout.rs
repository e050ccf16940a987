use yew::prelude::*;
use yewdux::prelude::*;

use crate::contexts::toast::use_toast;
use crate::{State, get_api_client};

/// Hook returning a callback that ends the session and clears all
/// user-scoped state.
#[hook]
pub fn use_logout() -> Callback<()> {
    let (_state, dispatch) = use_store::<State>();
    let toast = use_toast();

    use_callback((), move |_, _| {
        let dispatch = dispatch.clone();
        let toast = toast.clone();

        yew::platform::spawn_local(async move {
            let api_client = get_api_client();
            match api_client.logout().await {
                Ok(()) => {
                    dispatch.reduce_mut(|state| state.logout());
                }
                Err(e) => {
                    toast.error(e.to_string());
                }
            }
        });
    })
}
