use gloo_timers::future::TimeoutFuture;
use std::future::Future;
use std::rc::Rc;
use yew::prelude::*;

use super::cancel::CancelScope;
use crate::contexts::toast::{ToastContext, ToastHandle};

/// Shown when a failure carries no message and the caller didn't supply a
/// fallback.
const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Automatic retry after a failed fetch: up to `count` extra attempts with
/// a fixed `delay_ms` between them (linear, not exponential).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub count: u32,
    pub delay_ms: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            count: 0,
            delay_ms: 1000,
        }
    }
}

impl RetryPolicy {
    pub fn new(count: u32, delay_ms: u32) -> Self {
        Self { count, delay_ms }
    }

    /// Whether another automatic attempt may follow after `attempts_used`
    /// retries have already run.
    pub fn allows_retry(&self, attempts_used: u32) -> bool {
        attempts_used < self.count
    }
}

/// Configuration for [`use_data_fetch`]. Options are captured on the first
/// render of the owning component; changing them afterwards does not
/// reconfigure an in-flight fetch.
pub struct FetchOptions<T> {
    /// Seed value before the first fetch completes.
    pub initial_data: Option<T>,
    /// Fetch immediately on mount (and on dependency changes). Default
    /// true; set false for hooks driven purely by `refetch`.
    pub fetch_on_mount: bool,
    pub on_success: Option<Callback<T>>,
    pub on_error: Option<Callback<String>>,
    /// Surface failures as an error toast. Default true.
    pub show_error_toast: bool,
    /// Fallback message when the underlying failure carries none.
    pub error_message: Option<String>,
    pub retry: RetryPolicy,
    /// Artificial delay before the adapter runs, for development fixtures.
    pub mock_delay_ms: Option<u32>,
}

impl<T> Default for FetchOptions<T> {
    fn default() -> Self {
        Self {
            initial_data: None,
            fetch_on_mount: true,
            on_success: None,
            on_error: None,
            show_error_toast: true,
            error_message: None,
            retry: RetryPolicy::default(),
            mock_delay_ms: None,
        }
    }
}

impl<T> FetchOptions<T> {
    /// Don't fetch until `refetch` is called.
    pub fn manual(mut self) -> Self {
        self.fetch_on_mount = false;
        self
    }

    /// Suppress the error toast; the caller renders the failure itself.
    pub fn silent(mut self) -> Self {
        self.show_error_toast = false;
        self
    }

    pub fn with_initial_data(mut self, data: T) -> Self {
        self.initial_data = Some(data);
        self
    }

    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[allow(dead_code)]
    pub fn with_mock_delay(mut self, delay_ms: u32) -> Self {
        self.mock_delay_ms = Some(delay_ms);
        self
    }

    pub fn on_success(mut self, callback: Callback<T>) -> Self {
        self.on_success = Some(callback);
        self
    }

    pub fn on_error(mut self, callback: Callback<String>) -> Self {
        self.on_error = Some(callback);
        self
    }
}

/// State and controls returned by [`use_data_fetch`].
pub struct DataFetchHandle<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Re-invoke the adapter unconditionally.
    pub refetch: Callback<()>,
    /// Overwrite `data` directly, e.g. for optimistic updates.
    pub set_data: Callback<Option<T>>,
    /// Reset the automatic-retry counter and re-invoke.
    pub retry: Callback<()>,
}

impl<T: Clone> DataFetchHandle<T> {
    /// Returns true if this is the initial load (no data yet, currently
    /// loading, and no error).
    pub fn is_initial_loading(&self) -> bool {
        self.is_loading && self.data.is_none() && self.error.is_none()
    }

    /// Render based on fetch state with contextual loading/error messages.
    ///
    /// - No data + loading: "Loading {context}..."
    /// - No data + error: "Error loading {context}: ..."
    /// - Has data: calls `render_fn` with (data, is_loading, error) so a
    ///   refetch can overlay a spinner on the previous content.
    pub fn render<F>(&self, context: &str, render_fn: F) -> Html
    where
        F: Fn(&T, bool, Option<&String>) -> Html,
    {
        match &self.data {
            None if self.is_loading => html! {
                <div class="text-center py-12">
                    <p class="text-neutral-600 dark:text-neutral-400">
                        {format!("Loading {}...", context)}
                    </p>
                </div>
            },
            None => {
                if let Some(error) = &self.error {
                    html! {
                        <div class="p-4 rounded-md bg-red-50 \
                                   dark:bg-red-900/20 border \
                                   border-red-200 dark:border-red-800">
                            <p class="text-sm text-red-700 \
                                      dark:text-red-400">
                                {format!(
                                    "Error loading {}: {}", context, error
                                )}
                            </p>
                        </div>
                    }
                } else {
                    html! {
                        <div class="text-center py-12">
                            <p class="text-neutral-600 dark:text-neutral-400">
                                {format!("No {} found", context)}
                            </p>
                        </div>
                    }
                }
            }
            Some(data) => render_fn(data, self.is_loading, self.error.as_ref()),
        }
    }
}

/// Internal counter whose increments re-trigger the fetch effect; this is
/// how scheduled retries re-enter the normal fetch path.
#[derive(PartialEq)]
struct RetryTick(u32);

impl Reducible for RetryTick {
    type Action = ();

    fn reduce(self: Rc<Self>, _action: ()) -> Rc<Self> {
        Rc::new(RetryTick(self.0.wrapping_add(1)))
    }
}

/// Generic fetch hook: wraps one async read with loading/error state,
/// single-flight cancellation, unmount safety, and optional linear retry.
///
/// The adapter is invoked on mount (unless `options.manual()`) and whenever
/// `deps` changes. Before each invocation the previous flight is
/// superseded, so out-of-order late responses never overwrite newer state.
/// Failures never propagate to the caller; they end up in `error`, an
/// optional toast, and `on_error`.
///
/// Note: a failed fetch discards the previously fetched value (`data`
/// becomes `None`). Callers that want the last good value to survive an
/// error must keep their own copy, e.g. via `set_data`.
///
/// # Example
///
/// ```ignore
/// #[hook]
/// pub fn use_vendor_profile(user_id: UserId) -> DataFetchHandle<Profile> {
///     use_data_fetch(
///         user_id,
///         FetchOptions::default().with_error_message("Failed to load profile"),
///         move || async move {
///             let api_client = get_api_client();
///             api_client
///                 .get_profile(&user_id)
///                 .await
///                 .map_err(|e| e.to_string())
///         },
///     )
/// }
/// ```
#[hook]
pub fn use_data_fetch<T, D, F, Fut>(
    deps: D,
    options: FetchOptions<T>,
    fetch_fn: F,
) -> DataFetchHandle<T>
where
    T: Clone + 'static,
    D: PartialEq + Clone + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, String>> + 'static,
{
    // First-render options stick for the life of the hook instance.
    let options: Rc<FetchOptions<T>> = {
        let stored = use_mut_ref(|| Rc::new(options));
        let stored = stored.borrow();
        stored.clone()
    };

    let data = use_state({
        let seed = options.initial_data.clone();
        move || seed
    });
    let error = use_state(|| None::<String>);
    let is_loading = use_state(|| false);
    let scope = use_mut_ref(CancelScope::new);
    let attempts = use_mut_ref(|| 0u32);
    let tick = use_reducer(|| RetryTick(0));
    // Optional on purpose: fetches outside a ToastProvider just skip the
    // toast instead of panicking.
    let toast = use_context::<ToastContext>();

    let run_fetch = {
        let data = data.clone();
        let error = error.clone();
        let is_loading = is_loading.clone();
        let scope = scope.clone();
        let attempts = attempts.clone();
        let tick = tick.clone();
        let toast = toast.clone();
        let options = options.clone();
        let fetch_fn = Rc::new(fetch_fn);

        use_callback(deps.clone(), move |_, _| {
            let data = data.clone();
            let error = error.clone();
            let is_loading = is_loading.clone();
            let attempts = attempts.clone();
            let tick = tick.clone();
            let toast = toast.clone();
            let options = options.clone();
            let fetch_fn = fetch_fn.clone();

            // Supersedes any in-flight attempt from this instance.
            let token = scope.borrow().begin_flight();

            yew::platform::spawn_local(async move {
                if !token.is_live() {
                    return;
                }
                is_loading.set(true);
                error.set(None);

                if let Some(delay_ms) = options.mock_delay_ms {
                    TimeoutFuture::new(delay_ms).await;
                }

                let outcome = fetch_fn().await;
                if !token.is_live() {
                    // Superseded or unmounted while awaiting; a newer
                    // flight (if any) owns the state now.
                    return;
                }

                match outcome {
                    Ok(value) => {
                        *attempts.borrow_mut() = 0;
                        error.set(None);
                        data.set(Some(value.clone()));
                        if let Some(callback) = &options.on_success {
                            callback.emit(value);
                        }
                    }
                    Err(message) => {
                        let message = if message.trim().is_empty() {
                            options
                                .error_message
                                .clone()
                                .unwrap_or_else(|| {
                                    DEFAULT_ERROR_MESSAGE.to_string()
                                })
                        } else {
                            message
                        };

                        // A failed fetch discards the previous value; see
                        // the hook docs.
                        data.set(None);
                        error.set(Some(message.clone()));

                        if options.show_error_toast
                            && let Some(context) = &toast
                        {
                            ToastHandle::new(context.clone())
                                .error(message.clone());
                        }
                        match &options.on_error {
                            Some(callback) => callback.emit(message.clone()),
                            None => tracing::error!(
                                error = %message,
                                "fetch failed"
                            ),
                        }

                        let used = *attempts.borrow();
                        if options.retry.allows_retry(used) {
                            *attempts.borrow_mut() = used + 1;
                            let delay_ms = options.retry.delay_ms;
                            let retry_token = token.clone();
                            yew::platform::spawn_local(async move {
                                TimeoutFuture::new(delay_ms).await;
                                // Superseded or unmounted while waiting:
                                // drop the retry.
                                if retry_token.is_live() {
                                    tick.dispatch(());
                                }
                            });
                        }
                    }
                }

                is_loading.set(false);
            });
        })
    };

    // Auto-fetch on mount, dependency changes, and retry ticks
    {
        let run_fetch = run_fetch.clone();
        let fetch_on_mount = options.fetch_on_mount;

        use_effect_with((deps, tick.0), move |(_, tick_count)| {
            // Retry ticks re-enter the fetch even for manual hooks.
            if fetch_on_mount || *tick_count > 0 {
                run_fetch.emit(());
            }
        });
    }

    // Unmount: kill outstanding flights so late resolutions are no-ops.
    {
        let scope = scope.borrow().clone();
        use_effect_with((), move |_| move || scope.close());
    }

    let refetch = {
        let run_fetch = run_fetch.clone();
        Callback::from(move |_| run_fetch.emit(()))
    };
    let retry = {
        let run_fetch = run_fetch.clone();
        let attempts = attempts.clone();
        Callback::from(move |_| {
            *attempts.borrow_mut() = 0;
            run_fetch.emit(());
        })
    };
    let set_data = {
        let data = data.clone();
        Callback::from(move |value: Option<T>| data.set(value))
    };

    DataFetchHandle {
        data: (*data).clone(),
        is_loading: *is_loading,
        error: (*error).clone(),
        refetch,
        set_data,
        retry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_policy_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.count, 0);
        assert_eq!(policy.delay_ms, 1000);
        assert!(!policy.allows_retry(0));
    }

    /// An always-failing adapter runs 1 + count times, then stops for good.
    #[test]
    fn retry_bound_is_one_initial_plus_count() {
        let policy = RetryPolicy::new(2, 10);
        let mut attempts_used = 0u32;
        let mut invocations = 0u32;

        loop {
            invocations += 1; // adapter runs and fails
            if policy.allows_retry(attempts_used) {
                attempts_used += 1;
            } else {
                break;
            }
        }

        assert_eq!(invocations, 3);
        // Exhausted: nothing re-arms until the counter is reset.
        assert!(!policy.allows_retry(attempts_used));

        // Manual retry() zeroes the counter and the cycle restarts.
        attempts_used = 0;
        assert!(policy.allows_retry(attempts_used));
    }

    #[test]
    fn fetch_options_defaults() {
        let options = FetchOptions::<u32>::default();
        assert!(options.fetch_on_mount);
        assert!(options.show_error_toast);
        assert!(options.initial_data.is_none());
        assert!(options.error_message.is_none());
        assert_eq!(options.retry, RetryPolicy::default());
        assert!(options.mock_delay_ms.is_none());
    }

    #[test]
    fn fetch_options_builders_compose() {
        let options = FetchOptions::<u32>::default()
            .manual()
            .silent()
            .with_initial_data(5)
            .with_error_message("nope")
            .with_retry(RetryPolicy::new(3, 250));

        assert!(!options.fetch_on_mount);
        assert!(!options.show_error_toast);
        assert_eq!(options.initial_data, Some(5));
        assert_eq!(options.error_message.as_deref(), Some("nope"));
        assert_eq!(options.retry, RetryPolicy::new(3, 250));
    }
}
