pub mod toast;

pub use toast::{Toast, ToastProvider, ToastSeverity, use_toast};
