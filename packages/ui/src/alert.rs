/// Show a blocking message to the user.
///
/// In the browser this is `window.alert`; elsewhere the message goes to the log.
pub fn alert(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if window.alert_with_message(message).is_ok() {
                return;
            }
        }
        tracing::warn!("Could not show alert: {}", message);
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::warn!("{}", message);
    }
}
