//! Thin wrappers over browser APIs the console needs.

use web_sys::window;

/// Blocking confirmation dialog. Anything other than an explicit "OK",
/// including a missing window, counts as a decline.
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Blocking alert dialog.
pub fn alert(message: &str) {
    if let Some(w) = window() {
        if w.alert_with_message(message).is_err() {
            dioxus_logger::tracing::warn!("Failed to show alert: {}", message);
        }
    }
}

/// Scroll an element with the given id to its bottom edge. Missing elements
/// are ignored.
pub fn scroll_to_bottom(element_id: &str) {
    let Some(element) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(element_id))
    else {
        return;
    };
    element.set_scroll_top(element.scroll_height());
}
