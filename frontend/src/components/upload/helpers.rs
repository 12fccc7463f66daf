//! Small DOM utilities shared by the upload form's update and view code.

use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlInputElement};

use crate::workflow::{Notice, NoticeLevel};

/// Displays a temporary notification at the bottom of the screen.
///
/// A styled `div` is appended to `body` and removes itself after a few
/// seconds. The text is set as plain text, so server messages are never
/// interpreted as markup.
pub fn show_toast(notice: &Notice) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };

    toast.set_text_content(Some(&notice.text));
    let html_toast: HtmlElement = toast.unchecked_into();
    let background = match notice.level {
        NoticeLevel::Success => "rgba(46, 125, 50, 0.9)",
        NoticeLevel::Error => "rgba(198, 40, 40, 0.9)",
    };
    let style = html_toast.style();
    style.set_property("position", "fixed").ok();
    style.set_property("bottom", "20px").ok();
    style.set_property("left", "50%").ok();
    style.set_property("transform", "translateX(-50%)").ok();
    style.set_property("background", background).ok();
    style.set_property("color", "#fff").ok();
    style.set_property("padding", "10px 20px").ok();
    style.set_property("border-radius", "4px").ok();
    style.set_property("z-index", "10000").ok();
    style.set_property("font-family", "Arial, sans-serif").ok();

    if body.append_child(&html_toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(3000).await;
            if let Some(parent) = html_toast.parent_node() {
                parent.remove_child(&html_toast).ok();
            }
        });
    }
}

/// First file picked in a `<input type="file">`, if any.
pub fn picked_file(input: &HtmlInputElement) -> Option<web_sys::File> {
    input.files().and_then(|files| files.get(0))
}
