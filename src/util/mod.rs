use wasm_bindgen_futures::JsFuture;

use crate::store::Attachment;

pub(crate) const SITE_NAME: &str = "Quirkitopia Space!";

pub(crate) fn now_ms() -> i64 {
    js_sys::Date::now().round() as i64
}

pub(crate) fn page_title(page: &str) -> String {
    format!("{SITE_NAME} | {page}")
}

pub(crate) fn set_document_title(page: &str) {
    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        doc.set_title(&page_title(page));
    }
}

/// Server timestamp (RFC 3339) in the browser's locale.
pub(crate) fn format_timestamp(ts: &str) -> String {
    let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_str(ts));
    if date.get_time().is_nan() {
        return ts.to_string();
    }
    String::from(date.to_locale_string("default", &wasm_bindgen::JsValue::UNDEFINED))
}

/// Blocking browser confirm; a missing window counts as "no".
pub(crate) fn confirm_dialog(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Reads a picked file into memory for upload.
pub(crate) async fn read_attachment(file: &web_sys::File) -> Result<Attachment, String> {
    let buf = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("could not read `{}`: {e:?}", file.name()))?;
    Ok(Attachment {
        file_name: file.name(),
        content_type: file.type_(),
        bytes: js_sys::Uint8Array::new(&buf).to_vec(),
    })
}
