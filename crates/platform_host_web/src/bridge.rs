//! JS interop for browser capabilities that `web-sys` does not cover directly, plus the non-wasm
//! fallback shim.

#[cfg(target_arch = "wasm32")]
mod imp {
    use js_sys::Promise;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;

    #[wasm_bindgen(inline_js = r#"
export function jsReadClipboardText() {
  if (typeof navigator === 'undefined' || !navigator.clipboard || !navigator.clipboard.readText) {
    return Promise.reject(new Error('Clipboard API is unavailable in this browser context'));
  }
  return navigator.clipboard.readText();
}
"#)]
    extern "C" {
        #[wasm_bindgen(js_name = jsReadClipboardText)]
        fn js_read_clipboard_text() -> Promise;
    }

    pub(crate) fn js_error_to_string(err: JsValue) -> String {
        if let Some(text) = err.as_string() {
            return text;
        }
        if let Ok(message) = js_sys::Reflect::get(&err, &JsValue::from_str("message")) {
            if let Some(text) = message.as_string() {
                return text;
            }
        }
        format!("{err:?}")
    }

    pub async fn read_clipboard_text() -> Result<String, String> {
        let value = JsFuture::from(js_read_clipboard_text())
            .await
            .map_err(js_error_to_string)?;
        value
            .as_string()
            .ok_or_else(|| "clipboard returned non-text data".to_string())
    }

    pub async fn open_external_url(url: &str) -> Result<(), String> {
        let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
        window
            .open_with_url_and_target(url, "_blank")
            .map_err(js_error_to_string)?;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    pub async fn read_clipboard_text() -> Result<String, String> {
        Err("clipboard access is only available when compiled for wasm32".to_string())
    }

    pub async fn open_external_url(_url: &str) -> Result<(), String> {
        Ok(())
    }
}

pub use imp::*;
