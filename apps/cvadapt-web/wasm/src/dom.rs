//! Thin DOM plumbing shared by the app controller.

use js_sys::{Array, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Blob, BlobPropertyBag, Document, Element, HtmlAnchorElement, HtmlButtonElement,
    HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, Url, Window,
};

/// How long the transient error banner stays visible.
const ERROR_BANNER_MS: i32 = 8_000;

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("No document object available"))
}

fn element(id: &str) -> Result<Element, JsValue> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Element #{} not found", id)))
}

fn typed_element<T: JsCast>(id: &str) -> Result<T, JsValue> {
    element(id)?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Element #{} has unexpected type", id)))
}

/// Toggle the `hidden` class on an element.
pub fn set_hidden(id: &str, hidden: bool) -> Result<(), JsValue> {
    let classes = element(id)?.class_list();
    if hidden {
        classes.add_1("hidden")?;
    } else {
        classes.remove_1("hidden")?;
    }
    Ok(())
}

pub fn set_disabled(id: &str, disabled: bool) -> Result<(), JsValue> {
    typed_element::<HtmlButtonElement>(id)?.set_disabled(disabled);
    Ok(())
}

pub fn set_text(id: &str, text: &str) -> Result<(), JsValue> {
    element(id)?.set_text_content(Some(text));
    Ok(())
}

/// Assign a pre-rendered fragment. Callers must only pass markup produced
/// by `cvadapt_core::view`, which escapes all user text.
pub fn set_html(id: &str, html: &str) -> Result<(), JsValue> {
    element(id)?.set_inner_html(html);
    Ok(())
}

pub fn input_value(id: &str) -> Result<String, JsValue> {
    Ok(typed_element::<HtmlInputElement>(id)?.value())
}

pub fn textarea_value(id: &str) -> Result<String, JsValue> {
    Ok(typed_element::<HtmlTextAreaElement>(id)?.value())
}

pub fn select_value(id: &str) -> Result<String, JsValue> {
    Ok(typed_element::<HtmlSelectElement>(id)?.value())
}

/// Fill a `<select>` with one option per value, labelled in upper case.
pub fn populate_select(id: &str, values: &[String]) -> Result<(), JsValue> {
    let document = document()?;
    let select = typed_element::<HtmlSelectElement>(id)?;
    for value in values {
        let option = document.create_element("option")?;
        option.set_attribute("value", value)?;
        option.set_text_content(Some(&value.to_uppercase()));
        select.append_child(&option)?;
    }
    Ok(())
}

pub fn alert(message: &str) -> Result<(), JsValue> {
    window()?.alert_with_message(message)
}

pub fn open_in_new_tab(url: &str) -> Result<(), JsValue> {
    window()?.open_with_url_and_target(url, "_blank")?;
    Ok(())
}

/// Trigger a browser download of `bytes` via a transient object URL.
/// The URL is revoked once the synthetic click has fired.
pub fn download_bytes(bytes: &[u8], filename: &str, mime: &str) -> Result<(), JsValue> {
    let array = Uint8Array::new_with_length(bytes.len() as u32);
    array.copy_from(bytes);
    let parts = Array::new();
    parts.push(&array);

    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = document()?.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    Url::revoke_object_url(&url)?;
    Ok(())
}

/// Show the transient error banner. At most one is visible: any existing
/// banner is removed first, and the new one auto-dismisses after
/// [`ERROR_BANNER_MS`].
pub fn show_error(message: &str) -> Result<(), JsValue> {
    let document = document()?;

    if let Some(existing) = document.query_selector(".error-message")? {
        existing.remove();
    }

    let banner = document.create_element("div")?;
    banner.set_class_name("error-message");
    banner.set_text_content(Some(message));

    let host = document
        .query_selector(".form-section")?
        .ok_or_else(|| JsValue::from_str("No .form-section element"))?;
    host.append_child(&banner)?;

    let dismiss = Closure::once(move || banner.remove());
    window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
        dismiss.as_ref().unchecked_ref(),
        ERROR_BANNER_MS,
    )?;
    dismiss.forget();

    Ok(())
}
