//! Скачивание готового файла выгрузки в браузере

use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use super::{ExportError, ExportFile};

fn err(what: &str, e: impl std::fmt::Debug) -> ExportError {
    ExportError::Download(format!("{what}: {e:?}"))
}

/// Создает Blob из байтов файла
fn create_blob(file: &ExportFile) -> Result<Blob, ExportError> {
    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::new();
    parts.push(&bytes.buffer());

    let properties = BlobPropertyBag::new();
    properties.set_type(file.mime);

    Blob::new_with_buffer_source_sequence_and_options(&parts, &properties)
        .map_err(|e| err("Failed to create blob", e))
}

/// Инициирует скачивание через временную ссылку
pub fn download(file: &ExportFile) -> Result<(), ExportError> {
    let blob = create_blob(file)?;

    let window = web_sys::window().ok_or_else(|| err("No window object", ()))?;
    let document = window
        .document()
        .ok_or_else(|| err("No document object", ()))?;
    let body = document.body().ok_or_else(|| err("No body element", ()))?;

    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| err("Failed to create object URL", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| err("Failed to create anchor", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| err("Failed to cast to anchor", e))?;

    anchor.set_href(&url);
    anchor.set_download(&file.file_name);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| err("Failed to set style", e))?;

    body.append_child(&anchor)
        .map_err(|e| err("Failed to append anchor", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| err("Failed to remove anchor", e))?;

    Url::revoke_object_url(&url).map_err(|e| err("Failed to revoke URL", e))?;

    log::info!("downloaded {} ({} bytes)", file.file_name, file.bytes.len());
    Ok(())
}
