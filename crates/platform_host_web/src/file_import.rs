//! Hidden `<input type="file">` plus `FileReader` implementation of [`FileImportService`].

use platform_host::{FileImportFuture, FileImportService, ImportedFile};

#[cfg(target_arch = "wasm32")]
use futures::channel::oneshot;
#[cfg(target_arch = "wasm32")]
use std::{cell::RefCell, rc::Rc};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

#[derive(Debug, Clone, Copy, Default)]
/// Browser file picker reading the chosen file as a data URI.
pub struct WebFileImportService;

impl FileImportService for WebFileImportService {
    fn pick_file<'a>(
        &'a self,
        accept: &'a str,
    ) -> FileImportFuture<'a, Result<ImportedFile, String>> {
        Box::pin(async move { pick_file(accept).await })
    }
}

async fn pick_file(accept: &str) -> Result<ImportedFile, String> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = accept;
        Err("file import is only available when compiled for wasm32".to_string())
    }

    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
        let document = window
            .document()
            .ok_or_else(|| "document unavailable".to_string())?;
        let input = document
            .create_element("input")
            .map_err(|err| format!("failed to create file input: {err:?}"))?
            .dyn_into::<web_sys::HtmlInputElement>()
            .map_err(|_| "failed to cast file input".to_string())?;
        input.set_type("file");
        input.set_accept(accept);
        input.set_hidden(true);

        if let Some(body) = document.body() {
            let _ = body.append_child(&input);
        }

        let (tx, rx) = oneshot::channel::<Result<web_sys::File, String>>();
        let sender = Rc::new(RefCell::new(Some(tx)));
        let input_for_change = input.clone();
        let on_change = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_| {
            let result = input_for_change
                .files()
                .and_then(|files| files.get(0))
                .ok_or_else(|| "no file selected".to_string());
            if let Some(tx) = sender.borrow_mut().take() {
                let _ = tx.send(result);
            }
        }));
        input.set_onchange(Some(on_change.as_ref().unchecked_ref()));
        input.click();

        let picked = rx.await.map_err(|_| "file picker was cancelled".to_string());
        input.remove();
        on_change.forget();
        let file = picked??;

        let data_uri = read_as_data_uri(&file).await?;
        Ok(ImportedFile {
            name: file.name(),
            mime_type: file.type_(),
            size_bytes: file.size() as u64,
            data_uri,
        })
    }
}

#[cfg(target_arch = "wasm32")]
async fn read_as_data_uri(file: &web_sys::File) -> Result<String, String> {
    let reader = web_sys::FileReader::new().map_err(|err| format!("{err:?}"))?;
    let (tx, rx) = oneshot::channel::<Result<String, String>>();
    let sender = Rc::new(RefCell::new(Some(tx)));

    let reader_for_load = reader.clone();
    let load_sender = sender.clone();
    let on_load = Closure::<dyn FnMut(web_sys::ProgressEvent)>::wrap(Box::new(move |_| {
        let result = reader_for_load
            .result()
            .map_err(|err| format!("failed to read file: {err:?}"))
            .and_then(|value| {
                value
                    .as_string()
                    .ok_or_else(|| "file reader returned non-string result".to_string())
            });
        if let Some(tx) = load_sender.borrow_mut().take() {
            let _ = tx.send(result);
        }
    }));
    reader.set_onload(Some(on_load.as_ref().unchecked_ref()));

    let on_error = Closure::<dyn FnMut(web_sys::ProgressEvent)>::wrap(Box::new(move |_| {
        if let Some(tx) = sender.borrow_mut().take() {
            let _ = tx.send(Err("failed to load file".to_string()));
        }
    }));
    reader.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    reader
        .read_as_data_url(file)
        .map_err(|err| format!("failed to start file read: {err:?}"))?;

    let result = rx
        .await
        .map_err(|_| "file read was interrupted".to_string())?;
    on_load.forget();
    on_error.forget();
    result
}
