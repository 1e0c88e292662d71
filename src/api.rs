//! Browser-side calls: the record endpoints, page query and file uploads.

use crate::codec::{decode, encode, Message};
use crate::config::{self, EditTarget};
use crate::error::EditorError;
use crate::record::{Dataset, Reaction};
use crate::validation::ValidationOutput;
use log::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response, UrlSearchParams};

fn window() -> Result<web_sys::Window, EditorError> {
    web_sys::window().ok_or(EditorError::MissingBrowserApi("window"))
}

fn document() -> Result<web_sys::Document, EditorError> {
    window()?
        .document()
        .ok_or(EditorError::MissingBrowserApi("document"))
}

async fn send(method: &str, url: &str, body: Option<&[u8]>) -> Result<Response, EditorError> {
    let init = RequestInit::new();
    init.set_method(method);
    if let Some(bytes) = body {
        let array = js_sys::Uint8Array::from(bytes);
        init.set_body(&array.into());
    }
    let request = Request::new_with_str_and_init(url, &init)
        .map_err(|e| EditorError::from_js(url, e))?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", config::RECORD_CONTENT_TYPE)
            .map_err(|e| EditorError::from_js(url, e))?;
    }
    let value = JsFuture::from(window()?.fetch_with_request(&request))
        .await
        .map_err(|e| EditorError::from_js(url, e))?;
    let response: Response = value
        .dyn_into()
        .map_err(|e| EditorError::from_js(url, e))?;
    debug!("{} {} -> {}", method, url, response.status());
    Ok(response)
}

fn ensure_ok(response: &Response, url: &str) -> Result<(), EditorError> {
    if response.ok() {
        Ok(())
    } else {
        Err(EditorError::Http {
            status: response.status(),
            url: url.to_string(),
        })
    }
}

async fn body_bytes(response: &Response, url: &str) -> Result<Vec<u8>, EditorError> {
    let promise = response
        .array_buffer()
        .map_err(|e| EditorError::from_js(url, e))?;
    let buffer = JsFuture::from(promise)
        .await
        .map_err(|e| EditorError::from_js(url, e))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

async fn get_record<M: Message>(url: &str) -> Result<M, EditorError> {
    let response = send("GET", url, None).await?;
    ensure_ok(&response, url)?;
    decode(&body_bytes(&response, url).await?)
}

async fn post(url: &str, body: &[u8]) -> Result<Response, EditorError> {
    let response = send("POST", url, Some(body)).await?;
    ensure_ok(&response, url)?;
    Ok(response)
}

pub async fn fetch_reaction(reaction_id: &str) -> Result<Reaction, EditorError> {
    get_record(&config::reaction_url(reaction_id)).await
}

pub async fn fetch_dataset(name: &str) -> Result<Dataset, EditorError> {
    get_record(&config::dataset_read_url(name)).await
}

pub async fn put_dataset(name: &str, dataset: &Dataset) -> Result<(), EditorError> {
    post(&config::dataset_write_url(name), &encode(dataset)?).await?;
    Ok(())
}

/// True when the server's copy of `name` equals `dataset`.
pub async fn compare_dataset(name: &str, dataset: &Dataset) -> Result<bool, EditorError> {
    let url = config::dataset_compare_url(name);
    let response = send("POST", &url, Some(&encode(dataset)?)).await?;
    Ok(response.status() == 200)
}

/// POST an encoded sub-record to the validator for its type.
pub async fn validate(type_name: &str, body: &[u8]) -> Result<ValidationOutput, EditorError> {
    let url = config::validate_url(type_name);
    let response = post(&url, body).await?;
    serde_json::from_slice(&body_bytes(&response, &url).await?).map_err(|source| {
        EditorError::Decode {
            type_name: "ValidationOutput",
            source,
        }
    })
}

/// HTML summary of the reaction, delivered as a JSON string.
pub async fn render_reaction(reaction: &Reaction) -> Result<String, EditorError> {
    let url = config::RENDER_REACTION_PATH;
    let response = post(url, &encode(reaction)?).await?;
    serde_json::from_slice(&body_bytes(&response, url).await?).map_err(|source| {
        EditorError::Decode {
            type_name: "RenderedReaction",
            source,
        }
    })
}

/// Have the server format the reaction and save the result as a file.
pub async fn download_reaction(reaction: &Reaction) -> Result<(), EditorError> {
    let url = config::DOWNLOAD_REACTION_PATH;
    let response = post(url, &encode(reaction)?).await?;
    let blob: web_sys::Blob = JsFuture::from(
        response
            .blob()
            .map_err(|e| EditorError::from_js(url, e))?,
    )
    .await
    .map_err(|e| EditorError::from_js(url, e))?
    .dyn_into()
    .map_err(|e| EditorError::from_js(url, e))?;

    let object_url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|e| EditorError::from_js("object url", e))?;
    let document = document()?;
    let link: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| EditorError::from_js("create link", e))?
        .dyn_into()
        .map_err(|_| EditorError::MissingBrowserApi("HtmlAnchorElement"))?;
    link.set_href(&object_url);
    link.set_download(config::DOWNLOAD_FILENAME);
    let body = document
        .body()
        .ok_or(EditorError::MissingBrowserApi("document.body"))?;
    body.append_child(&link)
        .map_err(|e| EditorError::from_js("attach link", e))?;
    link.click();
    body.remove_child(&link)
        .map_err(|e| EditorError::from_js("detach link", e))?;
    web_sys::Url::revoke_object_url(&object_url)
        .map_err(|e| EditorError::from_js("object url", e))?;
    Ok(())
}

/// Text content of a file picked by the user.
pub async fn read_file_text(file: web_sys::File) -> Result<String, EditorError> {
    let text = JsFuture::from(file.text())
        .await
        .map_err(|e| EditorError::from_js("read file", e))?;
    text.as_string()
        .ok_or_else(|| EditorError::Network(format!("{} is not text", file.name())))
}

/// Resolve the edit target from the page's query string.
pub fn resolve_target() -> Result<EditTarget, EditorError> {
    let search = window()?
        .location()
        .search()
        .map_err(|e| EditorError::from_js("location", e))?;
    let params =
        UrlSearchParams::new_with_str(&search).map_err(|e| EditorError::from_js("query", e))?;
    EditTarget::resolve(
        params.get(config::QUERY_DATASET),
        params.get(config::QUERY_INDEX),
        params.get(config::QUERY_REACTION_ID),
    )
}

/// Set the `ready` attribute on `<body>` for external test drivers.
pub fn mark_body_ready() -> Result<(), EditorError> {
    document()?
        .body()
        .ok_or(EditorError::MissingBrowserApi("document.body"))?
        .set_attribute("ready", "true")
        .map_err(|e| EditorError::from_js("body", e))
}
