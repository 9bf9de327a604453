#![forbid(unsafe_code)]

//! `fetch`-backed relay.
//!
//! One POST of the request JSON to the configured endpoint. A non-2xx
//! response is classified from its status and body text; a rejected
//! promise (network error, CORS) is classified from the thrown message.

use folio_site::{Relay, RelayFailure, RelayRequest};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::storage::js_error;

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct FetchRelay;

impl Relay for FetchRelay {
    async fn send(&self, request: &RelayRequest) -> Result<(), RelayFailure> {
        let body = request
            .to_json()
            .map_err(|err| RelayFailure::Other(format!("encode: {err}")))?;
        let response = post_json(&request.endpoint, &body)
            .await
            .map_err(|err| RelayFailure::classify(None, &js_error(&err)))?;
        if response.ok() {
            return Ok(());
        }
        let status = response.status();
        let reason = match response.text() {
            Ok(promise) => JsFuture::from(promise)
                .await
                .ok()
                .and_then(|text| text.as_string())
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| response.status_text()),
            Err(_) => response.status_text(),
        };
        Err(RelayFailure::classify(Some(status), &reason))
    }
}

async fn post_json(endpoint: &str, body: &str) -> Result<Response, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let headers = Headers::new()?;
    headers.set("Content-Type", "application/json")?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_mode(RequestMode::Cors);
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(endpoint, &init)?;
    let response = JsFuture::from(window.fetch_with_request(&request)).await?;
    response.dyn_into::<Response>()
}
