//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands, organized by domain.
//! Backend errors arrive as a serialized `FetchError`.

mod list;
mod payment;
mod session;
mod support;

use paged_list::FetchError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

/// Invoke `cmd` with `args`, decoding either the result or the backend error
async fn call<A, R>(cmd: &str, args: &A) -> Result<R, FetchError>
where
    A: Serialize + ?Sized,
    R: DeserializeOwned,
{
    // json_compatible: filter maps must reach the backend as plain objects
    let js_args = args
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| FetchError::transport(e.to_string()))?;
    match invoke(cmd, js_args).await {
        Ok(value) => serde_wasm_bindgen::from_value(value)
            .map_err(|e| FetchError::transport(format!("{}: bad response: {}", cmd, e))),
        Err(err) => Err(decode_error(err)),
    }
}

fn decode_error(err: JsValue) -> FetchError {
    if let Ok(fetch) = serde_wasm_bindgen::from_value::<FetchError>(err.clone()) {
        return fetch;
    }
    match err.as_string() {
        Some(message) => FetchError::transport(message),
        None => FetchError::transport(format!("{:?}", err)),
    }
}

#[derive(Serialize)]
struct NoArgs {}

// Re-export all public items
pub use list::*;
pub use payment::*;
pub use session::*;
pub use support::*;
