//! Session Commands

use paged_list::FetchError;
use serde::Serialize;

use super::{call, NoArgs};
use crate::models::ApiConfig;

#[derive(Serialize)]
struct TokenArgs<'a> {
    token: Option<&'a str>,
}

pub async fn set_auth_token(token: Option<&str>) -> Result<(), FetchError> {
    call("set_auth_token", &TokenArgs { token }).await
}

pub async fn get_api_config() -> Result<ApiConfig, FetchError> {
    call("get_api_config", &NoArgs {}).await
}

pub async fn get_recent_logs() -> Result<Vec<String>, FetchError> {
    call("get_recent_logs", &NoArgs {}).await
}
