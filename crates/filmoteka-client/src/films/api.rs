use filmoteka_models::{Film, FilmsResponse};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use crate::error::ClientError;
use crate::films::query::FilmsQuery;

pub const AUTH_HEADER: &str = "X-Auth-Token";

/// Make sure resource paths can be appended to the base URL
pub fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}

/// Attach the auth token header when a token is present
fn with_token(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.header(AUTH_HEADER, token),
        None => request,
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let url = response.url().to_string();
    let body = response.text().await?;

    if !status.is_success() {
        debug!("Request to {} failed: {} - {}", url, status, body);
        return Err(ClientError::from_status(status.as_u16(), &url, &body));
    }

    serde_json::from_str(&body).map_err(|e| ClientError::Decode(format!("{} ({})", e, url)))
}

/// Fetch a single film
pub async fn get_film(
    client: &Client,
    base_url: &str,
    token: Option<&str>,
    id: u64,
) -> Result<Film, ClientError> {
    let url = format!("{}films/{}", base_url, id);
    debug!("GET {}", url);

    let response = with_token(client.get(&url), token)
        .header("Accept", "application/json")
        .send()
        .await?;

    read_json(response).await
}

/// Store a film; the server replaces the whole record and echoes it back
pub async fn save_film(
    client: &Client,
    base_url: &str,
    token: Option<&str>,
    film: &Film,
) -> Result<Film, ClientError> {
    let url = format!("{}films/", base_url);
    debug!("POST {} (id={:?})", url, film.id);

    let response = with_token(client.post(&url), token)
        .header("Accept", "application/json")
        .json(film)
        .send()
        .await?;

    read_json(response).await
}

/// Fetch one page of the film list
pub async fn get_films(
    client: &Client,
    base_url: &str,
    token: Option<&str>,
    query: &FilmsQuery,
) -> Result<FilmsResponse, ClientError> {
    let url = format!("{}films", base_url);
    let params = query.to_params();
    debug!("GET {} params={:?}", url, params);

    let mut request = with_token(client.get(&url), token).header("Accept", "application/json");
    if !params.is_empty() {
        request = request.query(&params);
    }

    read_json(request.send().await?).await
}
