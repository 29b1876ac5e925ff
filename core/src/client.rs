//! Stateless HTTP request builder and response parser for the hero API.
//!
//! # Design
//! `HeroClient` holds only the heroes endpoint URL. Each operation is split
//! into a `build_*` method that produces an `HttpRequest` and a `parse_*`
//! method that consumes an `HttpResponse`. Nothing here does I/O.

use url::form_urlencoded;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Hero, NewHero};

/// Path of the heroes collection, relative to the API base URL.
pub const HEROES_PATH: &str = "/api/heroes";

/// Synchronous, stateless client for the hero API.
#[derive(Debug, Clone)]
pub struct HeroClient {
    heroes_url: String,
}

impl HeroClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            heroes_url: format!("{}{HEROES_PATH}", base_url.trim_end_matches('/')),
        }
    }

    pub fn heroes_url(&self) -> &str {
        &self.heroes_url
    }

    pub fn build_get_heroes(&self) -> HttpRequest {
        get(self.heroes_url.clone())
    }

    pub fn build_get_hero(&self, id: u32) -> HttpRequest {
        get(format!("{}/{id}", self.heroes_url))
    }

    /// Filters the collection by id instead of addressing the hero directly,
    /// so a missing hero comes back as an empty list rather than a 404.
    pub fn build_get_hero_no_404(&self, id: u32) -> HttpRequest {
        get(format!("{}?id={id}", self.heroes_url))
    }

    pub fn build_search_heroes(&self, term: &str) -> HttpRequest {
        let term: String = form_urlencoded::byte_serialize(term.as_bytes()).collect();
        get(format!("{}?name={term}", self.heroes_url))
    }

    pub fn build_add_hero(&self, hero: &NewHero) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Post, self.heroes_url.clone(), hero)
    }

    pub fn build_update_hero(&self, hero: &Hero) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Put, self.heroes_url.clone(), hero)
    }

    pub fn build_delete_hero(&self, id: u32) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/{id}", self.heroes_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_get_heroes(&self, response: HttpResponse) -> Result<Vec<Hero>, ApiError> {
        check_status(&response, &[200])?;
        decode(&response.body)
    }

    pub fn parse_get_hero(&self, response: HttpResponse) -> Result<Hero, ApiError> {
        check_status(&response, &[200])?;
        decode(&response.body)
    }

    /// The store answers with a zero- or one-element list; an empty list is
    /// `Ok(None)`, not an error.
    pub fn parse_get_hero_no_404(&self, response: HttpResponse) -> Result<Option<Hero>, ApiError> {
        check_status(&response, &[200])?;
        let heroes: Vec<Hero> = decode(&response.body)?;
        Ok(heroes.into_iter().next())
    }

    pub fn parse_search_heroes(&self, response: HttpResponse) -> Result<Vec<Hero>, ApiError> {
        check_status(&response, &[200])?;
        decode(&response.body)
    }

    pub fn parse_add_hero(&self, response: HttpResponse) -> Result<Hero, ApiError> {
        check_status(&response, &[201])?;
        decode(&response.body)
    }

    pub fn parse_update_hero(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, &[204, 200])
    }

    pub fn parse_delete_hero(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, &[204, 200])
    }
}

fn get(path: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn with_json<T: serde::Serialize>(
    method: HttpMethod,
    path: String,
    payload: &T,
) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(payload).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map unexpected status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: &[u16]) -> Result<(), ApiError> {
    if expected.contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
