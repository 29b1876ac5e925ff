use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

/// Id handed out when the store is empty.
const FIRST_ID: u32 = 11;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: u32,
    pub name: String,
}

#[derive(Deserialize)]
pub struct NewHero {
    pub name: String,
}

/// Optional collection filters: `id` matches exactly, `name` is a
/// case-insensitive substring match.
#[derive(Debug, Default, Deserialize)]
pub struct HeroQuery {
    pub id: Option<u32>,
    pub name: Option<String>,
}

pub type Db = Arc<RwLock<BTreeMap<u32, Hero>>>;

pub fn seed_heroes() -> Vec<Hero> {
    [
        (11, "Dr. Nice"),
        (12, "Narco"),
        (13, "Bombasto"),
        (14, "Celeritas"),
        (15, "Magneta"),
        (16, "RubberMan"),
        (17, "Dynama"),
        (18, "Dr. IQ"),
        (19, "Magma"),
        (20, "Tornado"),
    ]
    .into_iter()
    .map(|(id, name)| Hero {
        id,
        name: name.to_string(),
    })
    .collect()
}

/// Router over the seeded store.
pub fn app() -> Router {
    app_with(seed_heroes())
}

pub fn app_with(heroes: Vec<Hero>) -> Router {
    let db: Db = Arc::new(RwLock::new(heroes.into_iter().map(|h| (h.id, h)).collect()));
    Router::new()
        .route(
            "/api/heroes",
            get(list_heroes).post(add_hero).put(update_hero),
        )
        .route("/api/heroes/{id}", get(get_hero).delete(delete_hero))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_heroes(State(db): State<Db>, Query(query): Query<HeroQuery>) -> Json<Vec<Hero>> {
    let heroes = db.read().await;
    let needle = query.name.map(|n| n.to_lowercase());
    let matches = heroes
        .values()
        .filter(|h| query.id.is_none_or(|id| h.id == id))
        .filter(|h| {
            needle
                .as_deref()
                .is_none_or(|n| h.name.to_lowercase().contains(n))
        })
        .cloned()
        .collect();
    Json(matches)
}

async fn add_hero(State(db): State<Db>, Json(input): Json<NewHero>) -> (StatusCode, Json<Hero>) {
    let mut heroes = db.write().await;
    let id = heroes.keys().next_back().map_or(FIRST_ID, |max| max + 1);
    let hero = Hero {
        id,
        name: input.name,
    };
    heroes.insert(id, hero.clone());
    tracing::debug!(id, "hero added");
    (StatusCode::CREATED, Json(hero))
}

async fn get_hero(State(db): State<Db>, Path(id): Path<u32>) -> Result<Json<Hero>, StatusCode> {
    let heroes = db.read().await;
    heroes.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_hero(State(db): State<Db>, Json(input): Json<Hero>) -> StatusCode {
    let mut heroes = db.write().await;
    match heroes.get_mut(&input.id) {
        Some(hero) => {
            *hero = input;
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn delete_hero(State(db): State<Db>, Path(id): Path<u32>) -> StatusCode {
    let mut heroes = db.write().await;
    match heroes.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}
