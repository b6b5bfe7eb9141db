//! PokeAPI client - listing, detail and species endpoints
//!
//! Every call is a fresh remote request; the remote catalog is treated as
//! immutable, so callers may cache results, but this layer does not.

use std::sync::OnceLock;

use serde::Deserialize;

use crate::state::{CatalogEntry, CatalogPage, EntryDetail, EntryStat, PAGE_SIZE};

const API_BASE: &str = "https://pokeapi.co/api/v2";

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    count: u32,
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    height: u16,
    weight: u16,
    stats: Vec<StatSlot>,
    types: Vec<TypeSlot>,
    sprites: Sprites,
}

#[derive(Clone, Debug, Deserialize)]
struct StatSlot {
    base_stat: u16,
    stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct Sprites {
    front_default: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct SpeciesResponse {
    flavor_text_entries: Vec<FlavorTextEntry>,
}

#[derive(Clone, Debug, Deserialize)]
struct FlavorTextEntry {
    flavor_text: String,
    language: NamedResource,
}

/// The remote source is unavailable: the transport failed or an endpoint
/// answered with a non-success status. Never retried here - the caller
/// decides whether to re-trigger the operation.
#[derive(Debug)]
pub enum ApiError {
    Request(reqwest::Error),
    Status(reqwest::StatusCode),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Request(e) => write!(f, "remote unavailable: {}", e),
            ApiError::Status(status) => write!(f, "remote unavailable: status {}", status),
        }
    }
}

impl std::error::Error for ApiError {}

/// Fetch one page of the catalog listing.
pub async fn fetch_page(page_number: u32) -> Result<CatalogPage, ApiError> {
    let offset = (page_number - 1) * PAGE_SIZE;
    let url = format!("{API_BASE}/pokemon?limit={PAGE_SIZE}&offset={offset}");
    let response: ListResponse = get_json(&url).await?;
    let entries = response
        .results
        .into_iter()
        .enumerate()
        .map(|(index, item)| CatalogEntry {
            id: resolve_entry_id(page_number, index, &item.url),
            name: item.name,
            url: item.url,
        })
        .collect();
    Ok(CatalogPage {
        entries,
        total_count: response.count,
        page_number,
    })
}

/// Fetch the full record for one entry. The detail and species endpoints
/// are independent and idempotent, so the two requests run concurrently;
/// both must succeed.
pub async fn fetch_detail(id: u32) -> Result<EntryDetail, ApiError> {
    let detail_url = format!("{API_BASE}/pokemon/{id}");
    let species_url = format!("{API_BASE}/pokemon-species/{id}");
    let (pokemon, species) = tokio::try_join!(
        get_json::<PokemonResponse>(&detail_url),
        get_json::<SpeciesResponse>(&species_url)
    )?;

    let stats = pokemon
        .stats
        .into_iter()
        .map(|slot| EntryStat {
            name: slot.stat.name,
            value: slot.base_stat,
        })
        .collect();
    let types = pokemon
        .types
        .into_iter()
        .map(|slot| slot.type_info.name)
        .collect();
    let flavor_text = species
        .flavor_text_entries
        .iter()
        .find(|entry| entry.language.name == "en")
        .map(|entry| sanitize_text(&entry.flavor_text));

    Ok(EntryDetail {
        id: pokemon.id,
        name: pokemon.name,
        height: pokemon.height,
        weight: pokemon.weight,
        stats,
        types,
        sprite: pokemon.sprites.front_default,
        flavor_text,
    })
}

/// Resolves the numeric id for the `index`-th row (0-based) of a freshly
/// fetched 1-based page.
///
/// The listing endpoint does not return ids, only a reference URL ending in
/// `/{id}/`. A fresh page is contiguously numbered, so the position on the
/// page is authoritative; the URL segment is only consulted for a row the
/// position cannot place (an oversized response). The two derivations agree
/// whenever the remote numbers its rows contiguously.
pub fn resolve_entry_id(page_number: u32, index: usize, url: &str) -> u32 {
    if (index as u32) < PAGE_SIZE {
        positional_id(page_number, index)
    } else {
        id_from_url(url).unwrap_or_else(|| positional_id(page_number, index))
    }
}

fn positional_id(page_number: u32, index: usize) -> u32 {
    (page_number - 1) * PAGE_SIZE + index as u32 + 1
}

/// Trailing path segment of a resource URL, e.g.
/// `https://pokeapi.co/api/v2/pokemon/25/` -> 25.
pub fn id_from_url(url: &str) -> Option<u32> {
    url.trim_end_matches('/').rsplit('/').next()?.parse().ok()
}

fn sanitize_text(text: &str) -> String {
    text.replace(['\n', '\u{000C}'], " ")
}

async fn get_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let response = http_client()
        .get(url)
        .send()
        .await
        .map_err(ApiError::Request)?;
    if !response.status().is_success() {
        return Err(ApiError::Status(response.status()));
    }
    response.json().await.map_err(ApiError::Request)
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}
