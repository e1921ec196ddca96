use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use matcher::Item;
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
struct CatalogEntry<'a> {
    #[serde(flatten)]
    item: &'a Item,
    glyph: &'static str,
}

/// List the catalog in order, each item with its glyph.
pub async fn list_items(State(state): State<Arc<ServerState>>) -> ServerResult<impl IntoResponse> {
    let matcher = state.matcher()?;
    let items: Vec<CatalogEntry<'_>> = matcher
        .catalog()
        .iter()
        .map(|item| CatalogEntry {
            item,
            glyph: matcher.glyph_for(item.vibes.as_slice()),
        })
        .collect();

    Ok(Json(serde_json::json!({
        "total": items.len(),
        "items": items,
    })))
}
