//! Item endpoints
//!
//! Both `/items/` and `/items` are served so clients need not care about the
//! trailing slash.

use axum::{routing::get, Json, Router};
use tracing::info;

use crate::db::{ItemRepo, Session};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ListQuery};
use crate::models::{ItemCreate, ItemRead, NewItem};
use crate::state::AppState;

/// POST /items/ - store an item and return it with its new id
async fn create_item(
    mut session: Session,
    JsonBody(input): JsonBody<ItemCreate>,
) -> Result<Json<ItemRead>, ApiError> {
    let id = ItemRepo::new(&mut session)
        .insert(&NewItem::from(input))
        .await?;
    session.commit().await?;

    // Refresh from the store so the response reflects the persisted row
    let item = ItemRepo::new(&mut session).get(id).await?;
    session.close().await?;

    info!(id, "item created");
    Ok(Json(ItemRead::from(item)))
}

/// GET /items/?skip=&limit= - list items in id order
async fn list_items(
    mut session: Session,
    ListQuery(window): ListQuery,
) -> Result<Json<Vec<ItemRead>>, ApiError> {
    let items = ItemRepo::new(&mut session).list(window).await?;
    session.close().await?;

    Ok(Json(items.into_iter().map(ItemRead::from).collect()))
}

/// Item routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/items/", get(list_items).post(create_item))
        .route("/items", get(list_items).post(create_item))
}
