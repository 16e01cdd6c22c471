use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::AppState;
use crate::models::{FieldError, Item, ItemPatch, Offer, UserIn};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body of a 400 carrying per-field validation failures.
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

/// Item ids accepted by the item routes.
const ITEM_ID_RANGE: RangeInclusive<u32> = 1..=100;

/// Longest accepted `?query=` value.
const MAX_QUERY_LEN: usize = 10;

fn validation_failure(errors: Vec<FieldError>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ValidationErrorResponse { errors }),
    )
        .into_response()
}

fn item_not_found() -> Response {
    let error = ErrorResponse {
        error: "Item not found".to_string(),
    };
    (StatusCode::NOT_FOUND, Json(error)).into_response()
}

fn check_item_id(item_id: u32) -> Result<(), Response> {
    if ITEM_ID_RANGE.contains(&item_id) {
        Ok(())
    } else {
        Err(validation_failure(vec![FieldError::new(
            "item_id",
            format!(
                "must be between {} and {}",
                ITEM_ID_RANGE.start(),
                ITEM_ID_RANGE.end()
            ),
        )]))
    }
}

/// View of an item limited to its name and description.
#[derive(Debug, Serialize)]
pub struct ItemNameView {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// View of an item with the tax withheld.
#[derive(Debug, Serialize)]
pub struct ItemPublicView {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub tags: BTreeSet<String>,
}

/// GET /items/{item_id}/name - name and description only
pub async fn read_item_name(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<u32>,
) -> Response {
    if let Err(response) = check_item_id(item_id) {
        return response;
    }
    match state.items.get(item_id) {
        Some(item) => Json(ItemNameView {
            name: item.name,
            description: item.description,
        })
        .into_response(),
        None => item_not_found(),
    }
}

/// GET /items/{item_id}/public - the item without its tax
pub async fn read_item_public(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<u32>,
) -> Response {
    if let Err(response) = check_item_id(item_id) {
        return response;
    }
    match state.items.get(item_id) {
        Some(item) => Json(ItemPublicView {
            name: item.name,
            description: item.description,
            price: item.price,
            tags: item.tags,
        })
        .into_response(),
        None => item_not_found(),
    }
}

/// POST /items/ - validate an item and echo it back
pub async fn create_item(Json(item): Json<Item>) -> Response {
    if let Err(errors) = item.validate() {
        return validation_failure(errors);
    }
    Json(item).into_response()
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemBody {
    pub size: i64,
    pub user: Option<UserIn>,
    pub item: Option<Item>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemQuery {
    #[serde(rename = "query")]
    pub q: Option<String>,
}

/// PUT /items/{item_id} - compose a summary of the update request:
/// the id and size always, the user's public fields, the item with a
/// derived price_with_tax, and the query string when present.
pub async fn update_item(
    Path(item_id): Path<u32>,
    Query(query): Query<UpdateItemQuery>,
    Json(body): Json<UpdateItemBody>,
) -> Response {
    if let Err(response) = check_item_id(item_id) {
        return response;
    }
    if let Some(q) = &query.q {
        if q.chars().count() > MAX_QUERY_LEN {
            return validation_failure(vec![FieldError::new(
                "query",
                format!("must be at most {MAX_QUERY_LEN} characters"),
            )]);
        }
    }

    let mut result = Map::new();
    result.insert("item_id".to_string(), json!(item_id));
    result.insert("size".to_string(), json!(body.size));

    if let Some(user) = body.user {
        if let Err(errors) = user.validate() {
            return validation_failure(errors);
        }
        let user_out = user.into_public();
        result.insert("username".to_string(), json!(user_out.username));
        result.insert("full_name".to_string(), json!(user_out.full_name));
        result.insert("email".to_string(), json!(user_out.email));
        result.insert("disabled".to_string(), json!(user_out.disabled));
    }

    if let Some(item) = body.item {
        if let Err(errors) = item.validate() {
            return validation_failure(errors);
        }
        let mut item_obj = Map::new();
        item_obj.insert("name".to_string(), json!(item.name));
        item_obj.insert("description".to_string(), json!(item.description));
        item_obj.insert("price".to_string(), json!(item.price));
        item_obj.insert("tax".to_string(), json!(item.tax));
        item_obj.insert("tags".to_string(), json!(item.tags));
        if let (Some(price), Some(tax)) = (item.price, item.tax) {
            item_obj.insert("price_with_tax".to_string(), json!(price + tax));
        }
        result.insert("item".to_string(), Value::Object(item_obj));
    }

    if let Some(q) = query.q {
        result.insert("q".to_string(), json!(q));
    }

    Json(Value::Object(result)).into_response()
}

/// PATCH /items/{item_id} - merge the provided fields into the stored
/// item and return the updated record
pub async fn patch_item(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<u32>,
    Json(patch): Json<ItemPatch>,
) -> Response {
    if let Err(response) = check_item_id(item_id) {
        return response;
    }
    if let Err(errors) = patch.validate() {
        return validation_failure(errors);
    }
    match state.items.update(item_id, patch) {
        Some(updated) => Json(updated).into_response(),
        None => item_not_found(),
    }
}

/// POST /offers/ - validate an offer and echo it back
pub async fn create_offer(Json(offer): Json<Offer>) -> Response {
    if let Err(errors) = offer.validate() {
        return validation_failure(errors);
    }
    Json(offer).into_response()
}
