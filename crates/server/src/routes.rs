use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use gatelogue_client::{DataSource, Snapshot};
use gatelogue_types::spatial::valid_radius;
use gatelogue_types::geo::Point;
use gatelogue_types::{AirGate, Category, Node, NodeId, SpatialHit, World};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiError>;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/meta", get(meta))
        .route("/nodes/{id}", get(node))
        .route("/nodes/{id}/nearby", get(nearby))
        .route("/categories/{category}", get(category))
        .route("/categories/{category}/{id}", get(category_node))
        .route("/airports/{code}/gates", get(airport_gates))
        .route("/near", get(near))
        .route("/refresh", post(refresh))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Meta {
    pub version: u64,
    pub timestamp: String,
    pub generated_at: Option<DateTime<Utc>>,
    pub fetched_at: DateTime<Utc>,
    pub source: DataSource,
    pub nodes: usize,
    /// Node count per short category name
    pub categories: BTreeMap<String, usize>,
}

impl Meta {
    fn of(snapshot: &Snapshot) -> Self {
        let data = &snapshot.data;
        Self {
            version: data.version,
            timestamp: data.timestamp.clone(),
            generated_at: data.generated_at(),
            fetched_at: snapshot.fetched_at,
            source: snapshot.source,
            nodes: data.len(),
            categories: data
                .category_counts()
                .into_iter()
                .map(|(category, count)| (category.short_name().to_owned(), count))
                .collect(),
        }
    }
}

async fn meta(State(state): State<AppState>) -> ApiResult<Meta> {
    let snapshot = state.snapshot()?;
    Ok(Json(Meta::of(&snapshot)))
}

fn not_found(what: impl std::fmt::Display) -> ApiError {
    ApiError::NotFound(format!("{what} not found"))
}

async fn node(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Node> {
    let snapshot = state.snapshot()?;
    snapshot
        .data
        .node(id.as_str())
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found(format_args!("node {id}")))
}

/// A node referenced from another, without its full record.
#[derive(Debug, Serialize, Deserialize)]
pub struct NodeSummary {
    pub id: NodeId,
    pub category: Category,
    pub name: Option<String>,
}

impl From<&Node> for NodeSummary {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id(),
            category: node.category(),
            name: node.name().map(str::to_owned),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NearbyEntry {
    #[serde(flatten)]
    pub node: NodeSummary,
    pub distance: Option<f64>,
    pub explicit: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Nearby {
    pub proximity: Vec<NearbyEntry>,
    pub shared_facility: Vec<NodeSummary>,
}

async fn nearby(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Nearby> {
    let snapshot = state.snapshot()?;
    let data = &snapshot.data;
    if data.node(id.as_str()).is_none() {
        return Err(not_found(format_args!("node {id}")));
    }

    let proximity = data
        .nearby(id.as_str())
        .into_iter()
        .map(|(node, prox)| NearbyEntry {
            node: node.into(),
            distance: prox.distance,
            explicit: prox.explicit,
        })
        .collect();
    let shared_facility = data
        .shared_facilities(id.as_str())
        .into_iter()
        .map(NodeSummary::from)
        .collect();

    Ok(Json(Nearby {
        proximity,
        shared_facility,
    }))
}

async fn category(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Vec<Node>> {
    let snapshot = state.snapshot()?;
    let category = Category::from_short_name(&name)?;
    Ok(Json(snapshot.data.nodes_of(category).cloned().collect()))
}

async fn category_node(
    State(state): State<AppState>,
    Path((name, id)): Path<(String, String)>,
) -> ApiResult<Node> {
    let snapshot = state.snapshot()?;
    snapshot
        .data
        .by_category_name(&name, id.as_str())?
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found(format_args!("{name} {id}")))
}

async fn airport_gates(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Vec<AirGate>> {
    let snapshot = state.snapshot()?;
    let gates = snapshot
        .data
        .gates_at_airport(&code)
        .ok_or_else(|| not_found(format_args!("airport {code}")))?;
    Ok(Json(gates.into_iter().cloned().collect()))
}

#[derive(Debug, Deserialize)]
pub struct NearQuery {
    pub world: World,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

async fn near(
    State(state): State<AppState>,
    Query(query): Query<NearQuery>,
) -> ApiResult<Vec<SpatialHit>> {
    if !valid_radius(query.radius) {
        return Err(ApiError::BadRequest(format!(
            "radius must be a non-negative number, got {}",
            query.radius
        )));
    }
    let snapshot = state.snapshot()?;
    Ok(Json(snapshot.spatial.within(
        query.world,
        Point::new(query.x, query.y),
        query.radius,
    )))
}

async fn refresh(State(state): State<AppState>) -> ApiResult<Meta> {
    let snapshot = state.store.refresh().await?;
    info!(nodes = snapshot.data.len(), "refreshed on request");
    Ok(Json(Meta::of(&snapshot)))
}
