use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use serde::{Deserialize, Serialize};
use shelfwise_core::{Item, ItemId};
use shelfwise_similarity::{RecommendationService, RecommenderConfig};
use std::sync::Arc;
use tracing::info;

/// Shared handler state
pub struct ApiState {
    pub service: Arc<RecommendationService>,
    pub similar_limit: usize,
    pub popular_limit: usize,
}

impl ApiState {
    pub fn new(service: Arc<RecommendationService>, config: &RecommenderConfig) -> Self {
        Self {
            service,
            similar_limit: config.similar_limit,
            popular_limit: config.popular_limit,
        }
    }
}

#[derive(Deserialize)]
struct LimitQuery {
    limit: Option<usize>,
}

#[derive(Serialize)]
struct ItemResponse {
    id: u64,
    title: String,
    creator: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    categories: Vec<String>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id.get(),
            title: item.title,
            creator: item.creator,
            description: item.description,
            categories: item.categories,
        }
    }
}

fn item_list(items: Vec<Item>) -> Vec<ItemResponse> {
    items.into_iter().map(ItemResponse::from).collect()
}

pub struct RestApi;

impl RestApi {
    /// Register all routes; shared by the server and tests
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.route("/health", web::get().to(health))
            .route("/items/popular", web::get().to(popular_items))
            .route("/items/{id}", web::get().to(get_item))
            .route("/items/{id}/similar", web::get().to(similar_items));
    }

    pub async fn start(state: Arc<ApiState>, port: u16) -> std::io::Result<()> {
        info!("Listening on 0.0.0.0:{}", port);
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allowed_methods(vec!["GET"])
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(state.clone()))
                .configure(Self::configure)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok"
    })))
}

async fn popular_items(
    state: web::Data<Arc<ApiState>>,
    query: web::Query<LimitQuery>,
) -> ActixResult<HttpResponse> {
    let limit = query.limit.unwrap_or(state.popular_limit);
    let items = state.service.get_popular(limit);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": item_list(items)
    })))
}

async fn get_item(
    state: web::Data<Arc<ApiState>>,
    path: web::Path<u64>,
) -> ActixResult<HttpResponse> {
    let id = ItemId(path.into_inner());
    match state.service.get_item(id) {
        Some(item) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "result": ItemResponse::from(item)
        }))),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": "Item not found"
        }))),
    }
}

async fn similar_items(
    state: web::Data<Arc<ApiState>>,
    path: web::Path<u64>,
    query: web::Query<LimitQuery>,
) -> ActixResult<HttpResponse> {
    let id = ItemId(path.into_inner());
    let limit = query.limit.unwrap_or(state.similar_limit);
    let items = state.service.get_similar(id, limit);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": item_list(items)
    })))
}
