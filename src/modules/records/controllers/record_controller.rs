//! Record reporting endpoints

use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::core::{AppError, Result};
use crate::modules::records::models::CalculationKind;
use crate::modules::records::repositories::{Page, RecordFilter};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecordListQuery {
    pub kind: Option<String>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// List saved computations for reporting
///
/// GET /records
pub async fn list_records(
    state: web::Data<AppState>,
    query: web::Query<RecordListQuery>,
) -> Result<HttpResponse> {
    let kind = match &query.kind {
        Some(raw) => Some(
            raw.parse::<CalculationKind>()
                .map_err(AppError::invalid_input)?,
        ),
        None => None,
    };

    let filter = RecordFilter {
        kind,
        created_after: query.created_after,
        created_before: query.created_before,
    };

    let default_page = Page::default();
    let page = Page {
        limit: query.limit.unwrap_or(default_page.limit).min(500),
        offset: query.offset.unwrap_or(default_page.offset),
    };

    let records = state.records.list(&filter, page).await?;
    let count = records.len();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "records": records,
        "count": count,
    })))
}

/// Configure record routes
pub fn configure_record_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/records").route("", web::get().to(list_records)));
}
