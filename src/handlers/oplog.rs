//! Operation log handlers - 操作日志查询与管理

use axum::{
    extract::{Query, State},
    response::Json,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};

use crate::entity::op_log;
use crate::routes::ApiResponse;
use crate::state::AppState;

/// Query parameters for log pagination
#[derive(Debug, Deserialize)]
pub struct LogQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(rename = "pageSize", default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

/// Log response
#[derive(Debug, Serialize)]
pub struct LogResponse {
    pub id: i64,
    #[serde(rename = "opTime")]
    pub op_time: i64,
    #[serde(rename = "opType")]
    pub op_type: String,
    #[serde(rename = "opDesc")]
    pub op_desc: String,
    pub result: String,
}

impl From<op_log::Model> for LogResponse {
    fn from(m: op_log::Model) -> Self {
        Self {
            id: m.id,
            op_time: m.op_time,
            op_type: m.op_type,
            op_desc: m.op_desc,
            result: m.result,
        }
    }
}

/// Query response with pagination
#[derive(Debug, Serialize)]
pub struct LogQueryResponse {
    pub logs: Vec<LogResponse>,
    pub total: u64,
}

/// GET /api/oplog/query
pub async fn query_oplog(
    State(state): State<AppState>,
    Query(query): Query<LogQuery>,
) -> Json<LogQueryResponse> {
    let db = &state.db;
    let page = query.page.max(1) as u64;
    let page_size = query.page_size.max(1).min(100) as u64;
    let offset = (page - 1) * page_size;

    // Query logs with pagination
    let result = op_log::Entity::find()
        .order_by_desc(op_log::Column::Id)
        .offset(offset)
        .limit(page_size)
        .all(db)
        .await;

    let logs = match result {
        Ok(logs) => logs.into_iter().map(|l| l.into()).collect(),
        Err(e) => {
            tracing::error!("Failed to query logs: {}", e);
            return Json(LogQueryResponse { logs: vec![], total: 0 });
        }
    };

    // Get total count
    let total = match op_log::Entity::find().count(db).await {
        Ok(count) => count,
        Err(e) => {
            tracing::error!("Failed to count logs: {}", e);
            return Json(LogQueryResponse { logs, total: 0 });
        }
    };

    Json(LogQueryResponse { logs, total })
}

/// POST /api/oplog/delete
pub async fn delete_oplog(
    State(state): State<AppState>,
    Json(ids): Json<Vec<i64>>,
) -> Json<ApiResponse<()>> {
    if ids.is_empty() {
        return Json(ApiResponse::error(400, "No IDs provided"));
    }

    let result = op_log::Entity::delete_many()
        .filter(op_log::Column::Id.is_in(ids))
        .exec(&state.db)
        .await;

    match result {
        Ok(res) => {
            let message = format!("成功删除{}条日志", res.rows_affected);
            Json(ApiResponse::success_msg(message))
        }
        Err(e) => {
            tracing::error!("Failed to delete logs: {}", e);
            Json(ApiResponse::error(500, "Failed to delete logs"))
        }
    }
}

/// Service for adding operation logs
pub mod service {
    use sea_orm::{ActiveModelTrait, Set};
    use tokio::sync::mpsc;

    use crate::entity::op_log;

    /// Log entry to be added
    #[derive(Debug, Clone)]
    pub struct LogEntry {
        pub op_type: String,
        pub op_desc: String,
        pub result: String,
    }

    /// Global log channel
    static LOG_TX: std::sync::OnceLock<mpsc::Sender<LogEntry>> = std::sync::OnceLock::new();

    /// Initialize the operation log service
    /// This function is idempotent - calling it multiple times is safe
    pub fn init(db: sea_orm::DatabaseConnection) {
        if LOG_TX.get().is_some() {
            tracing::debug!("Operation log service already initialized, skipping");
            return;
        }

        let (tx, mut rx) = mpsc::channel::<LogEntry>(200);
        if LOG_TX.set(tx).is_err() {
            tracing::debug!("Operation log service initialized by another thread");
            return;
        }

        // Spawn background task to process log entries
        tokio::spawn(async move {
            while let Some(entry) = rx.recv().await {
                let now = chrono::Utc::now().timestamp();
                let log = op_log::ActiveModel {
                    op_time: Set(now),
                    op_type: Set(entry.op_type),
                    op_desc: Set(entry.op_desc),
                    result: Set(entry.result),
                    ..Default::default()
                };

                if let Err(e) = log.insert(&db).await {
                    tracing::error!("Failed to log operation: {}", e);
                }
            }
        });
    }

    /// Add an operation log entry
    pub fn add_log(entry: LogEntry) {
        if let Some(tx) = LOG_TX.get() {
            if tx.try_send(entry).is_err() {
                tracing::warn!("Log channel is full, operation log dropped");
            }
        } else {
            tracing::warn!(
                "Operation log service not initialized, log dropped: {} - {}",
                entry.op_type,
                entry.op_desc
            );
        }
    }

    /// Helper function to create a log entry from request context
    pub fn log_operation(op_type: &str, op_desc: &str, result: &str) {
        add_log(LogEntry {
            op_type: op_type.to_string(),
            op_desc: op_desc.to_string(),
            result: result.to_string(),
        });
    }
}
