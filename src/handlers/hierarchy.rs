//! Hierarchy handlers - 层级级联操作接口
//!
//! 每个写操作把整次调用包在一个事务里, 任何一步失败整体回滚;
//! 只读操作 (快照 / 预览 / 一致性检查) 直接走连接池, 不加锁。

use axum::{
    extract::{Query, State},
    response::Json,
};
use sea_orm::TransactionTrait;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::oplog::service::log_operation;
use crate::hierarchy::audit::{self, ConsistencyReport};
use crate::hierarchy::batch::{self, BatchUpdateItem};
use crate::hierarchy::db_store::SeaOrmStore;
use crate::hierarchy::preview::{self, DeletePreview};
use crate::hierarchy::subject;
use crate::hierarchy::tree::{self, AcademyNode};
use crate::hierarchy::{cascade, HierarchyLevel};
use crate::routes::ApiResponse;
use crate::state::AppState;

// Operation types
const OP_CASCADE_DELETE: &str = "级联删除";
const OP_BATCH_CREATE: &str = "批量创建层级";
const OP_BATCH_UPDATE: &str = "批量更新层级";
const OP_MIGRATE_STUDENT: &str = "学生迁移";
const OP_SUCCESS: &str = "成功";
const OP_FAILED: &str = "失败";

/// Cascade delete request
#[derive(Debug, Deserialize)]
pub struct CascadeDeleteRequest {
    pub level: HierarchyLevel,
    #[serde(rename = "sourceId")]
    pub source_id: i64,
    #[serde(rename = "targetId")]
    pub target_id: Option<i64>,
    #[serde(rename = "forceDelete", default)]
    pub force_delete: bool,
}

/// POST /api/hierarchy/delete
pub async fn cascade_delete(
    State(state): State<AppState>,
    Json(req): Json<CascadeDeleteRequest>,
) -> Json<ApiResponse<()>> {
    let CascadeDeleteRequest {
        level,
        source_id,
        target_id,
        force_delete,
    } = req;
    let op_desc = format!(
        "层级: {}, 源 id={}, 目标 id={:?}, 强制: {}",
        level.label(),
        source_id,
        target_id,
        force_delete
    );

    let result = state
        .db
        .transaction::<_, (), AppError>(|txn| {
            Box::pin(async move {
                let store = SeaOrmStore::new(txn);
                // 学院层级先按名称对账课程, 必须在学院行删除前执行
                if level == HierarchyLevel::Academy {
                    let subject_target = if force_delete { None } else { target_id };
                    subject::cascade_delete_academy_subjects(&store, source_id, subject_target)
                        .await?;
                }
                cascade::cascade_delete(&store, level, source_id, target_id, force_delete).await
            })
        })
        .await
        .map_err(AppError::from);

    match result {
        Ok(()) => {
            log_operation(OP_CASCADE_DELETE, &op_desc, OP_SUCCESS);
            Json(ApiResponse::success_msg("success"))
        }
        Err(AppError::NotFound(msg)) | Err(AppError::BadRequest(msg)) => {
            log_operation(OP_CASCADE_DELETE, &op_desc, OP_FAILED);
            Json(ApiResponse::error(400, msg))
        }
        Err(e) => {
            tracing::error!("级联删除失败: {}", e);
            log_operation(OP_CASCADE_DELETE, &op_desc, OP_FAILED);
            Json(ApiResponse::error(500, e.to_string()))
        }
    }
}

/// Query parameters for delete preview
#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    pub level: HierarchyLevel,
    pub id: i64,
}

/// GET /api/hierarchy/delete/preview
pub async fn delete_preview(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> AppResult<Json<ApiResponse<DeletePreview>>> {
    let store = SeaOrmStore::new(&state.db);
    let preview = preview::delete_preview(&store, query.level, query.id).await?;
    Ok(Json(ApiResponse::success(preview)))
}

/// Batch create request
#[derive(Debug, Deserialize)]
pub struct BatchCreateRequest {
    #[serde(rename = "academyId")]
    pub academy_id: i64,
    pub grade: i32,
    #[serde(rename = "majorNames")]
    pub major_names: Vec<String>,
    #[serde(rename = "totalClassCount")]
    pub total_class_count: u32,
    #[serde(rename = "subClassCount")]
    pub sub_class_count: u32,
}

/// POST /api/hierarchy/batch/create
pub async fn batch_create(
    State(state): State<AppState>,
    Json(req): Json<BatchCreateRequest>,
) -> Json<ApiResponse<()>> {
    let op_desc = format!(
        "学院 id={}, 年级: {}, 专业: {:?}",
        req.academy_id, req.grade, req.major_names
    );

    let result = state
        .db
        .transaction::<_, (), AppError>(|txn| {
            Box::pin(async move {
                let store = SeaOrmStore::new(txn);
                cascade::batch_create_subtree(
                    &store,
                    req.academy_id,
                    req.grade,
                    &req.major_names,
                    req.total_class_count,
                    req.sub_class_count,
                )
                .await
            })
        })
        .await
        .map_err(AppError::from);

    match result {
        Ok(()) => {
            log_operation(OP_BATCH_CREATE, &op_desc, OP_SUCCESS);
            Json(ApiResponse::success_msg("success"))
        }
        Err(AppError::NotFound(msg)) | Err(AppError::BadRequest(msg)) => {
            log_operation(OP_BATCH_CREATE, &op_desc, OP_FAILED);
            Json(ApiResponse::error(400, msg))
        }
        Err(e) => {
            tracing::error!("批量创建失败: {}", e);
            log_operation(OP_BATCH_CREATE, &op_desc, OP_FAILED);
            Json(ApiResponse::error(500, e.to_string()))
        }
    }
}

/// Batch update request
#[derive(Debug, Deserialize)]
pub struct BatchUpdateRequest {
    #[serde(rename = "updateType")]
    pub update_type: String,
    pub updates: Vec<BatchUpdateItem>,
}

/// POST /api/hierarchy/batch/update
pub async fn batch_update(
    State(state): State<AppState>,
    Json(req): Json<BatchUpdateRequest>,
) -> Json<ApiResponse<()>> {
    let op_desc = format!("类型: {}, 条目数: {}", req.update_type, req.updates.len());

    let result = state
        .db
        .transaction::<_, (), AppError>(|txn| {
            Box::pin(async move {
                let store = SeaOrmStore::new(txn);
                batch::batch_update(&store, &req.update_type, &req.updates).await
            })
        })
        .await
        .map_err(AppError::from);

    match result {
        Ok(()) => {
            log_operation(OP_BATCH_UPDATE, &op_desc, OP_SUCCESS);
            Json(ApiResponse::success_msg("success"))
        }
        Err(AppError::NotFound(msg)) | Err(AppError::BadRequest(msg)) => {
            log_operation(OP_BATCH_UPDATE, &op_desc, OP_FAILED);
            Json(ApiResponse::error(400, msg))
        }
        Err(e) => {
            tracing::error!("批量更新失败: {}", e);
            log_operation(OP_BATCH_UPDATE, &op_desc, OP_FAILED);
            Json(ApiResponse::error(500, e.to_string()))
        }
    }
}

/// Student migration request
#[derive(Debug, Deserialize)]
pub struct MigrateStudentsRequest {
    #[serde(rename = "studentIds")]
    pub student_ids: Vec<i64>,
    #[serde(rename = "targetSubClassId")]
    pub target_sub_class_id: i64,
}

/// POST /api/hierarchy/student/migrate
pub async fn migrate_students(
    State(state): State<AppState>,
    Json(req): Json<MigrateStudentsRequest>,
) -> Json<ApiResponse<()>> {
    let op_desc = format!(
        "学生数: {}, 目标小班 id={}",
        req.student_ids.len(),
        req.target_sub_class_id
    );

    let result = state
        .db
        .transaction::<_, (), AppError>(|txn| {
            Box::pin(async move {
                let store = SeaOrmStore::new(txn);
                cascade::migrate_students(&store, &req.student_ids, req.target_sub_class_id).await
            })
        })
        .await
        .map_err(AppError::from);

    match result {
        Ok(()) => {
            log_operation(OP_MIGRATE_STUDENT, &op_desc, OP_SUCCESS);
            Json(ApiResponse::success_msg("success"))
        }
        Err(AppError::NotFound(msg)) | Err(AppError::BadRequest(msg)) => {
            log_operation(OP_MIGRATE_STUDENT, &op_desc, OP_FAILED);
            Json(ApiResponse::error(400, msg))
        }
        Err(e) => {
            tracing::error!("学生迁移失败: {}", e);
            log_operation(OP_MIGRATE_STUDENT, &op_desc, OP_FAILED);
            Json(ApiResponse::error(500, e.to_string()))
        }
    }
}

/// GET /api/hierarchy/query - 全树快照
pub async fn query_tree(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<AcademyNode>>>> {
    let store = SeaOrmStore::new(&state.db);
    let snapshot = tree::build_tree(&store).await?;
    Ok(Json(ApiResponse::success(snapshot)))
}

/// GET /api/hierarchy/consistency/check
pub async fn check_consistency(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ConsistencyReport>>> {
    let store = SeaOrmStore::new(&state.db);
    let report = audit::check_consistency(&store).await?;
    Ok(Json(ApiResponse::success(report)))
}

/// GET /api/subject/validate
pub async fn validate_subjects(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<String>>>> {
    let store = SeaOrmStore::new(&state.db);
    let errors = subject::validate_subject_data_integrity(&store).await?;
    Ok(Json(ApiResponse::success(errors)))
}
