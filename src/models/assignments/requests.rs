use chrono::{DateTime, Utc};
use serde::Deserialize;

/// 创建作业请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub description: Option<String>,
    pub course_offering_id: String,
    pub due_date: DateTime<Utc>, // ISO 8601 格式，如 "2026-06-01T12:00:00Z"
    pub max_points: f64,
    pub submission_type: Option<String>,
    pub is_active: Option<bool>,
}

/// 更新作业请求
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>, // ISO 8601 格式
    pub max_points: Option<f64>,
    pub submission_type: Option<String>,
    pub is_active: Option<bool>,
}

/// 作业查询参数（GET /assignments）
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentQuery {
    pub id: Option<i64>,
    #[serde(rename = "courseOfferingId")]
    pub course_offering_id: Option<String>,
}

/// 按 ID 操作的查询参数（PUT/DELETE ?id=）
#[derive(Debug, Clone, Deserialize)]
pub struct IdQuery {
    pub id: i64,
}
