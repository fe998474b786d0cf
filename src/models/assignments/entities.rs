use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 作业标题
    pub title: String,
    // 作业描述
    pub description: Option<String>,
    // 所属课程开课实例（外部实体，本服务不持有）
    pub course_offering_id: String,
    // 创建者（教授）ID
    pub created_by: i64,
    // 截止时间
    pub due_date: chrono::DateTime<chrono::Utc>,
    // 满分
    pub max_points: f64,
    // 提交类型标签，如 "external-link"
    pub submission_type: String,
    // 是否启用
    pub is_active: bool,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
