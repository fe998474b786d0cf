use serde::Serialize;

use crate::models::submissions::entities::Submission;

/// 提交者信息
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionStudent {
    pub id: i64,
    pub display_name: Option<String>,
}

/// 提交列表项（包含提交者信息）
#[derive(Debug, Serialize)]
pub struct SubmissionListItem {
    #[serde(flatten)]
    pub submission: Submission,
    pub student: SubmissionStudent,
}
