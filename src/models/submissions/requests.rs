use serde::Deserialize;

/// 创建提交请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubmissionRequest {
    pub assignment_id: i64,
    pub submission_url: String,
}

/// 提交查询参数（GET /submissions）
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionQuery {
    #[serde(rename = "assignmentId")]
    pub assignment_id: Option<i64>,
    #[serde(rename = "studentId")]
    pub student_id: Option<i64>,
}

/// 更新提交请求（PUT /submissions?id=）
///
/// 按调用者角色与载荷形态分流：教授携带 grade 时走评分，
/// 学生只允许更新 submission_url。
#[derive(Debug, Deserialize)]
pub struct UpdateSubmissionPayload {
    pub submission_url: Option<String>,
    pub grade: Option<f64>,
    pub feedback: Option<String>,
}

// 用于存储层的内部更新参数
#[derive(Debug, Clone)]
pub struct UpdateSubmissionRequest {
    pub submission_url: Option<String>,
}
