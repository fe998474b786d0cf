use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    // 唯一 ID
    pub id: i64,
    // 所属作业 ID
    pub assignment_id: i64,
    // 提交学生 ID
    pub student_id: i64,
    // 外部托管作品链接
    pub submission_url: String,
    // 提交时间
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    // 得分（未评分时为 null）
    pub grade: Option<f64>,
    // 评语
    pub feedback: Option<String>,
    // 评分时间（写入评分时设置，重评会覆盖）
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Submission {
    /// 是否已评分
    pub fn is_graded(&self) -> bool {
        self.graded_at.is_some()
    }
}
