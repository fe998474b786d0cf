use std::sync::Arc;

use crate::models::{
    assignments::{
        entities::Assignment,
        requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
    },
    submissions::{
        entities::Submission,
        requests::{CreateSubmissionRequest, UpdateSubmissionRequest},
        responses::SubmissionListItem,
    },
    users::entities::{User, UserRole},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 同步外部身份（不存在则创建，角色/名称变化则更新）
    async fn sync_user(
        &self,
        id: i64,
        role: UserRole,
        display_name: Option<String>,
    ) -> Result<User>;

    /// 作业管理方法
    // 创建作业
    async fn create_assignment(
        &self,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    // 按课程开课实例列出作业，按截止时间升序
    async fn list_assignments_by_course_offering(
        &self,
        course_offering_id: &str,
    ) -> Result<Vec<Assignment>>;
    // 更新作业
    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    // 删除作业（硬删除）
    async fn delete_assignment(&self, id: i64) -> Result<bool>;

    /// 提交管理方法
    // 创建提交；同一 (作业, 学生) 已存在时返回 AlreadyExists
    async fn create_submission(
        &self,
        student_id: i64,
        req: CreateSubmissionRequest,
    ) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    // 获取某学生对某作业的提交；不存在是正常结果而非错误
    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 列出某作业的全部提交（含提交者名称），按提交时间降序
    async fn list_submissions_by_assignment(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<SubmissionListItem>>;
    // 更新提交内容（学生重新提交）
    async fn update_submission(
        &self,
        id: i64,
        update: UpdateSubmissionRequest,
    ) -> Result<Option<Submission>>;
    // 评分：grade/feedback/graded_at/updated_at 一次写入；
    // grade 超出 [0, max_points] 时返回 Validation 错误
    async fn grade_submission(
        &self,
        id: i64,
        grade: f64,
        feedback: Option<String>,
    ) -> Result<Option<Submission>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
