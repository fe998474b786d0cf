//! 提交存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{AssignHubError, Result};
use crate::models::submissions::{
    entities::Submission,
    requests::{CreateSubmissionRequest, UpdateSubmissionRequest},
    responses::{SubmissionListItem, SubmissionStudent},
};
use crate::utils::validate::validate_grade;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建提交
    ///
    /// 同一 (作业, 学生) 只允许一条，重复提交返回 AlreadyExists，
    /// 重新提交应走 update_submission。
    pub async fn create_submission_impl(
        &self,
        student_id: i64,
        req: CreateSubmissionRequest,
    ) -> Result<Submission> {
        let existing = self
            .get_submission_by_assignment_and_student_impl(req.assignment_id, student_id)
            .await?;
        if existing.is_some() {
            return Err(AssignHubError::already_exists(format!(
                "学生 {student_id} 已提交过作业 {}",
                req.assignment_id
            )));
        }

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            assignment_id: Set(req.assignment_id),
            student_id: Set(student_id),
            submission_url: Set(req.submission_url),
            submitted_at: Set(now),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("创建提交失败: {e}")))?;

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 获取某学生对某作业的提交；查不到是正常结果
    pub async fn get_submission_by_assignment_and_student_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 列出某作业的全部提交，按提交时间降序，附带提交者名称
    pub async fn list_submissions_by_assignment_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<SubmissionListItem>> {
        let submissions = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_desc(Column::SubmittedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询提交列表失败: {e}")))?;

        // 批量查询提交者信息
        let student_ids: Vec<i64> = submissions
            .iter()
            .map(|s| s.student_id)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        let mut student_map: HashMap<i64, SubmissionStudent> = HashMap::new();
        if !student_ids.is_empty() {
            let users = Users::find()
                .filter(UserColumn::Id.is_in(student_ids))
                .all(&self.db)
                .await
                .map_err(|e| AssignHubError::database_operation(format!("查询提交者失败: {e}")))?;

            for user in users {
                student_map.insert(
                    user.id,
                    SubmissionStudent {
                        id: user.id,
                        display_name: user.display_name,
                    },
                );
            }
        }

        let items = submissions
            .into_iter()
            .map(|m| {
                let student = student_map
                    .get(&m.student_id)
                    .cloned()
                    .unwrap_or(SubmissionStudent {
                        id: m.student_id,
                        display_name: None,
                    });
                SubmissionListItem {
                    submission: m.into_submission(),
                    student,
                }
            })
            .collect();

        Ok(items)
    }

    /// 更新提交内容（学生重新提交），刷新 updated_at
    pub async fn update_submission_impl(
        &self,
        id: i64,
        update: UpdateSubmissionRequest,
    ) -> Result<Option<Submission>> {
        let existing = self.get_submission_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(submission_url) = update.submission_url {
            model.submission_url = Set(submission_url);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("更新提交失败: {e}")))?;

        self.get_submission_by_id_impl(id).await
    }

    /// 评分
    ///
    /// grade、feedback、graded_at、updated_at 一次写入；重评覆盖旧值。
    /// grade 必须落在所属作业的 [0, max_points] 区间内。
    pub async fn grade_submission_impl(
        &self,
        id: i64,
        grade: f64,
        feedback: Option<String>,
    ) -> Result<Option<Submission>> {
        let Some(submission) = self.get_submission_by_id_impl(id).await? else {
            return Ok(None);
        };

        let assignment = self
            .get_assignment_by_id_impl(submission.assignment_id)
            .await?
            .ok_or_else(|| {
                AssignHubError::not_found(format!("作业不存在: {}", submission.assignment_id))
            })?;

        validate_grade(grade, assignment.max_points).map_err(AssignHubError::validation)?;

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(id),
            grade: Set(Some(grade)),
            feedback: Set(feedback),
            graded_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("写入评分失败: {e}")))?;

        self.get_submission_by_id_impl(id).await
    }
}
