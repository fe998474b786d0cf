pub mod create;
pub mod grade;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::submissions::requests::{
    CreateSubmissionRequest, SubmissionQuery, UpdateSubmissionPayload,
};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 学生提交作业
    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        submission_data: CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, submission_data).await
    }

    // 查询提交：?assignmentId=（教授查全部，学生查自己）或 ?assignmentId=&studentId=
    pub async fn query_submissions(
        &self,
        request: &HttpRequest,
        query: SubmissionQuery,
    ) -> ActixResult<HttpResponse> {
        list::query_submissions(self, request, query).await
    }

    // 更新提交：按角色分流，教授评分、学生改链接
    pub async fn update_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        payload: UpdateSubmissionPayload,
    ) -> ActixResult<HttpResponse> {
        update::update_submission(self, request, submission_id, payload).await
    }
}
