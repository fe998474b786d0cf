use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubmissionService;
use crate::{
    middlewares::RequireJWT,
    models::{
        ApiResponse, ErrorCode,
        submissions::requests::{UpdateSubmissionPayload, UpdateSubmissionRequest},
        users::entities::UserRole,
    },
    utils::validate::validate_submission_url,
};

/// 更新提交
/// PUT /submissions?id={id}
///
/// 按角色分流：教授带 grade 字段走评分流程，学生修改自己的提交链接。
pub async fn update_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    payload: UpdateSubmissionPayload,
) -> ActixResult<HttpResponse> {
    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    match current_user.role {
        UserRole::Professor => {
            let Some(grade) = payload.grade else {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    "评分请求必须包含 grade 字段",
                )));
            };
            super::grade::grade_submission(service, request, submission_id, grade, payload.feedback)
                .await
        }
        UserRole::Student => {
            update_own_submission(service, request, &current_user, submission_id, payload).await
        }
    }
}

/// 学生重新提交（仅限本人、未评分的提交）
async fn update_own_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    current_user: &crate::models::users::entities::User,
    submission_id: i64,
    payload: UpdateSubmissionPayload,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 学生不能携带评分字段
    if payload.grade.is_some() || payload.feedback.is_some() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "学生不能修改评分信息",
        )));
    }

    let Some(submission_url) = payload.submission_url else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "更新请求必须包含 submission_url 字段",
        )));
    };

    if let Err(msg) = validate_submission_url(&submission_url) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidSubmissionUrl,
            msg,
        )));
    }

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(sub)) => sub,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "提交不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询提交失败: {e}"),
                )),
            );
        }
    };

    if submission.student_id != current_user.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只能修改自己的提交",
        )));
    }

    // 已评分的提交不允许再修改
    if submission.is_graded() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "提交已评分，不能再修改",
        )));
    }

    let update = UpdateSubmissionRequest {
        submission_url: Some(submission_url),
    };

    match storage.update_submission(submission_id, update).await {
        Ok(Some(updated)) => {
            info!(
                "Submission {} updated by student {}",
                submission_id, current_user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "提交更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "提交不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("更新提交失败: {e}"),
            )),
        ),
    }
}
