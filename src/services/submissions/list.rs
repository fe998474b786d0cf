use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::{
    middlewares::RequireJWT,
    models::{
        ApiResponse, ErrorCode, submissions::requests::SubmissionQuery, users::entities::UserRole,
    },
};

/// 查询提交
/// GET /submissions?assignmentId={id}[&studentId={id}]
///
/// - 教授：可查看作业下全部提交（附提交者信息），或指定学生的单条提交
/// - 学生：只能查看自己的提交，studentId 指向他人时返回 403
pub async fn query_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    query: SubmissionQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let Some(assignment_id) = query.assignment_id else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "必须提供 assignmentId 查询参数",
        )));
    };

    // 确定目标学生：学生只能查自己
    let target_student = match (&current_user.role, query.student_id) {
        (UserRole::Student, Some(student_id)) if student_id != current_user.id => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "学生只能查看自己的提交",
            )));
        }
        (UserRole::Student, _) => Some(current_user.id),
        (UserRole::Professor, student_id) => student_id,
    };

    match target_student {
        // 查询单个学生的提交，查不到以空数据返回
        Some(student_id) => {
            match storage
                .get_submission_by_assignment_and_student(assignment_id, student_id)
                .await
            {
                Ok(submission) => {
                    Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "获取提交成功")))
                }
                Err(e) => Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询提交失败: {e}"),
                    )),
                ),
            }
        }
        // 教授查看作业下全部提交
        None => match storage.list_submissions_by_assignment(assignment_id).await {
            Ok(items) => {
                Ok(HttpResponse::Ok().json(ApiResponse::success(items, "获取提交列表成功")))
            }
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询提交列表失败: {e}"),
                )),
            ),
        },
    }
}
