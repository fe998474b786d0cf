use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::{
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode, assignments::requests::CreateAssignmentRequest},
    utils::validate::validate_max_points,
};

/// 创建作业
/// POST /assignments
pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_data: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    // 校验满分值
    if let Err(msg) = validate_max_points(assignment_data.max_points) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidMaxPoints, msg)));
    }

    match storage.create_assignment(uid, assignment_data).await {
        Ok(assignment) => {
            info!(
                "Assignment {} created by user {} for course offering {}",
                assignment.id, uid, assignment.course_offering_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "作业创建成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建作业失败: {e}"),
            )),
        ),
    }
}
