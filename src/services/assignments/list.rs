use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::{ApiResponse, ErrorCode};

/// 按开课实例列出作业，截止时间升序
/// GET /assignments?courseOfferingId={id}
pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    course_offering_id: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_assignments_by_course_offering(&course_offering_id)
        .await
    {
        Ok(assignments) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignments, "获取作业列表成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询作业列表失败: {e}"),
            )),
        ),
    }
}

/// 查询参数缺失
pub async fn missing_query_params() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        "必须提供 id 或 courseOfferingId 查询参数",
    )))
}
