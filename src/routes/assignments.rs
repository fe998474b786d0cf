use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::{
    AssignmentQuery, CreateAssignmentRequest, IdQuery, UpdateAssignmentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::assignments::AssignmentService;

// 懒加载的全局 ASSIGNMENT_SERVICE 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// HTTP处理程序
pub async fn query_assignments(
    req: HttpRequest,
    query: web::Query<AssignmentQuery>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .query_assignments(&req, query.into_inner())
        .await
}

pub async fn create_assignment(
    req: HttpRequest,
    assignment_data: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(&req, assignment_data.into_inner())
        .await
}

pub async fn update_assignment(
    req: HttpRequest,
    query: web::Query<IdQuery>,
    update_data: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update_assignment(&req, query.id, update_data.into_inner())
        .await
}

pub async fn delete_assignment(
    req: HttpRequest,
    query: web::Query<IdQuery>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.delete_assignment(&req, query.id).await
}

// 配置路由
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/assignments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 任何已认证用户都可以查询作业
                    .route(web::get().to(query_assignments))
                    .route(
                        web::post()
                            .to(create_assignment)
                            // 仅教授可以创建作业
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::professor_roles(),
                            )),
                    )
                    .route(
                        web::put()
                            .to(update_assignment)
                            // 仅教授（创建者校验在服务层）可以修改作业
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::professor_roles(),
                            )),
                    )
                    .route(
                        web::delete()
                            .to(delete_assignment)
                            // 仅教授（创建者校验在服务层）可以删除作业
                            .wrap(middlewares::RequireRole::new_any(
                                UserRole::professor_roles(),
                            )),
                    ),
            ),
    );
}
