use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::IdQuery;
use crate::models::submissions::requests::{
    CreateSubmissionRequest, SubmissionQuery, UpdateSubmissionPayload,
};
use crate::models::users::entities::UserRole;
use crate::services::submissions::SubmissionService;

// 懒加载的全局 SUBMISSION_SERVICE 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// HTTP处理程序
pub async fn create_submission(
    req: HttpRequest,
    submission_data: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .create_submission(&req, submission_data.into_inner())
        .await
}

pub async fn query_submissions(
    req: HttpRequest,
    query: web::Query<SubmissionQuery>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .query_submissions(&req, query.into_inner())
        .await
}

pub async fn update_submission(
    req: HttpRequest,
    query: web::Query<IdQuery>,
    payload: web::Json<UpdateSubmissionPayload>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .update_submission(&req, query.id, payload.into_inner())
        .await
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/submissions")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 教授查看全部提交，学生查看自己的提交
                    .route(web::get().to(query_submissions))
                    .route(
                        web::post()
                            .to(create_submission)
                            // 仅学生可以提交作业
                            .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                    )
                    // 教授评分 / 学生重新提交，按角色在服务层分流
                    .route(web::put().to(update_submission)),
            ),
    );
}
