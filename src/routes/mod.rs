pub mod assignments;

pub mod submissions;

pub use assignments::configure_assignments_routes;
pub use submissions::configure_submissions_routes;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};
    use crate::utils::jwt::JwtUtils;
    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::json;
    use std::sync::Arc;

    // 内存数据库：连接池固定为 1，保证所有操作共享同一个库
    async fn test_storage() -> Arc<dyn Storage> {
        Arc::new(
            SeaOrmStorage::connect("sqlite::memory:", 1, 5)
                .await
                .expect("failed to init in-memory storage"),
        )
    }

    fn professor_token(id: i64, name: &str) -> String {
        JwtUtils::generate_token(id, "professor", Some(name), chrono::Duration::minutes(30))
            .expect("failed to generate token")
    }

    fn student_token(id: i64, name: &str) -> String {
        JwtUtils::generate_token(id, "student", Some(name), chrono::Duration::minutes(30))
            .expect("failed to generate token")
    }

    macro_rules! init_test_app {
        ($storage:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($storage.clone()))
                    .configure(configure_assignments_routes)
                    .configure(configure_submissions_routes),
            )
            .await
        };
    }

    fn assignment_body(title: &str, due_date: &str) -> serde_json::Value {
        json!({
            "title": title,
            "description": "阅读第三章并完成课后习题",
            "course_offering_id": "CS101-2026S",
            "due_date": due_date,
            "max_points": 100.0,
        })
    }

    #[actix_web::test]
    async fn test_assignment_mutation_role_matrix() {
        let storage = test_storage().await;
        let app = init_test_app!(storage);

        let body = assignment_body("第一次作业", "2026-09-15T12:00:00Z");

        // (token, 期望状态码)
        let cases = [
            (Some(professor_token(1, "王教授")), StatusCode::OK),
            (Some(student_token(2, "小李")), StatusCode::FORBIDDEN),
            (None, StatusCode::UNAUTHORIZED),
        ];

        for (token, expected) in cases {
            let mut req = test::TestRequest::post()
                .uri("/assignments")
                .set_json(&body);
            if let Some(token) = &token {
                req = req.insert_header(("Authorization", format!("Bearer {token}")));
            }
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), expected, "token: {token:?}");
        }
    }

    #[actix_web::test]
    async fn test_assignment_crud_flow() {
        let storage = test_storage().await;
        let app = init_test_app!(storage);
        let creator = professor_token(10, "王教授");
        let other_prof = professor_token(11, "赵教授");

        // 创建两个作业，截止时间乱序
        let resp: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/assignments")
                .insert_header(("Authorization", format!("Bearer {creator}")))
                .set_json(assignment_body("第二次作业", "2026-10-01T12:00:00Z"))
                .to_request(),
        )
        .await;
        assert_eq!(resp["code"], 0);
        let second_id = resp["data"]["id"].as_i64().unwrap();

        let resp: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/assignments")
                .insert_header(("Authorization", format!("Bearer {creator}")))
                .set_json(assignment_body("第一次作业", "2026-09-15T12:00:00Z"))
                .to_request(),
        )
        .await;
        let first_id = resp["data"]["id"].as_i64().unwrap();

        // 按 id 查询
        let resp: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri(&format!("/assignments?id={first_id}"))
                .insert_header(("Authorization", format!("Bearer {creator}")))
                .to_request(),
        )
        .await;
        assert_eq!(resp["data"]["title"], "第一次作业");
        assert_eq!(resp["data"]["max_points"], 100.0);

        // 列表按截止时间升序
        let resp: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/assignments?courseOfferingId=CS101-2026S")
                .insert_header(("Authorization", format!("Bearer {creator}")))
                .to_request(),
        )
        .await;
        let list = resp["data"].as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["id"].as_i64().unwrap(), first_id);
        assert_eq!(list[1]["id"].as_i64().unwrap(), second_id);

        // 缺失查询参数
        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/assignments")
                .insert_header(("Authorization", format!("Bearer {creator}")))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // 非创建者不能修改
        let resp = test::call_service(
            &app,
            test::TestRequest::put()
                .uri(&format!("/assignments?id={first_id}"))
                .insert_header(("Authorization", format!("Bearer {other_prof}")))
                .set_json(json!({"title": "被篡改的标题"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        // 创建者修改
        let resp: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::put()
                .uri(&format!("/assignments?id={first_id}"))
                .insert_header(("Authorization", format!("Bearer {creator}")))
                .set_json(json!({"title": "第一次作业（修订）"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp["data"]["title"], "第一次作业（修订）");

        // 创建者删除，再查询 404
        let resp = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri(&format!("/assignments?id={second_id}"))
                .insert_header(("Authorization", format!("Bearer {creator}")))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/assignments?id={second_id}"))
                .insert_header(("Authorization", format!("Bearer {creator}")))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_submission_and_grading_flow() {
        let storage = test_storage().await;
        let app = init_test_app!(storage);
        let prof = professor_token(20, "王教授");
        let student = student_token(21, "小李");

        let resp: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/assignments")
                .insert_header(("Authorization", format!("Bearer {prof}")))
                .set_json(assignment_body("期中项目", "2026-11-01T12:00:00Z"))
                .to_request(),
        )
        .await;
        let assignment_id = resp["data"]["id"].as_i64().unwrap();

        // 学生提交外部链接
        let resp: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/submissions")
                .insert_header(("Authorization", format!("Bearer {student}")))
                .set_json(json!({
                    "assignment_id": assignment_id,
                    "submission_url": "https://drive.example/x",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp["code"], 0);
        let submission_id = resp["data"]["id"].as_i64().unwrap();
        assert!(resp["data"]["grade"].is_null());

        // 重复提交同一作业 -> 409
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/submissions")
                .insert_header(("Authorization", format!("Bearer {student}")))
                .set_json(json!({
                    "assignment_id": assignment_id,
                    "submission_url": "https://drive.example/y",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        // 教授按 (作业, 学生) 查询
        let resp: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri(&format!(
                    "/submissions?assignmentId={assignment_id}&studentId=21"
                ))
                .insert_header(("Authorization", format!("Bearer {prof}")))
                .to_request(),
        )
        .await;
        assert_eq!(resp["data"]["submission_url"], "https://drive.example/x");

        // 评分超出范围 -> 400
        let resp = test::call_service(
            &app,
            test::TestRequest::put()
                .uri(&format!("/submissions?id={submission_id}"))
                .insert_header(("Authorization", format!("Bearer {prof}")))
                .set_json(json!({"grade": 150.0}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // 正常评分
        let resp: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::put()
                .uri(&format!("/submissions?id={submission_id}"))
                .insert_header(("Authorization", format!("Bearer {prof}")))
                .set_json(json!({"grade": 95.0, "feedback": "good work"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp["data"]["grade"], 95.0);
        assert_eq!(resp["data"]["feedback"], "good work");
        assert!(!resp["data"]["graded_at"].is_null());

        // 学生重新拉取自己的提交，评分可见
        let resp: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri(&format!("/submissions?assignmentId={assignment_id}"))
                .insert_header(("Authorization", format!("Bearer {student}")))
                .to_request(),
        )
        .await;
        assert_eq!(resp["data"]["grade"], 95.0);
        assert_eq!(resp["data"]["feedback"], "good work");

        // 已评分的提交不允许学生再修改
        let resp = test::call_service(
            &app,
            test::TestRequest::put()
                .uri(&format!("/submissions?id={submission_id}"))
                .insert_header(("Authorization", format!("Bearer {student}")))
                .set_json(json!({"submission_url": "https://drive.example/z"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        // 教授列出作业下全部提交，附提交者名称
        let resp: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri(&format!("/submissions?assignmentId={assignment_id}"))
                .insert_header(("Authorization", format!("Bearer {prof}")))
                .to_request(),
        )
        .await;
        let list = resp["data"].as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["student"]["display_name"], "小李");
    }

    #[actix_web::test]
    async fn test_submission_query_permissions_and_validation() {
        let storage = test_storage().await;
        let app = init_test_app!(storage);
        let prof = professor_token(30, "王教授");
        let student_a = student_token(31, "小李");

        let resp: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/assignments")
                .insert_header(("Authorization", format!("Bearer {prof}")))
                .set_json(assignment_body("第三次作业", "2026-12-01T12:00:00Z"))
                .to_request(),
        )
        .await;
        let assignment_id = resp["data"]["id"].as_i64().unwrap();

        // 学生不能查别人的提交
        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!(
                    "/submissions?assignmentId={assignment_id}&studentId=99"
                ))
                .insert_header(("Authorization", format!("Bearer {student_a}")))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        // 缺少 assignmentId -> 400
        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/submissions")
                .insert_header(("Authorization", format!("Bearer {student_a}")))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // 非法链接 -> 400
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/submissions")
                .insert_header(("Authorization", format!("Bearer {student_a}")))
                .set_json(json!({
                    "assignment_id": assignment_id,
                    "submission_url": "ftp://not-http.example/file",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // 不存在的作业 -> 404
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/submissions")
                .insert_header(("Authorization", format!("Bearer {student_a}")))
                .set_json(json!({
                    "assignment_id": 999_999,
                    "submission_url": "https://drive.example/x",
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
