//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod submissions;
mod users;

use crate::config::AppConfig;
use crate::errors::{AssignHubError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 根据全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 连接指定数据库并运行迁移
    pub async fn connect(url: &str, pool_size: u32, timeout_secs: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout_secs).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout_secs).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(
        url: &str,
        pool_size: u32,
        timeout_secs: u64,
    ) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| AssignHubError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout_secs))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| AssignHubError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(
        url: &str,
        pool_size: u32,
        timeout_secs: u64,
    ) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(timeout_secs))
            .acquire_timeout(Duration::from_secs(timeout_secs))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| AssignHubError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(AssignHubError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn sync_user(
        &self,
        id: i64,
        role: UserRole,
        display_name: Option<String>,
    ) -> Result<User> {
        self.sync_user_impl(id, role, display_name).await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        created_by: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(created_by, req).await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn list_assignments_by_course_offering(
        &self,
        course_offering_id: &str,
    ) -> Result<Vec<Assignment>> {
        self.list_assignments_by_course_offering_impl(course_offering_id)
            .await
    }

    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(id, update).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }

    // 提交模块
    async fn create_submission(
        &self,
        student_id: i64,
        req: CreateSubmissionRequest,
    ) -> Result<Submission> {
        self.create_submission_impl(student_id, req).await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_submission_by_assignment_and_student_impl(assignment_id, student_id)
            .await
    }

    async fn list_submissions_by_assignment(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<SubmissionListItem>> {
        self.list_submissions_by_assignment_impl(assignment_id)
            .await
    }

    async fn update_submission(
        &self,
        id: i64,
        update: UpdateSubmissionRequest,
    ) -> Result<Option<Submission>> {
        self.update_submission_impl(id, update).await
    }

    async fn grade_submission(
        &self,
        id: i64,
        grade: f64,
        feedback: Option<String>,
    ) -> Result<Option<Submission>> {
        self.grade_submission_impl(id, grade, feedback).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::requests::CreateSubmissionRequest;
    use crate::models::users::entities::UserRole;
    use chrono::{TimeZone, Utc};

    // 连接池固定为 1，确保所有操作落在同一个内存库上
    async fn memory_storage() -> SeaOrmStorage {
        SeaOrmStorage::connect("sqlite::memory:", 1, 5)
            .await
            .expect("failed to create in-memory storage")
    }

    fn assignment_request(title: &str, due_ts: i64) -> CreateAssignmentRequest {
        CreateAssignmentRequest {
            title: title.to_string(),
            description: Some("完成实验并提交报告链接".to_string()),
            course_offering_id: "CS101-2026S".to_string(),
            due_date: Utc.timestamp_opt(due_ts, 0).unwrap(),
            max_points: 100.0,
            submission_type: None,
            is_active: None,
        }
    }

    async fn seed_users(storage: &SeaOrmStorage) {
        storage
            .sync_user_impl(1, UserRole::Professor, Some("王教授".to_string()))
            .await
            .unwrap();
        storage
            .sync_user_impl(2, UserRole::Student, Some("小李".to_string()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_assignment_defaults_and_timestamps() {
        let storage = memory_storage().await;
        seed_users(&storage).await;

        let assignment = storage
            .create_assignment_impl(1, assignment_request("第一次作业", 1_780_000_000))
            .await
            .unwrap();

        assert_eq!(assignment.title, "第一次作业");
        assert_eq!(assignment.created_by, 1);
        assert_eq!(assignment.max_points, 100.0);
        assert_eq!(assignment.due_date.timestamp(), 1_780_000_000);
        assert_eq!(assignment.submission_type, "external-link");
        assert!(assignment.is_active);
        assert_eq!(assignment.created_at, assignment.updated_at);
    }

    #[tokio::test]
    async fn test_list_assignments_ordered_by_due_date() {
        let storage = memory_storage().await;
        seed_users(&storage).await;

        let later = storage
            .create_assignment_impl(1, assignment_request("第二次作业", 1_790_000_000))
            .await
            .unwrap();
        let earlier = storage
            .create_assignment_impl(1, assignment_request("第一次作业", 1_780_000_000))
            .await
            .unwrap();

        let list = storage
            .list_assignments_by_course_offering_impl("CS101-2026S")
            .await
            .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, earlier.id);
        assert_eq!(list[1].id, later.id);

        let empty = storage
            .list_assignments_by_course_offering_impl("MATH200-2026F")
            .await
            .unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete_assignment() {
        let storage = memory_storage().await;
        seed_users(&storage).await;

        let assignment = storage
            .create_assignment_impl(1, assignment_request("第一次作业", 1_780_000_000))
            .await
            .unwrap();

        let update = UpdateAssignmentRequest {
            title: Some("第一次作业（修订）".to_string()),
            description: None,
            due_date: None,
            max_points: Some(50.0),
            submission_type: None,
            is_active: None,
        };
        let updated = storage
            .update_assignment_impl(assignment.id, update.clone())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "第一次作业（修订）");
        assert_eq!(updated.max_points, 50.0);
        // 未更新的字段保持原值
        assert_eq!(updated.course_offering_id, "CS101-2026S");

        // 不存在的 ID 返回 None
        let missing = storage.update_assignment_impl(999, update).await.unwrap();
        assert!(missing.is_none());

        assert!(storage.delete_assignment_impl(assignment.id).await.unwrap());
        assert!(
            storage
                .get_assignment_by_id_impl(assignment.id)
                .await
                .unwrap()
                .is_none()
        );
        // 重复删除返回 false
        assert!(!storage.delete_assignment_impl(assignment.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_sync_user_provisions_and_updates() {
        let storage = memory_storage().await;

        let user = storage
            .sync_user_impl(7, UserRole::Student, Some("小张".to_string()))
            .await
            .unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.role, UserRole::Student);
        assert_eq!(user.display_name.as_deref(), Some("小张"));

        // 名称变化时更新，created_at 保持不变
        let renamed = storage
            .sync_user_impl(7, UserRole::Student, Some("张三".to_string()))
            .await
            .unwrap();
        assert_eq!(renamed.display_name.as_deref(), Some("张三"));
        assert_eq!(renamed.created_at, user.created_at);

        let fetched = storage.get_user_by_id_impl(7).await.unwrap().unwrap();
        assert_eq!(fetched.display_name.as_deref(), Some("张三"));
        assert!(storage.get_user_by_id_impl(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_submission_rejected() {
        let storage = memory_storage().await;
        seed_users(&storage).await;

        let assignment = storage
            .create_assignment_impl(1, assignment_request("期中项目", 1_780_000_000))
            .await
            .unwrap();

        let req = CreateSubmissionRequest {
            assignment_id: assignment.id,
            submission_url: "https://drive.example/x".to_string(),
        };
        let submission = storage
            .create_submission_impl(2, req.clone())
            .await
            .unwrap();
        assert!(submission.grade.is_none());
        assert!(submission.graded_at.is_none());

        let err = storage.create_submission_impl(2, req).await.unwrap_err();
        assert!(matches!(err, AssignHubError::AlreadyExists(_)));

        let found = storage
            .get_submission_by_assignment_and_student_impl(assignment.id, 2)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, submission.id);
    }

    #[tokio::test]
    async fn test_grade_submission_flow() {
        let storage = memory_storage().await;
        seed_users(&storage).await;

        let assignment = storage
            .create_assignment_impl(1, assignment_request("期末项目", 1_790_000_000))
            .await
            .unwrap();
        let submission = storage
            .create_submission_impl(
                2,
                CreateSubmissionRequest {
                    assignment_id: assignment.id,
                    submission_url: "https://drive.example/x".to_string(),
                },
            )
            .await
            .unwrap();

        // 超出 [0, max_points] 被拒绝
        let err = storage
            .grade_submission_impl(submission.id, 150.0, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AssignHubError::Validation(_)));

        let graded = storage
            .grade_submission_impl(submission.id, 95.0, Some("good work".to_string()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(graded.grade, Some(95.0));
        assert_eq!(graded.feedback.as_deref(), Some("good work"));
        assert!(graded.graded_at.is_some());

        // 重评覆盖旧评分
        let regraded = storage
            .grade_submission_impl(submission.id, 80.0, Some("after review".to_string()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(regraded.grade, Some(80.0));
        assert_eq!(regraded.feedback.as_deref(), Some("after review"));

        // 不存在的提交返回 None
        let missing = storage.grade_submission_impl(999, 10.0, None).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_submissions_includes_student_names() {
        let storage = memory_storage().await;
        seed_users(&storage).await;
        storage
            .sync_user_impl(3, UserRole::Student, Some("小王".to_string()))
            .await
            .unwrap();

        let assignment = storage
            .create_assignment_impl(1, assignment_request("小组作业", 1_780_000_000))
            .await
            .unwrap();

        for student_id in [2, 3] {
            storage
                .create_submission_impl(
                    student_id,
                    CreateSubmissionRequest {
                        assignment_id: assignment.id,
                        submission_url: format!("https://drive.example/{student_id}"),
                    },
                )
                .await
                .unwrap();
        }

        let items = storage
            .list_submissions_by_assignment_impl(assignment.id)
            .await
            .unwrap();
        assert_eq!(items.len(), 2);
        let names: Vec<_> = items
            .iter()
            .map(|i| i.student.display_name.as_deref().unwrap())
            .collect();
        assert!(names.contains(&"小李"));
        assert!(names.contains(&"小王"));
    }
}
