//! 用户存储操作
//!
//! 身份由外部认证方签发，这里只维护一份本地镜像（JIT 同步）。

use super::SeaOrmStorage;
use crate::entity::prelude::Users;
use crate::entity::users::ActiveModel;
use crate::errors::{AssignHubError, Result};
use crate::models::users::entities::{User, UserRole};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

impl SeaOrmStorage {
    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 同步外部身份
    ///
    /// 不存在则创建；角色或名称与令牌声明不一致时更新本地镜像。
    pub async fn sync_user_impl(
        &self,
        id: i64,
        role: UserRole,
        display_name: Option<String>,
    ) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let existing = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignHubError::database_operation(format!("查询用户失败: {e}")))?;

        match existing {
            None => {
                let model = ActiveModel {
                    id: Set(id),
                    display_name: Set(display_name),
                    role: Set(role.to_string()),
                    created_at: Set(now),
                    updated_at: Set(now),
                };

                let result = model.insert(&self.db).await.map_err(|e| {
                    AssignHubError::database_operation(format!("创建用户失败: {e}"))
                })?;

                Ok(result.into_user())
            }
            Some(user) => {
                if user.role == role.to_string() && user.display_name == display_name {
                    return Ok(user.into_user());
                }

                let model = ActiveModel {
                    id: Set(id),
                    display_name: Set(display_name),
                    role: Set(role.to_string()),
                    created_at: Set(user.created_at),
                    updated_at: Set(now),
                };

                let result = model.update(&self.db).await.map_err(|e| {
                    AssignHubError::database_operation(format!("更新用户失败: {e}"))
                })?;

                Ok(result.into_user())
            }
        }
    }
}
