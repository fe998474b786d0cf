//! 业务服务层
//!
//! 每个资源一个服务结构体，路由层通过 once_cell 懒加载实例分发请求。
//! 服务方法只负责编排：提取当前用户、权限校验、调用存储层、组装响应。

pub mod assignments;
pub mod submissions;
