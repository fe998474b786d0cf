/// 业务错误码
///
/// 前两位对齐 HTTP 状态码，后三位为细分业务码。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 400xx 请求参数错误
    BadRequest = 40000,
    InvalidSubmissionUrl = 40001,
    GradeOutOfRange = 40002,
    InvalidMaxPoints = 40003,

    // 401xx / 403xx 认证授权
    Unauthorized = 40100,
    Forbidden = 40300,

    // 404xx 资源不存在
    NotFound = 40400,
    AssignmentNotFound = 40401,
    SubmissionNotFound = 40402,

    // 409xx 冲突
    SubmissionAlreadyExists = 40900,

    // 500xx 服务端错误
    InternalServerError = 50000,
}
