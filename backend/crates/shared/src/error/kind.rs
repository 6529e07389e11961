//! Error Kind - Classification of domain errors
//!
//! Defines the closed [`ErrorKind`] enum. Every kind maps to a fixed pair of
//! transport codes: an HTTP status (primary) and an RPC status (secondary).

use serde::Serialize;

/// エラー種別の列挙体
///
/// ドメインエラーの閉じた分類を定義します。
/// 各バリアントはコンパイル時に固定された (HTTP ステータス, RPC ステータス) の
/// 組に対応し、呼び出し側で上書きすることはできません。
///
/// ## Notes
/// * `BadRequest` と `PreconditionFailed` は RPC ステータス 9 を共有する
///   （どちらも「呼び出し側が前提条件を満たしていない」ことを表す）
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::NotFound;
/// assert_eq!(kind.http_status(), 404);
/// assert_eq!(kind.rpc_code(), 5);
/// assert_eq!(kind.as_str(), "Not Found");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// 500 / 13 - Internal: サーバー内部エラー
    Internal,
    /// 400 / 9 - Bad Request: リクエストが不正（必須項目の欠落など）
    BadRequest,
    /// 404 / 5 - Not Found: リソースが見つからない
    NotFound,
    /// 422 / 3 - Invalid Argument: 値が制約を満たさない
    InvalidArgument,
    /// 403 / 11 - Forbidden: アクセス権限なし
    Forbidden,
    /// 401 / 16 - Unauthorised: 認証が必要
    Unauthorised,
    /// 422 / 6 - Already Exist: リソースが既に存在する
    AlreadyExist,
    /// 408 / 4 - Timeout: タイムアウト
    Timeout,
    /// 501 / 12 - Unimplemented: 未実装
    Unimplemented,
    /// 412 / 9 - Precondition Failed: 前提条件の不一致
    PreconditionFailed,
    /// 502 / 10 - Bad Gateway: 上流サービスの不正な応答
    BadGateway,
}

impl ErrorKind {
    /// 全種別（宣言順）
    pub const ALL: [ErrorKind; 11] = [
        ErrorKind::Internal,
        ErrorKind::BadRequest,
        ErrorKind::NotFound,
        ErrorKind::InvalidArgument,
        ErrorKind::Forbidden,
        ErrorKind::Unauthorised,
        ErrorKind::AlreadyExist,
        ErrorKind::Timeout,
        ErrorKind::Unimplemented,
        ErrorKind::PreconditionFailed,
        ErrorKind::BadGateway,
    ];

    /// HTTP ステータスコード（プライマリコード）を取得
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::BadRequest.http_status(), 400);
    /// assert_eq!(ErrorKind::AlreadyExist.http_status(), 422);
    /// ```
    #[inline]
    pub const fn http_status(&self) -> u16 {
        match self {
            ErrorKind::Internal => 500,
            ErrorKind::BadRequest => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::InvalidArgument => 422,
            ErrorKind::Forbidden => 403,
            ErrorKind::Unauthorised => 401,
            ErrorKind::AlreadyExist => 422,
            ErrorKind::Timeout => 408,
            ErrorKind::Unimplemented => 501,
            ErrorKind::PreconditionFailed => 412,
            ErrorKind::BadGateway => 502,
        }
    }

    /// RPC ステータスコード（セカンダリコード）を取得
    ///
    /// gRPC のステータスコード番号に対応します。
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::InvalidArgument.rpc_code(), 3);
    /// assert_eq!(ErrorKind::Unauthorised.rpc_code(), 16);
    /// ```
    #[inline]
    pub const fn rpc_code(&self) -> i32 {
        match self {
            ErrorKind::Internal => 13,
            ErrorKind::BadRequest => 9,
            ErrorKind::NotFound => 5,
            ErrorKind::InvalidArgument => 3,
            ErrorKind::Forbidden => 11,
            ErrorKind::Unauthorised => 16,
            ErrorKind::AlreadyExist => 6,
            ErrorKind::Timeout => 4,
            ErrorKind::Unimplemented => 12,
            ErrorKind::PreconditionFailed => 9,
            ErrorKind::BadGateway => 10,
        }
    }

    /// (HTTP ステータス, RPC ステータス) の組を取得
    #[inline]
    pub const fn codes(&self) -> (u16, i32) {
        (self.http_status(), self.rpc_code())
    }

    /// ユーザー向けの文字列表現を取得
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::BadRequest.as_str(), "Bad Request");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Internal => "Internal",
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::InvalidArgument => "Invalid Argument",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::Unauthorised => "Unauthorised",
            ErrorKind::AlreadyExist => "Already Exist",
            ErrorKind::Timeout => "Timeout",
            ErrorKind::Unimplemented => "Unimplemented",
            ErrorKind::PreconditionFailed => "Precondition Failed",
            ErrorKind::BadGateway => "Bad Gateway",
        }
    }

    /// 機械判別用のエラー名を取得
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::PreconditionFailed.name(), "PreconditionFailedError");
    /// ```
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            ErrorKind::Internal => "InternalError",
            ErrorKind::BadRequest => "BadRequestError",
            ErrorKind::NotFound => "NotFoundError",
            ErrorKind::InvalidArgument => "InvalidArgumentError",
            ErrorKind::Forbidden => "ForbiddenError",
            ErrorKind::Unauthorised => "UnauthorisedError",
            ErrorKind::AlreadyExist => "AlreadyExistError",
            ErrorKind::Timeout => "TimeoutError",
            ErrorKind::Unimplemented => "UnimplementedError",
            ErrorKind::PreconditionFailed => "PreconditionFailedError",
            ErrorKind::BadGateway => "BadGatewayError",
        }
    }

    /// サーバー側のエラーかどうかを判定
    ///
    /// 5xx系のエラーは `true` を返します。
    /// これらのエラーはログに記録すべきです。
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.http_status() >= 500
    }

    /// クライアント側のエラーかどうかを判定
    ///
    /// 4xx系のエラーは `true` を返します。
    #[inline]
    pub const fn is_client_error(&self) -> bool {
        let code = self.http_status();
        code >= 400 && code < 500
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_table() {
        let expected = [
            (ErrorKind::Internal, 500, 13),
            (ErrorKind::BadRequest, 400, 9),
            (ErrorKind::NotFound, 404, 5),
            (ErrorKind::InvalidArgument, 422, 3),
            (ErrorKind::Forbidden, 403, 11),
            (ErrorKind::Unauthorised, 401, 16),
            (ErrorKind::AlreadyExist, 422, 6),
            (ErrorKind::Timeout, 408, 4),
            (ErrorKind::Unimplemented, 501, 12),
            (ErrorKind::PreconditionFailed, 412, 9),
            (ErrorKind::BadGateway, 502, 10),
        ];
        for (kind, http, rpc) in expected {
            assert_eq!(kind.codes(), (http, rpc), "{kind:?}");
        }
        assert_eq!(ErrorKind::ALL.len(), expected.len());
    }

    #[test]
    fn test_shared_rpc_code() {
        assert_eq!(
            ErrorKind::BadRequest.rpc_code(),
            ErrorKind::PreconditionFailed.rpc_code()
        );
        assert_ne!(
            ErrorKind::BadRequest.http_status(),
            ErrorKind::PreconditionFailed.http_status()
        );
    }

    #[test]
    fn test_is_server_error() {
        assert!(!ErrorKind::BadRequest.is_server_error());
        assert!(!ErrorKind::NotFound.is_server_error());
        assert!(ErrorKind::Internal.is_server_error());
        assert!(ErrorKind::Unimplemented.is_server_error());
        assert!(ErrorKind::BadGateway.is_server_error());
    }

    #[test]
    fn test_is_client_error() {
        assert!(ErrorKind::BadRequest.is_client_error());
        assert!(ErrorKind::Timeout.is_client_error());
        assert!(!ErrorKind::Internal.is_client_error());
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = ErrorKind::ALL.iter().map(|k| k.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ErrorKind::ALL.len());
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorKind::InvalidArgument).unwrap();
        assert_eq!(json, "\"INVALID_ARGUMENT\"");
    }
}
