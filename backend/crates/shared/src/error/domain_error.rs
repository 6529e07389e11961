//! Domain Error - Classified error with a fixed transport code pair
//!
//! Defines [`DomainError`] struct, [`DomainResult<T>`] type alias and the
//! [`is_domain_error`] predicate.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;
use super::trace::Trace;

/// ドメインエラー型
///
/// 分類済みの失敗を表す標準エラー型です。
/// HTTP / RPC のステータスコードは種別 ([`ErrorKind`]) から一意に決まり、
/// 個別に上書きすることはできません。生成後は不変です。
///
/// ## Fields
/// * `kind` - エラーの分類（コードの組を決定する）
/// * `message` - 人が読むためのメッセージ
/// * `trace` - 診断用トレース（意味論には影響しない）
/// * `source` - 元のエラー（オプション、デバッグ用）
///
/// ## Examples
/// ```rust
/// use kernel::error::{domain_error::DomainError, kind::ErrorKind};
///
/// let err = DomainError::not_found("User not found");
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// assert_eq!(err.codes(), (404, 5));
/// ```
pub struct DomainError {
    /// エラー種別
    kind: ErrorKind,
    /// メッセージ
    message: Cow<'static, str>,
    /// 診断用トレース
    trace: Trace,
    /// 元のエラー（デバッグ用）
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// ドメイン結果型エイリアス
///
/// `Result<T, DomainError>` の省略形です。
///
/// ## Examples
/// ```rust
/// use kernel::error::domain_error::{DomainError, DomainResult};
///
/// fn find_user(id: u32) -> DomainResult<String> {
///     if id == 0 {
///         return Err(DomainError::not_found("User not found"));
///     }
///     Ok("Alice".to_string())
/// }
/// ```
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// 新しいエラーを作成
    ///
    /// トレースは呼び出し元のソース位置で初期化されます。
    /// 空のメッセージも受け付けます（非推奨）。
    ///
    /// ## Arguments
    /// * `kind` - エラー種別
    /// * `message` - メッセージ
    #[inline]
    #[track_caller]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            trace: Trace::capture(),
            source: None,
        }
    }

    // ========================================================================
    // Convenience constructors
    // ========================================================================

    /// 500 / 13 Internal エラー
    #[inline]
    #[track_caller]
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// 400 / 9 Bad Request エラー
    #[inline]
    #[track_caller]
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    /// 404 / 5 Not Found エラー
    #[inline]
    #[track_caller]
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// 422 / 3 Invalid Argument エラー
    #[inline]
    #[track_caller]
    pub fn invalid_argument(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    /// 403 / 11 Forbidden エラー
    #[inline]
    #[track_caller]
    pub fn forbidden(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// 401 / 16 Unauthorised エラー
    #[inline]
    #[track_caller]
    pub fn unauthorised(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unauthorised, message)
    }

    /// 422 / 6 Already Exist エラー
    #[inline]
    #[track_caller]
    pub fn already_exist(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::AlreadyExist, message)
    }

    /// 408 / 4 Timeout エラー
    #[inline]
    #[track_caller]
    pub fn timeout(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// 501 / 12 Unimplemented エラー
    #[inline]
    #[track_caller]
    pub fn unimplemented(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unimplemented, message)
    }

    /// 412 / 9 Precondition Failed エラー
    #[inline]
    #[track_caller]
    pub fn precondition_failed(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::PreconditionFailed, message)
    }

    /// 502 / 10 Bad Gateway エラー
    #[inline]
    #[track_caller]
    pub fn bad_gateway(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadGateway, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// トレースを差し替え
    ///
    /// 指定したトレースが自動取得したトレースを置き換えます。
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::{domain_error::DomainError, trace::Frame};
    ///
    /// let err = DomainError::timeout("Upstream timed out")
    ///     .with_trace(vec![Frame::new("billing::charge")]);
    /// assert_eq!(err.trace().frames()[0].as_str(), "billing::charge");
    /// ```
    #[inline]
    pub fn with_trace(mut self, trace: impl Into<Trace>) -> Self {
        self.trace = trace.into();
        self
    }

    /// 元のエラーを設定（デバッグ用）
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::domain_error::{DomainError, DomainResult};
    ///
    /// fn read_config() -> DomainResult<()> {
    ///     std::fs::read_to_string("config.json")
    ///         .map_err(|e| DomainError::internal("Failed to read config").with_source(e))?;
    ///     Ok(())
    /// }
    /// ```
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// エラー種別を取得
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP ステータスコード（プライマリコード）を取得
    #[inline]
    pub fn http_status(&self) -> u16 {
        self.kind.http_status()
    }

    /// RPC ステータスコード（セカンダリコード）を取得
    #[inline]
    pub fn rpc_code(&self) -> i32 {
        self.kind.rpc_code()
    }

    /// (HTTP, RPC) コードの組を取得
    #[inline]
    pub fn codes(&self) -> (u16, i32) {
        self.kind.codes()
    }

    /// 機械判別用のエラー名を取得
    #[inline]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// メッセージを取得
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// トレースを取得
    #[inline]
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// サーバーエラーかどうか
    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }

    /// クライアントエラーかどうか
    #[inline]
    pub fn is_client_error(&self) -> bool {
        self.kind.is_client_error()
    }

    /// 種別に応じたレベルでログを出力
    pub fn log(&self) {
        match self.kind {
            kind if kind.is_server_error() => {
                tracing::error!(
                    kind = %kind,
                    http_status = kind.http_status(),
                    rpc_code = kind.rpc_code(),
                    message = %self.message,
                    "Domain error"
                );
            }
            ErrorKind::Unauthorised | ErrorKind::Forbidden => {
                tracing::warn!(
                    kind = %self.kind,
                    http_status = self.http_status(),
                    rpc_code = self.rpc_code(),
                    message = %self.message,
                    "Access denied"
                );
            }
            _ => {
                tracing::debug!(
                    kind = %self.kind,
                    http_status = self.http_status(),
                    rpc_code = self.rpc_code(),
                    message = %self.message,
                    "Domain error"
                );
            }
        }
    }
}

impl fmt::Debug for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("DomainError");
        builder.field("kind", &self.kind);
        builder.field("message", &self.message);
        builder.field("trace", &self.trace);
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl Error for DomainError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

/// 値がドメインエラーかどうかを判定
///
/// 構造ではなく型で判定します。[`DomainError`] のコンストラクタで
/// 生成された値のみ `true` になります。
///
/// ## Examples
/// ```rust
/// use kernel::error::domain_error::{DomainError, is_domain_error};
///
/// assert!(is_domain_error(&DomainError::forbidden("nope")));
/// assert!(!is_domain_error(&std::io::Error::other("plain")));
/// ```
pub fn is_domain_error(err: &(dyn Error + 'static)) -> bool {
    err.downcast_ref::<DomainError>().is_some()
}

// ============================================================================
// Result extension traits
// ============================================================================

/// `Result<T, E>` を `DomainResult<T>` に変換するための拡張トレイト
pub trait ResultExt<T, E> {
    /// エラーを `DomainError` に変換し、指定した種別とメッセージでラップ
    fn map_domain_err(
        self,
        kind: ErrorKind,
        message: impl Into<Cow<'static, str>>,
    ) -> DomainResult<T>
    where
        E: Error + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    #[track_caller]
    fn map_domain_err(
        self,
        kind: ErrorKind,
        message: impl Into<Cow<'static, str>>,
    ) -> DomainResult<T>
    where
        E: Error + Send + Sync + 'static,
    {
        match self {
            Ok(value) => Ok(value),
            Err(e) => Err(DomainError::new(kind, message).with_source(e)),
        }
    }
}

/// `Option<T>` を `DomainResult<T>` に変換するための拡張トレイト
pub trait OptionExt<T> {
    /// `None` の場合に `DomainError` を返す
    fn ok_or_domain_err(
        self,
        kind: ErrorKind,
        message: impl Into<Cow<'static, str>>,
    ) -> DomainResult<T>;

    /// `None` の場合に Not Found を返す
    fn ok_or_not_found(self, message: impl Into<Cow<'static, str>>) -> DomainResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    #[track_caller]
    fn ok_or_domain_err(
        self,
        kind: ErrorKind,
        message: impl Into<Cow<'static, str>>,
    ) -> DomainResult<T> {
        match self {
            Some(value) => Ok(value),
            None => Err(DomainError::new(kind, message)),
        }
    }

    #[track_caller]
    fn ok_or_not_found(self, message: impl Into<Cow<'static, str>>) -> DomainResult<T> {
        self.ok_or_domain_err(ErrorKind::NotFound, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::trace::Frame;

    #[test]
    fn test_new_error() {
        let err = DomainError::new(ErrorKind::NotFound, "User not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.http_status(), 404);
        assert_eq!(err.rpc_code(), 5);
        assert_eq!(err.message(), "User not found");
        assert_eq!(err.name(), "NotFoundError");
    }

    #[test]
    fn test_convenience_constructors() {
        let cases = [
            (DomainError::internal("test"), (500, 13)),
            (DomainError::bad_request("test"), (400, 9)),
            (DomainError::not_found("test"), (404, 5)),
            (DomainError::invalid_argument("test"), (422, 3)),
            (DomainError::forbidden("test"), (403, 11)),
            (DomainError::unauthorised("test"), (401, 16)),
            (DomainError::already_exist("test"), (422, 6)),
            (DomainError::timeout("test"), (408, 4)),
            (DomainError::unimplemented("test"), (501, 12)),
            (DomainError::precondition_failed("test"), (412, 9)),
            (DomainError::bad_gateway("test"), (502, 10)),
        ];
        for (err, codes) in cases {
            assert_eq!(err.codes(), codes, "{:?}", err.kind());
            assert!(is_domain_error(&err));
        }
    }

    #[test]
    fn test_is_domain_error_rejects_plain_errors() {
        let plain = std::io::Error::other("boom");
        assert!(!is_domain_error(&plain));

        let boxed: Box<dyn Error + Send + Sync> = Box::new(DomainError::timeout("slow"));
        assert!(is_domain_error(boxed.as_ref()));
    }

    #[test]
    fn test_default_trace_points_at_caller() {
        let err = DomainError::bad_request("missing");
        assert_eq!(err.trace().len(), 1);
        assert!(err.trace().frames()[0].as_str().contains("domain_error.rs"));
    }

    #[test]
    fn test_with_trace_replaces_capture() {
        let err = DomainError::internal("boom")
            .with_trace(vec![Frame::new("repo::save"), Frame::new("service::run")]);
        let frames: Vec<&str> = err.trace().iter().map(Frame::as_str).collect();
        assert_eq!(frames, vec!["repo::save", "service::run"]);
        assert_eq!(err.codes(), (500, 13));
    }

    #[test]
    fn test_empty_message_accepted() {
        let err = DomainError::forbidden("");
        assert_eq!(err.message(), "");
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }

    #[test]
    fn test_with_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = DomainError::internal("Failed to read file").with_source(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_display() {
        let err = DomainError::not_found("User not found");
        assert_eq!(err.to_string(), "[Not Found] User not found");
    }

    #[test]
    fn test_result_ext() {
        let result: Result<i32, std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            "timed out",
        ));
        let mapped = result.map_domain_err(ErrorKind::BadGateway, "Upstream failed");
        let err = mapped.unwrap_err();
        assert_eq!(err.codes(), (502, 10));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_option_ext() {
        let none: Option<i32> = None;
        let result = none.ok_or_not_found("Item not found");
        assert_eq!(result.unwrap_err().http_status(), 404);

        let some: Option<i32> = Some(42);
        assert_eq!(some.ok_or_not_found("Item not found").unwrap(), 42);
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DomainError>();
    }
}
