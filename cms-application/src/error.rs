use cms_domain::error::DomainError;

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("validation: {0}")]
    Validation(String),

    #[error("handler not found: {0}")]
    HandlerNotFound(&'static str),

    #[error("aggregate not found: {0}")]
    AggregateNotFound(String),

    #[error("handler already registered: command={command}")]
    AlreadyRegisteredCommand { command: &'static str },

    #[error("handler already registered: query={query}")]
    AlreadyRegisteredQuery { query: &'static str },

    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl AppError {
    /// 映射为 HTTP 语义的状态码，供接入层组装响应
    ///
    /// 订阅者/批量补偿失败视为服务端错误（主操作可能已提交）。
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::TypeMismatch { .. } => 400,
            Self::AggregateNotFound(_) => 404,
            Self::Domain(err) => match err {
                DomainError::NotFound { .. } => 404,
                DomainError::VersionConflict { .. } => 409,
                DomainError::InvalidValue { .. } | DomainError::Parse { .. } => 400,
                DomainError::InvalidState { .. } => 422,
                _ => 500,
            },
            Self::HandlerNotFound(_)
            | Self::AlreadyRegisteredCommand { .. }
            | Self::AlreadyRegisteredQuery { .. } => 500,
        }
    }

    /// 是否为事件分发阶段的失败（主操作已提交，后续一致性修复未完成）
    pub fn is_dispatch_failure(&self) -> bool {
        matches!(self, Self::Domain(err) if err.is_dispatch_failure())
    }
}
