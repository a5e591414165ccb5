use crate::error::AppError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

impl BannerKind {
    pub fn class(self) -> &'static str {
        match self {
            BannerKind::Success => "message success",
            BannerKind::Error => "message error",
        }
    }
}

/// Timed message shown at the top of a screen. Replaced, never stacked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            message: message.into(),
        }
    }

    /// `"<context>: <reason>"` for server-side failures. Transport failures
    /// already read as `Network error: ...` and are shown unprefixed.
    pub fn failure(context: &str, err: &AppError) -> Self {
        if err.is_transport() {
            Self::error(err.to_string())
        } else {
            Self::error(format!("{}: {}", context, err))
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == BannerKind::Error
    }
}
