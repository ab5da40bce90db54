use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("Storage unavailable")]
    StorageUnavailable,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("Toggle control not found: #{0}")]
    ControlMissing(String),

    #[error("Invalid theme value: {0:?}")]
    InvalidTheme(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl ThemeError {
    /// Wrap a thrown JS value, keeping its message when it has one.
    pub(crate) fn from_js(kind: fn(String) -> ThemeError, value: wasm_bindgen::JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &"message".into())
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| "Unknown error".to_string());
        kind(message)
    }
}

impl From<ThemeError> for String {
    fn from(err: ThemeError) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ThemeError::ControlMissing("theme-toggle".into()).to_string(),
            "Toggle control not found: #theme-toggle"
        );
        assert_eq!(
            ThemeError::InvalidTheme("blue".into()).to_string(),
            "Invalid theme value: \"blue\""
        );
        let s: String = ThemeError::StorageUnavailable.into();
        assert_eq!(s, "Storage unavailable");
    }
}
