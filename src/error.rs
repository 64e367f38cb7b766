use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("element not found: {0}")]
    MissingElement(&'static str),
    #[error("javascript error: {0}")]
    Js(String),
    #[error("request failed: {0}")]
    Network(#[from] gloo_net::Error),
    #[error("unknown theme {0:?}")]
    UnknownTheme(String),
    #[error("submission rejected: {}", .0.as_deref().unwrap_or("no message"))]
    Rejected(Option<String>),
}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        SiteError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

pub type SiteResult<T> = Result<T, SiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_message_is_shown_in_display() {
        let err = SiteError::Rejected(Some("Invalid email".to_string()));
        assert_eq!(err.to_string(), "submission rejected: Invalid email");
        assert_eq!(
            SiteError::Rejected(None).to_string(),
            "submission rejected: no message"
        );
    }

    #[test]
    fn missing_element_names_the_selector() {
        let err = SiteError::MissingElement(".loader");
        assert_eq!(err.to_string(), "element not found: .loader");
    }
}
