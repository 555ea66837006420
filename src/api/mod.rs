use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Network,
    Http,
    Parse,
    /// The proxy answered with an `error` field.
    Remote,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn remote(message: String) -> Self {
        Self {
            kind: ApiErrorKind::Remote,
            message,
        }
    }

    fn http(status: reqwest::StatusCode, body: String) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("Chat request failed ({status}): {body}"),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

const DEFAULT_CHAT_URL: &str = "http://localhost:54321/functions/v1/gemini-proxy";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct EnvConfig {
    pub chat_url: String,
    pub api_key: Option<String>,
}

fn env_string(env: &wasm_bindgen::JsValue, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| {
        js_sys::Reflect::get(env, &(*k).into())
            .ok()
            .and_then(|v| v.as_string())
            .filter(|s| !s.trim().is_empty())
    })
}

impl EnvConfig {
    /// Read `window.ENV`, accepting both `CHAT_URL`/`API_KEY` and their lowercase forms.
    pub fn new() -> Self {
        let env = web_sys::window()
            .and_then(|w| w.get("ENV"))
            .map(wasm_bindgen::JsValue::from)
            .filter(|env| !env.is_undefined() && env.is_object());

        let Some(env) = env else {
            return Self::default_local();
        };

        Self {
            chat_url: env_string(&env, &["CHAT_URL", "chat_url"])
                .unwrap_or_else(|| DEFAULT_CHAT_URL.to_string()),
            api_key: env_string(&env, &["API_KEY", "api_key"]),
        }
    }

    fn default_local() -> Self {
        Self {
            chat_url: DEFAULT_CHAT_URL.to_string(),
            api_key: None,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Clone, Debug)]
pub(crate) struct ChatRequest<'a> {
    pub user_message: &'a str,
}

#[derive(Deserialize, Clone, Debug, Default)]
struct ChatResponse {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Interpret a proxy reply body.
///
/// `{"error": ..}` becomes a remote error; a missing or blank `response` is `Ok(None)` so
/// the caller can show its own fallback text.
pub(crate) fn parse_chat_response(data: serde_json::Value) -> ApiResult<Option<String>> {
    let body: ChatResponse = serde_json::from_value(data).map_err(ApiError::parse)?;
    if let Some(err) = body.error.filter(|e| !e.trim().is_empty()) {
        return Err(ApiError::remote(err));
    }
    Ok(body.response.filter(|r| !r.trim().is_empty()))
}

#[derive(Clone, Debug)]
pub(crate) struct ChatClient {
    pub(crate) chat_url: String,
    pub(crate) api_key: Option<String>,
}

impl ChatClient {
    pub fn new(config: EnvConfig) -> Self {
        Self {
            chat_url: config.chat_url,
            api_key: config.api_key,
        }
    }

    fn with_auth_headers(
        mut req: reqwest::RequestBuilder,
        key: Option<&str>,
    ) -> reqwest::RequestBuilder {
        if let Some(key) = key {
            req = req
                .header("Authorization", format!("Bearer {key}"))
                .header("apikey", key);
        }
        req
    }

    /// Forward one prompt to the proxy; `Ok(None)` when it had nothing to say.
    pub async fn send_prompt(&self, prompt: &str) -> ApiResult<Option<String>> {
        let client = reqwest::Client::new();
        let mut req = client.post(&self.chat_url);
        req = Self::with_auth_headers(req, self.api_key.as_deref());
        req = req.json(&ChatRequest {
            user_message: prompt,
        });

        let res = req.send().await.map_err(ApiError::network)?;
        let status = res.status();

        if status.is_success() {
            let data: serde_json::Value = res.json().await.map_err(ApiError::parse)?;
            return parse_chat_response(data);
        }

        let body = res.text().await.unwrap_or_default();
        // The proxy reports its own failures as `{"error": ..}` with a non-2xx status.
        if let Ok(data) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Err(e) = parse_chat_response(data) {
                if e.kind == ApiErrorKind::Remote {
                    return Err(e);
                }
            }
        }
        Err(ApiError::http(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let v = serde_json::to_value(ChatRequest {
            user_message: "oi",
        })
        .unwrap();
        assert_eq!(v, json!({"user_message": "oi"}));
    }

    #[test]
    fn test_parse_response_text() {
        let r = parse_chat_response(json!({"response": "TITULO: x"})).unwrap();
        assert_eq!(r.as_deref(), Some("TITULO: x"));
    }

    #[test]
    fn test_parse_missing_or_blank_response() {
        assert_eq!(parse_chat_response(json!({})).unwrap(), None);
        assert_eq!(parse_chat_response(json!({"response": "  "})).unwrap(), None);
    }

    #[test]
    fn test_parse_error_field() {
        let e = parse_chat_response(json!({"error": "quota exceeded"})).unwrap_err();
        assert_eq!(e.kind, ApiErrorKind::Remote);
        assert_eq!(e.to_string(), "quota exceeded");
    }

    #[test]
    fn test_parse_wrong_shape() {
        let e = parse_chat_response(json!({"response": 42})).unwrap_err();
        assert_eq!(e.kind, ApiErrorKind::Parse);
    }
}
