use serde::Serialize;
use serde_json::Value;

/// Credentials pulled from a `POST /api/login` body.
///
/// Only string fields count; anything else is treated as absent and so never
/// matches an account.
#[derive(Debug, Default, PartialEq)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    /// `None` for a JSON `null` body, which carries no fields at all.
    pub fn from_value(body: &Value) -> Option<Self> {
        if body.is_null() {
            return None;
        }
        let field = |name: &str| body.get(name).and_then(Value::as_str).map(str::to_string);
        Some(Self {
            username: field("username"),
            password: field("password"),
        })
    }
}

/// Login outcome. Always sent with status 200.
#[derive(Debug, PartialEq, Serialize)]
pub struct LoginResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

pub const WRONG_CREDENTIALS: &str = "账号或密码错误";
pub const BAD_REQUEST_BODY: &str = "参数错误";

impl LoginResponse {
    pub fn accepted(username: String) -> Self {
        Self {
            ok: true,
            username: Some(username),
            error: None,
        }
    }

    pub fn rejected(error: &'static str) -> Self {
        Self {
            ok: false,
            username: None,
            error: Some(error),
        }
    }
}
