use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request body for user registration. Anything beyond email and password
/// is collected into `profile` and stored on the account unvalidated.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Plain success envelope.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Success envelope for login, carrying the issued token.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_collects_extra_fields() {
        let body: RegisterRequest = serde_json::from_str(
            r#"{"email":"a@x.com","password":"p","name":"Ada","age":36}"#,
        )
        .unwrap();
        assert_eq!(body.email, "a@x.com");
        assert_eq!(body.profile["name"], "Ada");
        assert_eq!(body.profile["age"], 36);
    }

    #[test]
    fn login_response_uses_camel_case_token() {
        let response = LoginResponse {
            success: true,
            message: "Login successful".into(),
            access_token: "tok".into(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"accessToken\":\"tok\""));
        assert!(json.contains("\"success\":true"));
    }
}
