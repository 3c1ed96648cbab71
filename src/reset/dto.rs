use serde::{Deserialize, Serialize};

/// Request body for starting a password reset.
#[derive(Debug, Deserialize)]
pub struct CheckEmailRequest {
    #[serde(default)]
    pub email: String,
}

/// Request body for redeeming an emailed passcode.
#[derive(Debug, Deserialize)]
pub struct VerifyPasscodeRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub passcode: String,
}

/// Request body for replacing the password at the end of the flow.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Reset-flow acknowledgement with an explicit success flag.
#[derive(Debug, Serialize)]
pub struct ResetAck {
    pub success: bool,
    pub message: String,
}

impl ResetAck {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
