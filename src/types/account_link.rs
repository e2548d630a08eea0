//! Account-link QR code and callback token types

use super::common::ResultInfo;
use serde::{Deserialize, Serialize};

/// How the gateway sends the user back after authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RedirectType {
    /// Redirect to a web URL
    WebLink,
    /// Redirect through an app deep link
    AppDeepLink,
}

/// Request body for `POST /v1/qr/sessions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAccountLinkQrCodeRequest {
    /// Scopes the user is asked to grant
    pub scopes: Vec<String>,
    /// Random value echoed back in the callback token
    pub nonce: String,
    /// Redirect style
    #[serde(rename = "redirectType", skip_serializing_if = "Option::is_none", default)]
    pub redirect_type: Option<RedirectType>,
    /// Where the user lands after authorization
    #[serde(rename = "redirectUrl")]
    pub redirect_url: String,
    /// Merchant reference echoed back in the callback token
    #[serde(rename = "referenceId")]
    pub reference_id: String,
    /// User phone number, pre-filled on the authorization screen
    #[serde(rename = "phoneNumber", skip_serializing_if = "Option::is_none", default)]
    pub phone_number: Option<String>,
    /// Device identifier
    #[serde(rename = "deviceId", skip_serializing_if = "Option::is_none", default)]
    pub device_id: Option<String>,
    /// User agent of the user's browser
    #[serde(rename = "userAgent", skip_serializing_if = "Option::is_none", default)]
    pub user_agent: Option<String>,
}

impl CreateAccountLinkQrCodeRequest {
    /// Create a new account-link request
    pub fn new(
        scopes: Vec<String>,
        nonce: impl Into<String>,
        redirect_url: impl Into<String>,
        reference_id: impl Into<String>,
    ) -> Self {
        Self {
            scopes,
            nonce: nonce.into(),
            redirect_type: None,
            redirect_url: redirect_url.into(),
            reference_id: reference_id.into(),
            phone_number: None,
            device_id: None,
            user_agent: None,
        }
    }

    /// Set the redirect type
    pub fn with_redirect_type(mut self, redirect_type: RedirectType) -> Self {
        self.redirect_type = Some(redirect_type);
        self
    }

    /// Set the phone number
    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    /// Set the device identifier
    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

/// Response body for `POST /v1/qr/sessions`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAccountLinkQrCodeResponse {
    /// Gateway result block
    #[serde(rename = "resultInfo", default)]
    pub result_info: ResultInfo,
    /// Payload, absent on failure
    #[serde(default)]
    pub data: Option<AccountLinkQrCodeData>,
}

impl CreateAccountLinkQrCodeResponse {
    /// URL of the QR code page the user should be sent to
    pub fn link_qr_code_url(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.link_qr_code_url.as_str())
    }
}

/// Payload of a successful account-link QR code issuance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountLinkQrCodeData {
    /// QR code page URL
    #[serde(rename = "linkQRCodeURL", default)]
    pub link_qr_code_url: String,
}

/// Registered JWT claims
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardClaims {
    /// Audience
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub aud: Option<String>,
    /// Expiry, seconds since epoch
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub exp: Option<i64>,
    /// Token identifier
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub jti: Option<String>,
    /// Issued at, seconds since epoch
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub iat: Option<i64>,
    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub iss: Option<String>,
    /// Not before, seconds since epoch
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub nbf: Option<i64>,
    /// Subject
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sub: Option<String>,
}

/// Claims of the token delivered on the account-link redirect
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseToken {
    /// Registered claims
    #[serde(flatten)]
    pub standard: StandardClaims,
    /// Authorization result, e.g. `succeeded`
    #[serde(default)]
    pub result: String,
    /// Linked user's profile identifier
    #[serde(rename = "profileIdentifier", default)]
    pub profile_identifier: String,
    /// Nonce sent with the QR code request
    #[serde(default)]
    pub nonce: String,
    /// Authorization id used for later API calls on the user's behalf
    #[serde(rename = "userAuthorizationId", default)]
    pub user_authorization_id: String,
    /// Reference id sent with the QR code request
    #[serde(rename = "referenceId", default)]
    pub reference_id: String,
}

impl ResponseToken {
    /// Whether the user completed the authorization
    pub fn is_succeeded(&self) -> bool {
        self.result == "succeeded"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::constants::scopes;
    use serde_json::json;

    #[test]
    fn test_request_wire_names() {
        let request = CreateAccountLinkQrCodeRequest::new(
            vec![scopes::CONTINUOUS_PAYMENTS.to_string()],
            "nonce-1",
            "https://merchant.example.com/confirm",
            "ref-1",
        )
        .with_redirect_type(RedirectType::WebLink);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "scopes": ["continuous_payments"],
                "nonce": "nonce-1",
                "redirectType": "WEB_LINK",
                "redirectUrl": "https://merchant.example.com/confirm",
                "referenceId": "ref-1",
            })
        );
    }

    #[test]
    fn test_request_json_roundtrip() {
        let request = CreateAccountLinkQrCodeRequest::new(
            vec![scopes::DIRECT_DEBIT.to_string(), scopes::GET_BALANCE.to_string()],
            "nonce-2",
            "myapp://confirm",
            "ref-2",
        )
        .with_redirect_type(RedirectType::AppDeepLink)
        .with_phone_number("09012345678")
        .with_device_id("device-1")
        .with_user_agent("Mozilla/5.0");

        let encoded = serde_json::to_string(&request).unwrap();
        let decoded: CreateAccountLinkQrCodeRequest = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_response_decoding() {
        let response: CreateAccountLinkQrCodeResponse = serde_json::from_value(json!({
            "resultInfo": {"code": "SUCCESS", "message": "Success", "codeId": "08100001"},
            "data": {"linkQRCodeURL": "https://qr.paypay.ne.jp/abc"}
        }))
        .unwrap();

        assert!(response.result_info.is_success());
        assert_eq!(response.link_qr_code_url(), Some("https://qr.paypay.ne.jp/abc"));
    }

    #[test]
    fn test_error_response_decoding() {
        let response: CreateAccountLinkQrCodeResponse = serde_json::from_value(json!({
            "resultInfo": {"code": "UNAUTHORIZED", "message": "Unauthorized request", "codeId": "08100024"},
            "data": null
        }))
        .unwrap();

        assert!(!response.result_info.is_success());
        assert_eq!(response.link_qr_code_url(), None);
    }

    #[test]
    fn test_response_token_flattened_claims() {
        let token: ResponseToken = serde_json::from_value(json!({
            "iss": "paypay.ne.jp",
            "exp": 1700000000,
            "result": "succeeded",
            "profileIdentifier": "profile-1",
            "nonce": "nonce-1",
            "userAuthorizationId": "auth-1",
            "referenceId": "ref-1"
        }))
        .unwrap();

        assert!(token.is_succeeded());
        assert_eq!(token.standard.iss.as_deref(), Some("paypay.ne.jp"));
        assert_eq!(token.standard.exp, Some(1700000000));
        assert_eq!(token.user_authorization_id, "auth-1");
    }
}
