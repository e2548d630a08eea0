//! Account-link QR code issuance and callback token parsing

use super::{ensure_status, Client, HasResultInfo, Method, RequestContext};
use crate::crypto::jwt;
use crate::types::{
    ApiResponse, CreateAccountLinkQrCodeRequest, CreateAccountLinkQrCodeResponse, ResponseToken,
    ResultInfo,
};
use crate::Result;
use http::StatusCode;

/// Path of the account-link QR code endpoint
pub const ACCOUNT_LINK_QR_CODE_PATH: &str = "/v1/qr/sessions";

impl HasResultInfo for CreateAccountLinkQrCodeResponse {
    fn result_info(&self) -> &ResultInfo {
        &self.result_info
    }
}

impl Client {
    /// Issue a QR code the user scans to link their account
    ///
    /// Succeeds only on `201 Created`. Any other status is returned as
    /// [`PayPayError::Api`](crate::PayPayError::Api) with the decoded result info.
    pub async fn create_account_link_qr_code(
        &self,
        ctx: &RequestContext,
        request: &CreateAccountLinkQrCodeRequest,
    ) -> Result<ApiResponse<CreateAccountLinkQrCodeResponse>> {
        let http_request = self.build_request(Method::Post, ACCOUNT_LINK_QR_CODE_PATH, Some(request))?;
        let response = self.execute(ctx, http_request).await?;
        ensure_status(response, StatusCode::CREATED)
    }

    /// Verify the `responseToken` delivered on the account-link redirect
    pub fn parse_response_token(&self, token: &str) -> Result<ResponseToken> {
        jwt::parse_response_token(token, &self.api_secret)
    }
}
