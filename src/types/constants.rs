//! Protocol constants for endpoints, headers and account-link scopes

/// Gateway base endpoints
pub mod endpoints {
    /// Production API endpoint
    pub const PRODUCTION: &str = "https://api.paypay.ne.jp";
    /// Sandbox API endpoint
    pub const SANDBOX: &str = "https://stg-api.sandbox.paypay.ne.jp";
}

/// Header names and values used on every request
pub mod headers {
    /// Merchant the API key acts on behalf of (`X-ASSUME-MERCHANT`)
    pub const ASSUME_MERCHANT: &str = "x-assume-merchant";
    /// Media type of every request body
    pub const CONTENT_TYPE_JSON: &str = "application/json";
    /// Scheme prefix of the Authorization header
    pub const AUTH_SCHEME: &str = "hmac OPA-Auth";
}

/// Placeholder signed in place of the content type and body hash when there is no body
pub const EMPTY_SENTINEL: &str = "empty";

/// Account-link authorization scopes
pub mod scopes {
    /// Continuous (recurring) payments
    pub const CONTINUOUS_PAYMENTS: &str = "continuous_payments";
    /// Direct debit payments
    pub const DIRECT_DEBIT: &str = "direct_debit";
    /// Cashback grants
    pub const CASHBACK: &str = "cashback";
    /// Read the user's wallet balance
    pub const GET_BALANCE: &str = "get_balance";
    /// Pending payments
    pub const PENDING_PAYMENTS: &str = "pending_payments";
    /// Read the user's profile
    pub const USER_PROFILE: &str = "user_profile";
}
