//! Request bodies for the payment endpoints.

use serde::Serialize;

/// Redirect targets shown to the payer after checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Redirects {
    /// Where to send the payer after a successful payment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_url: Option<String>,
    /// Where to send the payer after a failed payment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_url: Option<String>,
}

impl Redirects {
    /// Creates redirects with both targets set.
    #[must_use]
    pub fn new(success_url: impl Into<String>, failure_url: impl Into<String>) -> Self {
        Self {
            success_url: Some(success_url.into()),
            failure_url: Some(failure_url.into()),
        }
    }
}

/// Hosted checkout always sends both redirect keys, `null` when unset.
#[derive(Debug, Serialize)]
struct CheckoutRedirects<'a> {
    success_url: Option<&'a str>,
    failure_url: Option<&'a str>,
}

impl<'a> From<&'a Redirects> for CheckoutRedirects<'a> {
    fn from(redirects: &'a Redirects) -> Self {
        Self {
            success_url: redirects.success_url.as_deref(),
            failure_url: redirects.failure_url.as_deref(),
        }
    }
}

fn serialize_checkout_redirects<S: serde::Serializer>(
    redirects: &Redirects,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    CheckoutRedirects::from(redirects).serialize(serializer)
}

/// Body of `POST /api/v2/payment/direct`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectPaymentRequest {
    /// Amount to charge
    pub amount: f64,
    /// ISO currency code, e.g. `ETB`
    pub currency: String,
    /// Payer's phone number
    pub phone_number: String,
    /// Payment medium, e.g. `TELEBIRR`
    pub medium: String,
    /// Merchant reference, unique per payment
    pub reference: String,
    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Webhook target for status notifications
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    /// Post-payment redirects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirects: Option<Redirects>,
    /// Whether the merchant absorbs the fee
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_pays_fee: Option<bool>,
}

impl DirectPaymentRequest {
    /// Creates a request with the required fields only.
    #[must_use]
    pub fn new(
        amount: f64,
        currency: impl Into<String>,
        phone_number: impl Into<String>,
        medium: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            currency: currency.into(),
            phone_number: phone_number.into(),
            medium: medium.into(),
            reference: reference.into(),
            description: None,
            callback_url: None,
            redirects: None,
            merchant_pays_fee: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the callback URL.
    #[must_use]
    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    /// Sets the redirects.
    #[must_use]
    pub fn with_redirects(mut self, redirects: Redirects) -> Self {
        self.redirects = Some(redirects);
        self
    }

    /// Sets who pays the fee.
    #[must_use]
    pub const fn with_merchant_pays_fee(mut self, merchant_pays_fee: bool) -> Self {
        self.merchant_pays_fee = Some(merchant_pays_fee);
        self
    }
}

/// Body of `POST /api/v2/payment/withdrawal`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithdrawalRequest {
    /// Amount to pay out
    pub amount: f64,
    /// ISO currency code
    pub currency: String,
    /// Recipient's phone number
    pub phone_number: String,
    /// Payout medium
    pub medium: String,
    /// Merchant reference, unique per withdrawal
    pub reference: String,
    /// Webhook target for status notifications
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

impl WithdrawalRequest {
    /// Creates a request with the required fields only.
    #[must_use]
    pub fn new(
        amount: f64,
        currency: impl Into<String>,
        phone_number: impl Into<String>,
        medium: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            currency: currency.into(),
            phone_number: phone_number.into(),
            medium: medium.into(),
            reference: reference.into(),
            callback_url: None,
        }
    }

    /// Sets the callback URL.
    #[must_use]
    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }
}

/// Body of `POST /api/v2/payment/checkout`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostedCheckoutRequest {
    /// Amount to charge
    pub amount: f64,
    /// ISO currency code
    pub currency: String,
    /// Payer's phone number
    pub phone_number: String,
    /// Merchant reference, unique per checkout
    pub reference: String,
    /// Post-payment redirects; both keys are always sent
    #[serde(serialize_with = "serialize_checkout_redirects")]
    pub redirects: Redirects,
    /// Mediums offered on the hosted page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_mediums: Option<Vec<String>>,
    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Webhook target for status notifications
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

impl HostedCheckoutRequest {
    /// Creates a request with the required fields only.
    #[must_use]
    pub fn new(
        amount: f64,
        currency: impl Into<String>,
        phone_number: impl Into<String>,
        reference: impl Into<String>,
        redirects: Redirects,
    ) -> Self {
        Self {
            amount,
            currency: currency.into(),
            phone_number: phone_number.into(),
            reference: reference.into(),
            redirects,
            supported_mediums: None,
            description: None,
            callback_url: None,
        }
    }

    /// Restricts the mediums offered to the payer.
    #[must_use]
    pub fn with_supported_mediums<I, S>(mut self, mediums: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_mediums = Some(mediums.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the callback URL.
    #[must_use]
    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }
}
