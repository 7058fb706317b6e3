//! Inbound notification payload and its validation.

use std::fmt;

use serde::Deserialize;
use serde_json::Number;

use crate::error::NotifyError;

/// JSON body exactly as the caller sent it.
///
/// Field names match the public POST contract.
#[derive(Debug, Deserialize)]
struct RawNotification {
    #[serde(default)]
    to_email: Option<String>,
    #[serde(default)]
    order_id: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    order_total: Option<Number>,
}

/// A validated order-status notification.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRequest {
    pub to_email: String,
    pub order_id: String,
    pub status: String,
    /// `None` when the caller sent no total, `null`, or zero.
    pub order_total: Option<OrderTotal>,
}

impl NotificationRequest {
    /// Parse and validate a raw request body.
    ///
    /// Parsing is strict: an empty body or JSON `null` is a malformed
    /// payload. Hosts that cannot see an absent body pass `{}` instead.
    pub fn from_json(body: &[u8]) -> Result<Self, NotifyError> {
        let raw: RawNotification = serde_json::from_slice(body)?;

        let required = |v: Option<String>| v.filter(|s| !s.is_empty());

        match (
            required(raw.to_email),
            required(raw.order_id),
            required(raw.status),
        ) {
            (Some(to_email), Some(order_id), Some(status)) => Ok(NotificationRequest {
                to_email,
                order_id,
                status,
                order_total: raw.order_total.map(OrderTotal).filter(|t| !t.is_zero()),
            }),
            _ => Err(NotifyError::MissingFields),
        }
    }
}

/// Order amount, displayed with `,` thousands separators.
///
/// Integral JSON numbers print without a fraction; fractional ones keep
/// their shortest round-trip digits (`15000.0` stays `15,000.0`). Floats
/// with a decimal exponent below -4 or from 16 up use scientific notation
/// (`1e+21`, `1e-07`) and are not grouped.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTotal(pub Number);

impl OrderTotal {
    pub fn is_zero(&self) -> bool {
        self.0.as_f64() == Some(0.0)
    }
}

impl fmt::Display for OrderTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = if self.0.is_f64() {
            let value = self.0.as_f64().unwrap_or_default();
            if let Some(scientific) = scientific(value) {
                return f.write_str(&scientific);
            }
            if value.is_finite() && value.fract() == 0.0 {
                format!("{value:.1}")
            } else {
                value.to_string()
            }
        } else {
            self.0.to_string()
        };

        let (sign, unsigned) = match text.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", text.as_str()),
        };
        let (int_part, fraction) = match unsigned.split_once('.') {
            Some((i, frac)) => (i, Some(frac)),
            None => (unsigned, None),
        };

        write!(f, "{sign}{}", group_thousands(int_part))?;
        if let Some(frac) = fraction {
            write!(f, ".{frac}")?;
        }
        Ok(())
    }
}

/// Scientific rendering for floats outside `1e-4 <= |x| < 1e16`.
fn scientific(value: f64) -> Option<String> {
    if value == 0.0 || !value.is_finite() {
        return None;
    }

    // `{:e}` gives the shortest round-trip mantissa, e.g. `1.5e16` or `1e-7`.
    let shortest = format!("{value:e}");
    let (mantissa, exponent) = shortest.split_once('e')?;
    let exponent: i32 = exponent.parse().ok()?;

    if (-4..16).contains(&exponent) {
        return None;
    }

    let sign = if exponent < 0 { '-' } else { '+' };
    Some(format!("{mantissa}e{sign}{:02}", exponent.abs()))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
