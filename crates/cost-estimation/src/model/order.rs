/// Represents a customer order for a manufactured part.
///
/// # Lifecycle
/// An order starts as a [`PendingOrder`] holding only its id, and makes
/// exactly one transition: [`PendingOrder::complete`] (status `created`, with
/// the calculation attached) or [`PendingOrder::fail`] (status `failed`).
/// Both consume the pending order, so a second transition cannot be written.
use crate::model::CalculationResult;
use serde::{Deserialize, Serialize};
use service_framework::RandomSource;
use std::fmt::Display;

/// Order identifier of the form `ORD-XXXXX`, five decimal digits.
///
/// Ids are drawn at random per request with no uniqueness check; two orders
/// may share an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderId(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid order id: {0}")]
pub struct InvalidOrderId(pub String);

impl OrderId {
    pub const PREFIX: &'static str = "ORD-";
    pub const DIGITS: usize = 5;

    /// Draws each digit independently and uniformly from 0-9.
    pub fn generate(random: &dyn RandomSource) -> Self {
        let mut id = String::with_capacity(Self::PREFIX.len() + Self::DIGITS);
        id.push_str(Self::PREFIX);
        for _ in 0..Self::DIGITS {
            let digit = random.int_in(0..=9);
            id.push(char::from(b'0' + digit as u8));
        }
        Self(id)
    }

    pub fn parse(value: &str) -> Result<Self, InvalidOrderId> {
        let valid = value
            .strip_prefix(Self::PREFIX)
            .is_some_and(|digits| {
                digits.len() == Self::DIGITS && digits.bytes().all(|b| b.is_ascii_digit())
            });

        if valid {
            Ok(Self(value.to_string()))
        } else {
            Err(InvalidOrderId(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for OrderId {
    type Error = InvalidOrderId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<OrderId> for String {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Created,
    Failed,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Failed => "failed",
        }
    }
}

/// The terminal state of an order, as returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub status: OrderStatus,
    /// Present only when `status` is `created`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculation: Option<CalculationResult>,
}

/// An order whose calculation has not come back yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOrder {
    order_id: OrderId,
}

impl PendingOrder {
    pub fn new(order_id: OrderId) -> Self {
        Self { order_id }
    }

    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    pub fn complete(self, calculation: CalculationResult) -> Order {
        Order {
            order_id: self.order_id,
            status: OrderStatus::Created,
            calculation: Some(calculation),
        }
    }

    pub fn fail(self) -> Order {
        Order {
            order_id: self.order_id,
            status: OrderStatus::Failed,
            calculation: None,
        }
    }
}
