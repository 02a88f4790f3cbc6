//! Tick record models

/// Side of a limit order, as encoded by the order-type token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Decode the integer order-type code: 0 = Buy, 1 = Sell
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(OrderSide::Buy),
            1 => Some(OrderSide::Sell),
            _ => None,
        }
    }
}

/// A limit order attached to a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimitOrder {
    pub limit_price: f64,
    /// `None` for the legacy two-token format
    pub side: Option<OrderSide>,
}

/// One simulated time step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickRecord {
    pub tick_index: usize,
    pub base_price: f64,
    pub limit_order: Option<LimitOrder>,
}
