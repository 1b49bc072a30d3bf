//! Business requests to wire structs.
//!
//! Only float encoding can fail here; the field that failed is carried in
//! [`ExchangeError::Encode`].

use hlsig_core::{float_to_wire, AssetId, OrderKind, OrderRequest};
use hlsig_signer::action::{OrderTypeWire, OrderWire};

use crate::error::{ExchangeError, ExchangeResult};

pub fn encode_float(field: &'static str, value: f64) -> ExchangeResult<String> {
    float_to_wire(value).map_err(ExchangeError::encode(field))
}

pub fn order_type_wire(kind: &OrderKind) -> ExchangeResult<OrderTypeWire> {
    match *kind {
        OrderKind::Limit { tif } => Ok(OrderTypeWire::limit(tif)),
        OrderKind::Trigger {
            trigger_px,
            is_market,
            tpsl,
        } => Ok(OrderTypeWire::trigger(
            is_market,
            encode_float("trigger_px", trigger_px)?,
            tpsl,
        )),
    }
}

pub fn order_wire(order: &OrderRequest, asset: AssetId) -> ExchangeResult<OrderWire> {
    Ok(OrderWire {
        asset: asset.0,
        is_buy: order.is_buy,
        limit_px: encode_float("limit_px", order.limit_px)?,
        sz: encode_float("sz", order.sz)?,
        reduce_only: order.reduce_only,
        order_type: order_type_wire(&order.kind)?,
        cloid: order.cloid,
    })
}
