use rust_decimal_macros::dec;

use crate::types::{Money, Rate};

/// GST levied on loan interest and on processing fees.
pub const GST_RATE: Rate = dec!(0.18);

/// Apply GST to any monetary base. Unrounded.
pub fn gst(amount: Money) -> Money {
    amount * GST_RATE
}

pub fn gst_on_interest(total_interest: Money) -> Money {
    gst(total_interest)
}

pub fn gst_on_processing_fee(processing_fee: Money) -> Money {
    gst(processing_fee)
}
