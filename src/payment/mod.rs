mod calc;
mod method;
mod plan;

pub use calc::Calculator;
pub use method::PaymentMethod;
pub use plan::{
    plan_full_payment, plan_partial_payment, round_money, FullPaymentPlan, InvoiceSnapshot,
    PartialPaymentPlan, PaymentIntent, VoidIntent,
};
