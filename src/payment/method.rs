use clap::ValueEnum;
use serde::Serialize;

/// Accepted payment methods. Wire values match what the backend stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Efectivo,
    Tarjeta,
    Yape,
    Plin,
    Transferencia,
    Mixto,
    Credito,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 7] = [
        PaymentMethod::Efectivo,
        PaymentMethod::Tarjeta,
        PaymentMethod::Yape,
        PaymentMethod::Plin,
        PaymentMethod::Transferencia,
        PaymentMethod::Mixto,
        PaymentMethod::Credito,
    ];

    /// Value sent in the `metodo_pago` field.
    pub fn wire(&self) -> &'static str {
        match self {
            PaymentMethod::Efectivo => "efectivo",
            PaymentMethod::Tarjeta => "tarjeta",
            PaymentMethod::Yape => "yape",
            PaymentMethod::Plin => "plin",
            PaymentMethod::Transferencia => "transferencia",
            PaymentMethod::Mixto => "mixto",
            PaymentMethod::Credito => "credito",
        }
    }

    /// Display name used in prompts and listings.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Efectivo => "Efectivo",
            PaymentMethod::Tarjeta => "Tarjeta",
            PaymentMethod::Yape => "Yape",
            PaymentMethod::Plin => "Plin",
            PaymentMethod::Transferencia => "Transferencia",
            PaymentMethod::Mixto => "Pago Mixto",
            PaymentMethod::Credito => "Crédito",
        }
    }
}
