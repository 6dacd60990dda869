use serde::Serialize;

use super::method::PaymentMethod;
use crate::error::{CajaError, Result};

/// Invoice figures read once from the server-rendered page. The backend is
/// the authority; these values only drive local validation bounds and are
/// never mutated after a command starts.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceSnapshot {
    pub id: u64,
    pub total: f64,
    pub saldo: f64,
    pub estado: Option<String>,
}

impl InvoiceSnapshot {
    pub fn is_void(&self) -> bool {
        self.estado.as_deref() == Some("anulada")
    }

    /// State reported by the server, or derived from the balance when the
    /// page carries no estado metadata.
    pub fn state_label(&self) -> &str {
        if let Some(estado) = &self.estado {
            return estado;
        }
        if self.saldo <= 0.0 {
            "pagada"
        } else if self.saldo < self.total {
            "pago parcial"
        } else {
            "pendiente"
        }
    }
}

/// Body of `POST /facturas/{id}/pagar`.
#[derive(Debug, Serialize, PartialEq)]
pub struct PaymentIntent {
    pub amount: f64,
    pub metodo_pago: PaymentMethod,
    pub es_parcial: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referencia: Option<String>,
}

/// Body of `POST /facturas/{id}/anular`. A blank reason serializes to `{}`.
#[derive(Debug, Serialize, PartialEq)]
pub struct VoidIntent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motivo: Option<String>,
}

impl VoidIntent {
    pub fn new(reason: Option<&str>) -> Self {
        let motivo = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(String::from);
        Self { motivo }
    }
}

#[derive(Debug, PartialEq)]
pub enum FullPaymentPlan {
    Payable(PaymentIntent),
    /// Balance is already zero; reject locally, no request goes out.
    NothingOutstanding,
}

#[derive(Debug, PartialEq)]
pub enum PartialPaymentPlan {
    Payable {
        intent: PaymentIntent,
        /// True when the requested amount exceeded the balance and was clamped.
        clamped: bool,
    },
    /// Balance is already zero; reject locally, no request goes out.
    NothingOutstanding,
}

/// Round to currency scale (two decimal places).
pub fn round_money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Settle the full outstanding balance.
pub fn plan_full_payment(
    snapshot: &InvoiceSnapshot,
    method: PaymentMethod,
    reference: Option<String>,
) -> FullPaymentPlan {
    if snapshot.saldo <= 0.0 {
        return FullPaymentPlan::NothingOutstanding;
    }
    let amount = round_money(snapshot.saldo.min(snapshot.total));
    FullPaymentPlan::Payable(PaymentIntent {
        amount,
        metodo_pago: method,
        es_parcial: false,
        referencia: reference,
    })
}

/// Validate a requested partial amount against the snapshot. A settled
/// invoice accepts nothing; non-numeric or non-positive input is rejected;
/// an amount above the balance is clamped to the balance and flagged so the
/// caller can warn.
pub fn plan_partial_payment(
    snapshot: &InvoiceSnapshot,
    raw_amount: &str,
    method: PaymentMethod,
    reference: Option<String>,
) -> Result<PartialPaymentPlan> {
    if snapshot.saldo <= 0.0 {
        return Ok(PartialPaymentPlan::NothingOutstanding);
    }

    let trimmed = raw_amount.trim();
    let value: f64 = trimmed.parse().map_err(|_| CajaError::InvalidAmount {
        input: trimmed.to_string(),
        reason: "must be a number".to_string(),
    })?;

    if !value.is_finite() || value <= 0.0 {
        return Err(CajaError::InvalidAmount {
            input: trimmed.to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }

    let clamped = value > snapshot.saldo;
    let amount = round_money(if clamped { snapshot.saldo } else { value });

    Ok(PartialPaymentPlan::Payable {
        intent: PaymentIntent {
            amount,
            metodo_pago: method,
            es_parcial: true,
            referencia: reference,
        },
        clamped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(total: f64, saldo: f64) -> InvoiceSnapshot {
        InvoiceSnapshot {
            id: 7,
            total,
            saldo,
            estado: None,
        }
    }

    #[test]
    fn full_payment_uses_outstanding_balance() {
        let plan = plan_full_payment(&snapshot(100.0, 60.0), PaymentMethod::Efectivo, None);
        match plan {
            FullPaymentPlan::Payable(intent) => {
                assert_eq!(intent.amount, 60.0);
                assert!(!intent.es_parcial);
            }
            other => panic!("expected payable plan, got {other:?}"),
        }
    }

    #[test]
    fn full_payment_rejected_when_nothing_outstanding() {
        let plan = plan_full_payment(&snapshot(100.0, 0.0), PaymentMethod::Tarjeta, None);
        assert_eq!(plan, FullPaymentPlan::NothingOutstanding);
    }

    #[test]
    fn partial_rejects_non_numeric_input() {
        let err = plan_partial_payment(&snapshot(100.0, 100.0), "abc", PaymentMethod::Yape, None)
            .unwrap_err();
        assert!(matches!(err, CajaError::InvalidAmount { .. }));
    }

    #[test]
    fn partial_rejects_non_positive_input() {
        for raw in ["0", "-5", "-0.01"] {
            let err =
                plan_partial_payment(&snapshot(100.0, 100.0), raw, PaymentMethod::Yape, None)
                    .unwrap_err();
            assert!(matches!(err, CajaError::InvalidAmount { .. }), "{raw}");
        }
    }

    #[test]
    fn partial_clamps_to_balance() {
        let plan =
            plan_partial_payment(&snapshot(100.0, 100.0), "150", PaymentMethod::Efectivo, None)
                .unwrap();
        match plan {
            PartialPaymentPlan::Payable { intent, clamped } => {
                assert!(clamped);
                assert_eq!(intent.amount, 100.0);
                assert!(intent.es_parcial);
            }
            other => panic!("expected payable plan, got {other:?}"),
        }
    }

    #[test]
    fn partial_keeps_valid_amount_and_rounds() {
        let plan =
            plan_partial_payment(&snapshot(100.0, 60.0), "40.006", PaymentMethod::Plin, None)
                .unwrap();
        match plan {
            PartialPaymentPlan::Payable { intent, clamped } => {
                assert!(!clamped);
                assert_eq!(intent.amount, 40.01);
            }
            other => panic!("expected payable plan, got {other:?}"),
        }
    }

    #[test]
    fn partial_rejected_when_nothing_outstanding() {
        let plan =
            plan_partial_payment(&snapshot(100.0, 0.0), "10", PaymentMethod::Efectivo, None)
                .unwrap();
        assert_eq!(plan, PartialPaymentPlan::NothingOutstanding);
    }

    #[test]
    fn intent_serializes_to_wire_body() {
        let intent = PaymentIntent {
            amount: 40.0,
            metodo_pago: PaymentMethod::Efectivo,
            es_parcial: true,
            referencia: None,
        };
        let body = serde_json::to_string(&intent).unwrap();
        assert_eq!(
            body,
            r#"{"amount":40.0,"metodo_pago":"efectivo","es_parcial":true}"#
        );
    }

    #[test]
    fn intent_includes_reference_when_present() {
        let intent = PaymentIntent {
            amount: 10.0,
            metodo_pago: PaymentMethod::Transferencia,
            es_parcial: false,
            referencia: Some("OP-1234".to_string()),
        };
        let body = serde_json::to_string(&intent).unwrap();
        assert!(body.contains(r#""referencia":"OP-1234""#));
    }

    #[test]
    fn void_intent_trims_reason() {
        let intent = VoidIntent::new(Some("  client cancelled  "));
        assert_eq!(intent.motivo.as_deref(), Some("client cancelled"));
        let body = serde_json::to_string(&intent).unwrap();
        assert_eq!(body, r#"{"motivo":"client cancelled"}"#);
    }

    #[test]
    fn blank_void_reason_sends_empty_body() {
        for reason in [None, Some(""), Some("   ")] {
            let intent = VoidIntent::new(reason);
            assert_eq!(serde_json::to_string(&intent).unwrap(), "{}");
        }
    }

    #[test]
    fn state_label_derived_from_balance() {
        assert_eq!(snapshot(100.0, 100.0).state_label(), "pendiente");
        assert_eq!(snapshot(100.0, 40.0).state_label(), "pago parcial");
        assert_eq!(snapshot(100.0, 0.0).state_label(), "pagada");
    }

    #[test]
    fn state_label_prefers_server_metadata() {
        let mut snap = snapshot(100.0, 100.0);
        snap.estado = Some("anulada".to_string());
        assert_eq!(snap.state_label(), "anulada");
        assert!(snap.is_void());
    }
}
