use super::billing::CompletedTrip;
use crate::domain::fare::GST_RATE;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceLine {
    pub label: String,
    pub amount: Decimal,
}

/// Figures for a trip receipt.
///
/// Every amount comes straight from the fare breakdown; nothing is derived
/// back from the billed total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invoice {
    pub reference: String,
    pub base_amount: Decimal,
    pub tax_amount: i64,
    pub fare_total: i64,
    pub service_charge: i64,
    pub grand_total: i64,
}

impl Invoice {
    pub fn from_completed(trip: &CompletedTrip) -> Self {
        let breakdown = &trip.breakdown;
        Self {
            reference: trip.reference.clone(),
            base_amount: breakdown.base_amount,
            tax_amount: breakdown.tax_amount,
            fare_total: breakdown.total_amount,
            service_charge: trip.billed_amount - breakdown.total_amount,
            grand_total: trip.billed_amount,
        }
    }

    pub fn lines(&self) -> Vec<InvoiceLine> {
        let gst_percent = (GST_RATE * Decimal::ONE_HUNDRED).normalize();
        let mut lines = vec![
            InvoiceLine {
                label: "Base Billable".to_string(),
                amount: self.base_amount.normalize(),
            },
            InvoiceLine {
                label: format!("GST ({gst_percent}%)"),
                amount: Decimal::from(self.tax_amount),
            },
        ];
        if self.service_charge != 0 {
            lines.push(InvoiceLine {
                label: "Service Charge".to_string(),
                amount: Decimal::from(self.service_charge),
            });
        }
        lines.push(InvoiceLine {
            label: "Grand Total".to_string(),
            amount: Decimal::from(self.grand_total),
        });
        lines
    }
}
