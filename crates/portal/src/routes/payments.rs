//! Payment ledger route handlers.
//!
//! Records what happened at the desk. Whether an amount is acceptable for a
//! booking is the server's call; a rejected entry surfaces as an upstream
//! error.

use askama::Template;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use meridian_core::{BookingId, PaymentId, PaymentKind, PaymentMethod};

use crate::api::ApiError;
use crate::api::types::{Paginated, Payment, PaymentInput, RefundInput};
use crate::components::{FilterOption, TableColumn, TableFilter};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireStaff;
use crate::state::AppState;

use super::{format_datetime, render, require_credential, PageContext};

const PER_PAGE: u32 = 25;

/// List query parameters.
#[derive(Debug, Deserialize)]
pub struct PaymentListQuery {
    pub page: Option<u32>,
    pub kind: Option<String>,
}

/// Ledger row for the list template.
#[derive(Debug, Clone)]
pub struct PaymentRowView {
    pub id: String,
    pub booking_id: String,
    pub booking_code: String,
    pub kind: &'static str,
    pub is_refund: bool,
    pub method: &'static str,
    pub amount: String,
    pub recorded_by: String,
    pub created_at: String,
}

impl From<&Payment> for PaymentRowView {
    fn from(payment: &Payment) -> Self {
        Self {
            id: payment.id.to_string(),
            booking_id: payment.booking_id.to_string(),
            booking_code: payment.booking_code.clone(),
            kind: match payment.kind {
                PaymentKind::Payment => "Payment",
                PaymentKind::Refund => "Refund",
            },
            is_refund: payment.kind == PaymentKind::Refund,
            method: payment.method.label(),
            amount: payment.amount.display(),
            recorded_by: payment.recorded_by.clone(),
            created_at: format_datetime(&payment.created_at),
        }
    }
}

/// Ledger page template. Includes the record-payment form.
#[derive(Template)]
#[template(path = "payments/index.html")]
pub struct PaymentsIndexTemplate {
    pub ctx: PageContext,
    pub columns: Vec<TableColumn>,
    pub filters: Vec<TableFilter>,
    pub rows: Vec<PaymentRowView>,
    pub total: u64,
    pub page: u32,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

fn list_href(page: u32, kind: Option<&str>) -> String {
    match kind {
        Some(kind) => format!("/payments?page={page}&kind={kind}"),
        None => format!("/payments?page={page}"),
    }
}

/// Ledger page handler.
///
/// GET /payments
#[instrument(skip(user, state, session))]
pub async fn index(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PaymentListQuery>,
) -> Result<Html<String>, AppError> {
    let credential = require_credential(&state, &session).await?;

    let page = query.page.unwrap_or(1).max(1);
    let kind = match query.kind.as_deref() {
        Some("PAYMENT") => Some(PaymentKind::Payment),
        Some("REFUND") => Some(PaymentKind::Refund),
        _ => None,
    };

    let result = state
        .api()
        .list_payments(&credential, page, PER_PAGE, kind)
        .await;
    let listing = match result {
        Ok(listing) => listing,
        Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized.into()),
        Err(e) => {
            tracing::error!("Failed to fetch payments: {e}");
            Paginated::empty(PER_PAGE)
        }
    };

    let kind_value = kind.map(|k| {
        match k {
            PaymentKind::Payment => "PAYMENT",
            PaymentKind::Refund => "REFUND",
        }
        .to_string()
    });

    let template = PaymentsIndexTemplate {
        ctx: PageContext::new(&user, "/payments"),
        columns: vec![
            TableColumn::new("booking", "Booking"),
            TableColumn::new("kind", "Kind"),
            TableColumn::new("method", "Method"),
            TableColumn::numeric("amount", "Amount"),
            TableColumn::new("recorded_by", "Recorded By"),
            TableColumn::new("created_at", "Recorded At"),
        ],
        filters: vec![TableFilter::select(
            "kind",
            "Kind",
            vec![
                FilterOption::new("PAYMENT", "Payments"),
                FilterOption::new("REFUND", "Refunds"),
            ],
            kind_value.clone(),
        )],
        rows: listing.items.iter().map(PaymentRowView::from).collect(),
        total: listing.total,
        prev_href: (page > 1).then(|| list_href(page - 1, kind_value.as_deref())),
        next_href: listing
            .has_next_page()
            .then(|| list_href(page + 1, kind_value.as_deref())),
        page,
    };

    Ok(render(&template))
}

/// Record-payment form body.
#[derive(Debug, Deserialize)]
pub struct RecordPaymentForm {
    pub booking_id: i64,
    pub amount: String,
    pub method: String,
}

fn parse_method(value: &str) -> Option<PaymentMethod> {
    match value {
        "CASH" => Some(PaymentMethod::Cash),
        "CARD" => Some(PaymentMethod::Card),
        "BANK_TRANSFER" => Some(PaymentMethod::BankTransfer),
        "MOBILE" => Some(PaymentMethod::Mobile),
        _ => None,
    }
}

/// Record a payment against a booking.
///
/// POST /payments/record
#[instrument(skip_all)]
pub async fn record(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RecordPaymentForm>,
) -> Result<Redirect, AppError> {
    let credential = require_credential(&state, &session).await?;

    let method = parse_method(&form.method)
        .ok_or_else(|| AppError::BadRequest("unknown payment method".to_string()))?;

    let input = PaymentInput {
        booking_id: BookingId::new(form.booking_id),
        amount: form.amount.trim().to_string(),
        method,
    };
    state.api().record_payment(&credential, &input).await?;

    Ok(Redirect::to("/payments"))
}

/// Refund form body.
#[derive(Debug, Deserialize)]
pub struct RefundForm {
    pub amount: String,
    pub reason: Option<String>,
}

/// Record a refund against a payment.
///
/// POST /payments/{id}/refund
#[instrument(skip(state, session, form))]
pub async fn refund(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Form(form): Form<RefundForm>,
) -> Result<Redirect, AppError> {
    let credential = require_credential(&state, &session).await?;

    let input = RefundInput {
        amount: form.amount.trim().to_string(),
        reason: form.reason.filter(|v| !v.trim().is_empty()),
    };
    state
        .api()
        .record_refund(&credential, PaymentId::new(id), &input)
        .await?;

    Ok(Redirect::to("/payments?kind=REFUND"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_method_wire_values() {
        assert_eq!(parse_method("CASH"), Some(PaymentMethod::Cash));
        assert_eq!(parse_method("BANK_TRANSFER"), Some(PaymentMethod::BankTransfer));
        assert_eq!(parse_method("cash"), None);
        assert_eq!(parse_method(""), None);
    }
}
