//! Checkout orchestrator.
//!
//! A small state machine per session:
//! `ReviewingCart -> EnteringCustomerInfo -> Submitting -> Succeeded`,
//! with failures dropping back to `EnteringCustomerInfo` carrying the error
//! message so the caller can correct and resubmit. Submission is guarded by
//! an explicit atomic flag so a repeated submit while one is outstanding can
//! never produce a duplicate checkout request.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use thiserror::Error;
use tracing::{info, instrument, warn};

use super::gateway::PaymentGateway;
use super::models::{CheckoutItem, CheckoutRequest, CustomerInfo};
use crate::cart::store::CartStore;

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutStage {
    ReviewingCart,
    EnteringCustomerInfo { error: Option<String> },
    Submitting,
    Succeeded { payment_link: String },
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("{0}")]
    Validation(String),

    #[error("a checkout submission is already in progress")]
    SubmissionInFlight,

    #[error("{0}")]
    Gateway(String),
}

pub struct CheckoutFlow {
    stage: Mutex<CheckoutStage>,
    in_flight: AtomicBool,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutFlow {
    pub fn new() -> Self {
        Self {
            stage: Mutex::new(CheckoutStage::ReviewingCart),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn stage(&self) -> CheckoutStage {
        self.stage.lock().expect("checkout stage lock poisoned").clone()
    }

    fn set_stage(&self, next: CheckoutStage) {
        *self.stage.lock().expect("checkout stage lock poisoned") = next;
    }

    /// Moves from cart review to customer-info entry.
    ///
    /// Requires a non-empty cart; returns the rounded total shown read-only
    /// at this step.
    pub fn begin(&self, cart: &CartStore) -> Result<f64, CheckoutError> {
        if cart.is_empty() {
            self.set_stage(CheckoutStage::ReviewingCart);
            return Err(CheckoutError::EmptyCart);
        }

        self.set_stage(CheckoutStage::EnteringCustomerInfo { error: None });
        Ok(cart.display_total())
    }

    /// Validates the customer fields and submits the cart to the payment
    /// gateway, returning the redirect link on success.
    ///
    /// - Validation failure surfaces inline and performs no network call.
    /// - A submit racing an outstanding one is rejected without a second
    ///   gateway call.
    /// - On success the cart is cleared before the link is handed back.
    /// - On gateway failure the entered values stay with the caller, the
    ///   message is surfaced, and the guard is released for retry.
    #[instrument(name = "checkout_submit", skip_all)]
    pub async fn submit(
        &self,
        cart: &Mutex<CartStore>,
        customer: &CustomerInfo,
        gateway: &dyn PaymentGateway,
    ) -> Result<String, CheckoutError> {
        if let Err(message) = validate_customer(customer) {
            warn!(error = %message, "checkout rejected by validation");
            self.set_stage(CheckoutStage::EnteringCustomerInfo {
                error: Some(message.clone()),
            });
            return Err(CheckoutError::Validation(message));
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("duplicate submit ignored while a submission is outstanding");
            return Err(CheckoutError::SubmissionInFlight);
        }

        // Serialize the cart under its lock, releasing it before the await.
        let request = {
            let cart = cart.lock().expect("cart lock poisoned");
            if cart.is_empty() {
                self.in_flight.store(false, Ordering::SeqCst);
                self.set_stage(CheckoutStage::ReviewingCart);
                return Err(CheckoutError::EmptyCart);
            }

            CheckoutRequest {
                items: cart
                    .items()
                    .iter()
                    .map(|i| CheckoutItem {
                        product_id: i.product_id.clone(),
                        quantity: i.quantity,
                    })
                    .collect(),
                customer_name: customer.customer_name.trim().to_string(),
                customer_email: customer.customer_email.trim().to_string(),
                customer_phone: customer.customer_phone.trim().to_string(),
            }
        };

        self.set_stage(CheckoutStage::Submitting);
        info!(items = request.items.len(), "submitting checkout");

        match gateway.initiate(&request).await {
            Ok(envelope) if envelope.success => match envelope.data {
                Some(data) => {
                    cart.lock().expect("cart lock poisoned").clear();
                    self.set_stage(CheckoutStage::Succeeded {
                        payment_link: data.payment_link.clone(),
                    });
                    self.in_flight.store(false, Ordering::SeqCst);
                    info!("checkout accepted, redirecting");
                    Ok(data.payment_link)
                }
                None => self.fail("payment service returned no payment link".to_string()),
            },
            Ok(envelope) => self.fail(
                envelope
                    .error
                    .unwrap_or_else(|| "checkout was declined".to_string()),
            ),
            Err(e) => self.fail(e.to_string()),
        }
    }

    // Shared failure path: back to customer-info entry with the message,
    // guard released so the caller may retry.
    fn fail(&self, message: String) -> Result<String, CheckoutError> {
        warn!(error = %message, "checkout failed");
        self.set_stage(CheckoutStage::EnteringCustomerInfo {
            error: Some(message.clone()),
        });
        self.in_flight.store(false, Ordering::SeqCst);
        Err(CheckoutError::Gateway(message))
    }
}

fn validate_customer(customer: &CustomerInfo) -> Result<(), String> {
    let mut missing = Vec::new();
    if customer.customer_name.trim().is_empty() {
        missing.push("name");
    }
    if customer.customer_email.trim().is_empty() {
        missing.push("email");
    }
    if customer.customer_phone.trim().is_empty() {
        missing.push("phone");
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!("missing required field(s): {}", missing.join(", ")))
    }
}
