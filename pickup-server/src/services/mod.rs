//! External collaborators
//!
//! Trait contracts and HTTP clients for the payment gateway and the
//! notification service.

pub mod notify;
pub mod payment;

pub use notify::{HttpNotifier, NoopNotifier, Notifier};
pub use payment::{
    CheckoutSession, DisabledGateway, HostedCheckoutGateway, PaymentGateway, SignatureVerifier,
};
