//! Payment kinds and the variance demonstration
//!
//! Result covariance: a factory returning a concrete kind fills a slot
//! expecting any [`Payment`]. Parameter contravariance: one handler accepting
//! any [`Payment`] fills slots expecting a specific kind.

use crate::config::AppConfig;
use crate::sinks::{FileSink, LineSink};
use anyhow::Result;
use callback_registry::{Callable, Func};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Anything that can summarize itself in one line
pub trait Describe {
    fn describe(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreditCard {
    pub user: String,
    pub card_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Upi {
    pub user: String,
    pub upi_id: String,
}

/// Closed set of payment kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum Payment {
    CreditCard(CreditCard),
    Upi(Upi),
}

impl Payment {
    pub fn user(&self) -> &str {
        match self {
            Payment::CreditCard(card) => &card.user,
            Payment::Upi(upi) => &upi.user,
        }
    }
}

impl Describe for CreditCard {
    fn describe(&self) -> String {
        format!("CreditCard - {} using {}", self.user, self.card_number)
    }
}

impl Describe for Upi {
    fn describe(&self) -> String {
        format!("UPI - {} using {}", self.user, self.upi_id)
    }
}

impl Describe for Payment {
    fn describe(&self) -> String {
        match self {
            Payment::CreditCard(card) => card.describe(),
            Payment::Upi(upi) => upi.describe(),
        }
    }
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl From<CreditCard> for Payment {
    fn from(card: CreditCard) -> Self {
        Payment::CreditCard(card)
    }
}

impl From<Upi> for Payment {
    fn from(upi: Upi) -> Self {
        Payment::Upi(upi)
    }
}

pub fn create_credit_card(user: String) -> CreditCard {
    CreditCard {
        user,
        card_number: "1234-XXXX".to_string(),
    }
}

pub fn create_upi(user: String) -> Upi {
    let upi_id = format!("{}@upi", user);
    Upi { user, upi_id }
}

/// `user -> Payment`
pub type PaymentCreator = Func<String, Payment>;

/// `CreditCard -> outcome`
pub type ProcessCreditCard = Func<CreditCard, Result<()>>;

/// `Upi -> outcome`
pub type ProcessUpi = Func<Upi, Result<()>>;

/// Appends payments to a per-kind log file
pub struct PaymentLog {
    console: Arc<dyn LineSink>,
    credit: FileSink,
    upi: FileSink,
}

impl PaymentLog {
    pub fn new(console: Arc<dyn LineSink>, credit: FileSink, upi: FileSink) -> Self {
        Self { console, credit, upi }
    }

    pub fn from_config(config: &AppConfig, console: Arc<dyn LineSink>) -> Self {
        let logging = &config.logging;
        Self::new(
            console,
            FileSink::new(logging.resolve(&logging.credit_log)),
            FileSink::new(logging.resolve(&logging.upi_log)),
        )
    }

    /// Accepts every kind of payment
    pub fn log_payment(&self, payment: Payment) -> Result<()> {
        match &payment {
            Payment::CreditCard(_) => {
                self.credit.write_line(&payment.describe())?;
                self.console.write_line("Credit card log saved")
            }
            Payment::Upi(_) => {
                self.upi.write_line(&payment.describe())?;
                self.console.write_line("UPI log saved")
            }
        }
    }
}

/// Run both halves of the demonstration for a credit-card user and a UPI user
pub fn run_variance(
    config: &AppConfig,
    console: Arc<dyn LineSink>,
    card_user: &str,
    upi_user: &str,
) -> Result<(Payment, Payment)> {
    // Covariance: factories returning concrete kinds fill a Payment-returning slot
    let mut creator: PaymentCreator = Callable::new(create_credit_card).widen();
    let p1 = creator.call(card_user.to_string());
    console.write_line(&p1.describe())?;

    creator = Callable::new(create_upi).widen();
    let p2 = creator.call(upi_user.to_string());
    console.write_line(&p2.describe())?;

    console.write_line("")?;
    console.write_line("--- CONTRAVARIANCE ---")?;

    // Contravariance: one handler of any Payment fills kind-specific slots
    let payment_log = Arc::new(PaymentLog::from_config(config, Arc::clone(&console)));
    let log_payment = Callable::bound(payment_log, PaymentLog::log_payment);
    let credit_handler: ProcessCreditCard = log_payment.clone().narrow();
    let upi_handler: ProcessUpi = log_payment.narrow();

    if let Payment::CreditCard(card) = &p1 {
        credit_handler.call(card.clone())?;
    }
    if let Payment::Upi(upi) = &p2 {
        upi_handler.call(upi.clone())?;
    }

    log::debug!("Logged payments for {} and {}", p1.user(), p2.user());
    Ok((p1, p2))
}
