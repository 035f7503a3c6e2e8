pub mod account;
pub mod money;
pub mod payment;
pub mod totals;

pub use account::AccountNumber;
pub use money::Money;
pub use payment::PaymentOccurrence;
pub use totals::AccountTotals;
