pub mod expense;
pub mod ledger;
pub mod trip;
