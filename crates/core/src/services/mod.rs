pub mod assistant_service;
pub mod ledger_service;
