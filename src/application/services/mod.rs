pub mod reconcile;

pub use reconcile::{ReconciliationService, SessionBackend, SessionRedirect};
