//! IO edge of the bankview client.
//!
//! Implements the seams the core state engine declares: the HTTP banking
//! API (auth, accounts, transactions, transfers) over `reqwest`, and
//! JSON-file session persistence. Nothing in here holds workflow state;
//! every call is a thin, fallible boundary crossing.

pub mod http;
pub mod storage;

pub use http::HttpBankingApi;
pub use storage::FileStorage;
