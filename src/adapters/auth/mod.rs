//! OAuth adapters. Google device-authorization flow.

pub mod google;

pub use google::GoogleAuth;
