//! Auth types shared across Nimbus services.
//!
//! Provides the `IdentityHeaders` extractor for gateway-injected identity.

pub mod identity;
