//! OAuth2 credential lifecycle: the shared token state, its once-per-second
//! expiry countdown and the refresh-token exchange.

pub mod authenticator;
pub mod countdown;
pub mod token_state;
