//! Types shared by the onboarding/chat front ends, the query client and the relay.

pub mod domain;
pub mod protocol;
