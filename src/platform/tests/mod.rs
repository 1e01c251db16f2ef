//! Platform adapter tests
//!
//! Payload mapping is tested offline against captured fixture fragments;
//! no test here touches the network.

mod payload_mapping;
