//! Resources tau ships with, each declaring the verbs it supports.
//!
//! Registration order is the order sub-commands appear under a verb.

use crate::compose::CapabilityDescriptor;

pub mod network;
pub mod profile;

pub fn registry() -> Vec<Box<dyn CapabilityDescriptor>> {
    vec![Box::new(profile::ProfileResource), Box::new(network::NetworkResource)]
}
