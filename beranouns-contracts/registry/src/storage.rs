//! Storage key definitions and rent management for the registry contract.

use soroban_sdk::{contracttype, Env, String};

use crate::pricing::LabelCategory;

/// Storage keys for the registry contract.
///
/// Config and the pause gate live in instance storage so they share the
/// contract's lifetime; registrations and price overrides are persistent
/// entries keyed by their components.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Contract administrator address.
    Admin,

    /// Display name fixed at construction.
    Name,

    /// Short symbol fixed at construction.
    Symbol,

    /// Address designated to receive collected fees.
    FeesCollector,

    /// Global gate blocking registration writes when true.
    Paused,

    /// Total number of successful mints.
    RegistrationCount,

    /// Maps a (label, emoji) component pair to its Registration record.
    Registration(String, String),

    /// Admin-set price override for a single component, per year.
    ComponentPrice(String),

    /// Admin-set default price for a pricing category, per year.
    CategoryPrice(LabelCategory),
}

// Rent lifetimes in ledger entries (~5s each).
pub const INSTANCE_TTL_THRESHOLD: u32 = 518_400; // ~30 days
pub const INSTANCE_TTL_EXTEND: u32 = 2_592_000; // ~150 days
pub const REGISTRATION_TTL_THRESHOLD: u32 = 518_400; // ~30 days
pub const REGISTRATION_TTL_EXTEND: u32 = 6_307_200; // ~1 year

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

pub fn extend_registration_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, REGISTRATION_TTL_THRESHOLD, REGISTRATION_TTL_EXTEND);
}
