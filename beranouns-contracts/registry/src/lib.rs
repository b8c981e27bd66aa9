//! Beranouns: a name registry contract.
//!
//! Names are pairs of components (a label and an emoji). Minting binds a
//! pair to an owner and a resolution target for a fixed duration. The
//! administrator fixed at deployment controls the pause gate, the fees
//! collector, and component pricing.

#![no_std]

#[cfg(test)]
extern crate std;

mod admin;
mod errors;
mod events;
mod labels;
mod pricing;
mod registration;
mod storage;

#[cfg(test)]
mod pricing_tests;

pub use crate::errors::RegistryError;
pub use crate::pricing::{LabelCategory, SECONDS_PER_YEAR};
pub use crate::registration::{Registration, MAX_REGISTRATION_DURATION};

use soroban_sdk::{contract, contractimpl, Address, Env, String};

use crate::storage::DataKey;

#[contract]
pub struct RegistryContract;

#[contractimpl]
impl RegistryContract {
    /// Deploys the registry with its display config and the administrator
    /// that controls pausing, pricing, and the fees collector.
    pub fn __constructor(
        env: Env,
        admin: Address,
        name: String,
        symbol: String,
        fees_collector: Address,
    ) {
        let instance = env.storage().instance();
        instance.set(&DataKey::Admin, &admin);
        instance.set(&DataKey::Name, &name);
        instance.set(&DataKey::Symbol, &symbol);
        instance.set(&DataKey::FeesCollector, &fees_collector);
        instance.set(&DataKey::Paused, &false);
        instance.set(&DataKey::RegistrationCount, &0u64);
        storage::extend_instance_ttl(&env);
    }

    // ── Config reads ──────────────────────────────────────────────────────

    pub fn name(env: Env) -> Result<String, RegistryError> {
        env.storage()
            .instance()
            .get(&DataKey::Name)
            .ok_or(RegistryError::NotInitialized)
    }

    pub fn symbol(env: Env) -> Result<String, RegistryError> {
        env.storage()
            .instance()
            .get(&DataKey::Symbol)
            .ok_or(RegistryError::NotInitialized)
    }

    pub fn fees_collector(env: Env) -> Result<Address, RegistryError> {
        env.storage()
            .instance()
            .get(&DataKey::FeesCollector)
            .ok_or(RegistryError::NotInitialized)
    }

    pub fn admin(env: Env) -> Result<Address, RegistryError> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(RegistryError::NotInitialized)
    }

    pub fn paused(env: Env) -> bool {
        admin::is_paused(&env)
    }

    pub fn registration_count(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::RegistrationCount)
            .unwrap_or(0)
    }

    // ── Administration ────────────────────────────────────────────────────

    /// Blocks registration writes. Admin only; fails if already paused.
    pub fn pause(env: Env) -> Result<(), RegistryError> {
        admin::pause(&env)
    }

    /// Reopens registration writes. Admin only; fails if not paused.
    pub fn unpause(env: Env) -> Result<(), RegistryError> {
        admin::unpause(&env)
    }

    pub fn set_fees_collector(env: Env, new_collector: Address) -> Result<(), RegistryError> {
        admin::set_fees_collector(&env, new_collector)
    }

    /// Sets the per-year price for one specific component. Admin only.
    pub fn set_component_price(
        env: Env,
        component: String,
        price_per_year: i128,
    ) -> Result<(), RegistryError> {
        admin::require_admin(&env)?;
        pricing::set_component_price(&env, &component, price_per_year)?;
        events::Events::component_price_set(&env, &component, price_per_year);
        Ok(())
    }

    /// Sets the per-year default price for a whole category. Admin only.
    pub fn set_category_price(
        env: Env,
        category: LabelCategory,
        price_per_year: i128,
    ) -> Result<(), RegistryError> {
        admin::require_admin(&env)?;
        pricing::set_category_price(&env, category, price_per_year)?;
        events::Events::category_price_set(&env, category, price_per_year);
        Ok(())
    }

    // ── Registration ──────────────────────────────────────────────────────

    /// Registers the `(label, emoji)` pair for `duration` seconds, bound to
    /// `owner` and resolving to `target`. Requires the owner's
    /// authorization; rejected while paused.
    pub fn mint(
        env: Env,
        label: String,
        emoji: String,
        duration: u64,
        owner: Address,
        target: Address,
    ) -> Result<Registration, RegistryError> {
        registration::mint(&env, label, emoji, duration, owner, target)
    }

    /// Extends an existing registration by `duration` seconds.
    pub fn renew(
        env: Env,
        label: String,
        emoji: String,
        duration: u64,
    ) -> Result<Registration, RegistryError> {
        registration::renew(&env, label, emoji, duration)
    }

    /// Hands the registration to a new owner. Current owner only.
    pub fn transfer(
        env: Env,
        label: String,
        emoji: String,
        new_owner: Address,
    ) -> Result<(), RegistryError> {
        registration::transfer(&env, label, emoji, new_owner)
    }

    /// Points the registration at a new target address. Owner only.
    pub fn set_target(
        env: Env,
        label: String,
        emoji: String,
        new_target: Address,
    ) -> Result<(), RegistryError> {
        registration::set_target(&env, label, emoji, new_target)
    }

    // ── Name queries ──────────────────────────────────────────────────────

    /// True when the pair has no record or only an expired one.
    pub fn is_available(env: Env, label: String, emoji: String) -> bool {
        registration::load_live(&env, &label, &emoji).is_none()
    }

    pub fn get_registration(env: Env, label: String, emoji: String) -> Option<Registration> {
        registration::load(&env, &label, &emoji)
    }

    pub fn owner_of(env: Env, label: String, emoji: String) -> Result<Address, RegistryError> {
        registration::load_live(&env, &label, &emoji)
            .map(|r| r.owner)
            .ok_or(RegistryError::NameNotFound)
    }

    /// Target address the unexpired pair resolves to.
    pub fn resolve(env: Env, label: String, emoji: String) -> Result<Address, RegistryError> {
        registration::load_live(&env, &label, &emoji)
            .map(|r| r.target)
            .ok_or(RegistryError::NameNotFound)
    }

    /// Expiry timestamp of the stored record, expired or not.
    pub fn expiry_of(env: Env, label: String, emoji: String) -> Result<u64, RegistryError> {
        registration::load(&env, &label, &emoji)
            .map(|r| r.expires_at)
            .ok_or(RegistryError::NameNotFound)
    }

    // ── Price queries ─────────────────────────────────────────────────────

    /// Quoted price for holding the pair for `duration` seconds.
    pub fn price_of(
        env: Env,
        label: String,
        emoji: String,
        duration: u64,
    ) -> Result<i128, RegistryError> {
        pricing::quote(&env, &label, &emoji, duration)
    }

    /// Effective per-year price of a single component.
    pub fn component_price(env: Env, component: String) -> Result<i128, RegistryError> {
        pricing::component_price_per_year(&env, &component)
    }
}
