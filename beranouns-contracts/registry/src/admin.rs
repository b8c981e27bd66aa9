//! Administrative state: stored admin identity and the pause gate.
//!
//! Authorization is an explicit check against the administrator address
//! written at construction. Privileged entrypoints load that address and
//! demand its authorization from the host.

use soroban_sdk::{Address, Env};

use crate::errors::RegistryError;
use crate::events::Events;
use crate::storage::{self, DataKey};

/// Loads the stored administrator and demands its authorization.
pub fn require_admin(env: &Env) -> Result<Address, RegistryError> {
    let admin: Address = env
        .storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(RegistryError::NotInitialized)?;
    admin.require_auth();
    Ok(admin)
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

/// Gate for registration writes. Pause and unpause themselves bypass it.
pub fn require_not_paused(env: &Env) -> Result<(), RegistryError> {
    if is_paused(env) {
        return Err(RegistryError::ContractPaused);
    }
    Ok(())
}

pub fn pause(env: &Env) -> Result<(), RegistryError> {
    let admin = require_admin(env)?;
    if is_paused(env) {
        return Err(RegistryError::AlreadyPaused);
    }
    env.storage().instance().set(&DataKey::Paused, &true);
    storage::extend_instance_ttl(env);
    Events::paused(env, &admin, env.ledger().timestamp());

    #[cfg(feature = "logging")]
    soroban_sdk::log!(env, "registry paused");

    Ok(())
}

pub fn unpause(env: &Env) -> Result<(), RegistryError> {
    let admin = require_admin(env)?;
    if !is_paused(env) {
        return Err(RegistryError::NotPaused);
    }
    env.storage().instance().set(&DataKey::Paused, &false);
    storage::extend_instance_ttl(env);
    Events::unpaused(env, &admin, env.ledger().timestamp());

    #[cfg(feature = "logging")]
    soroban_sdk::log!(env, "registry unpaused");

    Ok(())
}

pub fn set_fees_collector(env: &Env, new_collector: Address) -> Result<(), RegistryError> {
    require_admin(env)?;
    let previous: Address = env
        .storage()
        .instance()
        .get(&DataKey::FeesCollector)
        .ok_or(RegistryError::NotInitialized)?;
    env.storage()
        .instance()
        .set(&DataKey::FeesCollector, &new_collector);
    storage::extend_instance_ttl(env);
    Events::collector_set(env, &previous, &new_collector);
    Ok(())
}
