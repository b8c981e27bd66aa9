//! Registration records and the operations that mutate them.

use soroban_sdk::{contracttype, Address, Env, String};

use crate::admin;
use crate::errors::RegistryError;
use crate::events::Events;
use crate::labels;
use crate::pricing;
use crate::storage::{self, DataKey};

/// Longest term accepted in a single mint or renewal: ten years.
pub const MAX_REGISTRATION_DURATION: u64 = 10 * pricing::SECONDS_PER_YEAR;

/// A name record bound to an owner and a resolution target.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Registration {
    /// First name component.
    pub label: String,
    /// Second name component.
    pub emoji: String,
    /// Address that controls the registration.
    pub owner: Address,
    /// Address the name resolves to.
    pub target: Address,
    /// Ledger timestamp of the mint.
    pub registered_at: u64,
    /// Ledger timestamp past which the pair is free to claim again.
    pub expires_at: u64,
}

impl Registration {
    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.expires_at
    }
}

fn validate_duration(duration: u64) -> Result<(), RegistryError> {
    if duration == 0 {
        return Err(RegistryError::InvalidDuration);
    }
    if duration > MAX_REGISTRATION_DURATION {
        return Err(RegistryError::DurationTooLong);
    }
    Ok(())
}

/// Fetches the stored record for a pair, extending its rent on a hit.
pub fn load(env: &Env, label: &String, emoji: &String) -> Option<Registration> {
    let key = DataKey::Registration(label.clone(), emoji.clone());
    let registration: Option<Registration> = env.storage().persistent().get(&key);
    if registration.is_some() {
        storage::extend_registration_ttl(env, &key);
    }
    registration
}

fn store(env: &Env, registration: &Registration) {
    let key = DataKey::Registration(registration.label.clone(), registration.emoji.clone());
    env.storage().persistent().set(&key, registration);
    storage::extend_registration_ttl(env, &key);
}

/// Registers the component pair for `duration` seconds.
///
/// Publicly callable; the new owner must authorize. An expired pair is
/// free to claim, an unexpired one is not.
pub fn mint(
    env: &Env,
    label: String,
    emoji: String,
    duration: u64,
    owner: Address,
    target: Address,
) -> Result<Registration, RegistryError> {
    owner.require_auth();
    admin::require_not_paused(env)?;
    labels::validate_component(&label)?;
    labels::validate_component(&emoji)?;
    validate_duration(duration)?;

    let now = env.ledger().timestamp();
    if let Some(existing) = load(env, &label, &emoji) {
        if !existing.is_expired(now) {
            return Err(RegistryError::NameTaken);
        }
    }

    let price = pricing::quote(env, &label, &emoji, duration)?;
    let expires_at = now
        .checked_add(duration)
        .ok_or(RegistryError::DurationTooLong)?;
    let registration = Registration {
        label,
        emoji,
        owner,
        target,
        registered_at: now,
        expires_at,
    };
    store(env, &registration);

    let count: u64 = env
        .storage()
        .instance()
        .get(&DataKey::RegistrationCount)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::RegistrationCount, &(count + 1));
    storage::extend_instance_ttl(env);

    let fees_collector: Address = env
        .storage()
        .instance()
        .get(&DataKey::FeesCollector)
        .ok_or(RegistryError::NotInitialized)?;
    Events::minted(env, &registration, price, &fees_collector);

    #[cfg(feature = "logging")]
    soroban_sdk::log!(env, "minted pair for {} seconds, quoted {}", duration, price);

    Ok(registration)
}

/// Extends a registration by `duration` seconds from whichever is later,
/// now or its current expiry. The record owner must authorize; a record
/// that expired but has not been claimed by someone else can still be
/// renewed, restarting from now.
pub fn renew(
    env: &Env,
    label: String,
    emoji: String,
    duration: u64,
) -> Result<Registration, RegistryError> {
    admin::require_not_paused(env)?;
    validate_duration(duration)?;

    let mut registration =
        load(env, &label, &emoji).ok_or(RegistryError::NameNotFound)?;
    registration.owner.require_auth();

    let now = env.ledger().timestamp();
    let base = if registration.expires_at > now {
        registration.expires_at
    } else {
        now
    };
    registration.expires_at = base
        .checked_add(duration)
        .ok_or(RegistryError::DurationTooLong)?;

    let price = pricing::quote(env, &label, &emoji, duration)?;
    store(env, &registration);
    Events::renewed(env, &registration, price);

    Ok(registration)
}

/// Hands an unexpired registration to a new owner.
pub fn transfer(
    env: &Env,
    label: String,
    emoji: String,
    new_owner: Address,
) -> Result<(), RegistryError> {
    admin::require_not_paused(env)?;

    let mut registration =
        load(env, &label, &emoji).ok_or(RegistryError::NameNotFound)?;
    if registration.is_expired(env.ledger().timestamp()) {
        return Err(RegistryError::NameNotFound);
    }
    registration.owner.require_auth();

    let previous = registration.owner.clone();
    registration.owner = new_owner.clone();
    store(env, &registration);
    Events::transferred(env, &label, &emoji, &previous, &new_owner);

    Ok(())
}

/// Points an unexpired registration at a new target address.
pub fn set_target(
    env: &Env,
    label: String,
    emoji: String,
    new_target: Address,
) -> Result<(), RegistryError> {
    admin::require_not_paused(env)?;

    let mut registration =
        load(env, &label, &emoji).ok_or(RegistryError::NameNotFound)?;
    if registration.is_expired(env.ledger().timestamp()) {
        return Err(RegistryError::NameNotFound);
    }
    registration.owner.require_auth();

    registration.target = new_target.clone();
    store(env, &registration);
    Events::target_set(env, &label, &emoji, &new_target);

    Ok(())
}

/// A live, unexpired record for the pair, if any.
pub fn load_live(env: &Env, label: &String, emoji: &String) -> Option<Registration> {
    load(env, label, emoji).filter(|r| !r.is_expired(env.ledger().timestamp()))
}
