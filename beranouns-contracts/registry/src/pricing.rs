//! Component pricing: category defaults plus admin-set overrides.
//!
//! A name is two components and each is priced on its own. The quoted price
//! for a mint or renewal is the sum of both per-year component prices,
//! pro-rated by the requested duration.

use soroban_sdk::{contracttype, Env, String};

use crate::errors::RegistryError;
use crate::labels;
use crate::storage::DataKey;

/// Seconds in a registration year.
pub const SECONDS_PER_YEAR: u64 = 31_536_000; // 365 * 24 * 60 * 60

/// Pricing bucket derived from a component's character count.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LabelCategory {
    /// One character. Emoji territory, priced at a premium.
    Single,
    /// Two or three characters.
    Short,
    /// Four characters and up.
    Standard,
}

impl LabelCategory {
    /// Built-in price per year in stroops, used until the admin sets one.
    pub fn default_price_per_year(self) -> i128 {
        match self {
            LabelCategory::Single => 500_0000000,
            LabelCategory::Short => 100_0000000,
            LabelCategory::Standard => 20_0000000,
        }
    }
}

/// Per-year price of one component.
///
/// An explicit component override wins over the category table, which in
/// turn falls back to the built-in defaults.
pub fn component_price_per_year(env: &Env, component: &String) -> Result<i128, RegistryError> {
    let override_price: Option<i128> = env
        .storage()
        .persistent()
        .get(&DataKey::ComponentPrice(component.clone()));
    if let Some(price) = override_price {
        return Ok(price);
    }

    let chars = labels::validate_component(component)?;
    let category = labels::categorize(chars);
    let category_price: Option<i128> = env
        .storage()
        .persistent()
        .get(&DataKey::CategoryPrice(category));
    Ok(category_price.unwrap_or_else(|| category.default_price_per_year()))
}

/// Quoted price for holding the component pair for `duration` seconds.
pub fn quote(
    env: &Env,
    label: &String,
    emoji: &String,
    duration: u64,
) -> Result<i128, RegistryError> {
    let per_year = component_price_per_year(env, label)? + component_price_per_year(env, emoji)?;
    Ok(per_year * duration as i128 / SECONDS_PER_YEAR as i128)
}

pub fn set_component_price(
    env: &Env,
    component: &String,
    price_per_year: i128,
) -> Result<(), RegistryError> {
    if price_per_year < 0 {
        return Err(RegistryError::InvalidPrice);
    }
    labels::validate_component(component)?;
    env.storage()
        .persistent()
        .set(&DataKey::ComponentPrice(component.clone()), &price_per_year);
    Ok(())
}

pub fn set_category_price(
    env: &Env,
    category: LabelCategory,
    price_per_year: i128,
) -> Result<(), RegistryError> {
    if price_per_year < 0 {
        return Err(RegistryError::InvalidPrice);
    }
    env.storage()
        .persistent()
        .set(&DataKey::CategoryPrice(category), &price_per_year);
    Ok(())
}
