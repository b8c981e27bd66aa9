use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env, String};

use crate::errors::RegistryError;
use crate::pricing::{LabelCategory, SECONDS_PER_YEAR};
use crate::{RegistryContract, RegistryContractClient};

fn setup(env: &Env) -> (RegistryContractClient<'_>, Address) {
    let admin = Address::generate(env);
    let name = String::from_str(env, "Beranouns");
    let symbol = String::from_str(env, "BRNS");
    let contract_id = env.register(RegistryContract, (&admin, name, symbol, &admin));
    (RegistryContractClient::new(env, &contract_id), admin)
}

// ===== CATEGORY DEFAULTS =====

#[test]
fn test_category_defaults_by_char_count() {
    let env = Env::default();
    let (client, _admin) = setup(&env);

    // One emoji is a single character despite its four bytes.
    assert_eq!(
        client.component_price(&String::from_str(&env, "🐻")),
        LabelCategory::Single.default_price_per_year()
    );
    assert_eq!(
        client.component_price(&String::from_str(&env, "oog")),
        LabelCategory::Short.default_price_per_year()
    );
    assert_eq!(
        client.component_price(&String::from_str(&env, "honey")),
        LabelCategory::Standard.default_price_per_year()
    );
}

#[test]
fn test_pair_quote_sums_both_components() {
    let env = Env::default();
    let (client, _admin) = setup(&env);

    let quote = client.price_of(
        &String::from_str(&env, "honey"),
        &String::from_str(&env, "🐻"),
        &SECONDS_PER_YEAR,
    );
    assert_eq!(
        quote,
        LabelCategory::Standard.default_price_per_year()
            + LabelCategory::Single.default_price_per_year()
    );
}

#[test]
fn test_quote_pro_rates_by_duration() {
    let env = Env::default();
    let (client, _admin) = setup(&env);
    let label = String::from_str(&env, "honey");
    let emoji = String::from_str(&env, "🐻");

    let full = client.price_of(&label, &emoji, &SECONDS_PER_YEAR);
    let half = client.price_of(&label, &emoji, &(SECONDS_PER_YEAR / 2));
    let double = client.price_of(&label, &emoji, &(2 * SECONDS_PER_YEAR));

    assert_eq!(half, full / 2);
    assert_eq!(double, full * 2);
}

// ===== ADMIN OVERRIDES =====

#[test]
fn test_component_override_beats_category() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _admin) = setup(&env);
    let label = String::from_str(&env, "honey");
    let emoji = String::from_str(&env, "🐻");

    client.set_component_price(&label, &1_000_0000000);

    assert_eq!(client.component_price(&label), 1_000_0000000);
    assert_eq!(
        client.price_of(&label, &emoji, &SECONDS_PER_YEAR),
        1_000_0000000 + LabelCategory::Single.default_price_per_year()
    );
}

#[test]
fn test_category_price_update() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _admin) = setup(&env);

    client.set_category_price(&LabelCategory::Single, &42_0000000);

    assert_eq!(
        client.component_price(&String::from_str(&env, "🐻")),
        42_0000000
    );
    // Other categories keep their defaults.
    assert_eq!(
        client.component_price(&String::from_str(&env, "honey")),
        LabelCategory::Standard.default_price_per_year()
    );
}

#[test]
fn test_free_component_allowed() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _admin) = setup(&env);
    let label = String::from_str(&env, "honey");

    client.set_component_price(&label, &0);
    assert_eq!(client.component_price(&label), 0);
}

#[test]
fn test_negative_component_price_rejected() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _admin) = setup(&env);

    assert_eq!(
        client.try_set_component_price(&String::from_str(&env, "honey"), &-1),
        Err(Ok(RegistryError::InvalidPrice))
    );
}

#[test]
fn test_negative_category_price_rejected() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, _admin) = setup(&env);

    assert_eq!(
        client.try_set_category_price(&LabelCategory::Short, &-1),
        Err(Ok(RegistryError::InvalidPrice))
    );
}

#[test]
fn test_set_component_price_requires_admin_auth() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, admin) = setup(&env);

    client.set_component_price(&String::from_str(&env, "honey"), &7_0000000);
    let auths = env.auths();
    assert_eq!(auths[0].0, admin, "pricing is an admin operation");
}

#[test]
fn test_set_component_price_without_auth_fails() {
    let env = Env::default();
    let (client, _admin) = setup(&env);
    let label = String::from_str(&env, "honey");

    assert!(client
        .try_set_component_price(&label, &7_0000000)
        .is_err());
    assert_eq!(
        client.component_price(&label),
        LabelCategory::Standard.default_price_per_year(),
        "failed update must leave the default in place"
    );
}

// ===== PRICING FEEDS MINT =====

#[test]
fn test_mint_honors_component_override() {
    let env = Env::default();
    env.mock_all_auths();
    let (client, admin) = setup(&env);
    let label = String::from_str(&env, "honey");
    let emoji = String::from_str(&env, "🐻");

    client.set_component_price(&label, &9_0000000);
    let quoted = client.price_of(&label, &emoji, &SECONDS_PER_YEAR);

    // The mint succeeds and the quote reflects the override; the minted
    // event carries the same quote.
    client.mint(&label, &emoji, &SECONDS_PER_YEAR, &admin, &admin);
    assert_eq!(
        quoted,
        9_0000000 + LabelCategory::Single.default_price_per_year()
    );
}
