use soroban_sdk::{Address, Env, String, Symbol};

use crate::pricing::LabelCategory;
use crate::registration::Registration;

pub struct Events;

impl Events {
    pub fn minted(env: &Env, registration: &Registration, price: i128, fees_collector: &Address) {
        env.events().publish(
            (
                Symbol::new(env, "Minted"),
                registration.owner.clone(),
                registration.label.clone(),
            ),
            (
                registration.emoji.clone(),
                registration.target.clone(),
                registration.expires_at,
                price,
                fees_collector.clone(),
            ),
        );
    }

    pub fn renewed(env: &Env, registration: &Registration, price: i128) {
        env.events().publish(
            (
                Symbol::new(env, "Renewed"),
                registration.owner.clone(),
                registration.label.clone(),
            ),
            (
                registration.emoji.clone(),
                registration.expires_at,
                price,
            ),
        );
    }

    pub fn transferred(env: &Env, label: &String, emoji: &String, from: &Address, to: &Address) {
        env.events().publish(
            (Symbol::new(env, "Transferred"), from.clone(), to.clone()),
            (label.clone(), emoji.clone()),
        );
    }

    pub fn target_set(env: &Env, label: &String, emoji: &String, target: &Address) {
        env.events().publish(
            (Symbol::new(env, "TargetSet"), target.clone()),
            (label.clone(), emoji.clone()),
        );
    }

    pub fn paused(env: &Env, admin: &Address, timestamp: u64) {
        env.events()
            .publish((Symbol::new(env, "Paused"), admin.clone()), (timestamp,));
    }

    pub fn unpaused(env: &Env, admin: &Address, timestamp: u64) {
        env.events()
            .publish((Symbol::new(env, "Unpaused"), admin.clone()), (timestamp,));
    }

    pub fn collector_set(env: &Env, previous: &Address, current: &Address) {
        env.events().publish(
            (Symbol::new(env, "CollectorSet"),),
            (previous.clone(), current.clone()),
        );
    }

    pub fn component_price_set(env: &Env, component: &String, price_per_year: i128) {
        env.events().publish(
            (Symbol::new(env, "PriceSet"), component.clone()),
            (price_per_year,),
        );
    }

    pub fn category_price_set(env: &Env, category: LabelCategory, price_per_year: i128) {
        env.events().publish(
            (Symbol::new(env, "CategoryPriceSet"),),
            (category, price_per_year),
        );
    }
}
