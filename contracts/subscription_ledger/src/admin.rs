//! Admin and config: init, system owner, fee token, storage TTL, stranded funds.

use crate::types::{DataKey, Error, RecoveryEvent};
use soroban_sdk::{symbol_short, token, Address, Env};

/// Instance storage TTL (~1 day threshold, ~5 days bump at 5 s/ledger).
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = 17_280;
pub const INSTANCE_BUMP_AMOUNT: u32 = 86_400;

/// Persistent entry TTL (~7 days threshold, ~60 days bump).
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = 120_960;
pub const PERSISTENT_BUMP_AMOUNT: u32 = 1_051_200;

pub fn do_init(env: &Env, admin: Address, token: Address) -> Result<(), Error> {
    if env.storage().instance().has(&DataKey::Admin) {
        return Err(Error::AlreadyInitialized);
    }
    admin.require_auth();

    env.storage().instance().set(&DataKey::Admin, &admin);
    env.storage().instance().set(&DataKey::Token, &token);
    env.storage().instance().set(&DataKey::NextId, &0u32);
    env.storage().instance().set(&DataKey::Ledgered, &0i128);
    bump_instance(env);
    Ok(())
}

pub fn get_admin(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(Error::NotInitialized)
}

pub fn get_token(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(Error::NotInitialized)
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Total of all per-subscription balances.
pub fn ledgered_total(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::Ledgered)
        .unwrap_or(0)
}

pub fn set_ledgered_total(env: &Env, total: i128) {
    env.storage().instance().set(&DataKey::Ledgered, &total);
}

/// Token balance held by the contract that no subscription balance accounts for.
pub fn unaccounted_funds(env: &Env) -> Result<i128, Error> {
    let token = get_token(env)?;
    let held = token::Client::new(env, &token).balance(&env.current_contract_address());
    Ok(held.saturating_sub(ledgered_total(env)).max(0))
}

/// Return funds that were sent straight to the contract address.
///
/// Only the surplus above the ledgered total can move, so subscription
/// revenue is never reachable from here.
pub fn do_recover_stranded_funds(
    env: &Env,
    admin: Address,
    recipient: Address,
    amount: i128,
) -> Result<(), Error> {
    admin.require_auth();
    if admin != get_admin(env)? {
        return Err(Error::Unauthorized);
    }
    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }
    if amount > unaccounted_funds(env)? {
        return Err(Error::RecoveryNotAllowed);
    }

    let token = get_token(env)?;
    token::Client::new(env, &token).transfer(&env.current_contract_address(), &recipient, &amount);

    bump_instance(env);
    env.events().publish(
        (symbol_short!("recovery"),),
        RecoveryEvent {
            admin,
            recipient,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
    Ok(())
}
