//! Read-only views. None of these require auth or move funds.

use crate::types::{DataKey, Enrollment, Error, Subscription};
use soroban_sdk::{Address, Env, String};

pub const STATUS_NOT_FOUND: &str = "This subscription does not exist.";
pub const STATUS_NOT_SUBSCRIBED: &str = "No, you do not have this subscription.";
pub const STATUS_SUBSCRIBED: &str = "Yes, you have an active subscription to this service.";

pub fn get_subscription(env: &Env, subscription_id: u32) -> Result<Subscription, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Subscription(subscription_id))
        .ok_or(Error::NotFound)
}

/// Funds owed to the owner. Unknown ids read as an empty balance.
pub fn get_subscription_balance(env: &Env, subscription_id: u32) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(subscription_id))
        .unwrap_or(0)
}

pub fn get_enrollment(env: &Env, user: &Address, subscription_id: u32) -> Option<Enrollment> {
    env.storage()
        .persistent()
        .get(&DataKey::Enrollment(user.clone(), subscription_id))
}

pub fn is_subscribed(env: &Env, user: &Address, subscription_id: u32) -> bool {
    get_enrollment(env, user, subscription_id).is_some_and(|e| e.active)
}

/// Start time of an active enrollment; `None` while paused or never enrolled.
pub fn get_enrollment_start(env: &Env, user: &Address, subscription_id: u32) -> Option<u64> {
    get_enrollment(env, user, subscription_id)
        .filter(|e| e.active)
        .map(|e| e.started_at)
}

pub fn get_next_subscription_id(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::NextId)
        .unwrap_or(0)
}

pub fn check_my_subscription_status(env: &Env, caller: &Address, subscription_id: u32) -> String {
    let message = if get_subscription(env, subscription_id).is_err() {
        STATUS_NOT_FOUND
    } else if is_subscribed(env, caller, subscription_id) {
        STATUS_SUBSCRIBED
    } else {
        STATUS_NOT_SUBSCRIBED
    };
    String::from_str(env, message)
}

/// `0` means the subscription never expires.
pub fn get_subscription_end_date(env: &Env, subscription_id: u32) -> Result<u64, Error> {
    get_subscription(env, subscription_id).map(|sub| sub.end_date)
}
