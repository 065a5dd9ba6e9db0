#![no_std]

// ── Modules ──────────────────────────────────────────────────────────────────
mod admin;
mod merchant;
mod queries;
mod subscription;
pub mod types;

// ── Re-exports (used by tests and external consumers) ────────────────────────
pub use queries::{STATUS_NOT_FOUND, STATUS_NOT_SUBSCRIBED, STATUS_SUBSCRIBED};
pub use types::*;

use soroban_sdk::{contract, contractimpl, Address, Env, String};

/// Maximum subscription ID this ledger will ever allocate.
///
/// The id counter is a `u32`; once it reaches this value
/// [`SubscriptionLedger::create_sub`] returns
/// [`Error::SubscriptionLimitReached`] instead of wrapping.
pub const MAX_SUBSCRIPTION_ID: u32 = u32::MAX;

// ── Contract ─────────────────────────────────────────────────────────────────

/// Subscription ledger.
///
/// Owners register subscriptions, users enroll by paying the fee in the
/// configured token, owners withdraw what their subscription collected.
///
/// There is no fallback entrypoint. Calls to unknown function names are
/// rejected by the host before any contract code runs. Tokens sent straight to
/// the contract address are never credited to a subscription; they show up in
/// [`SubscriptionLedger::get_unaccounted_funds`] and can only leave through
/// [`SubscriptionLedger::recover_stranded_funds`].
#[contract]
pub struct SubscriptionLedger;

#[contractimpl]
impl SubscriptionLedger {
    // ── Admin / Config ───────────────────────────────────────────────────

    /// Initialize the ledger: set the system owner and the fee token.
    pub fn init(env: Env, admin: Address, token: Address) -> Result<(), Error> {
        admin::do_init(&env, admin, token)
    }

    /// System owner set at initialization.
    pub fn get_admin(env: Env) -> Result<Address, Error> {
        admin::get_admin(&env)
    }

    /// Token in which fees are paid.
    pub fn get_token(env: Env) -> Result<Address, Error> {
        admin::get_token(&env)
    }

    /// **ADMIN ONLY**: return tokens that reached the contract without a
    /// ledger entry. Collected subscription revenue is never reachable.
    pub fn recover_stranded_funds(
        env: Env,
        admin: Address,
        recipient: Address,
        amount: i128,
    ) -> Result<(), Error> {
        admin::do_recover_stranded_funds(&env, admin, recipient, amount)
    }

    // ── Subscription lifecycle ───────────────────────────────────────────

    /// Register a subscription owned by `owner`. Returns the new id.
    ///
    /// # Arguments
    /// * `cycle_length` - Billing cycle in seconds, must be > 0.
    /// * `end_date` - Ledger timestamp after which the subscription expires,
    ///                or `0` for a subscription that never expires.
    pub fn create_sub(
        env: Env,
        owner: Address,
        title: String,
        fee: i128,
        cycle_length: u64,
        end_date: u64,
    ) -> Result<u32, Error> {
        subscription::do_create_sub(&env, owner, title, fee, cycle_length, end_date)
    }

    /// Owner updates the fee and status of their subscription.
    pub fn manage_sub(
        env: Env,
        owner: Address,
        subscription_id: u32,
        new_fee: i128,
        new_status: SubscriptionStatus,
    ) -> Result<(), Error> {
        subscription::do_manage_sub(&env, owner, subscription_id, new_fee, new_status)
    }

    /// Enroll `subscriber`, transferring `attached` tokens into the ledger.
    ///
    /// `attached` must equal both the declared `fee` and the subscription fee.
    pub fn subscribe(
        env: Env,
        subscriber: Address,
        subscription_id: u32,
        fee: i128,
        attached: i128,
    ) -> Result<(), Error> {
        subscription::do_subscribe(&env, subscriber, subscription_id, fee, attached)
    }

    /// Subscriber pauses their own enrollment.
    pub fn pause_sub(env: Env, subscriber: Address, subscription_id: u32) -> Result<(), Error> {
        subscription::do_pause_sub(&env, subscriber, subscription_id)
    }

    /// Subscriber hands their enrollment to `recipient`.
    pub fn giveaway_sub(
        env: Env,
        subscriber: Address,
        subscription_id: u32,
        recipient: Address,
    ) -> Result<(), Error> {
        subscription::do_giveaway_sub(&env, subscriber, subscription_id, recipient)
    }

    // ── Owner payouts ────────────────────────────────────────────────────

    /// Owner withdraws everything their subscription collected. Returns the amount.
    pub fn withdraw_revenue(env: Env, owner: Address, subscription_id: u32) -> Result<i128, Error> {
        merchant::do_withdraw_revenue(&env, owner, subscription_id)
    }

    // ── Queries ──────────────────────────────────────────────────────────

    pub fn check_my_subscription_status(env: Env, caller: Address, subscription_id: u32) -> String {
        queries::check_my_subscription_status(&env, &caller, subscription_id)
    }

    pub fn get_subscription_end_date(env: Env, subscription_id: u32) -> Result<u64, Error> {
        queries::get_subscription_end_date(&env, subscription_id)
    }

    pub fn get_subscription(env: Env, subscription_id: u32) -> Result<Subscription, Error> {
        queries::get_subscription(&env, subscription_id)
    }

    /// Funds collected for `subscription_id` and not yet withdrawn.
    pub fn get_subscription_balance(env: Env, subscription_id: u32) -> i128 {
        queries::get_subscription_balance(&env, subscription_id)
    }

    pub fn is_subscribed(env: Env, user: Address, subscription_id: u32) -> bool {
        queries::is_subscribed(&env, &user, subscription_id)
    }

    pub fn get_enrollment_start(env: Env, user: Address, subscription_id: u32) -> Option<u64> {
        queries::get_enrollment_start(&env, &user, subscription_id)
    }

    /// The id the next `create_sub` will allocate; also the number of
    /// subscriptions ever created.
    pub fn get_next_subscription_id(env: Env) -> u32 {
        queries::get_next_subscription_id(&env)
    }

    pub fn get_unaccounted_funds(env: Env) -> Result<i128, Error> {
        admin::unaccounted_funds(&env)
    }
}
