//! Owner payouts: withdraw_revenue.

use crate::admin::{bump_instance, get_token, ledgered_total, set_ledgered_total};
use crate::queries::get_subscription_balance;
use crate::subscription::{put_balance, require_sub_owner};
use crate::types::{Error, RevenueWithdrawnEvent};
use soroban_sdk::{token, Address, Env, Symbol};

/// Drain the collected fees of one subscription to its owner.
///
/// # Guarantees
/// - Only the subscription owner can withdraw; unknown ids report
///   [`Error::Unauthorized`].
/// - The balance is zeroed before the token transfer, so anything the transfer
///   triggers observes an empty balance and cannot withdraw the same funds twice.
/// - A zero balance is a successful withdrawal of nothing.
pub fn do_withdraw_revenue(env: &Env, owner: Address, subscription_id: u32) -> Result<i128, Error> {
    owner.require_auth();
    require_sub_owner(env, &owner, subscription_id)?;
    let token = get_token(env)?;

    let amount = get_subscription_balance(env, subscription_id);
    let total = ledgered_total(env)
        .checked_sub(amount)
        .ok_or(Error::Overflow)?;

    put_balance(env, subscription_id, 0);
    set_ledgered_total(env, total);
    bump_instance(env);

    if amount > 0 {
        token::Client::new(env, &token).transfer(&env.current_contract_address(), &owner, &amount);
    }

    env.events().publish(
        (Symbol::new(env, "revenue_withdrawn"), subscription_id),
        RevenueWithdrawnEvent { owner, amount },
    );
    Ok(amount)
}
