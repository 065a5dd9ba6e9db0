//! Subscription lifecycle: create_sub, manage_sub, subscribe, pause_sub, giveaway_sub.
//!
//! Every entrypoint authenticates its caller first, validates against current
//! state, writes all state, and only then moves funds or publishes events.

use crate::admin::{bump_instance, bump_persistent, get_token, ledgered_total, set_ledgered_total};
use crate::queries::{get_enrollment, get_subscription, get_subscription_balance};
use crate::types::{
    DataKey, Enrollment, Error, GiveawayEvent, SubCreatedEvent, SubManagedEvent, SubscribedEvent,
    Subscription, SubscriptionStatus,
};
use crate::MAX_SUBSCRIPTION_ID;
use soroban_sdk::{token, Address, Env, String, Symbol};

pub fn do_create_sub(
    env: &Env,
    owner: Address,
    title: String,
    fee: i128,
    cycle_length: u64,
    end_date: u64,
) -> Result<u32, Error> {
    owner.require_auth();

    if title.len() == 0 {
        return Err(Error::InvalidTitle);
    }
    if cycle_length == 0 {
        return Err(Error::InvalidCycleLength);
    }
    if fee < 0 {
        return Err(Error::InvalidAmount);
    }

    let id = next_id(env)?;
    let sub = Subscription {
        owner: owner.clone(),
        title: title.clone(),
        fee,
        cycle_length,
        end_date,
        status: SubscriptionStatus::Active,
    };
    put_subscription(env, id, &sub);
    bump_instance(env);

    env.events().publish(
        (Symbol::new(env, "sub_created"), id),
        SubCreatedEvent {
            owner,
            title,
            fee,
            cycle_length,
            end_date,
        },
    );
    Ok(id)
}

/// Owner-side update of fee and status.
///
/// Ownership is checked before existence: an id that was never created has no
/// owner, so it surfaces as [`Error::Unauthorized`].
pub fn do_manage_sub(
    env: &Env,
    owner: Address,
    subscription_id: u32,
    new_fee: i128,
    new_status: SubscriptionStatus,
) -> Result<(), Error> {
    owner.require_auth();
    let mut sub = require_sub_owner(env, &owner, subscription_id)?;

    if new_fee < 0 {
        return Err(Error::InvalidAmount);
    }

    sub.fee = new_fee;
    sub.status = new_status;
    put_subscription(env, subscription_id, &sub);
    bump_instance(env);

    env.events().publish(
        (Symbol::new(env, "sub_managed"), subscription_id),
        SubManagedEvent {
            fee: new_fee,
            status: new_status,
        },
    );
    Ok(())
}

/// Enroll `subscriber`, pulling `attached` funds into the contract.
///
/// `fee` is the amount the caller believes it is paying. The call only goes
/// through when `fee`, `attached` and the subscription's current fee all agree.
pub fn do_subscribe(
    env: &Env,
    subscriber: Address,
    subscription_id: u32,
    fee: i128,
    attached: i128,
) -> Result<(), Error> {
    subscriber.require_auth();
    let sub = get_subscription(env, subscription_id)?;

    if sub.status == SubscriptionStatus::Paused {
        return Err(Error::SubscriptionPaused);
    }
    let now = env.ledger().timestamp();
    if sub.end_date != 0 && now > sub.end_date {
        return Err(Error::SubscriptionExpired);
    }

    let previous = get_enrollment(env, &subscriber, subscription_id);
    if previous.as_ref().is_some_and(|e| e.active) {
        return Err(Error::AlreadySubscribed);
    }
    if attached < sub.fee {
        return Err(Error::InsufficientPayment);
    }
    if fee != attached || attached != sub.fee {
        return Err(Error::PaymentMismatch);
    }

    let balance = get_subscription_balance(env, subscription_id)
        .checked_add(sub.fee)
        .ok_or(Error::Overflow)?;
    let total = ledgered_total(env)
        .checked_add(sub.fee)
        .ok_or(Error::Overflow)?;
    let token = get_token(env)?;

    put_balance(env, subscription_id, balance);
    set_ledgered_total(env, total);
    put_enrollment(
        env,
        &subscriber,
        subscription_id,
        &Enrollment {
            active: true,
            started_at: previous.map_or(now, |e| e.started_at),
        },
    );
    bump_instance(env);

    if sub.fee > 0 {
        token::Client::new(env, &token).transfer(
            &subscriber,
            &env.current_contract_address(),
            &sub.fee,
        );
    }

    env.events().publish(
        (Symbol::new(env, "subscribed"), subscription_id),
        SubscribedEvent {
            subscription_id,
            subscriber,
            amount: sub.fee,
        },
    );
    Ok(())
}

/// Subscriber-side pause of their own enrollment. The start time is kept.
pub fn do_pause_sub(env: &Env, subscriber: Address, subscription_id: u32) -> Result<(), Error> {
    subscriber.require_auth();
    get_subscription(env, subscription_id)?;

    let mut enrollment = require_enrolled(env, &subscriber, subscription_id)?;
    enrollment.active = false;
    put_enrollment(env, &subscriber, subscription_id, &enrollment);
    bump_instance(env);

    env.events().publish(
        (Symbol::new(env, "enrollment_paused"), subscription_id),
        subscriber,
    );
    Ok(())
}

/// Hand the caller's enrollment to `recipient`, carrying the original start time.
///
/// Whatever the recipient held before is overwritten. Giving to oneself
/// leaves the enrollment as it was.
pub fn do_giveaway_sub(
    env: &Env,
    subscriber: Address,
    subscription_id: u32,
    recipient: Address,
) -> Result<(), Error> {
    subscriber.require_auth();
    get_subscription(env, subscription_id)?;

    let mut given = require_enrolled(env, &subscriber, subscription_id)?;
    let started_at = given.started_at;

    given.active = false;
    put_enrollment(env, &subscriber, subscription_id, &given);
    put_enrollment(
        env,
        &recipient,
        subscription_id,
        &Enrollment {
            active: true,
            started_at,
        },
    );
    bump_instance(env);

    env.events().publish(
        (Symbol::new(env, "sub_given_away"), subscription_id),
        GiveawayEvent {
            from: subscriber,
            to: recipient,
            started_at,
        },
    );
    Ok(())
}

/// Load a subscription only if `caller` owns it.
pub(crate) fn require_sub_owner(
    env: &Env,
    caller: &Address,
    subscription_id: u32,
) -> Result<Subscription, Error> {
    match get_subscription(env, subscription_id) {
        Ok(sub) if sub.owner == *caller => Ok(sub),
        _ => Err(Error::Unauthorized),
    }
}

fn require_enrolled(env: &Env, user: &Address, subscription_id: u32) -> Result<Enrollment, Error> {
    get_enrollment(env, user, subscription_id)
        .filter(|e| e.active)
        .ok_or(Error::NotSubscribed)
}

pub(crate) fn put_balance(env: &Env, subscription_id: u32, balance: i128) {
    let key = DataKey::Balance(subscription_id);
    env.storage().persistent().set(&key, &balance);
    bump_persistent(env, &key);
}

fn put_subscription(env: &Env, subscription_id: u32, sub: &Subscription) {
    let key = DataKey::Subscription(subscription_id);
    env.storage().persistent().set(&key, sub);
    bump_persistent(env, &key);
}

fn put_enrollment(env: &Env, user: &Address, subscription_id: u32, enrollment: &Enrollment) {
    let key = DataKey::Enrollment(user.clone(), subscription_id);
    env.storage().persistent().set(&key, enrollment);
    bump_persistent(env, &key);
}

/// Allocate the next subscription id.
///
/// # Guarantees
/// - IDs start at `0` and increment by exactly `1` on each successful call.
/// - IDs are never reused: the counter only moves forward.
/// - At [`MAX_SUBSCRIPTION_ID`] this returns [`Error::SubscriptionLimitReached`]
///   instead of wrapping.
fn next_id(env: &Env) -> Result<u32, Error> {
    let current: u32 = env
        .storage()
        .instance()
        .get(&DataKey::NextId)
        .unwrap_or(0u32);

    if current == MAX_SUBSCRIPTION_ID {
        return Err(Error::SubscriptionLimitReached);
    }

    env.storage().instance().set(&DataKey::NextId, &(current + 1));
    Ok(current)
}
