use soroban_sdk::{contracterror, contracttype, Address, String};

/// Storage keys.
///
/// `Admin`, `Token`, `NextId` and `Ledgered` live in instance storage; the
/// rest are persistent entries, one per subscription or per (user, id) pair.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Token,
    NextId,
    /// Sum of every `Balance(_)` entry.
    Ledgered,
    Subscription(u32),
    Balance(u32),
    Enrollment(Address, u32),
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    /// Caller does not own the subscription (or the id was never created).
    Unauthorized = 401,
    RecoveryNotAllowed = 403,
    NotFound = 404,
    SubscriptionExpired = 410,
    /// The id counter reached [`crate::MAX_SUBSCRIPTION_ID`].
    SubscriptionLimitReached = 429,
    /// Title cannot be empty.
    InvalidTitle = 1001,
    /// Cycle length must be greater than 0.
    InvalidCycleLength = 1002,
    SubscriptionPaused = 1003,
    AlreadySubscribed = 1004,
    NotSubscribed = 1005,
    /// Attached funds do not cover the subscription fee.
    InsufficientPayment = 1006,
    /// Attached funds differ from the declared fee argument or the subscription fee.
    PaymentMismatch = 1007,
    /// Negative fee, or a non-positive recovery amount.
    InvalidAmount = 1008,
    Overflow = 1009,
    AlreadyInitialized = 1010,
    NotInitialized = 1011,
}

impl Error {
    pub const fn to_code(self) -> u32 {
        self as u32
    }
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubscriptionStatus {
    Active = 0,
    Paused = 1,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Subscription {
    pub owner: Address,
    pub title: String,
    pub fee: i128,
    pub cycle_length: u64,
    /// Ledger timestamp after which the subscription is expired; `0` never expires.
    pub end_date: u64,
    pub status: SubscriptionStatus,
}

/// A user's claim on one subscription.
///
/// `started_at` is kept when the enrollment is paused and is only meaningful
/// while `active` is true.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Enrollment {
    pub active: bool,
    pub started_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubCreatedEvent {
    pub owner: Address,
    pub title: String,
    pub fee: i128,
    pub cycle_length: u64,
    pub end_date: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubManagedEvent {
    pub fee: i128,
    pub status: SubscriptionStatus,
}

/// `SubscribedToSub` notification.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubscribedEvent {
    pub subscription_id: u32,
    pub subscriber: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GiveawayEvent {
    pub from: Address,
    pub to: Address,
    pub started_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RevenueWithdrawnEvent {
    pub owner: Address,
    pub amount: i128,
}

/// Emitted when the admin returns funds that reached the contract without a
/// ledger entry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecoveryEvent {
    /// The admin who authorized the recovery
    pub admin: Address,
    /// The destination address receiving the recovered funds
    pub recipient: Address,
    pub amount: i128,
    pub timestamp: u64,
}
