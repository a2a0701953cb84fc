use soroban_sdk::contracterror;

/// Every failure an engine can report. Codes are grouped by category so
/// that off-chain callers can branch on ranges.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    // Lifecycle
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidConfig = 3,

    // Authority
    AccessDenied = 10,

    // Duplicate-transition guards
    AlreadyRegistered = 20,
    AlreadyVoted = 21,
    AlreadyExists = 22,
    AlreadyFinalized = 23,

    // Missing-precondition guards
    NotRegistered = 30,
    UnknownCandidate = 31,
    NotAuthorized = 32,

    // Time-window guards
    TooEarly = 40,
    SaleNotActive = 41,
    SaleNotEnded = 42,

    // Numeric-bound guards
    ContributionOutOfBounds = 50,
    CapExceeded = 51,
    InvalidAmount = 52,
    ArithmeticOverflow = 53,

    // Balance guards
    InsufficientCallerBalance = 60,
    InsufficientPoolLiquidity = 61,
    TransferFailed = 62,

    // Refund-eligibility guards
    RefundsNotOpen = 70,
    GoalReached = 71,
    NothingToRefund = 72,
    GoalNotReached = 73,
}
