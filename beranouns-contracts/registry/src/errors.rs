use soroban_sdk::contracterror;

/// Registry contract errors.
///
/// Discriminants are grouped: 1-9 admin/pause, 100s input validation,
/// 200s registration state, 300s pricing.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RegistryError {
    /// A config entry written at construction is missing from storage.
    NotInitialized = 1,
    /// Registration writes are blocked by the pause gate.
    ContractPaused = 2,
    /// pause() called while already paused.
    AlreadyPaused = 3,
    /// unpause() called while not paused.
    NotPaused = 4,

    /// A name component is empty or contains a disallowed byte.
    InvalidLabel = 100,
    /// A name component exceeds the byte limit.
    LabelTooLong = 101,
    /// Registration duration must be positive.
    InvalidDuration = 102,
    /// Registration duration exceeds the maximum term.
    DurationTooLong = 103,

    /// The component pair is held by an unexpired registration.
    NameTaken = 200,
    /// No registration exists for the component pair.
    NameNotFound = 201,

    /// Prices are quoted in stroops and must be non-negative.
    InvalidPrice = 300,
}
