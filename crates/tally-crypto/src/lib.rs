/// Tally Crypto Library
///
/// Request signing used by the commerce platform's webhooks, and
/// verification of login tokens issued by the platform's login service.
///
/// The webhook scheme is the platform's legacy one: a SHA-1 digest of the
/// raw body concatenated with the project secret. Comparison is plain string
/// equality and there is no replay protection.

pub mod signature;
pub mod token;
