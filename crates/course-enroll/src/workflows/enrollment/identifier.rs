use rand::Rng;

use super::domain::ApplicationId;

pub const MIN_APPLICATION_ID: u32 = 100_000;
pub const MAX_APPLICATION_ID: u32 = 999_999;

/// Produces the advisory application reference. Uniqueness is enforced by the
/// collaborator, not here.
pub trait ApplicationIdSource: Send + Sync {
    fn next_id(&self) -> ApplicationId;
}

/// Uniform draw over `[100000, 999999]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomApplicationIds;

impl ApplicationIdSource for RandomApplicationIds {
    fn next_id(&self) -> ApplicationId {
        let value = rand::rng().random_range(MIN_APPLICATION_ID..=MAX_APPLICATION_ID);
        ApplicationId(value.to_string())
    }
}
