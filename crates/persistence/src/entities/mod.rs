//! Entity definitions (database row mappings).

pub mod group;
pub mod invite;
pub mod member;

pub use group::GroupEntity;
pub use invite::{GroupInviteEntity, GroupPreviewEntity, LiveInviteEntity};
pub use member::{MemberWithUserEntity, MembershipFlagsEntity};
