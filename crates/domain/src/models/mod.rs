//! Domain models for Splitledger.

pub mod group;
pub mod invite;
pub mod member;

pub use group::Group;
pub use invite::{GroupInvite, GroupPreview};
pub use member::{GroupMember, MembershipFlags};
