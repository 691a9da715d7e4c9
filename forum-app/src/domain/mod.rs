mod favourite;
mod member;
mod permission;
mod poll;

pub use favourite::{FavouriteOutcome, FavouritePostView, FavouriteToggle};
pub use member::{Member, ADMIN_ROLE, GUEST_ROLE};
pub use permission::{Permission, PermissionSet, UnknownPermission};
pub use poll::{PollAnswerView, PollVoteResult, PollView};
