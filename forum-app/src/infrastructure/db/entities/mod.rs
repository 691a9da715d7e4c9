pub mod category;
pub mod category_permission;
pub mod favourite;
pub mod member;
pub mod member_role;
pub mod poll;
pub mod poll_answer;
pub mod poll_vote;
pub mod post;
pub mod post_vote;
pub mod topic;

pub use category::Entity as Category;
pub use category_permission::Entity as CategoryPermission;
pub use favourite::Entity as Favourite;
pub use member::Entity as Member;
pub use member_role::Entity as MemberRole;
pub use poll::Entity as Poll;
pub use poll_answer::Entity as PollAnswer;
pub use poll_vote::Entity as PollVote;
pub use post::Entity as Post;
pub use post_vote::Entity as PostVote;
pub use topic::Entity as Topic;
