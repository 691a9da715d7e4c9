mod list_favourites;
mod record_poll_vote;
mod toggle_favourite;

pub use list_favourites::ListFavourites;
pub use record_poll_vote::RecordPollVote;
pub use toggle_favourite::ToggleFavourite;
