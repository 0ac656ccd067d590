pub mod invite;
pub mod user;

pub use invite::{Invite, InviteStatus, DAY_IN_MILLISECONDS};
pub use user::User;
