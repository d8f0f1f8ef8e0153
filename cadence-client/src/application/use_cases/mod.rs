mod create_group;
mod join_group;

pub use create_group::create_group;
pub use join_group::{join_by_invite_code, MIN_INVITE_CODE_LEN};
