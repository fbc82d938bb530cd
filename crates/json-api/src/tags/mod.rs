//! Tags

mod handlers;

pub(crate) use handlers::*;
