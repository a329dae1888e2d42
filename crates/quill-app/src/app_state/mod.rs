//! Terminal front end: owns the session store and turns input lines into
//! store mutations, conversation turns and rendered output.

mod core;
mod dispatch;
mod render;
mod view_state;


pub(crate) use self::core::{Flow, QuillApp};
