mod complete;
mod init;
mod list;
mod repl;
mod util;
mod warp;

pub(crate) use complete::cmd_complete;
pub(crate) use init::cmd_init;
pub(crate) use list::{cmd_list, cmd_show};
pub(crate) use repl::cmd_repl;
pub(crate) use warp::cmd_warp;
