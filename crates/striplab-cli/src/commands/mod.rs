//! Command implementations for the striplab CLI.

mod analyze;
mod batch;
mod profile;

pub use analyze::cmd_analyze;
pub use batch::cmd_batch;
pub use profile::{
    cmd_profile_init, cmd_profile_list, cmd_profile_set_curve, cmd_profile_set_thresholds,
    cmd_profile_show,
};
