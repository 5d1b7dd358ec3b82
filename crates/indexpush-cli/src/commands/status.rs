//! Administrative probe

use anyhow::Result;
use indexpush_core::Dispatcher;

use crate::output::{OutputFormat, print_status};

/// Print key, key location, inbound endpoint and targets.
pub fn execute(dispatcher: &Dispatcher, format: OutputFormat) -> Result<()> {
    print_status(&dispatcher.status(), format)
}
