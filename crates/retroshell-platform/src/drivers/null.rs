//! Driver with every hook absent.

use crate::driver::{DriverCapabilities, FrontendDriver};

/// A driver that implements nothing. The application must still reach its
/// run loop with it.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDriver;

impl FrontendDriver for NullDriver {
    fn ident(&self) -> &'static str {
        "null"
    }

    fn capabilities(&self) -> DriverCapabilities {
        DriverCapabilities::empty()
    }
}
