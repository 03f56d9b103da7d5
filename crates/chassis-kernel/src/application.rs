//! Runnable application contract.

use crate::error::Result;

/// A runnable application resolved out of the container by
/// [`Kernel::create_application`](crate::Kernel::create_application).
pub trait Application: Send + Sync + 'static {
    /// Run the application to completion.
    fn run(&self) -> Result<()>;
}
