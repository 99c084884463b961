mod host;
mod traits;

pub use host::ExtensionHost;
pub use traits::Extension;
