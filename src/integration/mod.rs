//! External Stack Integrations
//!
//! - **smoltcp** (`smoltcp`): Integration with the smoltcp TCP/IP network stack
//!   - Hardware address and IPv4 settings conversions
//!   - Applying a got-address event to an `Interface`
//!   - Requires `smoltcp` feature
//!
//! # Example
//!
//! ```ignore
//! use ph_esp32_lan8720::integration::smoltcp::apply_ip_info;
//!
//! if let LinkEvent::GotAddress(info) = event {
//!     apply_ip_info(&mut iface, &info)?;
//! }
//! ```

#[cfg(feature = "smoltcp")]
pub mod smoltcp;

#[cfg(feature = "smoltcp")]
pub use smoltcp::{ApplyError, apply_ip_info};
