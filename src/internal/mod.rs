//! Internal Implementation Details
//!
//! Raw register maps shared by the PHY drivers and the test mocks. Not part
//! of the public API; use the typed wrappers in [`crate::phy`] instead.

pub(crate) mod phy_regs;
