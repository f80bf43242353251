//! Items used by the code `vc_transcode_derive` and `register_conversion!` expand to.

pub use alloc::boxed::Box;

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;
}
