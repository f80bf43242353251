// -----------------------------------------------------------------------------
// Modules

mod match_transcode;

mod composite_kind;
mod enum_kind;

mod trait_transcode;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use match_transcode::match_transcode_impls;

use composite_kind::impl_composite;
use enum_kind::impl_enum;
use trait_transcode::impl_trait_transcode;
use trait_typed::impl_trait_typed;
