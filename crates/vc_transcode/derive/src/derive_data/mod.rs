//! Provide some tools for parsing the derive input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod transcode_derive;
mod transcode_enum;
mod transcode_meta;
mod transcode_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{MemberAttributes, PropertyAttribute, TypeAttributes};

pub(crate) use transcode_derive::TranscodeDerive;
pub(crate) use transcode_enum::TranscodeEnum;
pub(crate) use transcode_meta::TranscodeMeta;
pub(crate) use transcode_struct::TranscodeStruct;
