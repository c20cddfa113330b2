//! Decoders for the types in [`crate::core::types`].
mod blocktype;
mod eventtype;
mod externtype;
mod functype;
mod globaltype;
mod limits;
mod tabletype;
mod valtype;
