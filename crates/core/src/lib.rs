// Copyright 2025 Irreducible Inc.
//! Core datatypes shared by every bigtensor crate.
//!
//! Most importantly it hosts [`BigValue`], the arbitrary-precision integer, and [`BigTensor`],
//! the immutable shaped container the arithmetic, codec and randomness crates operate on.

pub mod consts;
pub mod dtype;
pub mod error;
pub mod shape;
pub mod tensor;
pub mod value;

pub use dtype::DType;
pub use error::{Error, ErrorKind, Fault, Result};
pub use shape::Shape;
pub use tensor::BigTensor;
pub use value::{BigValue, ParseBigValueError};
