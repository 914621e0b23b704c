// Copyright 2025 Irreducible Inc.
//! Conversions between [`BigTensor`](bigtensor_core::BigTensor)s and host-visible native arrays.
//!
//! [`import`] and [`export`] move values element by element between a big tensor and a native
//! array of the same shape. [`export_limbs`] and [`import_limbs`] instead lay each value out as
//! a fixed number of native limbs along an extra trailing axis.

pub mod codec;
pub mod limbs;
pub mod native;

pub use codec::{export, import};
pub use limbs::{LimbArray, LimbPolicy, export_limbs, import_limbs};
pub use native::{NativeArray, NativeData, NativeElement};
