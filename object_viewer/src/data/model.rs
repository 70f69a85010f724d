// Chain-agnostic object records.
// Alloy call types stay in evm.rs; the wide-integer record lives here so
// fakes and the session can share it without touching the contract binding.

use alloy::primitives::{I256, U256};

/// A minted 3D object as the renderer sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectDescriptor {
    pub name: String,
    pub w: f64,
    pub h: f64,
    pub d: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ObjectDescriptor {
    /// A named box at the origin.
    pub fn sized(name: impl Into<String>, w: f64, h: f64, d: f64) -> Self {
        Self {
            name: name.into(),
            w,
            h,
            d,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    pub fn at(mut self, x: f64, y: f64, z: f64) -> Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    pub fn is_finite(&self) -> bool {
        [self.w, self.h, self.d, self.x, self.y, self.z]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// An object exactly as the ledger stores it.
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerObject {
    pub name: String,
    pub w: U256,
    pub h: U256,
    pub d: U256,
    pub x: I256,
    pub y: I256,
    pub z: I256,
}

impl LedgerObject {
    pub fn to_descriptor(&self) -> ObjectDescriptor {
        ObjectDescriptor {
            name: self.name.clone(),
            w: unsigned_to_f64(self.w),
            h: unsigned_to_f64(self.h),
            d: unsigned_to_f64(self.d),
            x: signed_to_f64(self.x),
            y: signed_to_f64(self.y),
            z: signed_to_f64(self.z),
        }
    }
}

/// Fields submitted by the mint form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintRequest {
    pub name: String,
    pub w: i64,
    pub h: i64,
    pub d: i64,
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Default for MintRequest {
    fn default() -> Self {
        Self {
            name: String::new(),
            w: 1,
            h: 1,
            d: 1,
            x: 0,
            y: 0,
            z: 0,
        }
    }
}

/// Saturates at `u128::MAX` before widening to `f64`.
pub fn unsigned_to_f64(value: U256) -> f64 {
    let narrow: u128 = value.try_into().unwrap_or(u128::MAX);
    narrow as f64
}

/// Saturates at the `i128` bounds before widening to `f64`.
pub fn signed_to_f64(value: I256) -> f64 {
    let narrow = i128::try_from(value).unwrap_or(if value.is_negative() {
        i128::MIN
    } else {
        i128::MAX
    });
    narrow as f64
}
