//! Typed field codecs
//!
//! Every wire type implements [`WireCodec`]. Fixed-width values are written
//! little-endian; strings and collections carry a `u32` count prefix;
//! composite records are the plain concatenation of their fields.

use super::container::ByteContainer;
use super::error::{CodecError, CodecResult};
use crate::foundation::math::{Quat, Quaternion, Vec3, Vec4};
use std::marker::PhantomData;

/// Key/value collection encoded in insertion order
///
/// A `Vec` of pairs pins the order explicitly; hash maps would not.
pub type Dictionary<K, V> = Vec<(K, V)>;

/// Positional binary encoding for one type
pub trait WireCodec: Sized {
    /// Whether values of this type may appear as elements of a
    /// count-prefixed collection
    const COUNTABLE: bool;

    /// Append the wire form of `self`
    fn write(&self, out: &mut Vec<u8>);

    /// Consume one value from the container
    fn read(container: &mut ByteContainer<'_>) -> CodecResult<Self>;
}

/// Runtime view of [`WireCodec::COUNTABLE`]
pub fn is_countable<T: WireCodec>() -> bool {
    T::COUNTABLE
}

/// Encode a value into a fresh buffer
pub fn to_bytes<T: WireCodec>(value: &T) -> Vec<u8> {
    let mut out = Vec::new();
    value.write(&mut out);
    out
}

/// Decode one value from the start of `bytes`; trailing bytes are ignored
pub fn from_bytes<T: WireCodec>(bytes: &[u8]) -> CodecResult<T> {
    T::read(&mut ByteContainer::new(bytes))
}

/// Compile-time check that a collection element type is countable
struct AssertCountable<T>(PhantomData<T>);

impl<T: WireCodec> AssertCountable<T> {
    const OK: () = assert!(T::COUNTABLE, "collection element type is not countable");
}

fn write_count(out: &mut Vec<u8>, len: usize) -> usize {
    // Longer collections are cut at u32::MAX so count and payload agree
    let count = u32::try_from(len).unwrap_or(u32::MAX);
    count.write(out);
    count as usize
}

macro_rules! impl_le_codec {
    ($($ty:ty),* $(,)?) => {
        $(
            impl WireCodec for $ty {
                const COUNTABLE: bool = true;

                fn write(&self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes());
                }

                fn read(container: &mut ByteContainer<'_>) -> CodecResult<Self> {
                    Ok(<$ty>::from_le_bytes(container.take_array()?))
                }
            }
        )*
    };
}

impl_le_codec!(u8, i32, u32, i64, u64, f32, f64);

impl WireCodec for bool {
    const COUNTABLE: bool = true;

    fn write(&self, out: &mut Vec<u8>) {
        out.push(u8::from(*self));
    }

    fn read(container: &mut ByteContainer<'_>) -> CodecResult<Self> {
        Ok(u8::read(container)? != 0)
    }
}

impl WireCodec for String {
    const COUNTABLE: bool = true;

    fn write(&self, out: &mut Vec<u8>) {
        let len = write_count(out, self.len());
        out.extend_from_slice(&self.as_bytes()[..len]);
    }

    fn read(container: &mut ByteContainer<'_>) -> CodecResult<Self> {
        let len = u32::read(container)? as usize;
        let offset = container.position();
        let bytes = container.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8 { offset })
    }
}

impl WireCodec for Vec3 {
    const COUNTABLE: bool = true;

    fn write(&self, out: &mut Vec<u8>) {
        self.x.write(out);
        self.y.write(out);
        self.z.write(out);
    }

    fn read(container: &mut ByteContainer<'_>) -> CodecResult<Self> {
        let x = f32::read(container)?;
        let y = f32::read(container)?;
        let z = f32::read(container)?;
        Ok(Vec3::new(x, y, z))
    }
}

impl WireCodec for Vec4 {
    const COUNTABLE: bool = true;

    fn write(&self, out: &mut Vec<u8>) {
        self.x.write(out);
        self.y.write(out);
        self.z.write(out);
        self.w.write(out);
    }

    fn read(container: &mut ByteContainer<'_>) -> CodecResult<Self> {
        let x = f32::read(container)?;
        let y = f32::read(container)?;
        let z = f32::read(container)?;
        let w = f32::read(container)?;
        Ok(Vec4::new(x, y, z, w))
    }
}

impl WireCodec for Quat {
    const COUNTABLE: bool = true;

    fn write(&self, out: &mut Vec<u8>) {
        // coords are stored as (i, j, k, w)
        self.quaternion().coords.write(out);
    }

    fn read(container: &mut ByteContainer<'_>) -> CodecResult<Self> {
        let coords = Vec4::read(container)?;
        // Wire values are trusted as unit quaternions; renormalizing would
        // break bit-exact replay
        Ok(Quat::new_unchecked(Quaternion::from(coords)))
    }
}

impl<A: WireCodec, B: WireCodec> WireCodec for (A, B) {
    const COUNTABLE: bool = A::COUNTABLE && B::COUNTABLE;

    fn write(&self, out: &mut Vec<u8>) {
        self.0.write(out);
        self.1.write(out);
    }

    fn read(container: &mut ByteContainer<'_>) -> CodecResult<Self> {
        let a = A::read(container)?;
        let b = B::read(container)?;
        Ok((a, b))
    }
}

impl<T: WireCodec> WireCodec for Vec<T> {
    const COUNTABLE: bool = true;

    fn write(&self, out: &mut Vec<u8>) {
        let () = AssertCountable::<T>::OK;
        let count = write_count(out, self.len());
        for item in self.iter().take(count) {
            item.write(out);
        }
    }

    fn read(container: &mut ByteContainer<'_>) -> CodecResult<Self> {
        let () = AssertCountable::<T>::OK;
        let count = u32::read(container)? as usize;
        // Each element takes at least one byte; don't trust the count for
        // the allocation
        let mut items = Vec::with_capacity(count.min(container.remaining()));
        for _ in 0..count {
            items.push(T::read(container)?);
        }
        Ok(items)
    }
}

impl<T: WireCodec + Copy + Default, const N: usize> WireCodec for [T; N] {
    const COUNTABLE: bool = T::COUNTABLE;

    fn write(&self, out: &mut Vec<u8>) {
        for item in self {
            item.write(out);
        }
    }

    fn read(container: &mut ByteContainer<'_>) -> CodecResult<Self> {
        let mut items = [T::default(); N];
        for slot in &mut items {
            *slot = T::read(container)?;
        }
        Ok(items)
    }
}
