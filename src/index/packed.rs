//! Decoding of the engine's packed `(ptr, len)` return values.

use crate::engine::EngineFault;

/// A slice of engine memory described by a packed 64-bit return value.
///
/// The low 32 bits hold the byte offset into linear memory, the high 32 bits the element count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PackedSlice {
	ptr: u32,
	len: u32,
}

impl PackedSlice {
	/// Split a raw return value into pointer and length.
	pub(crate) fn unpack(raw: u64) -> Self {
		Self {
			ptr: (raw & 0xFFFF_FFFF) as u32,
			len: (raw >> 32) as u32,
		}
	}

	/// Pack a pointer and element count the way the engine does.
	#[cfg(test)]
	pub(crate) fn pack(ptr: u32, len: u32) -> u64 {
		(u64::from(len) << 32) | u64::from(ptr)
	}

	fn bytes<'m>(&self, memory: &'m [u8], width: usize) -> Result<&'m [u8], EngineFault> {
		let start = self.ptr as usize;
		let byte_len = (self.len as usize).checked_mul(width);
		let end = byte_len.and_then(|len| start.checked_add(len));
		match end {
			Some(end) if end <= memory.len() => Ok(&memory[start..end]),
			_ => Err(EngineFault::OutOfBounds {
				ptr: u64::from(self.ptr),
				len: u64::from(self.len) * width as u64,
				memory: memory.len(),
			}),
		}
	}

	/// Read the slice as a UTF-8 string.
	pub(crate) fn read_str(&self, memory: &[u8]) -> Result<String, EngineFault> {
		let bytes = self.bytes(memory, 1)?;
		std::str::from_utf8(bytes)
			.map(str::to_owned)
			.map_err(|_| EngineFault::InvalidUtf8)
	}

	/// Read the slice as little-endian 32-bit elements.
	pub(crate) fn read_u32s(&self, memory: &[u8]) -> Result<Vec<u32>, EngineFault> {
		let bytes = self.bytes(memory, 4)?;
		Ok(bytes
			.chunks_exact(4)
			.map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
			.collect())
	}

	/// Read the slice as little-endian 64-bit elements.
	pub(crate) fn read_u64s(&self, memory: &[u8]) -> Result<Vec<u64>, EngineFault> {
		let bytes = self.bytes(memory, 8)?;
		Ok(bytes
			.chunks_exact(8)
			.map(|chunk| {
				let mut word = [0u8; 8];
				word.copy_from_slice(chunk);
				u64::from_le_bytes(word)
			})
			.collect())
	}
}
