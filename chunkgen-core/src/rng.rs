/// Deterministic pseudo-random source built from a string seed.
///
/// The seed is folded byte by byte into a 32-bit state, then every draw
/// advances that state with a fixed integer mixer. Only wrapping `u32`
/// arithmetic is involved, so a given seed yields the same sequence on
/// every platform.
#[derive(Clone, Debug)]
pub struct SeededRng {
	state: u32,
}

impl SeededRng {
	/// Hashes `seed` into the initial state.
	///
	/// Order dependent: `"ab"` and `"ba"` give different sequences.
	pub fn new(seed: &str) -> Self {
		let bytes = seed.as_bytes();
		let mut h: u32 = 1_779_033_703 ^ bytes.len() as u32;
		for &b in bytes {
			h = (h ^ b as u32).wrapping_mul(3_432_918_353);
			h = h.rotate_left(13);
		}
		h = (h ^ (h >> 16)).wrapping_mul(2_246_822_507);
		h = (h ^ (h >> 13)).wrapping_mul(3_266_489_909);
		h ^= h >> 16;
		Self { state: h }
	}

	/// Advances the state and returns the next raw 32-bit value.
	pub fn next_u32(&mut self) -> u32 {
		self.state = self.state.wrapping_add(0x6D2B_79F5);
		let mut t = self.state;
		t = (t ^ (t >> 15)).wrapping_mul(t | 1);
		t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
		t ^ (t >> 14)
	}

	/// Next value in `[0, 1)`.
	pub fn next_f64(&mut self) -> f64 {
		self.next_u32() as f64 / 4_294_967_296.0
	}

	/// `next_f64() * (max - min) + min`.
	pub fn range(&mut self, min: f64, max: f64) -> f64 {
		self.next_f64() * (max - min) + min
	}
}
