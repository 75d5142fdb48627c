use crate::{
    config::{NoiseFnConfig, NoiseFnType},
    util::range::NumRange,
};
use noise::{
    BasicMulti, Billow, Fbm, HybridMulti, MultiFractal, NoiseFn, RidgedMulti,
    Seedable, Simplex,
};
use std::fmt::{self, Debug};

/// A wrapper around a noise function that takes care of sampling it for
/// tiles: scaling the input coordinates, then mapping the raw output to a
/// height in `[0, max_height]`.
pub struct TileNoiseFn {
    /// The underlying noise function. The concrete type depends on the
    /// config, so we need a trait object.
    noise_fn: Box<dyn NoiseFn<f64, 2>>,
    config: NoiseFnConfig,
    output_range: NumRange<f64>,
}

impl TileNoiseFn {
    /// The output range of the underlying noise functions. They can overshoot
    /// slightly, so outputs get clamped to this before normalizing.
    const NOISE_FN_OUTPUT_RANGE: NumRange<f64> = NumRange::new(-1.0, 1.0);

    /// Initialize a new function.
    ///
    /// ### Arguments
    /// - `config` - Configuration for the underlying noise function
    /// - `seed` - Seed for the noise function
    /// - `max_height` - Outputs are mapped into `[0, max_height]`
    pub fn new(config: NoiseFnConfig, seed: u32, max_height: f64) -> Self {
        Self {
            noise_fn: Self::make_noise_fn(config, seed),
            config,
            output_range: NumRange::new(0.0, max_height),
        }
    }

    /// Sample the function for the tile at the given column and row.
    pub fn get(&self, col: i32, row: i32) -> f64 {
        let input = [
            f64::from(col) * self.config.frequency,
            f64::from(row) * self.config.frequency,
        ];
        let exponent = self.config.exponent;
        Self::NOISE_FN_OUTPUT_RANGE
            .value(self.noise_fn.get(input))
            .clamp()
            // Map to [0,1] so the exponent keeps values in range
            .normalize()
            .apply(|value| value.powf(exponent))
            .map_to(self.output_range)
            .inner()
    }

    /// Build the noise function named by the config. `Seedable` and
    /// `MultiFractal` aren't object safe, so each fractal type has to be
    /// configured separately before boxing it.
    fn make_noise_fn(
        config: NoiseFnConfig,
        seed: u32,
    ) -> Box<dyn NoiseFn<f64, 2>> {
        // Frequency is applied to the input in `get`, so the fractal
        // functions keep a base frequency of 1
        macro_rules! fractal {
            ($type:ident) => {
                Box::new(
                    $type::<Simplex>::default()
                        .set_seed(seed)
                        .set_octaves(config.octaves)
                        .set_frequency(1.0)
                        .set_lacunarity(config.lacunarity)
                        .set_persistence(config.persistence),
                )
            };
        }

        match config.noise_type {
            NoiseFnType::Simplex => Box::new(Simplex::new(seed)),
            NoiseFnType::BasicMulti => fractal!(BasicMulti),
            NoiseFnType::Billow => fractal!(Billow),
            NoiseFnType::Fbm => fractal!(Fbm),
            NoiseFnType::HybridMulti => fractal!(HybridMulti),
            NoiseFnType::RidgedMulti => fractal!(RidgedMulti),
        }
    }
}

impl Debug for TileNoiseFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileNoiseFn")
            .field("config", &self.config)
            .field("output_range", &self.output_range)
            .finish()
    }
}
