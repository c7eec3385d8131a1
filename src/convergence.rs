// Copyright (c) 2024-2025 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The convergence module contains the settings that bound the Vincenty
//! iterations and the test used to decide when an iteration has converged.

/// The default relative tolerance of an iteration.
pub const DEFAULT_TOLERANCE: f64 = 1.0e-9;

/// A relative tolerance for sub-millimetre agreement between the direct and
/// inverse solutions over long geodesics.
pub const HIGH_PRECISION_TOLERANCE: f64 = 1.0e-12;

/// The default maximum number of iterations.
/// Valid inputs normally converge in fewer than 20 iterations.
pub const DEFAULT_MAX_ITERATIONS: u32 = 200;

/// Below this magnitude the relative change is replaced by the absolute change.
pub const MIN_RELATIVE_VALUE: f64 = 1.0e-12;

/// The settings for the Vincenty iterations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Convergence {
    /// The relative change at which an iteration has converged.
    tolerance: f64,
    /// The maximum number of iterations before giving up.
    max_iterations: u32,
}

impl Convergence {
    /// Constructor.
    /// * `tolerance` - the relative change at which an iteration has converged.
    /// * `max_iterations` - the maximum number of iterations.
    #[must_use]
    pub const fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Construct a `Convergence` with `HIGH_PRECISION_TOLERANCE` and the
    /// default maximum number of iterations.
    #[must_use]
    pub const fn high_precision() -> Self {
        Self::new(HIGH_PRECISION_TOLERANCE, DEFAULT_MAX_ITERATIONS)
    }

    /// The relative change at which an iteration has converged.
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// The maximum number of iterations before giving up.
    #[must_use]
    pub const fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Test whether an iteration has converged.
    /// * `previous` - the value before the latest iteration.
    /// * `current` - the value after the latest iteration.
    ///
    /// returns true if the relative change is within tolerance, or the
    /// absolute change if `current` is too small to divide by.
    #[must_use]
    pub fn has_converged(&self, previous: f64, current: f64) -> bool {
        relative_change(previous, current) < self.tolerance
    }
}

impl Default for Convergence {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE, DEFAULT_MAX_ITERATIONS)
    }
}

/// Calculate the change between successive values of an iteration.
/// * `previous` - the value before the latest iteration.
/// * `current` - the value after the latest iteration.
///
/// returns the absolute change relative to `current`, or the absolute change
/// if `current` is smaller than `MIN_RELATIVE_VALUE`.
#[must_use]
pub fn relative_change(previous: f64, current: f64) -> f64 {
    let change = libm::fabs(previous - current);
    let magnitude = libm::fabs(current);
    if magnitude < MIN_RELATIVE_VALUE {
        change
    } else {
        change / magnitude
    }
}
