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

//! The error module contains the failures reported by the Vincenty solvers
//! and the `Ellipsoid` constructor.

use thiserror::Error;

/// The ways in which a geodesic calculation can fail.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum Error {
    /// The iteration did not reach the required tolerance.
    #[error("failed to converge after {iterations} iterations: value {value}, last change {change}")]
    NonConvergence {
        /// The number of iterations performed.
        iterations: u32,
        /// The last value of the iterated parameter, in radians.
        value: f64,
        /// The last change in the iterated parameter, in radians.
        change: f64,
    },

    /// The great circle arc on the auxiliary sphere is degenerate, e.g.
    /// between antipodal points.
    #[error("singular geometry on the auxiliary sphere: sin sigma = {sin_sigma}")]
    SingularGeometry {
        /// The sine of the arc length on the auxiliary sphere.
        sin_sigma: f64,
    },

    /// The ellipsoid parameters are outside of their valid ranges.
    #[error("invalid ellipsoid: a = {a} metres, f = {f}")]
    InvalidEllipsoid {
        /// The Semimajor axis in metres.
        a: f64,
        /// The flattening ratio.
        f: f64,
    },
}
