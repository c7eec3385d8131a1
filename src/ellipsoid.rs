// Copyright (c) 2024 Ken Barker

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

//! The ellipsoid module contains types and functions for defining an ellipsoid
//! given its Semimajor axis (the equivalent of its radius) and flattening ratio.

#![allow(clippy::suboptimal_flops)]

pub mod coefficients;
pub mod grs80;
pub mod wgs84;

use crate::Metres;
use angle_sc::Radians;

/// Calculate the Semiminor axis of an ellipsoid.
/// * `a` - the Semimajor axis of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use vincenty_wgs84::Metres;
/// use vincenty_wgs84::ellipsoid::{calculate_minor_axis, wgs84};
///
/// // The WGS 84 Semiminor axis measured in metres.
/// let b : Metres = Metres(6_356_752.314_245_179);
/// assert_eq!(b, calculate_minor_axis(wgs84::A, wgs84::F));
/// ```
#[must_use]
pub fn calculate_minor_axis(a: Metres, f: f64) -> Metres {
    Metres(a.0 * (1.0 - f))
}

/// Calculate the square of the Eccentricity of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use vincenty_wgs84::ellipsoid::{calculate_sq_eccentricity, wgs84};
///
/// // The WGS 84 sq_eccentricity.
/// assert_eq!(0.0066943799901413165, calculate_sq_eccentricity(wgs84::F));
/// ```
#[must_use]
pub fn calculate_sq_eccentricity(f: f64) -> f64 {
    f * (2.0 - f)
}

/// Calculate the square of the second Eccentricity of an ellipsoid.  
/// It is equal to (a^2 - b^2) / b^2, the factor that scales `cos^2 alpha`
/// to `u^2` in Vincenty's formulae.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use vincenty_wgs84::ellipsoid::{calculate_sq_2nd_eccentricity, wgs84};
///
/// // The WGS 84 sq 2nd eccentricity.
/// assert_eq!(0.006739496742276434, calculate_sq_2nd_eccentricity(wgs84::F));
/// ```
#[must_use]
pub fn calculate_sq_2nd_eccentricity(f: f64) -> f64 {
    let one_minus_f = 1.0 - f;
    calculate_sq_eccentricity(f) / (one_minus_f * one_minus_f)
}

/// Function to convert a geodetic Latitude to a reduced Latitude on the
/// auxiliary sphere: `U = atan((1 - f) * tan(lat))`.
///
/// Note: latitudes outside of the range -90° to 90° are not rejected, they
/// are folded into that range by the arctangent.
/// * `lat` - the geodetic Latitude
/// * `one_minus_f` - one minus the flattening ratio.
#[must_use]
pub fn calculate_reduced_latitude(lat: Radians, one_minus_f: f64) -> Radians {
    Radians(libm::atan(one_minus_f * libm::tan(lat.0)))
}

/// Test whether the parameters define a valid ellipsoid of revolution.
/// * `a` - the Semimajor axis of an ellipsoid.
/// * `f` - the flattening ratio.
///
/// returns true if `a` is positive and finite and 0 < `f` < 1.
#[must_use]
pub fn is_valid_ellipsoid(a: Metres, f: f64) -> bool {
    a.0.is_finite() && 0.0 < a.0 && 0.0 < f && f < 1.0
}
