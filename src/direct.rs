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

//! The direct module contains functions for solving the direct geodesic
//! problem: the position and azimuth at a distance along a geodesic from a
//! position with a given azimuth.
//!
//! Vincenty's method iterates `sigma`, the arc length on the auxiliary
//! sphere, until the change in `sigma` is within tolerance.

#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::suboptimal_flops)]

use crate::ellipsoid::coefficients::{
    calculate_delta_sigma, calculate_longitude_correction, calculate_sq_u, evaluate_a,
    evaluate_b, evaluate_c,
};
use crate::{normalise_azimuth, normalise_radians, Convergence, Ellipsoid, Error, Metres};
use angle_sc::{Angle, Degrees, Radians};
use core::f64::consts::PI;
use unit_sphere::LatLong;

/// The solution of the direct problem.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectSolution {
    /// The latitude of the finish position.
    lat: Degrees,
    /// The longitude of the finish position.
    lon: Degrees,
    /// The azimuth from the finish position back to the start position.
    reverse_azimuth: Degrees,
    /// The great circle arc length on the auxiliary sphere.
    arc_length: Radians,
    /// The number of iterations performed.
    iterations: u32,
}

impl DirectSolution {
    /// Accessor for the finish position.
    #[must_use]
    pub fn position(&self) -> LatLong {
        LatLong::new(self.lat, self.lon)
    }

    /// Accessor for the latitude of the finish position.
    #[must_use]
    pub const fn lat(&self) -> Degrees {
        self.lat
    }

    /// Accessor for the longitude of the finish position.
    #[must_use]
    pub const fn lon(&self) -> Degrees {
        self.lon
    }

    /// Accessor for the reverse azimuth at the finish position,
    /// 0° <= azimuth < 360°.
    #[must_use]
    pub const fn reverse_azimuth(&self) -> Degrees {
        self.reverse_azimuth
    }

    /// Accessor for the great circle arc length on the auxiliary sphere.
    #[must_use]
    pub const fn arc_length(&self) -> Radians {
        self.arc_length
    }

    /// Accessor for the number of iterations performed.
    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }
}

/// Calculate the position at a distance along a geodesic from a position
/// with a given azimuth.
///
/// Note: the longitude of the finish position is not normalised, it is the
/// start longitude plus the longitude difference along the geodesic.
/// * `a` - the start position in geodetic coordinates.
/// * `azimuth` - the azimuth at the start position.
/// * `distance` - the length of the geodesic.
/// * `ellipsoid` - the `Ellipsoid`.
/// * `convergence` - the tolerance and maximum number of iterations.
///
/// returns the finish position and the azimuth from the finish position
/// back to the start position.
///
/// # Errors
///
/// Returns `Error::NonConvergence` if `sigma` has not converged within
/// `convergence.max_iterations()`.
///
/// # Examples
/// ```
/// use vincenty_wgs84::*;
/// use angle_sc::is_within_tolerance;
///
/// // 100 nautical miles due East along the Equator
/// let a = LatLong::new(Degrees(0.0), Degrees(0.0));
/// let distance = Metres::from(NauticalMiles(100.0));
/// let solution = direct::calculate_destination(
///     &a,
///     Degrees(90.0),
///     distance,
///     &WGS84_ELLIPSOID,
///     &Convergence::default(),
/// )
/// .unwrap();
///
/// let position = solution.position();
/// assert!(is_within_tolerance(0.0, position.lat().0, 1e-12));
/// assert!(is_within_tolerance(1.663_680, position.lon().0, 1e-6));
/// assert!(is_within_tolerance(270.0, solution.reverse_azimuth().0, 1e-12));
/// ```
pub fn calculate_destination(
    a: &LatLong,
    azimuth: Degrees,
    distance: Metres,
    ellipsoid: &Ellipsoid,
    convergence: &Convergence,
) -> Result<DirectSolution, Error> {
    let alpha1 = Angle::from(normalise_radians(Radians(azimuth.0.to_radians())));
    let (sin_alpha1, cos_alpha1) = (alpha1.sin().0, alpha1.cos().0);

    // project the start latitude onto the auxiliary sphere
    let u1 = ellipsoid.calculate_reduced_latitude(Radians(a.lat().0.to_radians()));
    let (sin_u1, cos_u1) = libm::sincos(u1.0);

    // the arc length from the Equator crossing to the start position
    let sigma1 = libm::atan2(sin_u1, cos_u1 * cos_alpha1);

    // the azimuth at the Equator crossing
    let sin_alpha = cos_u1 * sin_alpha1;
    let sq_cos_alpha = (1.0 - sin_alpha) * (1.0 + sin_alpha);

    let sq_u = calculate_sq_u(sq_cos_alpha, ellipsoid.ep_2());
    let series_a = evaluate_a(sq_u);
    let series_b = evaluate_b(sq_u);

    // first approximation, the arc length on a sphere
    let sigma0 = distance.0 / (ellipsoid.b().0 * series_a);
    let mut sigma = sigma0;

    let mut iterations = 0;
    let cos_2sigma_m = loop {
        iterations += 1;

        let cos_2sigma_m = libm::cos(2.0 * sigma1 + sigma);
        let (sin_sigma, cos_sigma) = libm::sincos(sigma);
        let delta_sigma = calculate_delta_sigma(series_b, sin_sigma, cos_sigma, cos_2sigma_m);

        let previous = sigma;
        sigma = sigma0 + delta_sigma;
        log::trace!("direct iteration: {iterations} sigma: {sigma}");

        if convergence.has_converged(previous, sigma) {
            break cos_2sigma_m;
        }

        if convergence.max_iterations() <= iterations {
            let change = libm::fabs(sigma - previous);
            log::warn!("direct did not converge, iterations: {iterations} change: {change}");
            return Err(Error::NonConvergence {
                iterations,
                value: sigma,
                change,
            });
        }
    };
    log::debug!("direct converged, iterations: {iterations}");

    let (sin_sigma, cos_sigma) = libm::sincos(sigma);
    let temp = sin_u1 * sin_sigma - cos_u1 * cos_sigma * cos_alpha1;

    let lat2 = libm::atan2(
        sin_u1 * cos_sigma + cos_u1 * sin_sigma * cos_alpha1,
        ellipsoid.one_minus_f() * libm::sqrt(sin_alpha * sin_alpha + temp * temp),
    );

    // the longitude difference on the auxiliary sphere
    let lambda = libm::atan2(
        sin_sigma * sin_alpha1,
        cos_u1 * cos_sigma - sin_u1 * sin_sigma * cos_alpha1,
    );
    let c = evaluate_c(ellipsoid.f(), sq_cos_alpha);
    let omega = lambda
        - calculate_longitude_correction(
            ellipsoid.f(),
            c,
            sin_alpha,
            sigma,
            sin_sigma,
            cos_sigma,
            cos_2sigma_m,
        );
    let lon2 = a.lon().0.to_radians() + omega;

    let reverse_azimuth = libm::atan2(sin_alpha, -temp) + PI;

    Ok(DirectSolution {
        lat: Degrees(lat2.to_degrees()),
        lon: Degrees(lon2.to_degrees()),
        reverse_azimuth: normalise_azimuth(Radians(reverse_azimuth)),
        arc_length: Radians(sigma),
        iterations,
    })
}
