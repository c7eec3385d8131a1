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

//! The inverse module contains functions for solving the inverse geodesic
//! problem: the length and azimuths of the geodesic segment between two
//! positions on the surface of an ellipsoid.
//!
//! Vincenty's method iterates `lambda`, the longitude difference on the
//! auxiliary sphere, until the change in `lambda` is within tolerance.

#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::suboptimal_flops)]

use crate::ellipsoid::coefficients::{
    calculate_delta_sigma, calculate_longitude_correction, calculate_sq_u, evaluate_a,
    evaluate_b, evaluate_c,
};
use crate::{normalise_azimuth, Convergence, Ellipsoid, Error, Metres};
use angle_sc::{Angle, Degrees, Radians};
use core::f64::consts::PI;
use unit_sphere::LatLong;

/// Positions closer than this in both latitude and longitude, in degrees,
/// are coincident.
pub const COINCIDENT_THRESHOLD: f64 = 1.0e-8;

/// The minimum sine of the arc length on the auxiliary sphere.  
/// Below this, the positions are antipodal or the geodesic is degenerate.
pub const MIN_SIN_SIGMA: f64 = 1.0e-12;

/// The solution of the inverse problem.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InverseSolution {
    /// The length of the geodesic on the ellipsoid.
    distance: Metres,
    /// The azimuth at the start position.
    azimuth: Degrees,
    /// The azimuth from the finish position back to the start position.
    reverse_azimuth: Degrees,
    /// The great circle arc length on the auxiliary sphere.
    arc_length: Radians,
    /// The number of iterations performed.
    iterations: u32,
}

impl InverseSolution {
    /// The solution between coincident positions: zero length and azimuths.
    #[must_use]
    pub const fn coincident() -> Self {
        Self {
            distance: Metres(0.0),
            azimuth: Degrees(0.0),
            reverse_azimuth: Degrees(0.0),
            arc_length: Radians(0.0),
            iterations: 0,
        }
    }

    /// Accessor for the length of the geodesic in metres.
    #[must_use]
    pub const fn distance(&self) -> Metres {
        self.distance
    }

    /// Accessor for the azimuth at the start position, 0° <= azimuth < 360°.
    #[must_use]
    pub const fn azimuth(&self) -> Degrees {
        self.azimuth
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

    /// Accessor for the number of iterations performed, zero for
    /// coincident positions.
    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }
}

/// The great circle arc on the auxiliary sphere for a value of `lambda`.
#[derive(Clone, Copy, Debug)]
struct AuxiliaryArc {
    sigma: f64,
    sin_sigma: f64,
    cos_sigma: f64,
    sin_alpha: f64,
    sq_cos_alpha: f64,
    cos_2sigma_m: f64,
}

/// Calculate the great circle arc between a pair of reduced latitudes on the
/// auxiliary sphere, Vincenty Eqs. 14 to 17.
/// * `u1`, `u2` - the reduced latitudes of the start and finish points.
/// * `lambda` - the longitude difference on the auxiliary sphere, in radians.
///
/// returns the arc, or `Error::SingularGeometry` if its length is zero or π.
fn calculate_auxiliary_arc(u1: Angle, u2: Angle, lambda: f64) -> Result<AuxiliaryArc, Error> {
    let (sin_u1, cos_u1) = (u1.sin().0, u1.cos().0);
    let (sin_u2, cos_u2) = (u2.sin().0, u2.cos().0);
    let (sin_lambda, cos_lambda) = libm::sincos(lambda);

    let temp1 = cos_u2 * sin_lambda;
    let temp2 = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda;
    let sin_sigma = libm::sqrt(temp1 * temp1 + temp2 * temp2);
    if sin_sigma < MIN_SIN_SIGMA {
        return Err(Error::SingularGeometry { sin_sigma });
    }

    let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
    let sigma = libm::atan2(sin_sigma, cos_sigma);

    let sin_alpha = (cos_u1 * cos_u2 * sin_lambda / sin_sigma).clamp(-1.0, 1.0);
    let sq_cos_alpha = (1.0 - sin_alpha) * (1.0 + sin_alpha);

    // an equatorial geodesic has no mid point latitude
    let cos_2sigma_m = if 0.0 < sq_cos_alpha {
        cos_sigma - 2.0 * sin_u1 * sin_u2 / sq_cos_alpha
    } else {
        0.0
    };

    Ok(AuxiliaryArc {
        sigma,
        sin_sigma,
        cos_sigma,
        sin_alpha,
        sq_cos_alpha,
        cos_2sigma_m,
    })
}

/// Whether a pair of positions are the same point.  
/// Positions at the same pole are coincident whatever their longitudes.
/// * `lat1`, `lon1` - the start position, in degrees.
/// * `lat2`, `lon2` - the finish position, in degrees.
fn is_coincident(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> bool {
    libm::fabs(lat2 - lat1) < COINCIDENT_THRESHOLD
        && (libm::fabs(lon2 - lon1) < COINCIDENT_THRESHOLD
            || 90.0 - libm::fabs(lat1) < COINCIDENT_THRESHOLD)
}

/// Calculate the length and azimuths of the geodesic between a pair
/// of positions on the ellipsoid.
/// * `a`, `b` - the start and finish positions in geodetic coordinates.
/// * `ellipsoid` - the `Ellipsoid`.
/// * `convergence` - the tolerance and maximum number of iterations.
///
/// returns the length of the geodesic, the azimuth at the start position
/// and the azimuth from the finish position back to the start position.  
/// Coincident positions, including positions at the same pole with different
/// longitudes, return `InverseSolution::coincident()`.
///
/// # Errors
///
/// Returns `Error::SingularGeometry` if the positions are antipodal, or
/// `Error::NonConvergence` if `lambda` has not converged within
/// `convergence.max_iterations()`.
///
/// # Examples
/// ```
/// use vincenty_wgs84::*;
/// use angle_sc::is_within_tolerance;
///
/// let istanbul = LatLong::new(Degrees(42.0), Degrees(29.0));
/// let washington = LatLong::new(Degrees(39.0), Degrees(-77.0));
/// let solution = inverse::calculate_distance_and_azimuths(
///     &istanbul,
///     &washington,
///     &WGS84_ELLIPSOID,
///     &Convergence::default(),
/// )
/// .unwrap();
///
/// assert!(is_within_tolerance(8_339_863.136, solution.distance().0, 1e-2));
/// assert!(is_within_tolerance(360.0 - 50.693_753, solution.azimuth().0, 1e-5));
///
/// let distance_nm = NauticalMiles::from(solution.distance());
/// println!("Istanbul-Washington distance: {:?}", distance_nm);
/// ```
pub fn calculate_distance_and_azimuths(
    a: &LatLong,
    b: &LatLong,
    ellipsoid: &Ellipsoid,
    convergence: &Convergence,
) -> Result<InverseSolution, Error> {
    let (lat1, lon1) = (a.lat().0, a.lon().0);
    let (lat2, lon2) = (b.lat().0, b.lon().0);

    if is_coincident(lat1, lon1, lat2, lon2) {
        return Ok(InverseSolution::coincident());
    }

    // project latitudes onto the auxiliary sphere
    let u1 = Angle::from(ellipsoid.calculate_reduced_latitude(Radians(lat1.to_radians())));
    let u2 = Angle::from(ellipsoid.calculate_reduced_latitude(Radians(lat2.to_radians())));

    // the longitude difference on the ellipsoid
    let omega = lon2.to_radians() - lon1.to_radians();
    let mut lambda = omega;

    let mut iterations = 0;
    loop {
        iterations += 1;

        let arc = calculate_auxiliary_arc(u1, u2, lambda)?;
        let c = evaluate_c(ellipsoid.f(), arc.sq_cos_alpha);

        let previous = lambda;
        lambda = omega
            + calculate_longitude_correction(
                ellipsoid.f(),
                c,
                arc.sin_alpha,
                arc.sigma,
                arc.sin_sigma,
                arc.cos_sigma,
                arc.cos_2sigma_m,
            );
        log::trace!("inverse iteration: {iterations} lambda: {lambda}");

        if convergence.has_converged(previous, lambda) {
            break;
        }

        if convergence.max_iterations() <= iterations {
            let change = libm::fabs(lambda - previous);
            log::warn!("inverse did not converge, iterations: {iterations} change: {change}");
            return Err(Error::NonConvergence {
                iterations,
                value: lambda,
                change,
            });
        }
    }
    log::debug!("inverse converged, iterations: {iterations}");

    // the arc at the converged lambda
    let arc = calculate_auxiliary_arc(u1, u2, lambda)?;

    // convert the arc length on the auxiliary sphere to the geodesic length
    let sq_u = calculate_sq_u(arc.sq_cos_alpha, ellipsoid.ep_2());
    let series_a = evaluate_a(sq_u);
    let series_b = evaluate_b(sq_u);
    let delta_sigma =
        calculate_delta_sigma(series_b, arc.sin_sigma, arc.cos_sigma, arc.cos_2sigma_m);
    let distance = Metres(ellipsoid.b().0 * series_a * (arc.sigma - delta_sigma));

    let (sin_u1, cos_u1) = (u1.sin().0, u1.cos().0);
    let (sin_u2, cos_u2) = (u2.sin().0, u2.cos().0);
    let (sin_lambda, cos_lambda) = libm::sincos(lambda);

    let azimuth = libm::atan2(
        cos_u2 * sin_lambda,
        cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda,
    );
    let reverse_azimuth = libm::atan2(
        cos_u1 * sin_lambda,
        cos_u1 * sin_u2 * cos_lambda - sin_u1 * cos_u2,
    ) + PI;

    Ok(InverseSolution {
        distance,
        azimuth: normalise_azimuth(Radians(azimuth)),
        reverse_azimuth: normalise_azimuth(Radians(reverse_azimuth)),
        arc_length: Radians(arc.sigma),
        iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WGS84_ELLIPSOID;
    use angle_sc::is_within_tolerance;

    fn calculate_wgs84(
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
    ) -> Result<InverseSolution, Error> {
        let a = LatLong::new(Degrees(lat1), Degrees(lon1));
        let b = LatLong::new(Degrees(lat2), Degrees(lon2));
        calculate_distance_and_azimuths(&a, &b, &WGS84_ELLIPSOID, &Convergence::default())
    }

    #[test]
    fn test_calculate_auxiliary_arc_meridian() {
        // from the Equator to the North pole on the auxiliary sphere
        let u1 = Angle::from(Radians(0.0));
        let u2 = Angle::from(Radians(core::f64::consts::FRAC_PI_2));
        let arc = calculate_auxiliary_arc(u1, u2, 0.0).unwrap();

        assert!(is_within_tolerance(
            core::f64::consts::FRAC_PI_2,
            arc.sigma,
            f64::EPSILON
        ));
        assert_eq!(0.0, arc.sin_alpha);
        assert_eq!(1.0, arc.sq_cos_alpha);
    }

    #[test]
    fn test_calculate_auxiliary_arc_equator() {
        let u = Angle::from(Radians(0.0));
        let arc = calculate_auxiliary_arc(u, u, 0.5).unwrap();

        assert!(is_within_tolerance(0.5, arc.sigma, f64::EPSILON));
        assert!(is_within_tolerance(1.0, arc.sin_alpha, f64::EPSILON));
        assert!(arc.sq_cos_alpha < 4.0 * f64::EPSILON);
        assert!(arc.cos_2sigma_m.is_finite());
    }

    #[test]
    fn test_calculate_auxiliary_arc_antipodal() {
        let u = Angle::from(Radians(0.0));
        let result = calculate_auxiliary_arc(u, u, PI);
        assert!(matches!(result, Err(Error::SingularGeometry { .. })));
    }

    #[test]
    fn test_inverse_equator_quadrant() {
        // a quarter of the Equator: a * π / 2
        let a = LatLong::new(Degrees(0.0), Degrees(0.0));
        let b = LatLong::new(Degrees(0.0), Degrees(90.0));
        let solution =
            calculate_distance_and_azimuths(&a, &b, &WGS84_ELLIPSOID, &Convergence::default())
                .unwrap();
        assert!(is_within_tolerance(
            10_018_754.171_394_622,
            solution.distance().0,
            1.0e-5
        ));
        assert_eq!(Degrees(90.0), solution.azimuth());
        assert_eq!(Degrees(270.0), solution.reverse_azimuth());
    }

    #[test]
    fn test_inverse_meridian_quadrant() {
        // the WGS 84 meridian quadrant
        let solution = calculate_wgs84(0.0, 0.0, 90.0, 0.0).unwrap();
        assert!(is_within_tolerance(
            10_001_965.729,
            solution.distance().0,
            1.0e-3
        ));
        assert_eq!(Degrees(0.0), solution.azimuth());
        assert_eq!(Degrees(180.0), solution.reverse_azimuth());
        assert_eq!(1, solution.iterations());
    }

    #[test]
    fn test_inverse_one_degree_of_latitude_at_the_pole() {
        let solution = calculate_wgs84(-90.0, 0.0, -89.0, 0.0).unwrap();
        assert!(is_within_tolerance(
            111_693.865,
            solution.distance().0,
            1.0e-3
        ));
    }

    #[test]
    fn test_inverse_across_the_antimeridian() {
        // 20° of the Equator, eastwards across the antimeridian
        let solution = calculate_wgs84(0.0, 170.0, 0.0, -170.0).unwrap();
        assert!(is_within_tolerance(
            2_226_389.816,
            solution.distance().0,
            1.0e-3
        ));
        assert!(is_within_tolerance(90.0, solution.azimuth().0, 1.0e-9));
        assert!(is_within_tolerance(
            270.0,
            solution.reverse_azimuth().0,
            1.0e-9
        ));
    }

    #[test]
    fn test_inverse_coincident() {
        let solution = calculate_wgs84(51.5, -0.1, 51.5, -0.1).unwrap();
        assert_eq!(InverseSolution::coincident(), solution);
        assert_eq!(Metres(0.0), solution.distance());
        assert_eq!(Degrees(0.0), solution.azimuth());
        assert_eq!(Degrees(0.0), solution.reverse_azimuth());
        assert_eq!(0, solution.iterations());

        // the same pole with different longitudes
        let solution = calculate_wgs84(90.0, 0.0, 90.0, 45.0).unwrap();
        assert_eq!(InverseSolution::coincident(), solution);
        let solution = calculate_wgs84(-90.0, 10.0, -90.0, -170.0).unwrap();
        assert_eq!(InverseSolution::coincident(), solution);

        // just beyond the coincident threshold
        let solution = calculate_wgs84(0.0, 0.0, 0.0, 2.0e-8).unwrap();
        assert!(is_within_tolerance(
            2.226_389_8e-3,
            solution.distance().0,
            1.0e-9
        ));
    }

    #[test]
    fn test_inverse_symmetry() {
        let positions = [
            (-37.95, 144.42, -37.65, 143.93),
            (42.0, 29.0, 39.0, -77.0),
            (-60.0, -120.0, 45.0, 30.0),
            (0.5, 0.0, -0.5, 120.0),
        ];
        for (lat1, lon1, lat2, lon2) in positions {
            let forward = calculate_wgs84(lat1, lon1, lat2, lon2).unwrap();
            let backward = calculate_wgs84(lat2, lon2, lat1, lon1).unwrap();

            assert!(is_within_tolerance(
                forward.distance().0,
                backward.distance().0,
                1.0e-6
            ));
            assert!(is_within_tolerance(
                forward.azimuth().0,
                backward.reverse_azimuth().0,
                1.0e-8
            ));
            assert!(is_within_tolerance(
                forward.reverse_azimuth().0,
                backward.azimuth().0,
                1.0e-8
            ));
        }
    }

    #[test]
    fn test_inverse_antipodal() {
        let result = calculate_wgs84(0.0, 0.0, 0.0, 180.0);
        assert!(matches!(result, Err(Error::SingularGeometry { .. })));

        // pole to pole
        let result = calculate_wgs84(90.0, 0.0, -90.0, 0.0);
        assert!(matches!(result, Err(Error::SingularGeometry { .. })));
    }

    #[test]
    fn test_inverse_nearly_antipodal_does_not_converge() {
        let result = calculate_wgs84(0.0, 0.0, 0.5, 179.7);
        assert!(matches!(
            result,
            Err(Error::NonConvergence {
                iterations: 200,
                ..
            })
        ));

        // the iteration limit is configurable
        let a = LatLong::new(Degrees(0.0), Degrees(0.0));
        let b = LatLong::new(Degrees(0.0), Degrees(179.9));
        let result = calculate_distance_and_azimuths(
            &a,
            &b,
            &WGS84_ELLIPSOID,
            &Convergence::new(1.0e-9, 25),
        );
        assert!(matches!(
            result,
            Err(Error::NonConvergence { iterations: 25, .. })
        ));
    }

    #[test]
    fn test_inverse_nearly_antipodal_converges() {
        // converges slowly
        let solution = calculate_wgs84(0.0, 0.0, 0.5, 179.5).unwrap();
        assert!(20 < solution.iterations());
        assert!(solution.iterations() < 200);
        assert!(is_within_tolerance(
            19_936_288.586,
            solution.distance().0,
            1.0e-2
        ));
    }

    #[test]
    fn test_inverse_solution_traits() {
        let solution = calculate_wgs84(42.0, 29.0, 39.0, -77.0).unwrap();

        let solution_copy = solution;
        assert!(solution_copy == solution);
        assert!(Radians(0.0) < solution.arc_length());

        println!("InverseSolution: {:?}", solution);
    }
}
