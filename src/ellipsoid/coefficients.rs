// Copyright (c) 2024-2026 Ken Barker

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

//! This module contains the series coefficients and correction terms shared
//! by the Vincenty direct and inverse solutions.
//!
//! It uses the equations given by T. Vincenty in
//! [Direct and Inverse Solutions of Geodesics on the Ellipsoid with application of nested equations](https://www.ngs.noaa.gov/PUBS_LIB/inverse.pdf),
//! Survey Review XXIII, No. 176, April 1975.
//!
//! Notation:
//! - `sigma` - the arc length on the auxiliary sphere;
//! - `alpha` - the azimuth of the geodesic at the Equator;
//! - `2 sigma_m` - twice the arc length from the Equator to the mid point.

#![allow(clippy::suboptimal_flops)]

/// The coefficients of the `A` polynomial in `u^2`, Vincenty Eq. 3.
const A_COEFFS: [f64; 4] = [4096.0, -768.0, 320.0, -175.0];

/// The coefficients of the `B` polynomial in `u^2`, Vincenty Eq. 4.
const B_COEFFS: [f64; 4] = [256.0, -128.0, 74.0, -47.0];

/// Evaluate the polynomial in x using
/// [Horner's method](https://en.wikipedia.org/wiki/Horner%27s_method).
/// * `coeffs` - the polynomial coefficients, lowest order first.
/// * `x` - the variable.
#[must_use]
pub fn evaluate_polynomial(coeffs: &[f64], x: f64) -> f64 {
    coeffs
        .split_last()
        .map_or(0.0, |(last, elements)| {
            elements
                .iter()
                .rev()
                .fold(*last, |result, element| libm::fma(result, x, *element))
        })
}

/// Calculate `u^2`, the integration variable of the series expansions.
/// * `sq_cos_alpha` - the square of the cosine of the azimuth at the Equator.
/// * `ep_2` - the square of the second Eccentricity of the ellipsoid,
///   i.e. (a^2 - b^2) / b^2.
#[must_use]
pub fn calculate_sq_u(sq_cos_alpha: f64, ep_2: f64) -> f64 {
    sq_cos_alpha * ep_2
}

/// The scale factor `A`, Vincenty Eq. 3.
/// * `sq_u` - `u^2`, see `calculate_sq_u`.
/// # Examples
/// ```
/// use vincenty_wgs84::ellipsoid::coefficients::evaluate_a;
///
/// assert_eq!(1.0, evaluate_a(0.0));
/// ```
#[must_use]
pub fn evaluate_a(sq_u: f64) -> f64 {
    1.0 + sq_u / 16384.0 * evaluate_polynomial(&A_COEFFS, sq_u)
}

/// The coefficient `B`, Vincenty Eq. 4.
/// * `sq_u` - `u^2`, see `calculate_sq_u`.
/// # Examples
/// ```
/// use vincenty_wgs84::ellipsoid::coefficients::evaluate_b;
///
/// assert_eq!(0.0, evaluate_b(0.0));
/// ```
#[must_use]
pub fn evaluate_b(sq_u: f64) -> f64 {
    sq_u / 1024.0 * evaluate_polynomial(&B_COEFFS, sq_u)
}

/// The coefficient `C`, Vincenty Eq. 10.
/// * `f` - the flattening of the ellipsoid.
/// * `sq_cos_alpha` - the square of the cosine of the azimuth at the Equator.
#[must_use]
pub fn evaluate_c(f: f64, sq_cos_alpha: f64) -> f64 {
    f / 16.0 * sq_cos_alpha * (4.0 + f * (4.0 - 3.0 * sq_cos_alpha))
}

/// The correction `delta sigma` between the arc length on the auxiliary
/// sphere and the scaled geodesic length, Vincenty Eq. 6.
/// * `b` - the coefficient `B`.
/// * `sin_sigma`, `cos_sigma` - the sine and cosine of the arc length.
/// * `cos_2sigma_m` - the cosine of twice the arc length to the mid point.
#[must_use]
pub fn calculate_delta_sigma(b: f64, sin_sigma: f64, cos_sigma: f64, cos_2sigma_m: f64) -> f64 {
    let sq_cos_2sigma_m = cos_2sigma_m * cos_2sigma_m;
    b * sin_sigma
        * (cos_2sigma_m
            + b / 4.0
                * (cos_sigma * (2.0 * sq_cos_2sigma_m - 1.0)
                    - b / 6.0
                        * cos_2sigma_m
                        * (4.0 * sin_sigma * sin_sigma - 3.0)
                        * (4.0 * sq_cos_2sigma_m - 3.0)))
}

/// The difference between the longitude on the auxiliary sphere and the
/// longitude on the ellipsoid, Vincenty Eqs. 11 and 13.
/// * `f` - the flattening of the ellipsoid.
/// * `c` - the coefficient `C`.
/// * `sin_alpha` - the sine of the azimuth at the Equator.
/// * `sigma` - the arc length on the auxiliary sphere, in radians.
/// * `sin_sigma`, `cos_sigma` - the sine and cosine of the arc length.
/// * `cos_2sigma_m` - the cosine of twice the arc length to the mid point.
#[allow(clippy::similar_names)]
#[must_use]
pub fn calculate_longitude_correction(
    f: f64,
    c: f64,
    sin_alpha: f64,
    sigma: f64,
    sin_sigma: f64,
    cos_sigma: f64,
    cos_2sigma_m: f64,
) -> f64 {
    (1.0 - c)
        * f
        * sin_alpha
        * (sigma
            + c * sin_sigma
                * (cos_2sigma_m + c * cos_sigma * (2.0 * cos_2sigma_m * cos_2sigma_m - 1.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipsoid::{calculate_sq_2nd_eccentricity, wgs84};
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_evaluate_polynomial() {
        assert_eq!(1.0, evaluate_polynomial(&[1.0, 2.0, 3.0], 0.0));
        assert_eq!(6.0, evaluate_polynomial(&[1.0, 2.0, 3.0], 1.0));
        assert_eq!(17.0, evaluate_polynomial(&[1.0, 2.0, 3.0], 2.0));
        assert_eq!(5.0, evaluate_polynomial(&[5.0], 2.0));

        let empty: &[f64] = &[];
        assert_eq!(0.0, evaluate_polynomial(empty, 2.0));
    }

    #[test]
    fn test_evaluate_a_and_b_wgs84_equator() {
        // cos alpha = 1: a meridional geodesic
        let ep_2 = calculate_sq_2nd_eccentricity(wgs84::F);
        let sq_u = calculate_sq_u(1.0, ep_2);
        assert_eq!(ep_2, sq_u);

        assert!(is_within_tolerance(
            1.0016827510415456,
            evaluate_a(sq_u),
            4.0 * f64::EPSILON
        ));
        assert!(is_within_tolerance(
            0.0016792186103152505,
            evaluate_b(sq_u),
            4.0 * f64::EPSILON
        ));
    }

    #[test]
    fn test_evaluate_a_and_b_match_vincenty_1976() {
        // Vincenty's 1976 update expresses A and B in terms of k1
        let ep_2 = calculate_sq_2nd_eccentricity(wgs84::F);
        for i in 0..=10 {
            let sq_cos_alpha = f64::from(i) / 10.0;
            let sq_u = calculate_sq_u(sq_cos_alpha, ep_2);
            let t = libm::sqrt(1.0 + sq_u);
            let k1 = (t - 1.0) / (t + 1.0);

            let a = (1.0 + k1 * k1 / 4.0) / (1.0 - k1);
            let b = k1 * (1.0 - 3.0 * k1 * k1 / 8.0);

            assert!(is_within_tolerance(a, evaluate_a(sq_u), 1.0e-12));
            assert!(is_within_tolerance(b, evaluate_b(sq_u), 1.0e-11));
        }
    }

    #[test]
    fn test_evaluate_c() {
        // C is zero for an equatorial geodesic
        assert_eq!(0.0, evaluate_c(wgs84::F, 0.0));
        assert!(is_within_tolerance(
            0.0008389052498964729,
            evaluate_c(wgs84::F, 1.0),
            f64::EPSILON
        ));
    }

    #[test]
    fn test_calculate_delta_sigma() {
        // no correction on a sphere
        assert_eq!(0.0, calculate_delta_sigma(0.0, 0.5, 0.5, 0.5));
        // no correction at zero length
        assert_eq!(0.0, calculate_delta_sigma(0.0016, 0.0, 1.0, 1.0));

        // first order term: B * sin(sigma) * cos(2 sigma_m)
        let b = 1.0e-6;
        let result = calculate_delta_sigma(b, 0.5, 0.5, 0.5);
        assert!(is_within_tolerance(b * 0.5 * 0.5, result, 1.0e-12));
    }

    #[test]
    fn test_calculate_longitude_correction() {
        // no correction on a sphere
        assert_eq!(
            0.0,
            calculate_longitude_correction(0.0, 0.0, 0.5, 1.0, 0.8, 0.6, 0.2)
        );
        // no correction on a meridian
        assert_eq!(
            0.0,
            calculate_longitude_correction(wgs84::F, 0.0, 0.0, 1.0, 0.8, 0.6, 0.2)
        );

        // an equatorial geodesic: C is zero so the correction is f * sigma
        let sigma = 0.5;
        let result = calculate_longitude_correction(
            wgs84::F,
            evaluate_c(wgs84::F, 0.0),
            1.0,
            sigma,
            libm::sin(sigma),
            libm::cos(sigma),
            0.0,
        );
        assert!(is_within_tolerance(wgs84::F * sigma, result, f64::EPSILON));
    }
}
