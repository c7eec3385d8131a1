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

//! vincenty-wgs84
//!
//! A library for solving the direct and inverse geodesic problems on the
//! [WGS-84](https://www.icao.int/NACC/Documents/Meetings/2014/ECARAIM/REF08-Doc9674.pdf)
//! ellipsoid using [Vincenty's formulae](https://en.wikipedia.org/wiki/Vincenty%27s_formulae).
//!
//! The shortest path between two points on the surface of an ellipsoid is a
//! [geodesic segment](https://en.wikipedia.org/wiki/Geodesics_on_an_ellipsoid).
//! Vincenty's method maps the geodesic onto a great circle arc on an
//! auxiliary sphere and iterates a correction term until it converges, to
//! calculate:
//!
//! - the *inverse* problem: the length and the azimuths of the geodesic
//!   segment between two positions;
//! - the *direct* problem: the position and azimuth at a given distance
//!   along a geodesic from a position with a given azimuth.
//!
//! T. Vincenty [Direct and Inverse Solutions of Geodesics on the Ellipsoid with application of nested equations](https://www.ngs.noaa.gov/PUBS_LIB/inverse.pdf),
//! Survey Review XXIII, No. 176, April 1975.
//!
//! ## Design
//!
//! The `Ellipsoid` class represents an ellipsoid of revolution.
//! The static `WGS84_ELLIPSOID` represents the WGS-84 `Ellipsoid` which is used
//! by the `inverse` and `direct` functions. Other ellipsoids, e.g. GRS 80, may
//! be passed to the functions in the `inverse` and `direct` modules.
//!
//! Both solutions are iterative. The iterations are bounded by a `Convergence`,
//! so nearly antipodal positions, where Vincenty's method may not converge,
//! return an `Error` instead of looping forever.
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Angle`,
//!   `Degrees` and `Radians`;
//! - [unit-sphere](https://crates.io/crates/unit-sphere) - to define `LatLong`;
//! - [icao_units](https://crates.io/crates/icao-units) - to define `Metres` and
//!   `NauticalMiles` and perform conversions between them;
//! - [thiserror](https://crates.io/crates/thiserror) - to define `Error`;
//! - [log](https://crates.io/crates/log) - to log the iterations.
//!
//! The library is declared [no_std](https://docs.rust-embedded.org/book/intro/no-std.html)
//! so it can be used in embedded applications.

#![cfg_attr(not(test), no_std)]

extern crate angle_sc;
extern crate icao_units;
extern crate unit_sphere;

pub mod convergence;
pub mod direct;
pub mod ellipsoid;
pub mod error;
pub mod inverse;

pub use angle_sc::{Angle, Degrees, Radians};
pub use convergence::Convergence;
pub use direct::DirectSolution;
pub use error::Error;
pub use icao_units::non_si::NauticalMiles;
pub use icao_units::si::Metres;
pub use inverse::InverseSolution;
pub use unit_sphere::LatLong;

use core::f64::consts::TAU;
use lazy_static::lazy_static;

/// The parameters of an `Ellipsoid`.
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipsoid {
    /// The Semimajor axis of the ellipsoid.
    a: Metres,
    /// The flattening of the ellipsoid, a ratio.
    f: f64,

    /// The Semiminor axis of the ellipsoid.
    b: Metres,
    /// One minus the flattening ratio.
    one_minus_f: f64,
    /// The square of the second Eccentricity of the ellipsoid.
    ep_2: f64,
}

impl Ellipsoid {
    /// Constructor.
    /// * `a` - the Semimajor axis of the `Ellipsoid`.
    /// * `f` - the flattening of the `Ellipsoid`, a ratio.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidEllipsoid` unless `a` is positive and finite
    /// and 0 < `f` < 1.
    ///
    /// # Examples
    /// ```
    /// use vincenty_wgs84::{Ellipsoid, Error, Metres};
    ///
    /// // The International 1924 (Hayford) ellipsoid
    /// let hayford = Ellipsoid::new(Metres(6_378_388.0), 1.0 / 297.0).unwrap();
    /// assert_eq!(Metres(6_378_388.0), hayford.a());
    ///
    /// let sphere = Ellipsoid::new(Metres(6_371_000.0), 0.0);
    /// assert_eq!(Err(Error::InvalidEllipsoid { a: 6_371_000.0, f: 0.0 }), sphere);
    /// ```
    pub fn new(a: Metres, f: f64) -> Result<Self, Error> {
        if ellipsoid::is_valid_ellipsoid(a, f) {
            Ok(Self::from_parameters(a, f))
        } else {
            Err(Error::InvalidEllipsoid { a: a.0, f })
        }
    }

    /// Construct an `Ellipsoid` from parameters that are known to be valid.
    fn from_parameters(a: Metres, f: f64) -> Self {
        Self {
            a,
            f,
            b: ellipsoid::calculate_minor_axis(a, f),
            one_minus_f: 1.0 - f,
            ep_2: ellipsoid::calculate_sq_2nd_eccentricity(f),
        }
    }

    /// Construct an `Ellipsoid` with the WGS-84 parameters.
    #[must_use]
    pub fn wgs84() -> Self {
        Self::from_parameters(ellipsoid::wgs84::A, ellipsoid::wgs84::F)
    }

    /// Construct an `Ellipsoid` with the GRS 80 parameters.
    #[must_use]
    pub fn grs80() -> Self {
        Self::from_parameters(ellipsoid::grs80::A, ellipsoid::grs80::F)
    }

    /// The Semimajor axis of the ellipsoid.
    #[must_use]
    pub const fn a(&self) -> Metres {
        self.a
    }

    /// The flattening of the ellipsoid, a ratio.
    #[must_use]
    pub const fn f(&self) -> f64 {
        self.f
    }

    /// The Semiminor axis of the ellipsoid.
    #[must_use]
    pub const fn b(&self) -> Metres {
        self.b
    }

    /// One minus the flattening ratio.
    #[must_use]
    pub const fn one_minus_f(&self) -> f64 {
        self.one_minus_f
    }

    /// The square of the second Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn ep_2(&self) -> f64 {
        self.ep_2
    }

    /// Convert a geodetic Latitude to a reduced Latitude on the
    /// auxiliary sphere.
    /// * `lat` - the geodetic Latitude
    #[must_use]
    pub fn calculate_reduced_latitude(&self, lat: Radians) -> Radians {
        ellipsoid::calculate_reduced_latitude(lat, self.one_minus_f)
    }
}

lazy_static! {
    /// A static instance of the WGS-84 `Ellipsoid`.
    pub static ref WGS84_ELLIPSOID: Ellipsoid = Ellipsoid::wgs84();
}

/// Normalise an angle into the range 0 <= angle < 2π.  
/// Angles in the range -2π to 4π are normalised by adding or subtracting
/// 2π once, as Vincenty's formulae only produce angles in that range.
/// * `angle` - the angle to normalise.
#[must_use]
pub fn normalise_radians(angle: Radians) -> Radians {
    let mut radians = angle.0;
    if radians < 0.0 {
        radians += TAU;
    }
    if TAU <= radians {
        radians -= TAU;
    }
    Radians(radians)
}

/// Convert an azimuth in radians to a compass bearing in degrees.
/// * `azimuth` - the azimuth, clockwise from North.
///
/// returns the azimuth in degrees, 0 <= azimuth < 360.
/// # Examples
/// ```
/// use vincenty_wgs84::{normalise_azimuth, Degrees, Radians};
///
/// assert_eq!(Degrees(270.0), normalise_azimuth(Radians(-core::f64::consts::FRAC_PI_2)));
/// assert_eq!(Degrees(0.0), normalise_azimuth(Radians(core::f64::consts::TAU)));
/// ```
#[must_use]
pub fn normalise_azimuth(azimuth: Radians) -> Degrees {
    let degrees = normalise_radians(azimuth).0.to_degrees();
    // rounding may produce 360° from an angle just below 2π
    Degrees(if 360.0 <= degrees { 0.0 } else { degrees })
}

/// Solve the inverse problem on the WGS-84 `Ellipsoid`: calculate the
/// geodesic length and azimuths between a pair of positions.
/// * `phi1`, `lambda1` - the latitude and longitude of the start position, in degrees.
/// * `phi2`, `lambda2` - the latitude and longitude of the finish position, in degrees.
///
/// returns the length of the geodesic in metres, the azimuth at the start
/// position and the reverse azimuth at the finish position (i.e. the azimuth
/// back to the start position), in degrees.  
/// Coincident positions return (0.0, 0.0, 0.0).
///
/// # Errors
///
/// Returns `Error::SingularGeometry` for antipodal positions and
/// `Error::NonConvergence` if the iteration does not converge, which
/// may occur for nearly antipodal positions.
///
/// # Examples
/// ```
/// use vincenty_wgs84::inverse;
/// use angle_sc::is_within_tolerance;
///
/// // Flinders Peak to Buninyong, Geocentric Datum of Australia Technical Manual
/// let flinders_peak = (-37.951_033_416_666_67, 144.424_867_888_888_88);
/// let buninyong = (-37.652_821_138_888_89, 143.926_495_527_777_77);
///
/// let (distance, azimuth, reverse_azimuth) =
///     inverse(flinders_peak.0, flinders_peak.1, buninyong.0, buninyong.1).unwrap();
/// assert!(is_within_tolerance(54_972.271, distance, 1e-3));
/// assert!(is_within_tolerance(306.868_158, azimuth, 1e-5));
/// assert!(is_within_tolerance(127.173_631, reverse_azimuth, 1e-5));
/// ```
pub fn inverse(
    phi1: f64,
    lambda1: f64,
    phi2: f64,
    lambda2: f64,
) -> Result<(f64, f64, f64), Error> {
    let a = LatLong::new(Degrees(phi1), Degrees(lambda1));
    let b = LatLong::new(Degrees(phi2), Degrees(lambda2));
    let solution = inverse::calculate_distance_and_azimuths(
        &a,
        &b,
        &WGS84_ELLIPSOID,
        &Convergence::default(),
    )?;
    Ok((
        solution.distance().0,
        solution.azimuth().0,
        solution.reverse_azimuth().0,
    ))
}

/// Solve the direct problem on the WGS-84 `Ellipsoid`: calculate the position
/// at a distance along the geodesic from a position with an azimuth.
/// * `phi1`, `lambda1` - the latitude and longitude of the start position, in degrees.
/// * `azimuth` - the azimuth at the start position, in degrees.
/// * `distance` - the length of the geodesic, in metres.
///
/// returns the latitude and longitude of the finish position and the reverse
/// azimuth at the finish position (i.e. the azimuth back to the start
/// position), in degrees.
///
/// # Errors
///
/// Returns `Error::NonConvergence` if the iteration does not converge.
///
/// # Examples
/// ```
/// use vincenty_wgs84::direct;
/// use angle_sc::is_within_tolerance;
///
/// // Flinders Peak to Buninyong, Geocentric Datum of Australia Technical Manual
/// let flinders_peak = (-37.951_033_416_666_67, 144.424_867_888_888_88);
/// let azimuth = 306.868_158_333_333_3;
///
/// let (lat, lon, reverse_azimuth) =
///     direct(flinders_peak.0, flinders_peak.1, azimuth, 54_972.271).unwrap();
/// assert!(is_within_tolerance(-37.652_821_138_888_89, lat, 1e-7));
/// assert!(is_within_tolerance(143.926_495_527_777_77, lon, 1e-7));
/// assert!(is_within_tolerance(127.173_631, reverse_azimuth, 1e-5));
/// ```
pub fn direct(
    phi1: f64,
    lambda1: f64,
    azimuth: f64,
    distance: f64,
) -> Result<(f64, f64, f64), Error> {
    let a = LatLong::new(Degrees(phi1), Degrees(lambda1));
    let solution = direct::calculate_destination(
        &a,
        Degrees(azimuth),
        Metres(distance),
        &WGS84_ELLIPSOID,
        &Convergence::default(),
    )?;
    Ok((
        solution.lat().0,
        solution.lon().0,
        solution.reverse_azimuth().0,
    ))
}
