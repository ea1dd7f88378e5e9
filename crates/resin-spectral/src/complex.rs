//! Double-precision complex numbers.

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Neg, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::SpectralError;

/// A complex number for FFT operations.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Complex {
    /// Real part.
    pub re: f64,
    /// Imaginary part.
    pub im: f64,
}

impl Complex {
    /// `0 + 0i`.
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// `1 + 0i`.
    pub const ONE: Self = Self::new(1.0, 0.0);
    /// The imaginary unit.
    pub const I: Self = Self::new(0.0, 1.0);

    /// Creates a new complex number.
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Creates a purely real complex number.
    pub const fn from_real(re: f64) -> Self {
        Self::new(re, 0.0)
    }

    /// Creates a purely imaginary complex number.
    pub const fn from_imag(im: f64) -> Self {
        Self::new(0.0, im)
    }

    /// Creates a complex number from polar coordinates.
    pub fn from_polar(mag: f64, phase: f64) -> Self {
        Self::from_angle(phase) * mag
    }

    /// Unit phasor `cos θ + i·sin θ`.
    pub fn from_angle(theta: f64) -> Self {
        Self::new(theta.cos(), theta.sin())
    }

    /// Returns the magnitude (absolute value).
    pub fn mag(&self) -> f64 {
        self.mag_sq().sqrt()
    }

    /// Returns the squared magnitude (avoids sqrt).
    pub fn mag_sq(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// Returns the phase angle.
    pub fn phase(&self) -> f64 {
        self.im.atan2(self.re)
    }

    /// Returns the complex conjugate.
    pub fn conj(&self) -> Self {
        Self::new(self.re, -self.im)
    }

    /// Multiplies both parts by a real factor.
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.re * factor, self.im * factor)
    }

    /// Returns `1 / self`. Zero yields NaN/Inf components.
    pub fn recip(&self) -> Self {
        Self::ONE / *self
    }

    /// Divides by `rhs`, failing instead of producing NaN/Inf when `rhs` is zero.
    pub fn checked_div(&self, rhs: Self) -> Result<Self, SpectralError> {
        if rhs.mag_sq() == 0.0 {
            return Err(SpectralError::ComplexDivisionByZero);
        }
        Ok(*self / rhs)
    }

    /// Raises to an integer power.
    pub fn powi(&self, n: i32) -> Self {
        match n {
            0 => Self::ONE,
            1 => *self,
            -1 => self.recip(),
            2 => *self * *self,
            -2 => (*self * *self).recip(),
            _ => self.powf(n as f64),
        }
    }

    /// Raises to a real power via polar form: `|z|^n · (cos nθ + i·sin nθ)`.
    pub fn powf(&self, n: f64) -> Self {
        let theta = self.phase();
        Self::from_angle(n * theta) * self.mag_sq().powf(n / 2.0)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.re != 0.0, self.im) {
            (true, im) if im > 0.0 => write!(f, "{}+{}i", self.re, im),
            (true, im) if im < 0.0 => write!(f, "{}-{}i", self.re, -im),
            (true, _) => write!(f, "{}", self.re),
            (false, im) if im == 0.0 => write!(f, "0"),
            (false, im) => write!(f, "{}i", im),
        }
    }
}

impl Index<usize> for Complex {
    type Output = f64;

    /// Component access: 0 is the real part, 1 the imaginary part.
    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.re,
            1 => &self.im,
            _ => panic!("complex component index must be 0 or 1, got {index}"),
        }
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Self::from_real(re)
    }
}

impl std::iter::Sum for Complex {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, c| acc + c)
    }
}

impl Neg for Complex {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}

impl Add for Complex {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Div for Complex {
    type Output = Self;
    /// `self × conj(rhs) / |rhs|²`; a zero divisor propagates NaN/Inf.
    fn div(self, rhs: Self) -> Self {
        self * (rhs.conj() / rhs.mag_sq())
    }
}

impl Add<f64> for Complex {
    type Output = Self;
    fn add(self, rhs: f64) -> Self {
        self + Self::from_real(rhs)
    }
}

impl Sub<f64> for Complex {
    type Output = Self;
    fn sub(self, rhs: f64) -> Self {
        self - Self::from_real(rhs)
    }
}

impl Mul<f64> for Complex {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Div<f64> for Complex {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self::new(self.re / rhs, self.im / rhs)
    }
}

impl Add<Complex> for f64 {
    type Output = Complex;
    fn add(self, rhs: Complex) -> Complex {
        Complex::from_real(self) + rhs
    }
}

impl Sub<Complex> for f64 {
    type Output = Complex;
    fn sub(self, rhs: Complex) -> Complex {
        Complex::from_real(self) - rhs
    }
}

impl Mul<Complex> for f64 {
    type Output = Complex;
    fn mul(self, rhs: Complex) -> Complex {
        rhs.scale(self)
    }
}

impl Div<Complex> for f64 {
    type Output = Complex;
    fn div(self, rhs: Complex) -> Complex {
        Complex::from_real(self) / rhs
    }
}

macro_rules! assign_ops {
    ($($trait:ident :: $method:ident => $op:tt),* $(,)?) => {
        $(
            impl $trait for Complex {
                fn $method(&mut self, rhs: Self) {
                    *self = *self $op rhs;
                }
            }

            impl $trait<f64> for Complex {
                fn $method(&mut self, rhs: f64) {
                    *self = *self $op rhs;
                }
            }
        )*
    };
}

assign_ops! {
    AddAssign::add_assign => +,
    SubAssign::sub_assign => -,
    MulAssign::mul_assign => *,
    DivAssign::div_assign => /,
}
