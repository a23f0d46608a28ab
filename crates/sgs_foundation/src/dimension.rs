// crates/sgs_foundation/src/dimension.rs

//! 物理量纲
//!
//! 每个场都携带一组 SI 基本单位指数：
//!
//! ```text
//! [质量 长度 时间 温度 物质的量 电流 发光强度]
//! ```
//!
//! 加减、取大小、赋值要求两侧量纲完全一致；乘除对指数做加减；
//! 幂运算要求结果指数为整数。
//!
//! 量纲不一致属于编程错误：`assert_same` 直接 panic 并给出两侧量纲，
//! `check_same` 提供返回 `SgsResult` 的版本，用于校验外部输入。
//!
//! # 用法
//!
//! ```
//! use sgs_foundation::dimension::Dimensions;
//!
//! let k = Dimensions::SPECIFIC_ENERGY;
//! // √k 的量纲为速度
//! assert_eq!(k.sqrt(), Dimensions::VELOCITY);
//! ```

use std::fmt;
use std::ops::{Div, Mul};

use serde::{Deserialize, Serialize};

use crate::error::{SgsError, SgsResult};

/// 基本单位数量
pub const N_BASE_UNITS: usize = 7;

/// 量纲（SI 基本单位指数）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dimensions {
    exponents: [i8; N_BASE_UNITS],
}

impl Dimensions {
    /// 无量纲
    pub const DIMLESS: Self = Self::new(0, 0, 0, 0, 0, 0, 0);
    /// 长度 [m]
    pub const LENGTH: Self = Self::new(0, 1, 0, 0, 0, 0, 0);
    /// 面积 [m²]
    pub const AREA: Self = Self::new(0, 2, 0, 0, 0, 0, 0);
    /// 体积 [m³]
    pub const VOLUME: Self = Self::new(0, 3, 0, 0, 0, 0, 0);
    /// 时间 [s]
    pub const TIME: Self = Self::new(0, 0, 1, 0, 0, 0, 0);
    /// 频率 / 应变率 [1/s]
    pub const RATE: Self = Self::new(0, 0, -1, 0, 0, 0, 0);
    /// 速度 [m/s]
    pub const VELOCITY: Self = Self::new(0, 1, -1, 0, 0, 0, 0);
    /// 运动粘性 [m²/s]
    pub const KINEMATIC_VISCOSITY: Self = Self::new(0, 2, -1, 0, 0, 0, 0);
    /// 单位质量能量（湍动能）[m²/s²]
    pub const SPECIFIC_ENERGY: Self = Self::new(0, 2, -2, 0, 0, 0, 0);
    /// 耗散率 [m²/s³]
    pub const DISSIPATION: Self = Self::new(0, 2, -3, 0, 0, 0, 0);
    /// 密度 [kg/m³]
    pub const DENSITY: Self = Self::new(1, -3, 0, 0, 0, 0, 0);
    /// 体积通量 [m³/s]
    pub const VOLUMETRIC_FLUX: Self = Self::new(0, 3, -1, 0, 0, 0, 0);

    /// 由各基本单位指数构造
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        mass: i8,
        length: i8,
        time: i8,
        temperature: i8,
        moles: i8,
        current: i8,
        luminous: i8,
    ) -> Self {
        Self {
            exponents: [mass, length, time, temperature, moles, current, luminous],
        }
    }

    /// 指数数组
    #[inline]
    pub fn exponents(&self) -> [i8; N_BASE_UNITS] {
        self.exponents
    }

    /// 是否无量纲
    #[inline]
    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    /// 幂运算
    ///
    /// # Panics
    ///
    /// 当任一指数乘以 `p` 后不是整数时 panic。
    pub fn powf(self, p: f64) -> Self {
        let mut exponents = [0i8; N_BASE_UNITS];
        for (out, &e) in exponents.iter_mut().zip(self.exponents.iter()) {
            let scaled = f64::from(e) * p;
            let rounded = scaled.round();
            assert!(
                (scaled - rounded).abs() < 1e-9,
                "量纲 {} 的 {} 次幂指数不为整数",
                self,
                p
            );
            *out = rounded as i8;
        }
        Self { exponents }
    }

    /// 整数次幂
    pub fn powi(self, n: i8) -> Self {
        let mut exponents = self.exponents;
        for e in exponents.iter_mut() {
            *e *= n;
        }
        Self { exponents }
    }

    /// 平方根
    ///
    /// # Panics
    ///
    /// 当任一指数为奇数时 panic。
    pub fn sqrt(self) -> Self {
        self.powf(0.5)
    }

    /// 检查量纲一致（可恢复版本）
    pub fn check_same(&self, other: &Self, operation: &'static str) -> SgsResult<()> {
        if self == other {
            Ok(())
        } else {
            Err(SgsError::dimension_mismatch(operation, *self, *other))
        }
    }

    /// 断言量纲一致
    ///
    /// # Panics
    ///
    /// 量纲不一致时 panic。
    #[inline]
    #[track_caller]
    pub fn assert_same(&self, other: &Self, operation: &'static str) {
        if self != other {
            panic!(
                "量纲不一致: {} 左操作数 {}, 右操作数 {}",
                operation, self, other
            );
        }
    }
}

impl Mul for Dimensions {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut exponents = self.exponents;
        for (e, r) in exponents.iter_mut().zip(rhs.exponents.iter()) {
            *e += r;
        }
        Self { exponents }
    }
}

impl Div for Dimensions {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        let mut exponents = self.exponents;
        for (e, r) in exponents.iter_mut().zip(rhs.exponents.iter()) {
            *e -= r;
        }
        Self { exponents }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [m, l, t, k, n, a, cd] = self.exponents;
        write!(f, "[{} {} {} {} {} {} {}]", m, l, t, k, n, a, cd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_div() {
        let nu = Dimensions::KINEMATIC_VISCOSITY;
        let rate = Dimensions::RATE;
        assert_eq!(Dimensions::AREA * rate, nu);
        assert_eq!(nu / Dimensions::LENGTH, Dimensions::VELOCITY);
        assert!((nu / nu).is_dimensionless());
    }

    #[test]
    fn test_powers() {
        let k = Dimensions::SPECIFIC_ENERGY;
        assert_eq!(k.sqrt(), Dimensions::VELOCITY);
        // k^1.5 / δ = 耗散率
        assert_eq!(k.powf(1.5) / Dimensions::LENGTH, Dimensions::DISSIPATION);
        assert_eq!(Dimensions::LENGTH.powi(3), Dimensions::VOLUME);
    }

    #[test]
    #[should_panic(expected = "不为整数")]
    fn test_sqrt_of_odd_exponent_panics() {
        let _ = Dimensions::LENGTH.sqrt();
    }

    #[test]
    fn test_check_same() {
        assert!(Dimensions::LENGTH.check_same(&Dimensions::LENGTH, "add").is_ok());
        let err = Dimensions::LENGTH
            .check_same(&Dimensions::AREA, "add")
            .unwrap_err();
        assert!(matches!(err, SgsError::DimensionMismatch { .. }));
    }

    #[test]
    #[should_panic(expected = "量纲不一致")]
    fn test_assert_same_panics() {
        Dimensions::KINEMATIC_VISCOSITY.assert_same(&Dimensions::LENGTH, "add");
    }

    #[test]
    fn test_display() {
        assert_eq!(Dimensions::DENSITY.to_string(), "[1 -3 0 0 0 0 0]");
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&Dimensions::VELOCITY).unwrap();
        let back: Dimensions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Dimensions::VELOCITY);
    }
}
