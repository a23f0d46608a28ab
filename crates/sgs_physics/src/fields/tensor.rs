// crates/sgs_physics/src/fields/tensor.rs

//! 对称二阶张量
//!
//! 六分量存储：
//!
//! ```text
//! ┌ xx  xy  xz ┐
//! │ xy  yy  yz │
//! └ xz  yz  zz ┘
//! ```
//!
//! `mag_sqr` 为 Frobenius 范数平方（非对角分量计两次），
//! `double_dot` 为双点积 `A:B = Σ A_ij B_ij`。

use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// 对称张量
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SymmTensor {
    /// xx 分量
    pub xx: f64,
    /// xy 分量
    pub xy: f64,
    /// xz 分量
    pub xz: f64,
    /// yy 分量
    pub yy: f64,
    /// yz 分量
    pub yz: f64,
    /// zz 分量
    pub zz: f64,
}

impl SymmTensor {
    /// 零张量
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);

    /// 单位张量
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 1.0);

    /// 由六个分量构造
    #[inline]
    pub const fn new(xx: f64, xy: f64, xz: f64, yy: f64, yz: f64, zz: f64) -> Self {
        Self {
            xx,
            xy,
            xz,
            yy,
            yz,
            zz,
        }
    }

    /// 对角张量
    #[inline]
    pub const fn diagonal(xx: f64, yy: f64, zz: f64) -> Self {
        Self::new(xx, 0.0, 0.0, yy, 0.0, zz)
    }

    /// 对称部分 `symm(T) = ½(T + Tᵀ)`
    #[inline]
    pub fn symm(t: &DMat3) -> Self {
        // glam 列主序: t.col(j)[i] = T_ij
        Self::new(
            t.x_axis.x,
            0.5 * (t.y_axis.x + t.x_axis.y),
            0.5 * (t.z_axis.x + t.x_axis.z),
            t.y_axis.y,
            0.5 * (t.z_axis.y + t.y_axis.z),
            t.z_axis.z,
        )
    }

    /// `twoSymm(T) = T + Tᵀ`
    #[inline]
    pub fn two_symm(t: &DMat3) -> Self {
        Self::symm(t) * 2.0
    }

    /// 向量自外积 `v ⊗ v`
    #[inline]
    pub fn from_outer(v: DVec3) -> Self {
        Self::new(
            v.x * v.x,
            v.x * v.y,
            v.x * v.z,
            v.y * v.y,
            v.y * v.z,
            v.z * v.z,
        )
    }

    /// 迹
    #[inline]
    pub fn tr(&self) -> f64 {
        self.xx + self.yy + self.zz
    }

    /// 偏量部分 `dev(A) = A - ⅓ tr(A) I`
    #[inline]
    pub fn dev(&self) -> Self {
        let third_tr = self.tr() / 3.0;
        Self::new(
            self.xx - third_tr,
            self.xy,
            self.xz,
            self.yy - third_tr,
            self.yz,
            self.zz - third_tr,
        )
    }

    /// 双点积 `A:B`
    #[inline]
    pub fn double_dot(&self, other: &Self) -> f64 {
        self.xx * other.xx
            + self.yy * other.yy
            + self.zz * other.zz
            + 2.0 * (self.xy * other.xy + self.xz * other.xz + self.yz * other.yz)
    }

    /// Frobenius 范数平方
    #[inline]
    pub fn mag_sqr(&self) -> f64 {
        self.double_dot(self)
    }

    /// Frobenius 范数
    #[inline]
    pub fn mag(&self) -> f64 {
        self.mag_sqr().sqrt()
    }

    /// 转换为完整 3×3 矩阵
    #[inline]
    pub fn to_mat3(&self) -> DMat3 {
        DMat3::from_cols(
            DVec3::new(self.xx, self.xy, self.xz),
            DVec3::new(self.xy, self.yy, self.yz),
            DVec3::new(self.xz, self.yz, self.zz),
        )
    }

    /// 所有分量是否有限
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.xx.is_finite()
            && self.xy.is_finite()
            && self.xz.is_finite()
            && self.yy.is_finite()
            && self.yz.is_finite()
            && self.zz.is_finite()
    }
}

impl Add for SymmTensor {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.xx + rhs.xx,
            self.xy + rhs.xy,
            self.xz + rhs.xz,
            self.yy + rhs.yy,
            self.yz + rhs.yz,
            self.zz + rhs.zz,
        )
    }
}

impl AddAssign for SymmTensor {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for SymmTensor {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.xx - rhs.xx,
            self.xy - rhs.xy,
            self.xz - rhs.xz,
            self.yy - rhs.yy,
            self.yz - rhs.yz,
            self.zz - rhs.zz,
        )
    }
}

impl Neg for SymmTensor {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self * -1.0
    }
}

impl Mul<f64> for SymmTensor {
    type Output = Self;

    #[inline]
    fn mul(self, s: f64) -> Self {
        Self::new(
            self.xx * s,
            self.xy * s,
            self.xz * s,
            self.yy * s,
            self.yz * s,
            self.zz * s,
        )
    }
}

impl Mul<SymmTensor> for f64 {
    type Output = SymmTensor;

    #[inline]
    fn mul(self, t: SymmTensor) -> SymmTensor {
        t * self
    }
}
